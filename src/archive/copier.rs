//! Bounded, chunked streaming copy into archive entries.

use crate::utils::errors::{BackupError, Result};
use std::io::{Read, Write};

/// Fixed read-chunk size.
pub const CHUNK_SIZE: usize = 4096;

/// Per-file size ceiling: 100 GiB.
pub const SINGLE_FILE_BYTE_LIMIT: u64 = 107_374_182_400;

/// Stream `reader` into `writer` in fixed-size chunks, returning the
/// number of bytes copied.
///
/// The ceiling is accounted in whole chunks attempted rather than bytes
/// read, so a short final chunk still costs a full chunk. The end-of-stream
/// probe is free: a stream of exactly the ceiling succeeds, and one chunk
/// beyond it fails however few bytes remain. The chunk that trips the
/// limit is not written. The writer is never closed here; on error the
/// caller owns whatever was already written.
pub fn copy<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<u64> {
    copy_with_limit(reader, writer, SINGLE_FILE_BYTE_LIMIT)
}

fn copy_with_limit<R: Read, W: Write>(reader: &mut R, writer: &mut W, limit: u64) -> Result<u64> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut attempted: u64 = 0;
    let mut copied: u64 = 0;

    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }

        attempted += CHUNK_SIZE as u64;
        if attempted > limit {
            return Err(BackupError::FileTooLarge { limit });
        }

        writer.write_all(&buf[..read])?;
        copied += read as u64;
    }

    Ok(copied)
}
