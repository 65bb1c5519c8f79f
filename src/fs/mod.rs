//! Filesystem traversal and filtering.

pub mod skip;
pub mod walker;
