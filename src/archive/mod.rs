//! Archive construction: bounded streaming copy and zip building.

pub mod builder;
pub mod copier;

pub use builder::{build, ArchiveSummary};
