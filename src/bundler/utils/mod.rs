//! Filesystem and process helpers shared by the packagers.

pub mod fs;
pub mod process;
