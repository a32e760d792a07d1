//! File system storage management
//!
//! Handles sandbox path resolution, listing, and single-file reads and writes.

pub mod filesystem;
pub mod listing;
pub mod operations;
pub mod results;
pub mod sandbox;
pub mod validation;

pub use filesystem::{DirectoryReader, DiskReader};
pub use listing::list_files;
pub use operations::{read_file, write_file};
pub use results::{FileEntry, ListFilesResponse, ReadFileResponse, WriteFileResponse};
pub use sandbox::{ListLimits, Sandbox};
pub use validation::is_subdirectory;
