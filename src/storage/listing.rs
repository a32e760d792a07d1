//! Directory listing
//!
//! Enumerates the files under a logical directory, optionally descending into
//! subdirectories. Entry paths always stay relative to the base directory.

use log::{debug, info};
use std::io;
use std::path::Path;

use crate::error::ApiError;
use crate::protocol::ListFilesRequest;
use crate::storage::filesystem::{DirectoryReader, NodeKind};
use crate::storage::results::{FileEntry, ListFilesResponse, join_logical};
use crate::storage::sandbox::{ListLimits, Sandbox};

/// Lists the files in the requested directory.
///
/// The configured prefix is stripped from the logical path before it is
/// resolved. Subdirectories are expanded in place, depth first, when the
/// request is recursive; otherwise they are skipped. Symlinks are never followed.
pub fn list_files<R: DirectoryReader>(
    sandbox: &Sandbox,
    reader: &R,
    request: &ListFilesRequest,
) -> Result<ListFilesResponse, ApiError> {
    let logical = sandbox.strip_prefix(&request.path).trim_end_matches('/');
    let dir_path = sandbox.resolve(logical)?;

    match reader.stat(&dir_path) {
        Ok(NodeKind::Directory) => {}
        Ok(_) => return Err(ApiError::NotADirectory(logical.to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound(logical.to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    let mut walk = Walk {
        reader,
        limits: sandbox.limits(),
        recursive: request.recursive.unwrap_or(false),
        entries: Vec::new(),
    };
    walk.visit(&dir_path, logical, 0)?;

    info!(
        "Listed {} (real: {}) - {} files",
        logical,
        dir_path.display(),
        walk.entries.len()
    );

    Ok(ListFilesResponse {
        entries: walk.entries,
    })
}

struct Walk<'a, R> {
    reader: &'a R,
    limits: ListLimits,
    recursive: bool,
    entries: Vec<FileEntry>,
}

impl<R: DirectoryReader> Walk<'_, R> {
    fn visit(&mut self, dir: &Path, logical_dir: &str, depth: usize) -> Result<(), ApiError> {
        for item in self.reader.read_dir(dir)? {
            match item.kind {
                NodeKind::File => self.push(FileEntry::new(logical_dir, &item.name))?,
                NodeKind::Directory if self.recursive => {
                    if self.limits.max_depth.is_some_and(|max| depth >= max) {
                        debug!("Not descending into {}: depth limit", item.name);
                        continue;
                    }
                    let sub_logical = join_logical(logical_dir, &item.name);
                    self.visit(&dir.join(&item.name), &sub_logical, depth + 1)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn push(&mut self, entry: FileEntry) -> Result<(), ApiError> {
        if let Some(max) = self.limits.max_entries {
            if self.entries.len() >= max {
                return Err(ApiError::LimitExceeded(format!(
                    "listing exceeds {} entries",
                    max
                )));
            }
        }
        self.entries.push(entry);
        Ok(())
    }
}
