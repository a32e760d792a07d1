//! Sandbox root
//!
//! The immutable per-process view of the base directory. Every handler
//! receives it explicitly and resolves caller paths through it.

use log::debug;
use path_absolutize::Absolutize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ApiError;
use crate::storage::validation::{is_subdirectory, resolve_logical};

/// Bounds on recursive listings. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListLimits {
    pub max_depth: Option<usize>,
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Sandbox {
    base_dir: PathBuf,
    strip_prefix: Option<String>,
    limits: ListLimits,
    reject_symlink_escapes: bool,
}

impl Sandbox {
    /// Creates a sandbox rooted at `base_dir`, normalised to absolute form.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> io::Result<Self> {
        let base_dir = base_dir.as_ref().absolutize()?.into_owned();
        Ok(Self {
            base_dir,
            strip_prefix: None,
            limits: ListLimits::default(),
            reject_symlink_escapes: true,
        })
    }

    pub fn with_strip_prefix(mut self, prefix: Option<String>) -> Self {
        self.strip_prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    pub fn with_limits(mut self, limits: ListLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_symlink_check(mut self, enabled: bool) -> Self {
        self.reject_symlink_escapes = enabled;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn limits(&self) -> ListLimits {
        self.limits
    }

    /// Removes the configured prefix from a logical path, if it starts with it.
    pub fn strip_prefix<'a>(&self, logical: &'a str) -> &'a str {
        match &self.strip_prefix {
            Some(prefix) => logical.strip_prefix(prefix.as_str()).unwrap_or(logical),
            None => logical,
        }
    }

    /// Resolves a caller-supplied logical path to an absolute path inside the base directory.
    pub fn resolve(&self, logical: &str) -> Result<PathBuf, ApiError> {
        let resolved = resolve_logical(&self.base_dir, logical)?;
        if !is_subdirectory(&self.base_dir, &resolved) {
            return Err(ApiError::path_rejected(
                resolved.to_string_lossy(),
                format!("Invalid path: {}", logical),
            ));
        }
        if self.reject_symlink_escapes {
            self.check_symlinks(logical, &resolved)?;
        }
        debug!("Resolved {} -> {}", logical, resolved.display());
        Ok(resolved)
    }

    /// Follows symlinks along `resolved` and rejects it if the real location
    /// lies outside the real base directory.
    fn check_symlinks(&self, logical: &str, resolved: &Path) -> Result<(), ApiError> {
        let canonical_base = fs::canonicalize(&self.base_dir)?;

        let mut probe = resolved;
        let real = loop {
            match fs::canonicalize(probe) {
                Ok(real) => break real,
                // not there yet (or unnameable): check the nearest ancestor instead
                Err(_) => {
                    // a dangling link would be followed by a later write
                    if fs::symlink_metadata(probe).is_ok_and(|m| m.file_type().is_symlink()) {
                        return Err(ApiError::path_rejected(
                            resolved.to_string_lossy(),
                            format!("Invalid path: {}", logical),
                        ));
                    }
                    match probe.parent() {
                        Some(parent) => probe = parent,
                        None => return Ok(()),
                    }
                }
            }
        };

        if real.starts_with(&canonical_base) {
            Ok(())
        } else {
            Err(ApiError::path_rejected(
                resolved.to_string_lossy(),
                format!("Invalid path: {} (symbolic link leaves the base directory)", logical),
            ))
        }
    }
}
