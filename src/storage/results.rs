//! Storage result types
//!
//! Defines result structures returned by storage operations.

use serde::Serialize;

/// One file found by a listing, with paths relative to the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub directory: String,
    pub filepath: String,
    pub filename: String,
    pub basename: String,
    pub extension: String,
}

impl FileEntry {
    /// Builds the entry for `filename` inside the logical `directory`.
    ///
    /// The extension is everything after the first dot, so
    /// `attribution.meta.md` has extension `meta.md`.
    pub fn new(directory: &str, filename: &str) -> Self {
        let (basename, extension) = filename.split_once('.').unwrap_or((filename, ""));
        Self {
            directory: directory.to_string(),
            filepath: join_logical(directory, filename),
            filename: filename.to_string(),
            basename: basename.to_string(),
            extension: extension.to_string(),
        }
    }
}

/// Joins logical path segments with `/`, without a leading separator for
/// entries at the base directory itself.
pub fn join_logical(directory: &str, name: &str) -> String {
    if directory.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", directory, name)
    }
}

/// Result of a list operation
#[derive(Debug, Clone, Serialize)]
pub struct ListFilesResponse {
    pub entries: Vec<FileEntry>,
}

/// Result of a read operation: the transformed body and its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFileResponse {
    pub body: String,
    pub content_type: &'static str,
}

/// Result of a write operation
#[derive(Debug, Clone, Serialize)]
pub struct WriteFileResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_starts_after_first_dot() {
        let entry = FileEntry::new("docs", "attribution.meta.md");
        assert_eq!(entry.basename, "attribution");
        assert_eq!(entry.extension, "meta.md");
        assert_eq!(entry.filepath, "docs/attribution.meta.md");
        assert_eq!(entry.directory, "docs");
    }

    #[test]
    fn name_without_dot_has_empty_extension() {
        let entry = FileEntry::new("", "README");
        assert_eq!(entry.basename, "README");
        assert_eq!(entry.extension, "");
        assert_eq!(entry.filepath, "README");
    }

    #[test]
    fn dotfiles_have_empty_basename() {
        let entry = FileEntry::new("a", ".gitignore");
        assert_eq!(entry.basename, "");
        assert_eq!(entry.extension, "gitignore");
    }

    #[test]
    fn entry_serialises_with_wire_field_names() {
        let value = serde_json::to_value(FileEntry::new("a", "b.png")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "directory": "a",
                "filepath": "a/b.png",
                "filename": "b.png",
                "basename": "b",
                "extension": "png"
            })
        );
    }
}
