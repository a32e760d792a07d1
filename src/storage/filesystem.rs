//! File system access
//!
//! The directory-reading capability used by the listing handler. The disk
//! implementation wraps `std::fs`; tests substitute an in-memory tree.

use std::fs;
use std::io::Result;
use std::path::Path;

/// Kind of a filesystem node as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
    Other,
}

/// One child returned by [`DirectoryReader::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirItem {
    pub name: String,
    pub kind: NodeKind,
}

/// Read-only view of a directory tree.
pub trait DirectoryReader {
    /// Kind of the node at `path`, following symlinks.
    fn stat(&self, path: &Path) -> Result<NodeKind>;

    /// Direct children of `path`, in the order the backend yields them.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirItem>>;
}

/// Reads the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskReader;

impl DirectoryReader for DiskReader {
    fn stat(&self, path: &Path) -> Result<NodeKind> {
        let metadata = fs::metadata(path)?;
        Ok(kind_of(metadata.file_type()))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirItem>> {
        let mut items = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            // DirEntry::file_type does not traverse symlinks
            let kind = kind_of(entry.file_type()?);
            items.push(DirItem {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        Ok(items)
    }
}

fn kind_of(file_type: fs::FileType) -> NodeKind {
    if file_type.is_file() {
        NodeKind::File
    } else if file_type.is_dir() {
        NodeKind::Directory
    } else {
        NodeKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_reader_classifies_children() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let reader = DiskReader;
        assert_eq!(reader.stat(tmp.path()).unwrap(), NodeKind::Directory);
        assert_eq!(reader.stat(&tmp.path().join("a.txt")).unwrap(), NodeKind::File);

        let mut items = reader.read_dir(tmp.path()).unwrap();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            items,
            vec![
                DirItem { name: "a.txt".into(), kind: NodeKind::File },
                DirItem { name: "sub".into(), kind: NodeKind::Directory },
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn disk_reader_does_not_follow_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("target.txt"), "t").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("target.txt"), tmp.path().join("link")).unwrap();

        let items = DiskReader.read_dir(tmp.path()).unwrap();
        let link = items.iter().find(|i| i.name == "link").unwrap();
        assert_eq!(link.kind, NodeKind::Other);
    }

    #[test]
    fn stat_missing_path_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = DiskReader.stat(&tmp.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
