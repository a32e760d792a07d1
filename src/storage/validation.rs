//! Path validation
//!
//! Containment checks that keep every resolved path inside the base
//! directory, plus the extra filename checks applied before writes.

use path_absolutize::Absolutize;
use std::path::{Component, Path, PathBuf};

use crate::error::ApiError;

pub const MAX_PATH_LENGTH: usize = 1024;
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Returns true when `target` resolves to `base` itself or to a path below it.
///
/// Both inputs are normalised lexically first (`.`/`..` segments and trailing
/// separators collapse), so raw strings compare the same as their clean forms.
/// Relative inputs are resolved against the process working directory.
pub fn is_subdirectory<B: AsRef<Path>, T: AsRef<Path>>(base: B, target: T) -> bool {
    let (Ok(base), Ok(target)) = (base.as_ref().absolutize(), target.as_ref().absolutize()) else {
        return false;
    };
    if base == target {
        return true;
    }

    let rel = relative_path(&base, &target);
    !rel.as_os_str().is_empty()
        && !matches!(rel.components().next(), Some(Component::ParentDir))
        && !rel.is_absolute()
}

/// Computes the path leading from `base` to `target`. Both must be absolute.
///
/// When the two paths do not share a root (different drives), no relative
/// form exists and `target` is returned unchanged.
fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();

    if base.first() != target.first() {
        return target.iter().collect();
    }

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push(Component::ParentDir);
    }
    for component in &target[common..] {
        rel.push(component);
    }
    rel
}

/// Joins a logical path under `base` and normalises the result.
///
/// Leading separators on the logical path do not make it absolute; it is
/// always interpreted relative to `base`.
pub fn resolve_logical(base: &Path, logical: &str) -> Result<PathBuf, ApiError> {
    let relative = logical.trim_start_matches(['/', '\\']);
    let joined = base.join(relative);
    let resolved = joined
        .absolutize()
        .map_err(|e| ApiError::path_rejected(logical, format!("Invalid path: {}", e)))?;
    Ok(resolved.into_owned())
}

/// Filename checks applied to write targets on top of containment.
///
/// Only ASCII letters, digits, `_`, `.`, `-` and `/` are accepted, and the
/// path and final segment lengths are capped.
pub fn validate_write_path(path: &Path) -> Result<(), ApiError> {
    let display = path.to_string_lossy();
    let Some(path_str) = path.to_str() else {
        return Err(ApiError::path_rejected(
            display,
            "Invalid characters in filename",
        ));
    };

    if !path_str.chars().all(is_allowed_char) {
        return Err(ApiError::path_rejected(
            path_str,
            format!("Invalid characters in filename: {}", path_str),
        ));
    }
    if path_str.len() > MAX_PATH_LENGTH {
        return Err(ApiError::path_rejected(
            path_str,
            format!("File path too long: {} characters", path_str.len()),
        ));
    }

    let filename = path_str.rsplit('/').next().unwrap_or(path_str);
    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ApiError::path_rejected(
            path_str,
            format!("File name too long: {} characters", filename.len()),
        ));
    }

    Ok(())
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/root/assets";

    #[test]
    fn target_inside_base() {
        assert!(is_subdirectory(BASE, "/root/assets/x/y.png"));
        assert!(is_subdirectory(BASE, "/root/assets/x"));
    }

    #[test]
    fn base_contains_itself() {
        assert!(is_subdirectory(BASE, "/root/assets"));
        assert!(is_subdirectory(BASE, "/root/assets/"));
        assert!(is_subdirectory("/root/assets/", "/root/assets/./"));
    }

    #[test]
    fn target_outside_base() {
        assert!(!is_subdirectory(BASE, "/root/other"));
        assert!(!is_subdirectory(BASE, "/root"));
        assert!(!is_subdirectory(BASE, "/"));
        assert!(!is_subdirectory(BASE, "/root/assets/../secrets"));
        assert!(!is_subdirectory(BASE, "/root/assets/x/../../secrets/key"));
    }

    #[test]
    fn sibling_with_shared_name_prefix_is_outside() {
        assert!(!is_subdirectory(BASE, "/root/assets2"));
        assert!(!is_subdirectory(BASE, "/root/assets2/file.txt"));
    }

    #[test]
    fn dot_dot_prefixed_names_are_inside() {
        assert!(is_subdirectory(BASE, "/root/assets/..hidden"));
    }

    #[test]
    fn raw_forms_normalise_identically() {
        assert!(is_subdirectory("/root//assets", "/root/assets/./a/../b"));
        assert!(is_subdirectory("/root/assets/.", "/root/assets/b/"));
        assert!(!is_subdirectory("/root/assets/b/..", "/root/assets/../b"));
    }

    #[test]
    fn relative_inputs_share_the_working_directory() {
        assert!(is_subdirectory("assets", "assets/a.txt"));
        assert!(is_subdirectory("", "assets"));
        assert!(!is_subdirectory("assets", "other/a.txt"));
        assert!(!is_subdirectory("assets", ""));
    }

    #[test]
    fn relative_path_climbs_out_of_base() {
        let rel = relative_path(Path::new("/a/b/c"), Path::new("/a/x"));
        assert_eq!(rel, PathBuf::from("../../x"));
        let rel = relative_path(Path::new("/a"), Path::new("/a/b/c"));
        assert_eq!(rel, PathBuf::from("b/c"));
    }

    #[test]
    fn resolve_logical_stays_under_base() {
        let base = Path::new(BASE);
        assert_eq!(
            resolve_logical(base, "x/y.png").unwrap(),
            PathBuf::from("/root/assets/x/y.png")
        );
        assert_eq!(
            resolve_logical(base, "/x/y.png").unwrap(),
            PathBuf::from("/root/assets/x/y.png")
        );
        assert_eq!(resolve_logical(base, "").unwrap(), PathBuf::from(BASE));
        assert_eq!(
            resolve_logical(base, "../secrets").unwrap(),
            PathBuf::from("/root/secrets")
        );
    }

    #[test]
    fn write_path_allow_list() {
        assert!(validate_write_path(Path::new("/root/assets/a_b-c.1/d.txt")).is_ok());
        assert!(validate_write_path(Path::new("/root/assets/a b.txt")).is_err());
        assert!(validate_write_path(Path::new("/root/assets/a;rm.txt")).is_err());
        assert!(validate_write_path(Path::new("/root/assets/caf\u{e9}.txt")).is_err());
    }

    #[test]
    fn write_path_length_limits() {
        let long_name = "a".repeat(MAX_FILENAME_LENGTH + 1);
        let err = validate_write_path(&Path::new(BASE).join(&long_name)).unwrap_err();
        assert!(err.to_string().contains("File name too long"));

        let max_name = "a".repeat(MAX_FILENAME_LENGTH);
        assert!(validate_write_path(&Path::new(BASE).join(&max_name)).is_ok());

        let deep = format!("{}/{}", BASE, "abcdefghi/".repeat(110));
        let err = validate_write_path(Path::new(&deep)).unwrap_err();
        assert!(err.to_string().contains("File path too long"));
    }
}
