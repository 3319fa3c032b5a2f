//! Path normalization

use std::path::Path;

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Path of `path` relative to `root`, with `/` separators. Empty for the root itself.
pub fn relative_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => normalize_path(&rel.to_string_lossy()),
        Err(_) => normalize_path(&path.to_string_lossy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_backslashes() {
        assert_eq!(normalize_path(r"src\sub\main.rs"), "src/sub/main.rs");
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/repo");
        assert_eq!(relative_path(root, Path::new("/repo/src/lib.rs")), "src/lib.rs");
        assert_eq!(relative_path(root, Path::new("/repo")), "");
    }
}
