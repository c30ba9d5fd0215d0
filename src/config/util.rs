//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/posts/drafts/   ← cwd
/// /home/user/notepost.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Same as [`find_config_file`], starting from `start`.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Expand `~` and resolve a relative path against `root`.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());
    if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("notepost.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("notepost.toml")).unwrap();
        assert_eq!(found, dir.path().join("notepost.toml"));
    }

    #[test]
    fn test_find_config_absolute_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(find_config_file_from(dir.path(), &missing).is_none());
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("x");
        fs::create_dir_all(nested.join("notepost.toml")).unwrap();
        fs::write(dir.path().join("notepost.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("notepost.toml")).unwrap();
        assert_eq!(found, dir.path().join("notepost.toml"));
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/srv/blog");
        assert_eq!(
            resolve_path(Path::new("post.md"), root),
            PathBuf::from("/srv/blog/post.md")
        );
        assert_eq!(
            resolve_path(Path::new("/tmp/post.md"), root),
            PathBuf::from("/tmp/post.md")
        );
        assert!(resolve_path(Path::new("~/post.md"), root).is_absolute());
    }
}
