use crate::error::{FetchError, Result};
use std::path::Path;
use tempfile::NamedTempFile;

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| FetchError::from_io(e, path))?;
    }
    Ok(())
}

/// Whether anything (file, directory or symlink) already sits at `path`.
///
/// A dangling symlink counts as taken: writing through it would land
/// somewhere outside the intended target.
pub fn path_is_taken(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Creates an empty staging file in the directory that will hold `target`,
/// so the final rename never crosses a filesystem boundary.
pub fn stage_beside(target: &Path) -> Result<NamedTempFile> {
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    tempfile::Builder::new()
        .prefix(".fetchzip-")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(|e| FetchError::from_io(e, parent))
}

/// Moves a fully written staging file onto `target`, replacing whatever was there.
pub fn commit_staged(staged: NamedTempFile, target: &Path) -> Result<()> {
    staged.as_file().sync_all()?;
    staged
        .persist(target)
        .map_err(|e| FetchError::from_io(e.error, target))?;
    Ok(())
}

/// Applies the permission bits of `mode`. A no-op off Unix.
pub fn set_file_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode & 0o777))
            .map_err(|e| FetchError::from_io(e, path))?;
    }

    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }

    Ok(())
}

/// Permission bits of an existing file, if the platform has them.
pub fn file_mode(path: &Path) -> Option<u32> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .ok()
            .map(|m| m.permissions().mode() & 0o777)
    }

    #[cfg(not(unix))]
    {
        let _ = path;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_exists_creates_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");

        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());

        // second call is a no-op
        ensure_dir_exists(&nested).unwrap();
    }

    #[test]
    fn test_path_is_taken() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("present.txt");
        std::fs::write(&file, b"x").unwrap();

        assert!(path_is_taken(&file));
        assert!(path_is_taken(temp.path()));
        assert!(!path_is_taken(&temp.path().join("absent.txt")));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_taken() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("dangling");
        std::os::unix::fs::symlink(temp.path().join("nowhere"), &link).unwrap();

        assert!(!link.exists());
        assert!(path_is_taken(&link));
    }

    #[test]
    fn test_commit_staged_replaces_target() {
        use std::io::Write;

        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out.bin");
        std::fs::write(&target, b"old content").unwrap();

        let mut staged = stage_beside(&target).unwrap();
        assert_eq!(staged.path().parent(), Some(temp.path()));
        staged.write_all(b"new").unwrap();
        commit_staged(staged, &target).unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
        let leftovers = std::fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_dropped_stage_leaves_nothing() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("never.bin");

        let staged = stage_beside(&target).unwrap();
        drop(staged);

        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
        assert!(!target.exists());
    }

    #[test]
    fn test_stage_beside_missing_parent_fails() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("no-such-dir").join("out.bin");

        assert!(stage_beside(&target).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_set_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("run.sh");
        std::fs::write(&file, b"#!/bin/sh\n").unwrap();

        set_file_mode(&file, 0o100755).unwrap();
        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(file_mode(&file), Some(0o755));
        assert_eq!(file_mode(&temp.path().join("absent")), None);
    }
}
