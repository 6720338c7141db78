//! File system utilities for bundle staging.
//!
//! Provides copy operations with automatic directory creation, symlink
//! preservation, idempotent removal and a depth-limited, sorted directory walk.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{} does not exist", from.display())));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{} is not a file", from.display())));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Streams `reader` into a new file at `to`, creating parent directories.
pub async fn copy_stream<R>(reader: &mut R, to: &Path) -> Result<u64>
where
    R: tokio::io::AsyncRead + Unpin + ?Sized,
{
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    let mut file = fs::File::create(to).await.fs_context("creating file", to)?;
    tokio::io::copy(reader, &mut file)
        .await
        .fs_context("writing file", to)
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{} does not exist", from.display())));
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!("{} is not a directory", from.display())));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
        }

        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())
                    .fs_context("reading symlink", entry.path())?;
                let link = if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                };
                link.fs_context("creating symlink", &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file to", &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {e}")))?
}

/// Lists entries below `root` down to `max_depth`, sorted by file name at
/// every level. `root` itself is not included.
pub fn walk(root: &Path, max_depth: usize) -> Result<Vec<walkdir::DirEntry>> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        entries.push(entry?);
    }
    Ok(entries)
}

/// Files below `root` (any depth) whose name ends with `suffix`, sorted by path.
pub fn files_with_suffix(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = walk(root, usize::MAX)?
        .into_iter()
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(suffix))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copy_dir_copies_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(src.join("a/b")).unwrap();
        std::fs::write(src.join("a/b/file.txt"), "x").unwrap();

        let dst = dir.path().join("out/copy");
        copy_dir(&src, &dst).await.unwrap();
        assert_eq!(std::fs::read_to_string(dst.join("a/b/file.txt")).unwrap(), "x");
    }

    #[tokio::test]
    async fn test_copy_file_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(&dir.path().join("nope"), &dir.path().join("dst"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_create_dir_all_with_erase_empties_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("scratch");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("stale.plist"), "old").unwrap();

        create_dir_all(&target, true).await.unwrap();
        assert!(target.is_dir());
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 0);
        remove_dir_all(&dir.path().join("never-existed")).await.unwrap();
    }

    #[tokio::test]
    async fn test_copy_stream_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let to = dir.path().join("deep/PkgInfo");
        let mut reader: &[u8] = b"APPL????";
        let written = copy_stream(&mut reader, &to).await.unwrap();
        assert_eq!(written, 8);
        assert_eq!(std::fs::read(&to).unwrap(), b"APPL????");
    }

    #[test]
    fn test_walk_depth_and_suffix_filter() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        std::fs::write(dir.path().join("b/nested/x.plist"), "").unwrap();
        std::fs::write(dir.path().join("a.plist"), "").unwrap();
        std::fs::write(dir.path().join("c.txt"), "").unwrap();

        let top: Vec<_> = walk(dir.path(), 1)
            .unwrap()
            .into_iter()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(top, ["a.plist", "b", "c.txt"]);

        let plists = files_with_suffix(dir.path(), ".plist").unwrap();
        assert_eq!(
            plists,
            [dir.path().join("a.plist"), dir.path().join("b/nested/x.plist")]
        );
    }
}
