//! File system utilities for staging and packaging.
//!
//! Every operation is idempotent where that makes sense: removing something
//! that does not exist succeeds, creating something that already exists
//! succeeds.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
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
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    fs::write(path, contents).await.fs_context("writing file", path)
}

/// Renames `from` to `to`.
pub async fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.fs_context("renaming", from)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(Error::MissingPath {
            path: from.to_path_buf(),
        });
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Existing files at the destination are overwritten.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::MissingPath {
            path: from.to_path_buf(),
        });
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let dest_path = to.join(entry.path().strip_prefix(&from)?);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)
                    .fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", entry.path())?;
            }
        }
        Ok::<_, Error>(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {e}")))?
}
