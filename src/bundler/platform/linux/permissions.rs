//! Permission normalization for the staged tree.
//!
//! Directories become 0755. Regular files whose mode is exactly one of the
//! owner-only modes are opened up for group and other with the same access:
//!
//! | before | after |
//! |--------|-------|
//! | 0700   | 0755  |
//! | 0500   | 0555  |
//! | 0600   | 0644  |
//! | 0400   | 0444  |
//!
//! Every other file mode is left alone, so normalizing twice changes nothing.

use crate::bundler::error::{Error, Result};
use std::path::Path;

/// New mode for a regular file, if it needs one.
pub fn normalized_file_mode(mode: u32) -> Option<u32> {
    match mode & 0o7777 {
        0o700 => Some(0o755),
        0o500 => Some(0o555),
        0o600 => Some(0o644),
        0o400 => Some(0o444),
        _ => None,
    }
}

/// Normalizes permissions under `root`; returns how many entries changed.
#[cfg(unix)]
pub async fn normalize(root: &Path) -> Result<usize> {
    use crate::bundler::error::ErrorExt;
    use std::os::unix::fs::PermissionsExt;

    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut changed = 0;
        for entry in walkdir::WalkDir::new(&root) {
            let entry = entry?;
            let path = entry.path();
            let mode = entry.metadata()?.permissions().mode() & 0o7777;

            let target = if entry.file_type().is_dir() {
                Some(0o755).filter(|m| *m != mode)
            } else if entry.file_type().is_file() {
                normalized_file_mode(mode)
            } else {
                None
            };

            if let Some(target) = target {
                std::fs::set_permissions(path, std::fs::Permissions::from_mode(target))
                    .fs_context("setting permissions", path)?;
                changed += 1;
            }
        }
        log::debug!("normalized permissions on {changed} entries");
        Ok::<_, Error>(changed)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Permission task panicked: {e}")))?
}

/// Permission bits are not meaningful off Unix.
#[cfg(not(unix))]
pub async fn normalize(_root: &Path) -> Result<usize> {
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_mode_table() {
        assert_eq!(normalized_file_mode(0o100700), Some(0o755));
        assert_eq!(normalized_file_mode(0o500), Some(0o555));
        assert_eq!(normalized_file_mode(0o600), Some(0o644));
        assert_eq!(normalized_file_mode(0o400), Some(0o444));
        assert_eq!(normalized_file_mode(0o640), None);
        assert_eq!(normalized_file_mode(0o755), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_normalize_is_idempotent() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().join("stage");
        std::fs::create_dir_all(root.join("bin")).unwrap();
        let cases = [
            ("bin/viewer", 0o700, 0o755),
            ("readme.txt", 0o600, 0o644),
            ("ro.txt", 0o400, 0o444),
            ("group.txt", 0o640, 0o640),
        ];
        for (rel, mode, _) in cases {
            let path = root.join(rel);
            std::fs::write(&path, rel).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        }
        std::fs::set_permissions(root.join("bin"), std::fs::Permissions::from_mode(0o700))
            .unwrap();

        assert!(normalize(&root).await.unwrap() > 0);
        for (rel, _, want) in cases {
            let mode = std::fs::metadata(root.join(rel)).unwrap().permissions().mode() & 0o7777;
            assert_eq!(mode, want, "{rel}");
        }
        let bin = std::fs::metadata(root.join("bin")).unwrap().permissions().mode() & 0o7777;
        assert_eq!(bin, 0o755);

        assert_eq!(normalize(&root).await.unwrap(), 0);
    }
}
