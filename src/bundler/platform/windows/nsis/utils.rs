//! NSIS utility functions.
//!
//! Path conversion, string escaping and file output for NSI scripts.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Converts a path to NSIS form: backslash separators, no trailing separator.
pub fn nsis_path(path: &Path) -> String {
    let path = path.to_string_lossy().replace('/', "\\");
    path.trim_end_matches('\\').to_string()
}

/// `$INSTDIR` joined with a relative path.
pub fn install_path(relative: &Path) -> String {
    if relative.as_os_str().is_empty() {
        "$INSTDIR".to_string()
    } else {
        format!("$INSTDIR\\{}", nsis_path(relative))
    }
}

/// Escapes double quotes for use inside an NSIS string.
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "$\\\"")
}

/// Write file with UTF-8 BOM (required by NSIS).
///
/// NSIS requires installer scripts to be encoded with UTF-8 BOM (byte order mark).
/// This function writes the BOM (EF BB BF) followed by the content.
pub async fn write_utf8_bom(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating NSI script directory", parent)?;
    }

    let mut file = tokio::fs::File::create(path)
        .await
        .fs_context("creating NSI script file", path)?;

    file.write_all(&[0xEF, 0xBB, 0xBF])
        .await
        .fs_context("writing UTF-8 BOM", path)?;
    file.write_all(content.as_bytes())
        .await
        .fs_context("writing NSI content", path)?;
    file.flush().await.fs_context("flushing NSI file", path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nsis_paths() {
        assert_eq!(install_path(Path::new("")), "$INSTDIR");
        assert_eq!(
            install_path(Path::new("skins/default/xui")),
            "$INSTDIR\\skins\\default\\xui"
        );
        assert_eq!(nsis_path(Path::new("app_settings/")), "app_settings");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(
            escape_quotes("--channel \"Second Life Beta\""),
            "--channel $\\\"Second Life Beta$\\\""
        );
    }

    #[tokio::test]
    async fn test_write_utf8_bom() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("setup.nsi");
        write_utf8_bom(&path, "Name x").await.unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(&bytes[3..], b"Name x");
    }
}
