//! Product configuration loading.
//!
//! Product constants (name, canonical channel and grid, brand token, DMG
//! volume name, template locations) rarely change between builds and are
//! read from a TOML file with a `[product]` table. Omitted keys keep their
//! defaults.

use crate::bundler::ProductConfig;
use crate::error::{BundlerError, CliError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct ProductFile {
    #[serde(default)]
    product: ProductConfig,
}

/// Load product constants from a TOML file.
///
/// A file without a `[product]` table yields the defaults.
pub fn load_product_config(path: &Path) -> Result<ProductConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_product_config".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    parse_product_config(&contents).map_err(|error| BundlerError::Toml {
        path: path.to_path_buf(),
        error,
    })
}

fn parse_product_config(contents: &str) -> std::result::Result<ProductConfig, toml::de::Error> {
    let file: ProductFile = toml::from_str(contents)?;
    log::debug!("Loaded product configuration for {}", file.product.name);
    Ok(file.product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_partial_table_keeps_defaults() {
        let product = parse_product_config(
            "[product]\nname = \"Kokua\"\nvolume_name = \"Kokua Installer\"\n",
        )
        .unwrap();
        assert_eq!(product.name, "Kokua");
        assert_eq!(product.lower_name(), "kokua");
        assert_eq!(product.volume_name, "Kokua Installer");
        assert_eq!(product.default_grid, "agni");
        assert_eq!(product.dmg_template_dir, PathBuf::from("installers/darwin"));
    }

    #[test]
    fn test_missing_table_is_default() {
        let product = parse_product_config("").unwrap();
        assert_eq!(product.name, "Imprudence");
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("product.toml");
        std::fs::write(&path, "[product]\nname = 3\n").unwrap();
        let err = load_product_config(&path).unwrap_err();
        assert!(matches!(err, BundlerError::Toml { .. }));
        assert!(err.to_string().contains("product.toml"));

        let missing = load_product_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, BundlerError::Cli(CliError::ExecutionFailed { .. })));
    }
}
