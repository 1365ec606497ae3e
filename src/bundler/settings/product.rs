//! Product-level naming constants.

use std::path::PathBuf;

/// Product branding and canonical defaults.
///
/// These values are fixed per product rather than per build. They can be
/// overridden from a TOML file:
///
/// ```toml
/// [product]
/// name = "Imprudence"
/// default_channel = "Second Life Release"
/// default_grid = "agni"
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    /// Product name used in installer, image and archive names.
    pub name: String,

    /// Canonical channel; builds on it are "release" builds.
    pub default_channel: String,

    /// Canonical grid; builds on it carry no grid flags.
    pub default_grid: String,

    /// Brand substring removed from channel names by `channel_unique`.
    pub brand_token: String,

    /// Helper URI for non-default grids; `{grid}` is replaced by the grid name.
    pub helper_uri_template: String,

    /// DMG volume name.
    ///
    /// The shipped `.DS_Store` files position icons by volume name, so this
    /// must not vary between channels.
    pub volume_name: String,

    /// NSIS installer template, relative to the source root.
    pub nsis_template: PathBuf,

    /// Directory holding per-channel DMG resources, relative to the source root.
    pub dmg_template_dir: PathBuf,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            name: "Imprudence".into(),
            default_channel: "Second Life Release".into(),
            default_grid: "agni".into(),
            brand_token: "Second Life".into(),
            helper_uri_template: "http://preview-{grid}.secondlife.com/helpers/".into(),
            volume_name: "Imprudence Installer".into(),
            nsis_template: PathBuf::from("installers/windows/installer_template.nsi"),
            dmg_template_dir: PathBuf::from("installers/darwin"),
        }
    }
}

impl ProductConfig {
    /// Lowercase product name, used for executable names.
    pub fn lower_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Helper URI for the given grid.
    pub fn helper_uri(&self, grid: &str) -> String {
        self.helper_uri_template.replace("{grid}", grid)
    }
}
