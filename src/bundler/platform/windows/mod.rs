//! Windows packaging.
//!
//! The viewer ships as an NSIS installer. Both the installed executable and
//! the installer file are named after the channel and grid, so that release,
//! beta-grid and custom-channel builds can be installed side by side.

pub mod nsis;

use crate::bundler::{
    error::Result,
    naming::{NamingPolicy, ReleaseKind, strip_whitespace},
    settings::BuildContext,
};

/// Name of the installed viewer executable.
///
/// - release: `<product>.exe`
/// - beta grid: `<product>preview.exe`
/// - custom channel: channel with whitespace removed, plus `.exe`
pub fn final_exe(naming: &NamingPolicy<'_>) -> Result<String> {
    let lower = naming.product().lower_name();
    Ok(match naming.release_kind()? {
        ReleaseKind::Release => format!("{lower}.exe"),
        ReleaseKind::BetaGrid => format!("{lower}preview.exe"),
        ReleaseKind::CustomChannel => format!("{}.exe", strip_whitespace(naming.channel()?)),
    })
}

/// File name of the compiled installer, unless overridden by `installer_name`.
pub fn installer_file(naming: &NamingPolicy<'_>, context: &BuildContext) -> Result<String> {
    if let Some(name) = naming.installer_name() {
        return Ok(name.to_string());
    }

    let product = &naming.product().name;
    let dashes = context.version_joined("-");
    Ok(match naming.release_kind()? {
        ReleaseKind::Release => format!("{product}_{dashes}_Setup.exe"),
        ReleaseKind::BetaGrid => {
            format!("{product}_{dashes}_({})_Setup.exe", naming.grid()?.to_uppercase())
        }
        ReleaseKind::CustomChannel => {
            format!("{product}_{dashes}_{}_Setup.exe", naming.channel_oneword()?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::ProductConfig;

    fn context(channel: &str, grid: &str) -> BuildContext {
        BuildContext {
            channel: Some(channel.into()),
            grid: Some(grid.into()),
            version: vec!["1".into(), "2".into(), "0".into(), "7".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_final_exe_three_forms() {
        let product = ProductConfig::default();

        let release = context("Second Life Release", "agni");
        assert_eq!(
            final_exe(&NamingPolicy::new(&release, &product)).unwrap(),
            "imprudence.exe"
        );

        let beta = context("Second Life Release", "aditi");
        assert_eq!(
            final_exe(&NamingPolicy::new(&beta, &product)).unwrap(),
            "imprudencepreview.exe"
        );

        let custom = context("Second Life First Look", "agni");
        assert_eq!(
            final_exe(&NamingPolicy::new(&custom, &product)).unwrap(),
            "SecondLifeFirstLook.exe"
        );
    }

    #[test]
    fn test_installer_file_names() {
        let product = ProductConfig::default();

        let release = context("Second Life Release", "agni");
        assert_eq!(
            installer_file(&NamingPolicy::new(&release, &product), &release).unwrap(),
            "Imprudence_1-2-0-7_Setup.exe"
        );

        let beta = context("Second Life Release", "aditi");
        assert_eq!(
            installer_file(&NamingPolicy::new(&beta, &product), &beta).unwrap(),
            "Imprudence_1-2-0-7_(ADITI)_Setup.exe"
        );

        let mut custom = context("Second Life First Look", "aditi");
        assert_eq!(
            installer_file(&NamingPolicy::new(&custom, &product), &custom).unwrap(),
            "Imprudence_1-2-0-7_FirstLook_Setup.exe"
        );

        custom.installer_name = Some("Custom.exe".into());
        assert_eq!(
            installer_file(&NamingPolicy::new(&custom, &product), &custom).unwrap(),
            "Custom.exe"
        );
    }
}
