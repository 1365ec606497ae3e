//! NSIS installer script generation.
//!
//! Renders the product's installer template with the version block, the
//! per-release-kind definitions and the file command lists, then writes the
//! result with the UTF-8 BOM NSIS expects.

use super::{commands::file_commands, utils};
use crate::bundler::{
    error::{Context, Result},
    manifest::ManifestEntry,
    naming::{NamingPolicy, ReleaseKind},
    platform::windows::final_exe,
    settings::Settings,
    template::{InstallerTemplate, Substitutions, Token},
};
use std::path::PathBuf;

/// Token values that do not depend on the file lists.
pub fn base_substitutions(settings: &Settings, installer_file: &str) -> Result<Substitutions> {
    let naming = NamingPolicy::for_settings(settings);
    let context = settings.context();
    let grid = naming.grid()?;

    let mut subs = Substitutions::new();
    subs.set(Token::Version, context.version_joined("."))
        .set(Token::VersionShort, context.version_short())
        .set(Token::VersionDashes, context.version_joined("-"))
        .set(Token::FinalExe, final_exe(&naming)?)
        .set(Token::Grid, grid)
        .set(Token::GridCaps, grid.to_uppercase())
        .set(Token::Flags, utils::escape_quotes(&naming.flags_list()?))
        .set(Token::Channel, naming.channel()?)
        .set(Token::ChannelOneword, naming.channel_oneword()?)
        .set(Token::ChannelUnique, naming.channel_unique()?)
        .set(Token::InstallerFile, installer_file)
        .set(Token::Source, settings.source_root().display().to_string());
    Ok(subs)
}

/// `!define` block for the version.
pub fn version_vars(subs: &Substitutions) -> String {
    let get = |t| subs.get(t).unwrap_or_default();
    format!(
        "!define INSTEXE  \"{}\"\n\
         !define VERSION \"{}\"\n\
         !define VERSION_LONG \"{}\"\n\
         !define VERSION_DASHES \"{}\"\n",
        get(Token::FinalExe),
        get(Token::VersionShort),
        get(Token::Version),
        get(Token::VersionDashes),
    )
}

/// Output file, install name, shortcut and caption for the release kind.
pub fn grid_vars(settings: &Settings, subs: &Substitutions) -> Result<String> {
    let naming = NamingPolicy::for_settings(settings);
    let product = &settings.product().name;
    let lower = settings.product().lower_name();
    let get = |t| subs.get(t).unwrap_or_default();

    let (installer, flags) = (get(Token::InstallerFile), get(Token::Flags));
    let (grid, grid_caps) = (get(Token::Grid), get(Token::GridCaps));
    let (channel, oneword) = (get(Token::Channel), get(Token::ChannelOneword));

    let vars = match naming.release_kind()? {
        ReleaseKind::Release => format!(
            "OutFile \"{installer}\"\n\
             !define INSTFLAGS \"{flags}\"\n\
             !define INSTNAME   \"{product}\"\n\
             !define SHORTCUT   \"{product}\"\n\
             !define URLNAME   \"{lower}\"\n\
             Caption \"{product} ${{VERSION}}\"\n"
        ),
        ReleaseKind::BetaGrid => format!(
            "OutFile \"{installer}\"\n\
             !define INSTFLAGS \"{flags}\"\n\
             !define INSTNAME   \"{product}{grid_caps}\"\n\
             !define SHORTCUT   \"{product} ({grid_caps})\"\n\
             !define URLNAME   \"{lower}{grid}\"\n\
             !define UNINSTALL_SETTINGS 1\n\
             Caption \"{product} {grid} ${{VERSION}}\"\n"
        ),
        ReleaseKind::CustomChannel => format!(
            "OutFile \"{installer}\"\n\
             !define INSTFLAGS \"{flags}\"\n\
             !define INSTNAME   \"{product}{oneword}\"\n\
             !define SHORTCUT   \"{channel}\"\n\
             !define URLNAME   \"{lower}\"\n\
             !define UNINSTALL_SETTINGS 1\n\
             Caption \"{channel} ${{VERSION}}\"\n"
        ),
    };
    Ok(vars)
}

/// Fills in every token for the installer template.
pub fn substitutions(
    settings: &Settings,
    entries: &[ManifestEntry],
    installer_file: &str,
) -> Result<Substitutions> {
    let mut subs = base_substitutions(settings, installer_file)?;
    let version = version_vars(&subs);
    let grid = grid_vars(settings, &subs)?;
    let staging = settings.staging_root();

    subs.set(Token::VersionVars, version)
        .set(Token::GridVars, grid)
        .set(Token::InstallFiles, file_commands(staging, entries, true))
        .set(Token::DeleteFiles, file_commands(staging, entries, false));
    Ok(subs)
}

/// Generate NSI installer script from the product template.
///
/// Returns the path of the written script, in the build root.
pub async fn generate_nsi_script(
    settings: &Settings,
    entries: &[ManifestEntry],
    installer_file: &str,
) -> Result<PathBuf> {
    let template_path = settings.source_path_of(&settings.product().nsis_template);
    let template = InstallerTemplate::load(&template_path).await?;

    let subs = substitutions(settings, entries, installer_file)?;
    let script = template
        .render(&subs)
        .with_context(|| format!("rendering {}", template_path.display()))?;

    let nsi_path = settings.build_path_of(format!(
        "{}_setup_tmp.nsi",
        settings.product().lower_name()
    ));
    utils::write_utf8_bom(&nsi_path, &script).await?;
    log::debug!("Wrote NSI script: {}", nsi_path.display());

    Ok(nsi_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        platform::Platform,
        settings::{BuildContext, SettingsBuilder},
    };

    fn settings(channel: &str, grid: &str) -> Settings {
        SettingsBuilder::new()
            .context(BuildContext {
                channel: Some(channel.into()),
                grid: Some(grid.into()),
                version: vec!["1".into(), "2".into(), "0".into(), "7".into()],
                ..Default::default()
            })
            .platform(Platform::Windows)
            .source_root("indra/newview")
            .staging_root("build/packaged")
            .build()
            .unwrap()
    }

    #[test]
    fn test_version_vars() {
        let settings = settings("Second Life Release", "agni");
        let subs = base_substitutions(&settings, "Setup.exe").unwrap();
        assert_eq!(
            version_vars(&subs),
            "!define INSTEXE  \"imprudence.exe\"\n\
             !define VERSION \"1.2.0\"\n\
             !define VERSION_LONG \"1.2.0.7\"\n\
             !define VERSION_DASHES \"1-2-0-7\"\n"
        );
    }

    #[test]
    fn test_grid_vars_three_ways() {
        let release = settings("Second Life Release", "agni");
        let subs = base_substitutions(&release, "R.exe").unwrap();
        let vars = grid_vars(&release, &subs).unwrap();
        assert!(vars.contains("!define INSTNAME   \"Imprudence\"\n"));
        assert!(vars.contains("Caption \"Imprudence ${VERSION}\""));
        assert!(!vars.contains("UNINSTALL_SETTINGS"));

        let beta = settings("Second Life Release", "aditi");
        let subs = base_substitutions(&beta, "B.exe").unwrap();
        let vars = grid_vars(&beta, &subs).unwrap();
        assert!(vars.contains("!define SHORTCUT   \"Imprudence (ADITI)\""));
        assert!(vars.contains("!define URLNAME   \"imprudenceaditi\""));
        assert!(vars.contains("!define UNINSTALL_SETTINGS 1"));

        let custom = settings("Second Life First Look", "agni");
        let subs = base_substitutions(&custom, "C.exe").unwrap();
        let vars = grid_vars(&custom, &subs).unwrap();
        assert!(vars.contains("OutFile \"C.exe\""));
        assert!(vars.contains("!define INSTNAME   \"ImprudenceFirstLook\""));
        assert!(vars.contains(
            "!define INSTFLAGS \"--channel $\\\"Second Life First Look$\\\"  \
             --settings settings_firstlook.xml\""
        ));
    }

    #[test]
    fn test_substitutions_cover_every_token() {
        let settings = settings("Second Life Release", "aditi");
        let subs = substitutions(&settings, &[], "Setup.exe").unwrap();
        for token in Token::ALL {
            assert!(subs.get(token).is_some(), "no value for {token}");
        }
        assert_eq!(subs.get(Token::InstallFiles), Some(""));
    }
}
