//! Windows NSIS installer creation.
//!
//! # Module Organization
//!
//! - `commands` - install/uninstall file command lists
//! - `script` - NSI script generation from the product template
//! - `build` - makensis execution
//! - `utils` - path conversion, escaping, BOM output

mod build;
mod commands;
mod script;
mod utils;

pub use build::MAKENSIS;
pub use commands::{delete_commands, file_commands, install_commands};
pub use script::{generate_nsi_script, grid_vars, substitutions, version_vars};

use super::installer_file;
use crate::bundler::{
    error::Result,
    manifest::Manifest,
    naming::NamingPolicy,
    settings::Settings,
    utils::process::ToolRunner,
};
use std::path::PathBuf;

/// Builds the NSIS installer for a staged tree.
///
/// # Process
///
/// 1. Derive the installer file name (three-way rule or explicit override)
/// 2. Render the product template with version, grid and file command blocks
/// 3. Write the script into the build root
/// 4. Compile it with makensis
///
/// # Returns
///
/// Path of the compiled installer.
pub async fn package_finish<R: ToolRunner>(
    settings: &Settings,
    manifest: &Manifest,
    runner: &R,
) -> Result<PathBuf> {
    let naming = NamingPolicy::for_settings(settings);
    let installer = installer_file(&naming, settings.context())?;
    log::info!("Building NSIS installer {installer}");

    let entries = manifest.finalize();
    let nsi_path = generate_nsi_script(settings, &entries, &installer).await?;
    build::run_makensis(runner, &nsi_path).await?;

    let installer_path = nsi_path
        .parent()
        .map(|dir| dir.join(&installer))
        .unwrap_or_else(|| PathBuf::from(&installer));
    log::info!("✓ Created NSIS installer: {}", installer_path.display());

    Ok(installer_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        error::Error,
        manifest::ManifestEntry,
        platform::Platform,
        settings::{BuildContext, SettingsBuilder},
        utils::process::testing::FakeRunner,
    };
    use tempfile::TempDir;

    const TEMPLATE: &str = "{{version_vars}}\n\
                            {{grid_vars}}\n\
                            !define SOURCE \"{{source}}\"\n\
                            Section\n{{install_files}}SectionEnd\n\
                            Section Uninstall\n{{delete_files}}SectionEnd\n";

    fn setup(dir: &TempDir) -> Settings {
        let source = dir.path().join("source");
        let template = source.join("installers/windows/installer_template.nsi");
        std::fs::create_dir_all(template.parent().unwrap()).unwrap();
        std::fs::write(&template, TEMPLATE).unwrap();

        let staging = dir.path().join("build/packaged");
        std::fs::create_dir_all(staging.join("skins")).unwrap();
        std::fs::write(staging.join("imprudence.exe"), "exe").unwrap();
        std::fs::write(staging.join("skins/paths.xml"), "xml").unwrap();

        SettingsBuilder::new()
            .context(BuildContext {
                channel: Some("Second Life Release".into()),
                grid: Some("agni".into()),
                version: vec!["1".into(), "2".into(), "0".into(), "7".into()],
                ..Default::default()
            })
            .platform(Platform::Windows)
            .source_root(&source)
            .staging_root(&staging)
            .build_root(dir.path().join("build"))
            .build()
            .unwrap()
    }

    fn manifest() -> Manifest {
        let mut manifest = Manifest::new();
        for rel in ["imprudence.exe", "skins/paths.xml"] {
            manifest.record(ManifestEntry {
                included: true,
                source_path: rel.into(),
                dest_path: rel.into(),
            });
        }
        manifest
    }

    #[tokio::test]
    async fn test_package_finish_renders_and_compiles() {
        let dir = TempDir::new().unwrap();
        let settings = setup(&dir);
        let runner = FakeRunner::new();

        let installer = package_finish(&settings, &manifest(), &runner).await.unwrap();
        assert_eq!(
            installer,
            dir.path().join("build/Imprudence_1-2-0-7_Setup.exe")
        );

        let nsi = dir.path().join("build/imprudence_setup_tmp.nsi");
        let bytes = std::fs::read(&nsi).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        let script = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(script.contains("OutFile \"Imprudence_1-2-0-7_Setup.exe\""));
        assert!(script.contains("SetOutPath $INSTDIR\\skins\n"));
        assert!(script.contains("Delete $INSTDIR\\imprudence.exe\n"));
        assert!(script.contains("RMDir $INSTDIR\\skins\n"));

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "makensis");
        assert_eq!(calls[0].args.last().unwrap(), nsi.to_str().unwrap());
    }

    #[tokio::test]
    async fn test_makensis_failure_is_platform_local() {
        let dir = TempDir::new().unwrap();
        let settings = setup(&dir);
        let runner = FakeRunner::new().failing("makensis");

        let err = package_finish(&settings, &manifest(), &runner)
            .await
            .unwrap_err();
        assert!(err.is_platform_local());
        assert!(matches!(err, Error::Context(_, _)));
    }

    #[tokio::test]
    async fn test_unknown_template_placeholder_fails_before_makensis() {
        let dir = TempDir::new().unwrap();
        let settings = setup(&dir);
        std::fs::write(
            settings.source_path_of("installers/windows/installer_template.nsi"),
            "{{version}} {{publisher}}",
        )
        .unwrap();
        let runner = FakeRunner::new();

        let err = package_finish(&settings, &manifest(), &runner)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("publisher"));
        assert!(runner.calls().is_empty());
    }
}
