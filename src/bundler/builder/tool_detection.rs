//! External tool availability checking.
//!
//! Every tool a platform variant drives is looked up before the manifest is
//! built, so a missing tool fails that variant without leaving a
//! half-staged tree behind.

use crate::bundler::{
    error::{Context, Result},
    platform::{Platform, windows::nsis::MAKENSIS},
    settings::{Action, Settings},
    utils::process::ToolRunner,
};

/// Tools the run described by `settings` will invoke.
///
/// Copy-only runs need none, except that a macOS build strips the staged
/// viewer when it is packaged or run unpacked.
pub fn required_tools(settings: &Settings) -> Vec<&'static str> {
    let context = settings.context();
    let package = context.wants(Action::Package);
    let mut tools = Vec::new();

    match settings.platform() {
        Platform::Windows => {
            if package {
                tools.push(MAKENSIS);
            }
        }
        Platform::Darwin => {
            if package || context.wants(Action::Unpacked) {
                tools.push("strip");
            }
            if package {
                tools.extend(["hdiutil", "SetFile", "Rez"]);
            }
        }
        Platform::LinuxI686 | Platform::LinuxX86_64 => {
            if package {
                tools.push("tar");
            }
        }
    }

    tools
}

/// Fails with a platform-local error when any required tool is missing.
pub fn ensure_tools<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    for tool in required_tools(settings) {
        runner
            .ensure_available(tool)
            .with_context(|| format!("{} packaging requires {tool}", settings.platform()))?;
        log::debug!("✓ {tool} available");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{BuildContext, SettingsBuilder};

    fn settings(platform: Platform, actions: &[Action]) -> Settings {
        SettingsBuilder::new()
            .context(BuildContext {
                version: vec!["1".into(), "0".into()],
                actions: actions.iter().copied().collect(),
                ..Default::default()
            })
            .platform(platform)
            .source_root("indra/newview")
            .staging_root("build/packaged")
            .build()
            .unwrap()
    }

    #[test]
    fn test_copy_only_needs_no_tools() {
        for platform in [Platform::Windows, Platform::LinuxI686, Platform::Darwin] {
            assert!(required_tools(&settings(platform, &[Action::Copy])).is_empty());
        }
    }

    #[test]
    fn test_package_tools_per_platform() {
        assert_eq!(
            required_tools(&settings(Platform::Windows, &[Action::Package])),
            ["makensis"]
        );
        assert_eq!(
            required_tools(&settings(Platform::Darwin, &[Action::Copy, Action::Package])),
            ["strip", "hdiutil", "SetFile", "Rez"]
        );
        assert_eq!(
            required_tools(&settings(Platform::Darwin, &[Action::Unpacked])),
            ["strip"]
        );
        assert_eq!(
            required_tools(&settings(Platform::LinuxX86_64, &[Action::Package])),
            ["tar"]
        );
    }
}
