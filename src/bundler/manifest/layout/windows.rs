//! Windows file selection.

use super::common;
use crate::bundler::{
    error::Result, manifest::PathResolver, naming::NamingPolicy, platform::windows::final_exe,
    settings::Settings,
};

const LIBRARIES: &str = "../../libraries/i686-win32/lib/release";

/// Selects the Windows install tree, with the viewer renamed to its channel executable.
pub fn construct(r: &mut PathResolver, settings: &Settings) -> Result<()> {
    let naming = NamingPolicy::for_settings(settings);
    let exe = final_exe(&naming)?;
    let bin = format!("{}-bin.exe", settings.product().lower_name());

    common::viewer_content(r)?;

    // The viewer binary comes from whichever configuration was built last.
    let candidates: Vec<String> = ["debug", "release", "relwithdebinfo"]
        .iter()
        .map(|config| format!("{config}/{bin}"))
        .collect();
    let candidates: Vec<&str> = candidates.iter().map(String::as_str).collect();
    let binary = r.find_existing(&candidates)?;
    r.select_as(binary, &exe)?;

    common::gather_documents(r)?;
    common::platform_license(r, "LICENSE-libraries-win32.txt")?;

    r.select("featuretable.txt")?;
    r.select("dbghelp.dll")?;

    {
        let mut s = r.scope(LIBRARIES, Some(""));
        if s.exists() {
            for dll in ["openjpeg.dll", "openal32.dll", "alut.dll"] {
                s.select(dll)?;
            }
            for dll in ["nspr4.dll", "nss3.dll", "xpcom.dll", "xul.dll"] {
                s.select(dll)?;
            }
            s.end("")?;
        }
    }

    {
        let configuration = settings.context().configuration.as_str();
        let mut s = r.scope(configuration, Some(""));
        if s.exists() {
            let (crt, manifest) = if configuration.eq_ignore_ascii_case("debug") {
                (["msvcr80d.dll", "msvcp80d.dll"], "Microsoft.VC80.DebugCRT.manifest")
            } else {
                (["msvcr80.dll", "msvcp80.dll"], "Microsoft.VC80.CRT.manifest")
            };
            for dll in crt {
                s.select(dll)?;
            }
            s.select(manifest)?;
            s.end("")?;
        }
    }

    {
        let mut s = r.scope("app_settings/mozilla", None);
        if s.exists() {
            for pattern in [
                "chrome/*.*",
                "components/*.*",
                "greprefs/*.*",
                "plugins/*.*",
                "res/*.*",
                "res/*/*",
            ] {
                s.select(pattern)?;
            }
            s.end("app_settings/mozilla")?;
        }
    }

    // The runtime config must carry the executable's name.
    r.select_as("SecondLife.exe.config", &format!("{exe}.config"))?;

    {
        let mut s = r.scope("vivox-runtime/i686-win32", Some(""));
        if s.exists() {
            s.select("wrap_oal.dll")?;
            s.end("")?;
        }
    }

    let updater = r.find_existing(&[
        "../win_updater/debug/windows-updater.exe",
        "../win_updater/release/windows-updater.exe",
        "../win_updater/relwithdebinfo/windows-updater.exe",
    ])?;
    r.select_as(updater, "updater.exe")?;

    Ok(())
}
