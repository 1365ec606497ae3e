//! Linux tree selection, shared by both architectures.

use super::common;
use crate::bundler::{
    error::Result,
    manifest::PathResolver,
    naming::NamingPolicy,
    platform::Platform,
    settings::Settings,
};

const I686_LIBRARIES: &[&str] = &[
    "libapr-1.so.0",
    "libaprutil-1.so.0",
    "libdb-4.2.so",
    "libexpat.so.1",
    "libSDL-1.2.so.0",
    "libELFIO.so",
    "libopenal.so.1",
    "libalut.so",
    "libogg.so.0",
    "libvorbis.so.0",
    "libxml2.so.2",
];

/// Selects the Linux tarball tree, including the `gridargs.dat` runtime flags.
pub fn construct(r: &mut PathResolver, settings: &Settings) -> Result<()> {
    let lower = settings.product().lower_name();
    let flags = NamingPolicy::for_settings(settings).flags_list()?;

    common::viewer_content(r)?;

    r.select_as(&format!("res/{lower}_icon.png"), &format!("{lower}_icon.png"))?;
    {
        let mut tools = r.scope("linux_tools", Some(""));
        if tools.exists() {
            tools.select_as("wrapper.sh", &lower)?;
            tools.select("handle_secondlifeprotocol.sh")?;
            tools.select("register_secondlifeprotocol.sh")?;
            tools.end("")?;
        }
    }

    common::gather_documents(r)?;
    common::platform_license(r, "LICENSE-libraries-linux.txt")?;

    // Grid and channel arguments read by the wrapper script.
    r.put_in_file(flags, "gridargs.dat");

    r.select_as(
        &format!("{lower}-stripped"),
        &format!("bin/do-not-directly-run-{lower}-bin"),
    )?;
    r.select_as("linux_tools/launch_url.sh", "launch_url.sh")?;
    {
        let mut sdl = r.scope("res-sdl", None);
        if sdl.exists() {
            sdl.select("*")?;
            sdl.end("res-sdl")?;
        }
    }
    r.select("featuretable_linux.txt")?;

    match settings.platform() {
        Platform::LinuxI686 => {
            r.select("app_settings/mozilla-runtime-linux-i686")?;
            let mut lib = r.scope("../../libraries/i686-linux/lib_release_client", Some("lib"));
            if lib.exists() {
                for name in I686_LIBRARIES {
                    lib.select(name)?;
                }
                lib.select_as("libuuid.so", "libuuid.so.1")?;
                lib.select_as("libopenjpeg.so.1.3.0", "libopenjpeg.so.1.3")?;
                lib.end("lib")?;
            }
        }
        _ => {
            r.optional("secondlife-i686.supp", None)?;
        }
    }

    Ok(())
}
