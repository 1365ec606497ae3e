//! macOS application bundle selection.

use super::common;
use crate::bundler::{
    error::Result, manifest::PathResolver, naming::NamingPolicy, settings::Settings,
};

const LIBRARIES: &str = "../../libraries/universal-darwin/lib_release";

const BUNDLED_LIBRARIES: &[&str] = &[
    "libndofdev.dylib",
    "libopenal.1.dylib",
    "libalut.0.dylib",
    "libglib-2.0.dylib",
    "libgstreamer-0.10.dylib",
    "libxml2.2.dylib",
    "libjpeg.62.dylib",
    "libogg.0.dylib",
    "libvorbis.0.dylib",
];

const GSTREAMER_PLUGINS: &[&str] = &[
    "libgstcoreelements.so",
    "libgstaudioconvert.so",
    "libgstdecodebin2.so",
    "libgstosxaudio.so",
    "libgstosxvideosink.so",
    "libgstplaybin.so",
];

const LOCALIZATIONS: &[&str] = &["English.lproj", "German.lproj", "Japanese.lproj", "Korean.lproj"];

/// Path of the viewer binary inside the staged bundle.
pub fn viewer_binary(settings: &Settings) -> String {
    format!("Contents/MacOS/{}", settings.product().name)
}

/// Selects the `.app` bundle contents, including the `arguments.txt` runtime flags.
pub fn construct(r: &mut PathResolver, settings: &Settings) -> Result<()> {
    let product = &settings.product().name;
    let configuration = &settings.context().configuration;
    let flags = NamingPolicy::for_settings(settings).flags_list()?;

    // The built bundle forms the root of the staged tree.
    r.select_as(&format!("{configuration}/{product}.app"), "")?;

    let mut contents = r.scope("", Some("Contents"));
    contents.select_as(&format!("Info-{product}.plist"), "Info.plist")?;

    {
        let mut libs = contents.scope(LIBRARIES, Some("MacOS"));
        if libs.exists() {
            for lib in BUNDLED_LIBRARIES {
                libs.select(lib)?;
            }
            libs.end("MacOS")?;
        }
    }

    {
        let mut theme = contents.scope("mozilla-theme", Some("MacOS/chrome"));
        if theme.exists() {
            theme.select("classic.jar")?;
            theme.select("classic.manifest")?;
            theme.end("MacOS/chrome")?;
        }
    }

    {
        let mut resources = contents.scope("", Some("Resources"));
        common::viewer_content(&mut resources)?;

        {
            let mut cursors = resources.scope("cursors_mac", None);
            if cursors.exists() {
                cursors.select("*.tif")?;
                cursors.end("cursors_mac")?;
            }
        }

        common::platform_license(&mut resources, "LICENSE-libraries-mac.txt")?;
        common::gather_documents(&mut resources)?;

        resources.select("featuretable_mac.txt")?;
        resources.select("SecondLife.nib")?;
        resources.select("viewer.icns")?;
        for lproj in LOCALIZATIONS {
            resources.select(lproj)?;
        }

        {
            let mut plugins = resources.scope(
                format!("{LIBRARIES}/gstreamer-plugins"),
                Some("lib/gstreamer-plugins"),
            );
            if plugins.exists() {
                for plugin in GSTREAMER_PLUGINS {
                    plugins.select(plugin)?;
                }
                plugins.end("lib/gstreamer-plugins")?;
            }
        }

        resources.select_as(
            &format!("../mac_updater/{configuration}/mac-updater.app"),
            "mac-updater.app",
        )?;

        // Grid and channel arguments read at startup.
        resources.put_in_file(flags, "arguments.txt");

        resources.end("Resources")?;
    }

    contents.end("Contents")
}
