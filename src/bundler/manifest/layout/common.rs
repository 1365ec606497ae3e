//! Content shared by every platform.

use crate::bundler::{error::Result, manifest::PathResolver};

/// Settings, character data, fonts, skins and the GPU table.
pub fn viewer_content(r: &mut PathResolver) -> Result<()> {
    r.exclude("*.svn*")?;
    r.select_as(
        "../../scripts/messages/message_template.msg",
        "app_settings/message_template.msg",
    )?;
    r.select_as("../../etc/message.xml", "app_settings/message.xml")?;

    {
        let mut s = r.scope("app_settings", None);
        if s.exists() {
            s.exclude("logcontrol.xml")?;
            s.exclude("logcontrol-dev.xml")?;
            for pattern in ["*.pem", "*.ini", "*.xml", "*.db2"] {
                s.select(pattern)?;
            }
            // whole directories
            s.select("shaders")?;
            s.select("windlight")?;
            s.end("app_settings")?;
        }
    }

    {
        let mut s = r.scope("character", None);
        if s.exists() {
            for pattern in ["*.llm", "*.xml", "*.tga"] {
                s.select(pattern)?;
            }
            s.end("character")?;
        }
    }

    {
        let mut s = r.scope("fonts", None);
        if s.exists() {
            s.select("LiberationSans-Bold.ttf")?;
            s.select("LiberationSans-Regular.ttf")?;
            s.select("VeraMono.ttf")?;
            s.select("*.txt")?;
            s.end("fonts")?;
        }
    }

    {
        let mut skins = r.scope("skins", None);
        if skins.exists() {
            skins.select("paths.xml")?;
            {
                let mut textures = skins.scope("*/textures", None);
                if textures.exists() {
                    for pattern in ["*.tga", "*.j2c", "*.jpg", "*.png", "textures.xml"] {
                        textures.select(pattern)?;
                    }
                    textures.end("*/textures")?;
                }
            }
            skins.select("*/xui/*/*.xml")?;
            skins.select("*/*.xml")?;
            {
                let mut html = skins.scope("*/html", None);
                if html.exists() {
                    for pattern in ["*.png", "*/*/*.html", "*/*/*.gif"] {
                        html.select(pattern)?;
                    }
                    html.end("*/html")?;
                }
            }
            skins.end("skins")?;
        }
    }

    r.select("gpu_table.txt")?;
    Ok(())
}

/// README, license and contribution documents.
pub fn gather_documents(r: &mut PathResolver) -> Result<()> {
    {
        let mut s = r.scope("../../..", Some(""));
        if s.exists() {
            for doc in [
                "README.txt",
                "MANIFESTO.txt",
                "CONTRIBUTE.txt",
                "RELEASE_NOTES.txt",
                "ChangeLog.txt",
            ] {
                s.select(doc)?;
            }
            s.end("")?;
        }
    }

    {
        let mut s = r.scope("../..", Some("doc"));
        if s.exists() {
            s.select("LICENSE-source.txt")?;
            s.select_as("LICENSE-logos.txt", "LICENSE-artwork.txt")?;
            s.end("doc")?;
        }
    }

    {
        let mut s = r.scope("../../doc", Some("doc"));
        if s.exists() {
            s.select("contributions.txt")?;
            s.select_as("GPL-license.txt", "GPL.txt")?;
            s.select("FLOSS-exception.txt")?;
            s.end("doc")?;
        }
    }

    Ok(())
}

/// Selects a platform-specific license file from the top-level source directory.
pub fn platform_license(r: &mut PathResolver, file: &str) -> Result<()> {
    let mut s = r.scope("../..", Some("doc"));
    if s.exists() {
        s.select(file)?;
        s.end("doc")?;
    }
    Ok(())
}
