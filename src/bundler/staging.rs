//! Copies a finalized manifest into the staging tree.

use crate::bundler::{
    error::{Context, Result},
    manifest::Manifest,
    settings::Settings,
    utils::fs,
};

/// Stages every included entry and generated file under the staging root.
///
/// The staging root is erased first, so nothing from an earlier run ends up
/// in the packaged tree. Duplicate destinations are resolved first (last write wins). Returns the
/// number of files written.
pub async fn stage(settings: &Settings, manifest: &Manifest) -> Result<usize> {
    let root = settings.staging_root();
    fs::create_dir_all(root, true).await?;

    let mut written = 0;
    for entry in manifest.finalize().iter().filter(|e| e.included) {
        let target = root.join(&entry.dest_path);
        fs::copy_file(&entry.source_path, &target)
            .await
            .with_context(|| format!("staging {}", entry.dest_path.display()))?;
        written += 1;
    }

    for file in manifest.generated() {
        fs::write_file(&root.join(&file.dest_path), &file.contents).await?;
        written += 1;
    }

    log::info!("✓ Staged {written} files into {}", root.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        manifest::{GeneratedFile, ManifestEntry},
        platform::Platform,
        settings::{BuildContext, SettingsBuilder},
    };
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_stage_skips_excluded_and_resolves_duplicates() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("old.txt"), "old").unwrap();
        std::fs::write(src.join("new.txt"), "new").unwrap();

        let settings = SettingsBuilder::new()
            .context(BuildContext {
                version: vec!["1".into(), "0".into()],
                ..Default::default()
            })
            .platform(Platform::LinuxX86_64)
            .source_root(&src)
            .staging_root(dir.path().join("stage"))
            .build()
            .unwrap();

        let mut manifest = Manifest::new();
        manifest.record(ManifestEntry {
            included: true,
            source_path: src.join("old.txt"),
            dest_path: "doc/readme.txt".into(),
        });
        manifest.record(ManifestEntry {
            included: false,
            source_path: src.join("missing.dll"),
            dest_path: "missing.dll".into(),
        });
        manifest.record(ManifestEntry {
            included: true,
            source_path: src.join("new.txt"),
            dest_path: "doc/readme.txt".into(),
        });
        manifest.record_generated(GeneratedFile {
            dest_path: "gridargs.dat".into(),
            contents: "--grid aditi".into(),
        });

        let written = stage(&settings, &manifest).await.unwrap();
        assert_eq!(written, 2);

        let stage = dir.path().join("stage");
        assert_eq!(std::fs::read_to_string(stage.join("doc/readme.txt")).unwrap(), "new");
        assert_eq!(std::fs::read_to_string(stage.join("gridargs.dat")).unwrap(), "--grid aditi");
        assert!(!stage.join("missing.dll").exists());
    }

    #[tokio::test]
    async fn test_restaging_drops_stale_files() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("old.dll"), "old").unwrap();

        let settings = SettingsBuilder::new()
            .context(BuildContext {
                version: vec!["1".into(), "0".into()],
                ..Default::default()
            })
            .platform(Platform::Windows)
            .source_root(&src)
            .staging_root(dir.path().join("stage"))
            .build()
            .unwrap();

        let mut first = Manifest::new();
        first.record(ManifestEntry {
            included: true,
            source_path: src.join("old.dll"),
            dest_path: "lib/old.dll".into(),
        });
        assert_eq!(stage(&settings, &first).await.unwrap(), 1);
        assert!(dir.path().join("stage/lib/old.dll").exists());

        assert_eq!(stage(&settings, &Manifest::new()).await.unwrap(), 0);
        let stage_dir = dir.path().join("stage");
        assert!(stage_dir.is_dir());
        assert!(!stage_dir.join("lib").exists());
    }
}
