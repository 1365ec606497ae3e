//! End-to-end tests for the `viewer_packager` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const LINUX_SOURCES: &[&str] = &[
    "README.txt",
    "MANIFESTO.txt",
    "CONTRIBUTE.txt",
    "RELEASE_NOTES.txt",
    "ChangeLog.txt",
    "linden/LICENSE-source.txt",
    "linden/LICENSE-logos.txt",
    "linden/LICENSE-libraries-linux.txt",
    "linden/doc/contributions.txt",
    "linden/doc/GPL-license.txt",
    "linden/doc/FLOSS-exception.txt",
    "linden/scripts/messages/message_template.msg",
    "linden/etc/message.xml",
    "linden/indra/newview/gpu_table.txt",
    "linden/indra/newview/app_settings/settings.xml",
    "linden/indra/newview/app_settings/logcontrol.xml",
    "linden/indra/newview/app_settings/shaders/class1/lighting/lightF.glsl",
    "linden/indra/newview/app_settings/windlight/days/Default.xml",
    "linden/indra/newview/fonts/VeraMono.ttf",
    "linden/indra/newview/fonts/LiberationSans-Bold.ttf",
    "linden/indra/newview/fonts/LiberationSans-Regular.ttf",
    "linden/indra/newview/res/imprudence_icon.png",
    "linden/indra/newview/imprudence-stripped",
    "linden/indra/newview/featuretable_linux.txt",
    "linden/indra/newview/secondlife-i686.supp",
    "linden/indra/newview/linux_tools/wrapper.sh",
    "linden/indra/newview/linux_tools/launch_url.sh",
    "linden/indra/newview/linux_tools/handle_secondlifeprotocol.sh",
    "linden/indra/newview/linux_tools/register_secondlifeprotocol.sh",
];

fn source_tree(root: &Path) {
    for rel in LINUX_SOURCES {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, rel).unwrap();
    }
}

fn packager() -> Command {
    let mut cmd = Command::cargo_bin("viewer_packager").unwrap();
    for var in [
        "VIEWER_PLATFORM",
        "VIEWER_CHANNEL",
        "VIEWER_GRID",
        "VIEWER_VERSION",
        "VIEWER_ACTIONS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_options() {
    packager()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--login-channel"));
}

#[test]
fn test_platform_is_required() {
    packager()
        .args(["--channel", "Second Life Release", "--grid", "agni"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--platform"));
}

#[test]
fn test_missing_grid_fails() {
    packager()
        .args([
            "--platform",
            "windows",
            "--channel",
            "Second Life Release",
            "--version",
            "1.0.0.1",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required argument: grid"));
}

#[test]
fn test_unknown_platform_fails() {
    packager()
        .args([
            "--platform",
            "beos",
            "--channel",
            "Second Life Release",
            "--grid",
            "agni",
            "--version",
            "1.0.0.1",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid platform: beos"));
}

#[test]
fn test_linux_copy_run() {
    let dir = TempDir::new().unwrap();
    source_tree(dir.path());
    let staging = dir.path().join("build/packaged");

    packager()
        .arg("--platform")
        .arg("linux_x86_64")
        .args(["--channel", "Second Life Beta", "--grid", "aditi"])
        .args(["--version", "1.23.0.1", "--actions", "copy"])
        .arg("--source")
        .arg(dir.path().join("linden/indra/newview"))
        .arg("--staging")
        .arg(&staging)
        .assert()
        .success()
        .stdout(predicate::str::contains("linux_x86_64"));

    assert!(staging.join("bin/do-not-directly-run-imprudence-bin").is_file());
    assert!(staging.join("app_settings/settings.xml").is_file());
    assert!(!staging.join("app_settings/logcontrol.xml").exists());
    assert!(staging.join("app_settings/windlight/days/Default.xml").is_file());
    assert!(staging.join("fonts/VeraMono.ttf").is_file());
    assert!(staging.join("doc/GPL.txt").is_file());
    assert!(staging.join("doc/LICENSE-artwork.txt").is_file());
    assert!(staging.join("secondlife-i686.supp").is_file());
    assert_eq!(
        std::fs::read_to_string(staging.join("gridargs.dat")).unwrap(),
        "--channel \"Second Life Beta\" --grid aditi \
         --helperuri http://preview-aditi.secondlife.com/helpers/ \
         --settings settings_aditi_beta.xml"
    );
}
