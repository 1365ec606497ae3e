//! Viewer packager - platform installers for viewer builds.
//!
//! This binary stages a built viewer and packages it as an NSIS installer,
//! DMG or tarball, exiting non-zero if any requested platform failed.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match viewer_packager::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
