//! Embeds the `longPathAware` application manifest on MSVC targets.
//!
//! Without it, Windows keeps enforcing the 260-character limit on the process
//! working directory even when `LongPathsEnabled` is set.

use std::env;
use std::path::PathBuf;

const MANIFEST: &str = "longpath-check.manifest";

fn main() {
    println!("cargo:rerun-if-changed={MANIFEST}");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_env = env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default();
    if target_os != "windows" || target_env != "msvc" {
        return;
    }

    let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") else {
        return;
    };
    let manifest = PathBuf::from(manifest_dir).join(MANIFEST);
    println!("cargo:rustc-link-arg-bins=/MANIFEST:EMBED");
    println!(
        "cargo:rustc-link-arg-bins=/MANIFESTINPUT:{}",
        manifest.display()
    );
}
