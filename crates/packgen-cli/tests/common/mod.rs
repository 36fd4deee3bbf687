//! Shared helpers for CLI tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// `packgen` running inside `dir`, isolated from the user's configuration.
pub fn packgen(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("packgen");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Temp project directory holding `manifest` as `packgen.toml`.
pub fn project(manifest: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("packgen.toml"), manifest).unwrap();
    temp
}

pub const SHOP: &str = r#"
[package]
app_name  = "Shop"
platforms = ["iOS 17"]

[directories]
base_path = "Modules"

[[global_dependencies]]
type = "screen"
target = "main"
dependencies = ["Util"]

[[modules]]
name = "Util"
type = "utility"

[[modules]]
name = "Client"
type = "client"

[[modules]]
name = "Screen"
type = "screen"
exports = ["Client"]
[modules.dependencies]
main = ["Client"]
"#;

pub const CYCLE: &str = r#"
[package]
app_name = "Loop"

[[modules]]
name = "A"
type = "utility"
[modules.dependencies]
main = ["B"]

[[modules]]
name = "B"
type = "utility"
[modules.dependencies]
main = ["A"]
"#;
