//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into service calls and display results.
//! No business logic lives here.

use std::path::PathBuf;

use packgen_adapters::GraphLoader;

use crate::{cli::ManifestArgs, config::AppConfig};

pub mod completions;
pub mod config;
pub mod generate;
pub mod graph;
pub mod init;
pub mod validate;

/// Manifest location from the argument, else the configured default.
fn manifest_path(args: &ManifestArgs, config: &AppConfig) -> PathBuf {
    args.manifest
        .clone()
        .unwrap_or_else(|| config.defaults.manifest.clone())
}

fn loader(args: &ManifestArgs, config: &AppConfig) -> GraphLoader {
    GraphLoader::new(manifest_path(args, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_manifest_wins_over_config() {
        let config = AppConfig::default();
        let args = ManifestArgs {
            manifest: Some(PathBuf::from("graph.toml")),
        };
        assert_eq!(manifest_path(&args, &config), PathBuf::from("graph.toml"));
        assert_eq!(
            manifest_path(&ManifestArgs { manifest: None }, &config),
            PathBuf::from(".")
        );
    }
}
