//! `packgen init`: write a starter graph manifest.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use packgen_adapters::{MANIFEST_FILE_NAME, starter_manifest};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write `packgen.toml` with a small, valid starter graph.
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest_path = target_path(&args.path);

    if manifest_path.exists() {
        if !args.force {
            return Err(CliError::ManifestExists {
                path: manifest_path,
            });
        }
        output.warning(&format!("Overwriting {}", manifest_path.display()))?;
    }

    let app_name = args.name.unwrap_or(config.defaults.app_name);
    validate_app_name(&app_name)?;

    if let Some(parent) = manifest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(&manifest_path, starter_manifest(&app_name))
        .with_cli_context(|| format!("Failed to write '{}'", manifest_path.display()))?;

    info!(app = %app_name, "Starter manifest written");
    output.success(&format!("Created {}", manifest_path.display()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print("  packgen validate")?;
    output.print("  packgen generate")?;
    Ok(())
}

/// A `.toml` path is the manifest itself; anything else is its directory.
fn target_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "toml") {
        path.to_path_buf()
    } else {
        path.join(MANIFEST_FILE_NAME)
    }
}

/// The name ends up in module names, so it must be a plain identifier.
fn validate_app_name(name: &str) -> CliResult<()> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CliError::InvalidInput {
            message: format!(
                "app name '{name}' must start with a letter and contain only letters, digits and '_'"
            ),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_gets_manifest_file_name() {
        assert_eq!(target_path(Path::new("proj")), PathBuf::from("proj/packgen.toml"));
        assert_eq!(target_path(Path::new("graph.toml")), PathBuf::from("graph.toml"));
    }

    #[test]
    fn app_names() {
        assert!(validate_app_name("Shop").is_ok());
        assert!(validate_app_name("Shop_2").is_ok());
        assert!(validate_app_name("").is_err());
        assert!(validate_app_name("2Shop").is_err());
        assert!(validate_app_name("my-shop").is_err());
    }
}
