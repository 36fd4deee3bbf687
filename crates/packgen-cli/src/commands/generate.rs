//! `packgen generate`: validate, render and write every module.

use std::io::IsTerminal as _;
use std::path::Path;

use tracing::{debug, info, instrument};

use packgen_adapters::{LocalFilesystem, PackageManifestRenderer};
use packgen_core::application::{GenerateOptions, GenerateService, GenerationReport};

use crate::{
    cli::{GenerateArgs, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `packgen generate`.
///
/// 1. Resolve manifest and output root (arguments, then config)
/// 2. Confirm with the user unless `--yes`, `--dry-run`, `--quiet` or a
///    non-interactive stdin
/// 3. Run the generate service
/// 4. Print what was written
#[instrument(skip_all)]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let output_root = args
        .output
        .clone()
        .unwrap_or_else(|| config.defaults.output_dir.clone());
    let manifest = super::manifest_path(&args.source, &config);
    debug!(manifest = %manifest.display(), output_root = %output_root.display(), "Resolved paths");

    let interactive = !args.yes
        && !args.dry_run
        && !global.quiet
        && output.format() == OutputFormat::Human
        && std::io::stdin().is_terminal();
    if interactive && !confirm(&manifest, &output_root)? {
        return Err(CliError::Cancelled);
    }

    let service = GenerateService::new(
        Box::new(super::loader(&args.source, &config)),
        Box::new(PackageManifestRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let options = GenerateOptions::new(&output_root).dry_run(args.dry_run);

    let spinner = output.spinner("Generating packages...");
    let result = service.generate(&options);
    spinner.finish_and_clear();
    let report = result?;

    info!(
        modules = report.modules.len(),
        files = report.files_written(),
        "Generation finished"
    );

    if output.format() == OutputFormat::Json {
        return output.json(&report);
    }
    show_report(&report, &output)?;
    Ok(())
}

fn show_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    let verb = if report.dry_run { "Would write" } else { "Wrote" };

    output.header(&format!("{} ({} modules)", report.app_name, report.modules.len()))?;
    for module in &report.modules {
        let note = if module.scaffolded {
            "manifest + scaffolding"
        } else {
            "manifest"
        };
        output.print(&format!("  {:<24} {} ({note})", module.name, module.path.display()))?;
    }
    output.print("")?;

    let summary = format!(
        "{verb} {} files, scaffolded {} new modules",
        report.files_written(),
        report.scaffolded()
    );
    if report.dry_run {
        output.info(&format!("Dry run: {summary}"))?;
    } else {
        output.success(&summary)?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(manifest: &Path, output_root: &Path) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(format!(
            "Generate packages from {} into {}?",
            manifest.display(),
            output_root.display()
        ))
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(manifest: &Path, output_root: &Path) -> CliResult<bool> {
    use std::io::{self, Write};

    print!(
        "Generate packages from {} into {}? [Y/n] ",
        manifest.display(),
        output_root.display()
    );
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}
