//! `packgen validate`: load and validate the graph, write nothing.

use tracing::instrument;

use packgen_core::application::GraphService;

use crate::{
    cli::{ManifestArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ManifestArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest = super::manifest_path(&args, &config);
    let service = GraphService::new(Box::new(super::loader(&args, &config)));

    let summary = service.validate()?;

    if output.format() == OutputFormat::Json {
        return output.json(&summary);
    }

    output.success(&format!("Graph in {} is valid", manifest.display()))?;
    output.detail(&format!(
        "  {} modules, {} targets, {} dependency edges",
        summary.modules, summary.targets, summary.edges
    ))?;
    Ok(())
}
