//! Generate Service - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Load the graph and configuration
//! 2. Validate the graph (a failure aborts before anything is written)
//! 3. Render every module into a plan
//! 4. Write the plan to the filesystem
//!
//! Manifests are always rewritten. Placeholder scaffolding is written only
//! for modules whose directory did not exist before the run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, GraphDefinition, GraphSource, ModuleRenderer},
    },
    domain::ProjectStructure,
    error::PackgenResult,
};

/// Options of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Directory every resolved module path is relative to.
    pub output_root: PathBuf,
    /// Plan and report without writing.
    pub dry_run: bool,
}

impl GenerateOptions {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What happened (or would happen) to one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub name: String,
    pub path: PathBuf,
    pub manifest: PathBuf,
    /// Whether placeholder scaffolding was (or would be) written.
    pub scaffolded: bool,
    /// Files written, manifest included.
    pub files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub app_name: String,
    pub modules: Vec<ModuleReport>,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn files_written(&self) -> usize {
        self.modules.iter().map(|m| m.files).sum()
    }

    pub fn scaffolded(&self) -> usize {
        self.modules.iter().filter(|m| m.scaffolded).count()
    }
}

/// Rendered output of one module, not yet written.
struct ModulePlan {
    name: String,
    path: PathBuf,
    manifest: String,
    scaffold: Option<ProjectStructure>,
}

/// Main generation service.
pub struct GenerateService {
    source: Box<dyn GraphSource>,
    renderer: Box<dyn ModuleRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use packgen_core::application::GenerateService;
    ///
    /// let service = GenerateService::new(
    ///     source,     // impl GraphSource
    ///     renderer,   // impl ModuleRenderer
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(
        source: Box<dyn GraphSource>,
        renderer: Box<dyn ModuleRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            source,
            renderer,
            filesystem,
        }
    }

    /// Validate, render and write every module of the graph.
    #[instrument(
        skip_all,
        fields(
            output_root = %options.output_root.display(),
            dry_run = options.dry_run
        )
    )]
    pub fn generate(&self, options: &GenerateOptions) -> PackgenResult<GenerationReport> {
        let definition = self.source.load()?;
        info!(
            app = definition.configuration.app_name(),
            modules = definition.graph.len(),
            "Graph loaded"
        );

        definition.graph.validate(&definition.configuration)?;
        info!("Graph validated");

        let plans = self.plan(&definition, &options.output_root)?;
        let report = self.report(&definition, &plans, options.dry_run);

        if options.dry_run {
            info!(files = report.files_written(), "Dry run, nothing written");
            return Ok(report);
        }

        self.write_plans(&plans)?;
        info!(
            files = report.files_written(),
            scaffolded = report.scaffolded(),
            "Generation completed successfully"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Render every module. Nothing is written here, so a rendering failure
    /// leaves the output untouched.
    fn plan(&self, definition: &GraphDefinition, output_root: &Path) -> PackgenResult<Vec<ModulePlan>> {
        let GraphDefinition {
            configuration,
            graph,
        } = definition;

        let mut owners: HashMap<PathBuf, &str> = HashMap::new();
        let mut plans = Vec::with_capacity(graph.len());

        for node in graph.nodes() {
            let path = output_root.join(node.module().resolved_path(configuration));
            if let Some(first) = owners.insert(path.clone(), node.name()) {
                return Err(ApplicationError::PathConflict {
                    path,
                    first: first.to_string(),
                    second: node.name().to_string(),
                }
                .into());
            }

            let manifest = self.renderer.render_manifest(node, graph, configuration)?;
            let scaffold = if self.filesystem.exists(&path) {
                debug!(module = node.name(), path = %path.display(), "Directory exists, skipping scaffolding");
                None
            } else {
                let structure = self.renderer.render_scaffold(node, configuration)?;
                structure.validate()?;
                Some(structure)
            };

            plans.push(ModulePlan {
                name: node.name().to_string(),
                path,
                manifest,
                scaffold,
            });
        }

        Ok(plans)
    }

    fn report(&self, definition: &GraphDefinition, plans: &[ModulePlan], dry_run: bool) -> GenerationReport {
        let modules = plans
            .iter()
            .map(|plan| ModuleReport {
                name: plan.name.clone(),
                path: plan.path.clone(),
                manifest: plan.path.join(self.renderer.manifest_file_name()),
                scaffolded: plan.scaffold.is_some(),
                files: 1 + plan
                    .scaffold
                    .as_ref()
                    .map_or(0, |s| s.files().count()),
            })
            .collect();

        GenerationReport {
            app_name: definition.configuration.app_name().to_string(),
            modules,
            dry_run,
        }
    }

    /// Write all plans, removing directories created by this run on failure.
    fn write_plans(&self, plans: &[ModulePlan]) -> PackgenResult<()> {
        let mut created = Vec::new();
        for plan in plans {
            if plan.scaffold.is_some() {
                created.push(plan.path.as_path());
            }
            if let Err(e) = self.write_plan(plan) {
                warn!(module = %plan.name, "Write failed, attempting rollback");
                self.rollback(&created);
                return Err(e);
            }
        }
        Ok(())
    }

    fn write_plan(&self, plan: &ModulePlan) -> PackgenResult<()> {
        self.filesystem.create_dir_all(&plan.path)?;
        self.filesystem.write_file(
            &plan.path.join(self.renderer.manifest_file_name()),
            &plan.manifest,
        )?;

        let Some(structure) = &plan.scaffold else {
            return Ok(());
        };
        for file in structure.files() {
            let path = plan.path.join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
        }
        debug!(module = %plan.name, files = structure.file_count(), "Scaffolding written");
        Ok(())
    }

    /// Best-effort rollback of directories this run created.
    fn rollback(&self, created: &[&Path]) {
        for path in created.iter().rev() {
            if let Err(e) = self.filesystem.remove_dir_all(path) {
                warn!(
                    error = %e,
                    path = %path.display(),
                    "Rollback failed"
                );
            }
        }
        info!(directories = created.len(), "Rollback finished");
    }
}
