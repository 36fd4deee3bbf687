//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "packgen",
    bin_name = "packgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Module graph validation and package scaffolding",
    long_about = "packgen reads a module graph from packgen.toml, checks it for \
                  missing modules, broken exports, unknown targets and cycles, \
                  and writes one package manifest per module.",
    after_help = "EXAMPLES:\n\
        \x20 packgen init --name Shop\n\
        \x20 packgen validate\n\
        \x20 packgen graph --format dot | dot -Tsvg > graph.svg\n\
        \x20 packgen generate -o ./App --yes",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the graph and write every module's manifest.
    #[command(
        visible_alias = "gen",
        about = "Generate package manifests and scaffolding",
        after_help = "EXAMPLES:\n\
            \x20 packgen generate\n\
            \x20 packgen generate ./project -o ./App --dry-run\n\
            \x20 packgen generate --yes"
    )]
    Generate(GenerateArgs),

    /// Load and validate the graph without writing anything.
    #[command(
        visible_alias = "check",
        about = "Validate the module graph",
        after_help = "EXAMPLES:\n\
            \x20 packgen validate\n\
            \x20 packgen validate ./project/packgen.toml"
    )]
    Validate(ManifestArgs),

    /// Print resolved dependencies per module and target.
    #[command(
        about = "Show the resolved dependency graph",
        after_help = "EXAMPLES:\n\
            \x20 packgen graph\n\
            \x20 packgen graph --format list\n\
            \x20 packgen graph --format dot | dot -Tsvg > graph.svg"
    )]
    Graph(GraphArgs),

    /// Write a starter graph manifest.
    #[command(
        about = "Create a starter packgen.toml",
        after_help = "EXAMPLES:\n\
            \x20 packgen init\n\
            \x20 packgen init ./project --name Shop\n\
            \x20 packgen init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 packgen completions bash > ~/.local/share/bash-completion/completions/packgen\n\
            \x20 packgen completions zsh  > ~/.zfunc/_packgen\n\
            \x20 packgen completions fish > ~/.config/fish/completions/packgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the packgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 packgen config get defaults.output_dir\n\
            \x20 packgen config list\n\
            \x20 packgen config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where to read the graph from.
#[derive(Debug, Args)]
pub struct ManifestArgs {
    /// Manifest file or directory holding `packgen.toml`.
    #[arg(
        value_name = "MANIFEST",
        help = "Manifest file or project directory (default from config)"
    )]
    pub manifest: Option<PathBuf>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `packgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: ManifestArgs,

    /// Root every module path is resolved against.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default from config)"
    )]
    pub output: Option<PathBuf>,

    /// Preview what would be written without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and write immediately")]
    pub yes: bool,
}

// ── graph ─────────────────────────────────────────────────────────────────────

/// Arguments for `packgen graph`.
#[derive(Debug, Args)]
pub struct GraphArgs {
    #[command(flatten)]
    pub source: ManifestArgs,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: GraphFormat,
}

/// Output format for the `graph` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Grouped by module, one line per target.
    Table,
    /// One edge per line: `Module:target -> Dependency`.
    List,
    /// JSON array of modules.
    Json,
    /// Graphviz digraph over targets.
    Dot,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `packgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to write `packgen.toml` into, or the manifest path itself.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Application name used in the starter graph.
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Overwrite an existing manifest.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing manifest")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `packgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `packgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.manifest`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from(["packgen", "generate", "proj", "-o", "out", "--dry-run"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.source.manifest, Some(PathBuf::from("proj")));
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert!(args.dry_run);
        assert!(!args.yes);
    }

    #[test]
    fn no_color_flag_sets_true() {
        let cli = Cli::parse_from(["packgen", "--no-color", "validate"]);
        assert!(cli.global.no_color);
    }

    #[test]
    fn generate_alias() {
        let cli = Cli::parse_from(["packgen", "gen", "-y"]);
        assert!(matches!(cli.command, Commands::Generate(GenerateArgs { yes: true, .. })));
    }

    #[test]
    fn graph_format_defaults_to_table() {
        let cli = Cli::parse_from(["packgen", "graph"]);
        let Commands::Graph(args) = cli.command else {
            panic!("expected Graph command");
        };
        assert_eq!(args.format, GraphFormat::Table);
        assert!(args.source.manifest.is_none());
    }

    #[test]
    fn graph_accepts_dot() {
        let cli = Cli::parse_from(["packgen", "graph", "--format", "dot"]);
        assert!(matches!(
            cli.command,
            Commands::Graph(GraphArgs {
                format: GraphFormat::Dot,
                ..
            })
        ));
    }

    #[test]
    fn init_defaults_to_current_dir() {
        let cli = Cli::parse_from(["packgen", "init"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.path, PathBuf::from("."));
        assert!(args.name.is_none());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["packgen", "--quiet", "--verbose", "validate"]);
        assert!(result.is_err());
    }
}
