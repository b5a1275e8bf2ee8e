//! CLI command definitions using clap

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use pinpoint::DomTree;
use std::path::PathBuf;

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;

/// Pinpoint: synthesize stable, ranked locators for DOM elements
#[derive(Parser, Debug)]
#[command(name = "pinpoint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, global = true)]
    pub color: Option<ColorArg>,

    /// Config file (default: ./pinpoint.yaml when present)
    #[arg(short, long, global = true, env = "PINPOINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize locators for one element of a DOM snapshot
    Synth(SynthArgs),

    /// List supported dialects
    Dialects,

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the synth command
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "path", "attr"])))]
pub struct SynthArgs {
    /// JSON snapshot file (`-` reads stdin)
    pub snapshot: PathBuf,

    /// Select the element with this id
    #[arg(long)]
    pub id: Option<String>,

    /// Select by element-child indices from the root, e.g. `0.2.1`
    #[arg(long)]
    pub path: Option<String>,

    /// Select the first element carrying this attribute
    #[arg(long)]
    pub attr: Option<String>,

    /// Dialect to render (repeatable; defaults to the configured set)
    #[arg(short, long = "dialect")]
    pub dialects: Vec<String>,

    /// Output format
    #[arg(short, long)]
    pub format: Option<FormatArg>,
}

/// How `synth` picks its element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `--id`
    Id(String),
    /// `--path`
    Path(Vec<usize>),
    /// `--attr`
    Attribute(String),
}

impl Target {
    /// Short description used in reports
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Id(id) => format!("#{id}"),
            Self::Path(path) => {
                let parts: Vec<String> = path.iter().map(ToString::to_string).collect();
                format!("path {}", parts.join("."))
            }
            Self::Attribute(name) => format!("[{name}]"),
        }
    }
}

impl SynthArgs {
    /// The selected target; clap guarantees exactly one is set
    pub fn target(&self) -> CliResult<Target> {
        if let Some(id) = &self.id {
            return Ok(Target::Id(id.clone()));
        }
        if let Some(path) = &self.path {
            return Ok(Target::Path(DomTree::parse_path(path)?));
        }
        if let Some(attr) = &self.attr {
            return Ok(Target::Attribute(attr.clone()));
        }
        Err(CliError::invalid_argument(
            "one of --id, --path or --attr is required",
        ))
    }
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print built-in defaults instead of the effective configuration
    #[arg(long)]
    pub defaults: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}
