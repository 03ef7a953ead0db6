//! CLI argument definitions for `dvc`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dvc_cli::config::EngineOverrides;
use dvc_model::{FilterCombination, LayerMode, PolicyKind, ZOrder};

#[derive(Parser)]
#[command(
    name = "dvc",
    version,
    about = "Diagram visibility control - decide which diagram elements are shown",
    long_about = "Resolve which elements of a diagram are visible given an ordered set of \
                  layers, validate layer documents, and edit them from the command line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ./dvc.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute per-layer buckets and the visible element ids.
    Resolve(ResolveArgs),

    /// Check a layer document without importing it.
    Validate(ValidateArgs),

    /// Edit the layers of a layer document in place.
    #[command(subcommand)]
    Layer(LayerCommand),
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// JSON file with the element forest.
    #[arg(long = "model", value_name = "FILE")]
    pub model: PathBuf,

    /// JSON layer document.
    #[arg(long = "layers", value_name = "FILE")]
    pub layers: PathBuf,

    /// Print the result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Add the ancestors of visible elements to the visible list.
    #[arg(long = "with-ancestors")]
    pub with_ancestors: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Engine option overrides; each wins over the configuration file.
#[derive(Args, Clone, Copy)]
pub struct EngineArgs {
    /// Visibility policy.
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Layer priority order by zIndex.
    #[arg(long = "z-order", value_enum)]
    pub z_order: Option<ZOrderArg>,

    /// How a layer combines its filters.
    #[arg(long = "filter-combination", value_enum)]
    pub filter_combination: Option<FilterCombinationArg>,

    /// Start from the legacy preset (descending order, first two filters, basic policy).
    #[arg(long = "legacy")]
    pub legacy: bool,
}

impl EngineArgs {
    pub fn overrides(&self) -> EngineOverrides {
        EngineOverrides {
            legacy: self.legacy,
            z_order: self.z_order.map(|arg| match arg {
                ZOrderArg::Ascending => ZOrder::Ascending,
                ZOrderArg::Descending => ZOrder::Descending,
            }),
            filter_combination: self.filter_combination.map(|arg| match arg {
                FilterCombinationArg::All => FilterCombination::All,
                FilterCombinationArg::FirstTwo => FilterCombination::FirstTwo,
            }),
            policy: self.policy.map(|arg| match arg {
                PolicyArg::Advanced => PolicyKind::Advanced,
                PolicyArg::Basic => PolicyKind::Basic,
            }),
        }
    }
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// JSON layer document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Accept documents without `layers` or `filters` lists.
    #[arg(long = "lenient")]
    pub lenient: bool,
}

#[derive(Subcommand)]
pub enum LayerCommand {
    /// List the layers of a document.
    List {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Append a new layer (creates the document when missing).
    Add {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Name instead of the generated `Layer N`.
        #[arg(long = "name")]
        name: Option<String>,

        /// Layer mode.
        #[arg(long = "mode", value_enum, default_value = "show")]
        mode: ModeArg,

        /// Create the layer switched off.
        #[arg(long = "inactive")]
        inactive: bool,
    },

    /// Remove a layer.
    Delete {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "LAYER_ID")]
        layer_id: String,
    },

    /// Switch a layer on or off.
    Toggle {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "LAYER_ID")]
        layer_id: String,
    },

    /// Move a layer and renumber every zIndex to its position.
    Reorder {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Current position (0-based).
        #[arg(value_name = "FROM")]
        from: usize,
        /// New position (0-based).
        #[arg(value_name = "TO")]
        to: usize,
    },

    /// Give a layer a new name.
    Rename {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "LAYER_ID")]
        layer_id: String,
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Advanced,
    Basic,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ZOrderArg {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterCombinationArg {
    All,
    FirstTwo,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Show,
    Hide,
}

impl From<ModeArg> for LayerMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Show => LayerMode::Show,
            ModeArg::Hide => LayerMode::Hide,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
