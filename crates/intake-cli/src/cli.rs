//! CLI argument definitions for `intake`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "intake",
    version,
    about = "Intake form engine - inspect the schema and replay form sessions",
    long_about = "Inspect the intake form schema and option catalog, check value \
                  documents,\nand replay scripted form sessions with cascades, \
                  validation and submissions."
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

    /// Allow field values in trace logs. They are redacted otherwise.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Form settings JSON (length limits and option tables).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the form fields with their visibility and requirement rules.
    Fields,

    /// Show the option catalog, or the options of one select field.
    Options {
        /// Field name, e.g. `country` or `state`.
        #[arg(value_name = "FIELD")]
        field: Option<String>,
    },

    /// Validate a values document as if every field had been touched.
    Check(CheckArgs),

    /// Apply a scripted list of actions to a fresh form session.
    Replay(ReplayArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// JSON object mapping field names to values.
    #[arg(value_name = "VALUES")]
    pub values: PathBuf,
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// JSON script: `{ "actions": [ ... ] }`.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Report format.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,

    /// Number submissions sequentially and stamp them with the Unix epoch.
    #[arg(long = "deterministic")]
    pub deterministic: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
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
