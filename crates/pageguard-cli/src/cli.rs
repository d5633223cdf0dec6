//! Command-line arguments for `pageguard`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pageguard",
    version,
    about = "Inspect page guards against a page fixture",
    long_about = "Wire the editor lock, field validation and destructive-action \
                  confirmation against a TOML page fixture.\n\n\
                  `wire` lists the listeners a page would get; `replay` plays \
                  the fixture's scripted gestures and reports what the browser \
                  would have done."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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
}

#[derive(Subcommand)]
pub enum Command {
    /// List the listeners registered for a page.
    Wire(PageArgs),

    /// Play the page's scripted gestures through the guards.
    Replay(ReplayArgs),

    /// Show the effective settings.
    Settings,
}

#[derive(Parser)]
pub struct PageArgs {
    /// Page fixture (TOML).
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// Page fixture (TOML) with `[[gestures]]`.
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,

    /// Print the replay log as JSON.
    #[arg(long = "json")]
    pub json: bool,
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
