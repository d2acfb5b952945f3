//! CLI command definitions

use blueprint_domain::ReportFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for readiness reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Score, charts, gaps and roadmap
    Full,
    /// Score, tier and per-section percentages
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => ReportFormat::Full,
            OutputFormat::Summary => ReportFormat::Summary,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// What to run
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Take the assessment interactively (default)
    Take,
    /// Score a saved responses file without prompting
    Score {
        /// JSON file answering every question via `scores`, `selections` or `sliders`
        #[arg(value_name = "ANSWERS_JSON")]
        answers: PathBuf,
    },
    /// List the question bank
    Bank,
}

/// CLI arguments for breakaway-blueprint
#[derive(Parser, Debug)]
#[command(name = "breakaway-blueprint")]
#[command(author, version, about = "Breakaway readiness assessment for financial advisors")]
#[command(long_about = r#"
Breakaway Blueprint scores an advisor's readiness to leave a firm and go
independent. Answer one question at a time, then get a total score, a
readiness tier, per-dimension results and a prioritized roadmap.

Configuration files are loaded from (in priority order):
1. BLUEPRINT_* environment variables
2. --config <path>       Explicit config file
3. ./blueprint.toml      Project-level config
4. ~/.config/breakaway-blueprint/config.toml   Global config

Example:
  breakaway-blueprint
  breakaway-blueprint score answers.json --output json
  breakaway-blueprint take --export report.txt
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [report] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Write a paginated plain-text report to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub export: Option<PathBuf>,

    /// Do not send the lead notification
    #[arg(long, global = true)]
    pub no_notify: bool,

    /// Skip the payment gate screen
    #[arg(long, global = true)]
    pub no_gate: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The subcommand, defaulting to `take`.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Take)
    }
}
