//! Presentation layer for breakaway-blueprint
//!
//! This crate contains CLI definitions, report formatters, the paginated
//! export, progress display and the interactive questionnaire.

pub mod cli;
pub mod config;
pub mod interactive;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use config::{InteractiveConfig, OutputConfig};
pub use interactive::{
    InteractiveError, InteractiveOutcome, InteractiveSession, LineSource, ReedlineSource,
};
pub use output::console::ConsoleFormatter;
pub use output::export::{ExportError, render_export, write_export};
pub use output::formatter::ReportFormatter;
pub use progress::reporter::AssessmentProgress;
