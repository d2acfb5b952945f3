//! CLI entrypoint for Breakaway Blueprint
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use blueprint_application::{DeadLetterSink, FlowParams, LogDeadLetters, NotificationDispatcher};
use blueprint_domain::{Lead, QuestionBank, ReadinessReport, ReportFormat, Responses};
use blueprint_infrastructure::{
    ConfigLoader, ENV_PREFIX, FileConfig, JsonlDeadLetterLog, build_notifier, load_configured_bank,
};
use blueprint_presentation::{
    AssessmentProgress, Cli, Command, ConsoleFormatter, InteractiveConfig, InteractiveOutcome,
    InteractiveSession, OutputConfig, ReportFormatter, ReedlineSource, write_export,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Extra time a pending notification gets beyond its request timeout.
const SETTLE_GRACE: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // Load configuration before logging so the log directory is known
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_logging(cli.verbose, config.logging.dir.as_deref());
    info!("Starting Breakaway Blueprint");

    for issue in config.check()? {
        warn!("{}", issue.message);
    }

    let output = OutputConfig {
        format: cli
            .output
            .map(ReportFormat::from)
            .or(config.report.format)
            .unwrap_or_default(),
        color: config.report.color,
        export_page_lines: config.report.export_page_lines,
    };
    if !output.color {
        colored::control::set_override(false);
    }

    let mut params = config.flow_params();
    if cli.no_gate {
        params = params.with_require_gate(false);
    }

    let bank = Arc::new(load_configured_bank(&config.bank).context("Failed to load question bank")?);
    info!(
        "Loaded {} questions in {} sections",
        bank.len(),
        bank.sections().len()
    );

    match cli.resolved_command() {
        Command::Bank => {
            println!("{}", ConsoleFormatter::format_bank(&bank));
        }
        Command::Score { answers } => {
            let responses = read_responses(&answers)?.validate(&bank).with_context(|| {
                format!("Responses in {} do not fit the question bank", answers.display())
            })?;
            let report = ReadinessReport::evaluate(&bank, &responses.scores, params.weakest_count);
            emit_report(&output, cli.export.as_deref(), &report, None)?;
        }
        Command::Take => {
            let dispatcher = if cli.no_notify {
                info!("Lead notification disabled by --no-notify");
                None
            } else {
                build_dispatcher(&config)?
            };
            let interactive = InteractiveConfig {
                show_progress: !cli.quiet,
                ..Default::default()
            };

            let outcome = run_interactive(bank, params, dispatcher, &interactive)?;
            let InteractiveOutcome::Completed { view, dispatch } = outcome else {
                return Ok(());
            };

            emit_report(&output, cli.export.as_deref(), &view.report, view.lead.as_ref())?;

            if let Some(handle) = dispatch {
                let timeout = Duration::from_secs(config.notification.timeout_secs) + SETTLE_GRACE;
                let outcome = handle.settle(timeout).await;
                info!("Lead notification: {:?}", outcome);
            }
        }
    }

    Ok(())
}

/// Console logging by verbosity, plus a daily-rolling file when a log
/// directory is configured. The guard must live until exit.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "breakaway-blueprint.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();
    guard
}

fn print_config_sources(explicit: Option<&Path>) {
    println!("Configuration sources (highest priority first):");
    println!("  {:<10} {}* variables, nested keys joined by __", "Env", ENV_PREFIX);
    for source in ConfigLoader::sources(explicit) {
        let status = if source.found { "found" } else { "not found" };
        println!("  {:<10} {} ({})", source.label, source.location, status);
    }
}

/// Notification dispatcher, or `None` when notifications are off.
fn build_dispatcher(config: &FileConfig) -> Result<Option<NotificationDispatcher>> {
    let Some(notifier) = build_notifier(&config.notification)? else {
        info!("Lead notification is not enabled");
        return Ok(None);
    };

    let dead_letters: Arc<dyn DeadLetterSink> = match config
        .logging
        .dead_letter_path()
        .and_then(JsonlDeadLetterLog::open)
    {
        Some(log) => {
            info!("Undelivered notifications go to {}", log.path().display());
            Arc::new(log)
        }
        None => Arc::new(LogDeadLetters),
    };

    info!("Lead notification via {}", notifier.name());
    Ok(Some(NotificationDispatcher::new(notifier, dead_letters)))
}

fn run_interactive(
    bank: Arc<QuestionBank>,
    params: FlowParams,
    dispatcher: Option<NotificationDispatcher>,
    interactive: &InteractiveConfig,
) -> Result<InteractiveOutcome> {
    let history = interactive.history_file.as_ref().map(PathBuf::from);
    let input = ReedlineSource::new(history).context("Failed to open terminal input")?;

    let mut session = InteractiveSession::new(bank, params, input, std::io::stdout())
        .with_progress(AssessmentProgress::new(interactive.show_progress));
    if let Some(dispatcher) = dispatcher {
        session = session.with_dispatcher(dispatcher);
    }

    // Line editing blocks; keep runtime workers free for notification tasks
    Ok(tokio::task::block_in_place(|| session.run())?)
}

fn read_responses(path: &Path) -> Result<Responses> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid responses file {}", path.display()))
}

fn emit_report(
    output: &OutputConfig,
    export: Option<&Path>,
    report: &ReadinessReport,
    lead: Option<&Lead>,
) -> Result<()> {
    println!("{}", ConsoleFormatter.render(output.format, report, lead));
    if let Some(path) = export {
        write_export(path, report, lead, output.export_page_lines)?;
        println!("Report exported to {}", path.display());
    }
    Ok(())
}
