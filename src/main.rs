//! clientdash - client dashboard reports from person records
//!
//! A CLI tool that reads a snapshot of client records and produces the
//! dashboard statistics and the filtered client list as a report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, unreadable input or config, etc.)
//!   2 - Invalid records found with --fail-on-invalid

use anyhow::{Context, Result};
use chrono::Utc;
use clientdash::cli::{Args, OutputFormat};
use clientdash::config::{Config, CONFIG_FILE_NAME};
use clientdash::report::generator::RenderOptions;
use clientdash::report::{self, DashboardReport, ReportMetadata};
use clientdash::view::ClientListView;
use clientdash::{analysis, loader, validation};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config comes first, its verbose setting feeds the log level
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    debug!("clientdash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    match run(args, config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report failed: {:#}", e);
            eprintln!("\nError: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .clientdash.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Build and write the report. Returns the exit code (0 or 2).
fn run(args: Args, config: Config) -> Result<i32> {
    let input = args
        .input
        .as_deref()
        .context("An input file is required (--input)")?;

    let persons = loader::load_persons(input)?;
    info!("Loaded {} client records from {}", persons.len(), input.display());

    let query = ClientListView::new(&config.list.search, config.list.status, config.list.sort);
    debug!("Client list query: {:?}", query);

    let invalid_records = if args.should_validate() {
        let invalid = validation::check_records(&persons);
        for record in &invalid {
            warn!("Record {} ({}) is invalid", record.id, record.full_name);
            for error in &record.errors {
                debug!("  {}", error);
            }
        }
        Some(invalid)
    } else {
        None
    };

    let metadata = ReportMetadata {
        company_name: config.report.company_name.clone(),
        source: input.display().to_string(),
        generated_at: Utc::now(),
        record_count: persons.len(),
    };

    let report = DashboardReport::build(
        metadata,
        &persons,
        &query,
        config.report.include_client_list,
        invalid_records,
    );

    if !args.quiet {
        eprintln!("{}", analysis::generate_summary_text(&report.aggregations));
    }

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => {
            report::generate_markdown_report(&report, &RenderOptions::from(&config.report))
        }
    };

    if args.stdout {
        println!("{}", output);
    } else {
        let output_path = Path::new(&config.general.output);
        std::fs::write(output_path, &output)
            .with_context(|| format!("Failed to write report to {}", output_path.display()))?;
        info!("Report saved to {}", output_path.display());
    }

    let invalid_count = report.invalid_records.as_ref().map_or(0, Vec::len);
    if args.fail_on_invalid && invalid_count > 0 {
        error!(
            "{} invalid record(s) found. Failing (exit code 2).",
            invalid_count
        );
        return Ok(2);
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            if !args.quiet {
                eprintln!("Warning: failed to load {}: {:#}", CONFIG_FILE_NAME, e);
            }
            Ok(Config::default())
        }
    }
}
