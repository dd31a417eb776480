//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{SortDirection, StatusFilter};
use clap::Parser;
use std::path::PathBuf;

/// clientdash - dashboard statistics and client lists from person records
///
/// Reads a JSON snapshot of client records (as returned by the person API)
/// and writes the dashboard statistics plus the filtered client list as a
/// Markdown or JSON report.
///
/// Examples:
///   clientdash --input clients.json
///   clientdash --input clients.json --search garcia --status active --sort asc
///   clientdash --input clients.json --format json --stdout
///   clientdash --input clients.json --validate --fail-on-invalid
///   clientdash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON file with an array of person records
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "CLIENTDASH_INPUT",
        required_unless_present = "init_config"
    )]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config file setting or clientdash_report.md
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Search term matched against name or identification
    ///
    /// Accent- and case-insensitive substring match.
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Client status to list
    #[arg(long, value_name = "STATUS")]
    pub status: Option<StatusFilter>,

    /// Sort direction of the client list by id
    #[arg(long, value_name = "DIR")]
    pub sort: Option<SortDirection>,

    /// Leave the client table out of the report
    #[arg(long)]
    pub no_client_list: bool,

    /// Check every record against the client form rules
    #[arg(long)]
    pub validate: bool,

    /// Exit with code 2 if any record fails validation (implies --validate)
    #[arg(long)]
    pub fail_on_invalid: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .clientdash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .clientdash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.stdout && self.output.is_some() {
            return Err("Cannot use both --stdout and --output".to_string());
        }

        match self.input {
            None => return Err("An input file is required (--input)".to_string()),
            Some(ref input) => {
                if !input.exists() {
                    return Err(format!("Input file does not exist: {}", input.display()));
                }
                if !input.is_file() {
                    return Err(format!("Input path is not a file: {}", input.display()));
                }
            }
        }

        Ok(())
    }

    /// Whether records should be checked against the form rules.
    pub fn should_validate(&self) -> bool {
        self.validate || self.fail_on_invalid
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `general.verbose` setting of the config file.
    /// `--quiet` wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
