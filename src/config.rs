//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.clientdash.toml` files.

use crate::models::{SortDirection, StatusFilter};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".clientdash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Default client list query.
    #[serde(default)]
    pub list: ListConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "clientdash_report.md".to_string()
}

/// Client list query used when the CLI does not give one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListConfig {
    /// Search term matched against name and identification.
    #[serde(default)]
    pub search: String,

    /// Status filter.
    #[serde(default)]
    pub status: StatusFilter,

    /// Sort direction by id.
    #[serde(default)]
    pub sort: SortDirection,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Company name shown in the report header.
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// Include the filtered client table.
    #[serde(default = "default_true")]
    pub include_client_list: bool,

    /// Draw text bars next to chart values.
    #[serde(default = "default_true")]
    pub include_charts: bool,

    /// Width in characters of the longest bar.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            include_client_list: true,
            include_charts: true,
            bar_width: default_bar_width(),
        }
    }
}

fn default_company_name() -> String {
    "Ficticia S.A.".to_string()
}

fn default_true() -> bool {
    true
}

fn default_bar_width() -> usize {
    30
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.clientdash.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only values given explicitly on the command line override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if let Some(ref search) = args.search {
            self.list.search = search.clone();
        }
        if let Some(status) = args.status {
            self.list.status = status;
        }
        if let Some(sort) = args.sort {
            self.list.sort = sort;
        }

        if args.no_client_list {
            self.report.include_client_list = false;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::make_args;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "clientdash_report.md");
        assert_eq!(config.list.status, StatusFilter::All);
        assert_eq!(config.list.sort, SortDirection::Desc);
        assert_eq!(config.report.company_name, "Ficticia S.A.");
        assert_eq!(config.report.bar_width, 30);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "weekly.md"
verbose = true

[list]
search = "garcía"
status = "inactive"
sort = "asc"

[report]
include_charts = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "weekly.md");
        assert!(config.general.verbose);
        assert_eq!(config.list.search, "garcía");
        assert_eq!(config.list.status, StatusFilter::Inactive);
        assert_eq!(config.list.sort, SortDirection::Asc);
        assert!(!config.report.include_charts);
        assert!(config.report.include_client_list);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[list]"));
        assert!(toml_str.contains("[report]"));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.report.company_name, "Ficticia S.A.");
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[list]\nstatus = \"active\"\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.list.status, StatusFilter::Active);

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[list\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_merge_with_args() {
        let mut config: Config = toml::from_str("[list]\nstatus = \"inactive\"\nsearch = \"ana\"\n").unwrap();

        let mut args = make_args();
        args.sort = Some(SortDirection::Asc);
        args.verbose = true;
        config.merge_with_args(&args);

        assert_eq!(config.list.status, StatusFilter::Inactive);
        assert_eq!(config.list.search, "ana");
        assert_eq!(config.list.sort, SortDirection::Asc);
        assert!(config.general.verbose);

        args.status = Some(StatusFilter::All);
        args.search = Some(String::new());
        args.no_client_list = true;
        config.merge_with_args(&args);

        assert_eq!(config.list.status, StatusFilter::All);
        assert!(config.list.search.is_empty());
        assert!(!config.report.include_client_list);
    }

    #[test]
    fn test_verbose_setting_raises_log_level() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[general]\nverbose = true\n").unwrap();

        let mut config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        let mut args = make_args();
        config.merge_with_args(&args);
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::DEBUG);

        args.quiet = true;
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::ERROR);

        let mut config = Config::default();
        config.merge_with_args(&make_args());
        assert_eq!(make_args().log_level(config.general.verbose), tracing::Level::INFO);
    }
}
