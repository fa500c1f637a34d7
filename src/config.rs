//! Configuration file support for report-uniquify.
//!
//! Provides YAML-based configuration through `report-uniquify.config.yml`
//! files and merges it with command-line flags.

use anyhow::Context;
use report_uniquify::application::dto::IngestMode;
use report_uniquify::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::Args;

const CONFIG_FILENAME: &str = "report-uniquify.config.yml";
const DEFAULT_DATABASE: &str = "reports.db";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub database: Option<PathBuf>,
    pub mode: Option<IngestMode>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML and that mode is 'resolve' or 'bulk'.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<_> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database: PathBuf,
    pub mode: IngestMode,
}

impl Settings {
    /// CLI flag > config file > default.
    pub fn resolve(args: &Args, config: Option<ConfigFile>) -> Self {
        let config = config.unwrap_or_default();
        Self {
            database: args
                .database
                .clone()
                .or(config.database)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            mode: args.mode.or(config.mode).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["report-uniquify"];
        argv.extend_from_slice(extra);
        argv.push("run.json");
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "database: /var/lib/reports.db\nmode: bulk\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/var/lib/reports.db")));
        assert_eq!(config.mode, Some(IngestMode::Bulk));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "mode: resolve\nformat: json\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.unknown_fields.contains_key("format"));
    }

    #[test]
    fn test_invalid_mode_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "mode: stream\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "mode: bulk\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.mode, Some(IngestMode::Bulk));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::resolve(&args(&[]), None);
        assert_eq!(settings.database, PathBuf::from(DEFAULT_DATABASE));
        assert_eq!(settings.mode, IngestMode::Resolve);
    }

    #[test]
    fn test_settings_config_over_defaults() {
        let config = ConfigFile {
            database: Some(PathBuf::from("corpus.db")),
            mode: Some(IngestMode::Bulk),
            unknown_fields: HashMap::new(),
        };
        let settings = Settings::resolve(&args(&[]), Some(config));
        assert_eq!(settings.database, PathBuf::from("corpus.db"));
        assert_eq!(settings.mode, IngestMode::Bulk);
    }

    #[test]
    fn test_settings_cli_over_config() {
        let config = ConfigFile {
            database: Some(PathBuf::from("corpus.db")),
            mode: Some(IngestMode::Bulk),
            unknown_fields: HashMap::new(),
        };
        let settings = Settings::resolve(&args(&["-d", "cli.db", "-m", "resolve"]), Some(config));
        assert_eq!(settings.database, PathBuf::from("cli.db"));
        assert_eq!(settings.mode, IngestMode::Resolve);
    }
}
