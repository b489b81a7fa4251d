use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::cli::{GlobalArgs, SearchArgs};
use crate::error::{ConfigError, ScanError};
use crate::scan::{date, OutputMode, ScanRequest};
use crate::store::sqlite::{is_valid_table_prefix, DEFAULT_TABLE_PREFIX};

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub database: Option<PathBuf>,
    pub table_prefix: Option<String>,
}

impl FileConfig {
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `explicit` if given, otherwise the default location. Only an
    /// explicit path is required to exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(FileConfig::default()),
            },
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&path, &content),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                Ok(FileConfig::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }
}

/// `~/.config/dmg-read-more/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "dmg-read-more")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Store settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: PathBuf,
    pub table_prefix: String,
}

impl Config {
    /// CLI flags win over the config file.
    pub fn from_global_args(global: &GlobalArgs, file: FileConfig) -> Result<Self, ConfigError> {
        let database = global
            .database
            .clone()
            .or(file.database)
            .ok_or(ConfigError::MissingDatabase)?;

        let table_prefix = global
            .table_prefix
            .clone()
            .or(file.table_prefix)
            .unwrap_or_else(|| DEFAULT_TABLE_PREFIX.to_string());

        if !is_valid_table_prefix(&table_prefix) {
            return Err(ConfigError::InvalidTablePrefix(table_prefix));
        }

        Ok(Config {
            database,
            table_prefix,
        })
    }
}

/// Builds the scan request from `search` flags, defaulting dates relative to
/// `today`. Needs no config or database, so a bad date is reported first.
pub fn search_request(args: &SearchArgs, today: NaiveDate) -> Result<ScanRequest, ScanError> {
    let (default_after, default_before) = date::default_window(today);

    ScanRequest::new(
        args.date_after.clone().unwrap_or(default_after),
        args.date_before.clone().unwrap_or(default_before),
        OutputMode::from_format(&args.format),
    )
}
