//! Runtime configuration
//!
//! Settings are resolved in order: `--db` flag, `FUNDTRACK_DB`, the TOML
//! config file, built-in defaults. The config file lives at
//! `FUNDTRACK_CONFIG` if set, otherwise `<config dir>/fundtrack/config.toml`.
//!
//! ```toml
//! [database]
//! path = "/srv/fund/data.db"
//!
//! [display]
//! currency_symbol = "€"
//! points_label = "pts"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::FundError;

pub const DB_ENV: &str = "FUNDTRACK_DB";
pub const CONFIG_ENV: &str = "FUNDTRACK_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySection {
    pub currency_symbol: Option<String>,
    pub points_label: Option<String>,
}

/// Effective settings after all layers are applied
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub currency_symbol: String,
    pub points_label: String,
}

/// Parse config file contents
pub fn parse_config(text: &str) -> Result<ConfigFile, FundError> {
    toml::from_str(text).map_err(|e| FundError::Config(e.to_string()))
}

/// Location of the config file, if one can be determined
pub fn config_file_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(p) => Some(PathBuf::from(p)),
        None => dir_spec::config_home().map(|d| d.join("fundtrack").join("config.toml")),
    }
}

/// Read the config file; a missing file means defaults.
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Ok(ConfigFile::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(FundError::from)
        .context(format!("Failed to read config file {:?}", path))?;
    let config = parse_config(&text).context(format!("Invalid config file {:?}", path))?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Default database path (~/.fundtrack/data.db)
pub fn default_db_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".fundtrack").join("data.db"))
}

/// Combine the layers; the default path is only computed when no layer
/// names a database.
pub fn resolve(
    cli_db: Option<PathBuf>,
    env_db: Option<PathBuf>,
    file: ConfigFile,
) -> Result<Settings> {
    let db_path = match cli_db.or(env_db).or(file.database.path) {
        Some(p) => p,
        None => default_db_path()?,
    };

    Ok(Settings {
        db_path,
        currency_symbol: file
            .display
            .currency_symbol
            .unwrap_or_else(|| "€".to_string()),
        points_label: file
            .display
            .points_label
            .unwrap_or_else(|| "pts".to_string()),
    })
}

/// Load settings from the environment and config file
pub fn load(cli_db: Option<PathBuf>) -> Result<Settings> {
    let file = match config_file_path() {
        Some(path) => read_config_file(&path)?,
        None => ConfigFile::default(),
    };
    let env_db = std::env::var_os(DB_ENV).map(PathBuf::from);
    resolve(cli_db, env_db, file)
}
