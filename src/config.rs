use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the source database path.
pub const DB_ENV_VAR: &str = "SATBOX_DB";

/// Optional on-disk configuration. All paths the tool touches come from
/// here, from CLI flags, or from the environment — nothing is hardcoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source set-top-box database (read-only, never modified in place).
    pub db_path: Option<PathBuf>,
    /// CSV of frequency-range provider rules.
    pub mapping_csv: Option<PathBuf>,
    /// Satellites XML with per-transponder provider attributes.
    pub satellites_xml: Option<PathBuf>,
    /// JSON channel-name -> provider lookup.
    pub channel_lookup_json: Option<PathBuf>,
}

impl Config {
    /// `~/.config/satbox/config.yaml` (platform equivalent via `dirs`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("satbox").join("config.yaml"))
    }

    /// Load the config file if present; a missing file is not an error,
    /// a malformed one is.
    pub fn load() -> Result<Self, AppError> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve the source database path: CLI flag, then `SATBOX_DB`,
    /// then the config file. The file must exist.
    pub fn resolve_db_path(&self, cli: Option<&Path>) -> Result<PathBuf, AppError> {
        let path = cli
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(DB_ENV_VAR).map(PathBuf::from))
            .or_else(|| self.db_path.clone())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "no database configured (use --db, {} or the config file)",
                    DB_ENV_VAR
                ))
            })?;
        if !path.exists() {
            return Err(AppError::MissingInput(path));
        }
        Ok(path)
    }
}
