//! Runtime configuration.
//!
//! Loaded from an optional TOML file, then overridden from `SHELFDESK_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use shelfdesk_core::{Error, QueryParams, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "SHELFDESK_";

/// Shelfdesk settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfdeskConfig {
    /// `tracing` filter directives, used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Page size for option fetches
    pub option_page_size: u32,

    /// Bound on a single save, in seconds. Unbounded when absent.
    pub save_timeout_secs: Option<u64>,

    /// JSON file with initial books, members, and borrows
    pub seed_file: Option<PathBuf>,
}

impl Default for ShelfdeskConfig {
    fn default() -> Self {
        Self {
            log_filter: "info,shelfdesk=debug".to_string(),
            option_page_size: 20,
            save_timeout_secs: None,
            seed_file: None,
        }
    }
}

impl ShelfdeskConfig {
    /// Reads `path` when given, otherwise starts from defaults, then applies
    /// environment overrides and validates.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML file without overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    /// Parses TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::config(e.to_string()))
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by full variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(filter) = var("LOG_FILTER") {
            self.log_filter = filter;
        }
        if let Some(size) = var("OPTION_PAGE_SIZE") {
            self.option_page_size = parse_number("OPTION_PAGE_SIZE", &size)?;
        }
        if let Some(secs) = var("SAVE_TIMEOUT_SECS") {
            self.save_timeout_secs = Some(parse_number("SAVE_TIMEOUT_SECS", &secs)?);
        }
        if let Some(path) = var("SEED_FILE") {
            self.seed_file = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Rejects zero page sizes and zero timeouts.
    pub fn validate(&self) -> Result<()> {
        if self.option_page_size == 0 {
            return Err(Error::config("option_page_size must be greater than 0"));
        }
        if self.save_timeout_secs == Some(0) {
            return Err(Error::config("save_timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// Query for option fetches.
    pub fn option_query(&self) -> QueryParams {
        QueryParams::new().with_size(self.option_page_size)
    }

    /// Save bound as a duration.
    pub fn save_timeout(&self) -> Option<Duration> {
        self.save_timeout_secs.map(Duration::from_secs)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::config(format!("{ENV_PREFIX}{name} is not a number: {raw}")))
}
