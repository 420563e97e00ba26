use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::engine::ConfigSource;
use crate::data::error::DataError;
use crate::data::session::TABLE_PREFIX_KEY;
use crate::data::sql::Backend;
use crate::utils::file::expand_home;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_TABLE_NAME_PREFIX, KEY_BACKEND,
};

/// `database` section of `ormer.json`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// mysql (default), sqlite or postgres
    pub backend: Option<Backend>,
    /// Prepended to the joined user table's name
    pub table_name_prefix: Option<String>,
}

/// One parsed `ormer.json`; unrecognized top-level keys land in `extra`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileConfig {
    pub database: Option<DatabaseFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let parsed: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(unknown) = parsed.unknown_keys() {
            tracing::warn!(
                path = %path.display(),
                fields = %unknown,
                "Unknown fields in config file (possible typos)"
            );
        }
        tracing::trace!(path = %path.display(), config = ?parsed, "Parsed config file");
        Ok(parsed)
    }

    fn unknown_keys(&self) -> Option<String> {
        let serde_json::Value::Object(map) = &self.extra else {
            return None;
        };
        if map.is_empty() {
            return None;
        }
        Some(map.keys().cloned().collect::<Vec<_>>().join(", "))
    }

    /// Overlay `other` on top of `self`; set fields in `other` win
    fn merge(&mut self, other: FileConfig) {
        let Some(incoming) = other.database else {
            return;
        };
        let database = self.database.get_or_insert_with(Default::default);
        if let Some(backend) = incoming.backend {
            database.backend = Some(backend);
        }
        if let Some(prefix) = incoming.table_name_prefix {
            database.table_name_prefix = Some(prefix);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub backend: Backend,
    pub table_name_prefix: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            table_name_prefix: DEFAULT_TABLE_NAME_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Resolve the effective configuration.
    ///
    /// Layers, later wins: built-in defaults, `~/.ormer/ormer.json`, then
    /// either `--config` or a local `ormer.json`, then CLI flags and their
    /// environment fallbacks.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut file_config = FileConfig::default();
        let paths = config_paths(cli)?;
        for path in &paths {
            file_config.merge(FileConfig::read(path)?);
        }
        tracing::debug!(configs = ?paths, "Config files loaded");

        let config = Self::resolve(cli, file_config);
        config.validate()?;
        Ok(config)
    }

    /// Layer defaults -> file config -> CLI/env overrides
    fn resolve(cli: &CliConfig, file_config: FileConfig) -> Self {
        let file_database = file_config.database.unwrap_or_default();

        let backend = cli
            .backend
            .or(file_database.backend)
            .unwrap_or_default();
        let table_name_prefix = cli
            .table_prefix
            .clone()
            .or(file_database.table_name_prefix)
            .unwrap_or_else(|| DEFAULT_TABLE_NAME_PREFIX.to_string());

        Self {
            database: DatabaseConfig {
                backend,
                table_name_prefix,
            },
        }
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        // The prefix becomes part of SQL text in the user-table join
        let prefix = &self.database.table_name_prefix;
        if !prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            anyhow::bail!(
                "Configuration error: database.table_name_prefix may only contain ASCII letters, digits and '_' (got '{}')",
                prefix
            );
        }
        Ok(())
    }
}

impl ConfigSource for AppConfig {
    fn config_string(&self, key: &str) -> Result<String, DataError> {
        match key {
            TABLE_PREFIX_KEY => Ok(self.database.table_name_prefix.clone()),
            KEY_BACKEND => Ok(self.database.backend.name().to_string()),
            _ => Err(DataError::missing_key(key)),
        }
    }
}

/// Existing config files in merge order
fn config_paths(cli: &CliConfig) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = dirs::home_dir()
        .map(|home| home.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
        .filter(|profile| profile.exists())
        .into_iter()
        .collect();

    match &cli.config {
        Some(explicit) => {
            let explicit = expand_home(explicit);
            if !explicit.exists() {
                anyhow::bail!("Config file not found: {}", explicit.display());
            }
            paths.push(explicit);
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                paths.push(local);
            }
        }
    }
    Ok(paths)
}
