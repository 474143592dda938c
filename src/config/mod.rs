mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// Default endpoint of the external search provider.
pub const DEFAULT_PROVIDER_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default name of the collection search results are stored in.
pub const DEFAULT_COLLECTION: &str = "results";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub collection: String,
    pub logging_level: RequestsLoggingLevel,
    pub provider_url: Option<String>,
    pub api_key: Option<String>,
    pub engine_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub port: u16,
    pub collection: String,
    pub logging_level: RequestsLoggingLevel,
    pub provider_url: String,
    pub api_key: String,
    pub engine_id: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        // TOML overrides CLI for each field
        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        // Validate db_dir exists
        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);

        let collection = file
            .collection
            .unwrap_or_else(|| cli.collection.clone());

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let provider_url = file
            .provider_url
            .or_else(|| cli.provider_url.clone())
            .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string());

        let api_key = file.api_key.or_else(|| cli.api_key.clone()).ok_or_else(|| {
            anyhow::anyhow!("api_key must be specified via --api-key or in config file")
        })?;

        let engine_id = file
            .engine_id
            .or_else(|| cli.engine_id.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("engine_id must be specified via --engine-id or in config file")
            })?;

        Ok(Self {
            db_dir,
            port,
            collection,
            logging_level,
            provider_url,
            api_key,
            engine_id,
        })
    }

    pub fn results_db_path(&self) -> PathBuf {
        self.db_dir.join("results.db")
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
