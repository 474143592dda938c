use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use search_relay_server::config::{AppConfig, CliConfig, FileConfig};
use search_relay_server::provider::CustomSearchClient;
use search_relay_server::result_store::SqliteResultStore;
use search_relay_server::server::{run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory where the results database lives.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Name of the collection search results are stored in.
    #[clap(long, default_value = "results")]
    pub collection: String,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Base URL of the external search provider.
    #[clap(long)]
    pub provider_url: Option<String>,

    /// API credential for the external search provider.
    #[clap(long)]
    pub api_key: Option<String>,

    /// Search engine identifier (the provider's `cx` parameter).
    #[clap(long)]
    pub engine_id: Option<String>,

    /// Path to a TOML config file; its values override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    let cli_config = CliConfig {
        db_dir: cli_args.db_dir,
        port: cli_args.port,
        collection: cli_args.collection,
        logging_level: cli_args.logging_level,
        provider_url: cli_args.provider_url,
        api_key: cli_args.api_key,
        engine_id: cli_args.engine_id,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!(
        "Opening results database at {:?}...",
        config.results_db_path()
    );
    let result_store = Arc::new(SqliteResultStore::new(config.results_db_path())?);
    info!("Connected to results database!");

    let provider = Arc::new(CustomSearchClient::new(
        config.provider_url.clone(),
        config.api_key.clone(),
        config.engine_id.clone(),
    ));
    info!("Forwarding searches to {}", provider.endpoint());

    let server_config = ServerConfig {
        port: config.port,
        collection: config.collection.clone(),
        requests_logging_level: config.logging_level.clone(),
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(server_config, provider, result_store).await
}
