//! Catalog Server - Main entry point

use anyhow::Result;
use catalog_common::logging::{init_logging, LogConfig};
use tracing::info;

use catalog_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging from the environment; LOG_FILTER takes precedence
    // over the built-in directives.
    let mut log_config = LogConfig::from_env()?.with_file_prefix("catalog-server");
    if log_config.filter_directives.is_none() {
        log_config = log_config
            .with_filter_directives("catalog_server=debug,tower_http=debug,sqlx=info");
    }

    init_logging(&log_config)?;

    info!("Starting Catalog Server");

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await
}
