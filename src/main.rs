//! Catalog server binary
//!
//! Configuration comes from the YAML file named by `CATALOG_CONFIG` (all
//! fields optional) and `CATALOG_PORT`. Log verbosity follows `RUST_LOG`.

use catalog::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        data_file = %config.data_file.display(),
        sample_size = config.sample_size,
        "Starting catalog server"
    );

    ServerBuilder::new().with_config(config).serve().await
}
