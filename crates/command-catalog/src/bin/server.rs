//! Command catalog server binary
//!
//! Run with: cargo run -p command-catalog --bin command-catalog-server
//! Set COMMAND_CATALOG_CONFIG to a TOML file to override the defaults.

use command_catalog::{config::CatalogConfig, server::CatalogServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "command_catalog=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CatalogConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Storage: {:?}", config.storage.backend);
    tracing::info!("  - Categories: {:?}", config.categories.mode);
    tracing::info!("  - Accepted extensions: {:?}", config.ingest.accepted_extensions);
    if let Some(dir) = &config.ingest.seed_dir {
        tracing::info!("  - Seed directory: {}", dir.display());
    }

    let server = CatalogServer::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  GET  /api/commands     - List and search commands");
    println!("  POST /api/commands     - Upload a .md guide");
    println!("  GET  /api/categories   - List categories");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
