use mcp_pantry::{PantryConfig, PantryMcpServer};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get configuration from environment variables
    let config = PantryConfig::from_env();
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string());

    tracing::info!("Inventory file: {}", config.inventory_path.display());
    tracing::info!("Recipe catalog: {}", config.recipes_path.display());
    tracing::info!("Favorites file: {}", config.favorites_path.display());

    let server = PantryMcpServer::new(config);
    if let Err(e) = server.check_data_files().await {
        tracing::error!("Could not read pantry data: {}", e);
        tracing::error!("Please verify:");
        tracing::error!("  - PANTRY_DATA_DIR points to a writable directory");
        tracing::error!("  - The inventory, recipes and favorites files are readable");
        std::process::exit(1);
    }

    // Create server configuration and start SSE server
    let sse_config = SseServerConfig {
        bind: bind_addr.parse()?,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: tokio_util::sync::CancellationToken::new(),
        sse_keep_alive: None,
    };

    tracing::info!("Pantry MCP Server listening on {}", sse_config.bind);

    let sse_server = SseServer::serve_with_config(sse_config).await?;

    // Sessions share one store so tool calls stay serialized
    let ct = sse_server.with_service(move || server.clone());

    tracing::info!("Pantry MCP Server started successfully");

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();

    Ok(())
}
