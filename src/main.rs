use anyhow::{Context, Result};
use magari360::{
    catalog::JsonFileSource,
    config::Settings,
    inventory::Inventory,
    routes,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "magari360=info,tower_http=info".into()))
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing Magari 360 inventory server...");

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    // The collection is materialized once and stays immutable for the process lifetime
    let source = JsonFileSource::new(&settings.inventory_path);
    let inventory = Inventory::from_source(&source)
        .with_context(|| format!("Failed to load inventory from {}", settings.inventory_path))?;
    tracing::info!("Inventory ready with {} vehicles.", inventory.len());

    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;

    let app_state = AppState::new(settings, inventory);
    let app = routes::create_router(app_state);

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
