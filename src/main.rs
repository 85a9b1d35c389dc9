use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk_backend::db::mask_connection_string;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk_backend=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    println!("=== STARTING NEWSDESK BACKEND API ===");

    let state = match newsdesk_backend::initialize_app_state().await {
        Ok(state) => {
            println!("✓ Application state initialized successfully");
            state
        },
        Err(e) => {
            println!("✗ Failed to initialize application state: {}", e);
            error!("Failed to initialize application state: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Initialization failed: {}", e),
            ));
        },
    };

    let bind_address = state.config.bind_address.clone();
    println!(
        "Database URL: {}",
        mask_connection_string(&state.config.database_url)
    );
    info!("Starting Newsdesk Backend API on {}", bind_address);

    let app = newsdesk_backend::build_app(state);

    println!("Starting HTTP server on {}...", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("HTTP server listening on {}", bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
