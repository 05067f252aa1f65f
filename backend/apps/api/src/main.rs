//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors flow through
//! `policy::PolicyError` / `kernel::error::AppError`.

use axum::{Router, routing::get};
use chrono::Utc;
use policy::domain::repository::ClientRepository;
use policy::{JsonFileStore, PolicyConfig, PolicyResult, policy_router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,policy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PolicyConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        "Starting gatewarden"
    );

    let store = JsonFileStore::new(&config);

    // Startup sweep: drop leases that expired while the server was down.
    // Errors here should not prevent server startup.
    match sweep_expired_leases(&store).await {
        Ok(0) => {}
        Ok(pruned) => {
            tracing::info!(clients_pruned = pruned, "Startup lease sweep completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Startup lease sweep failed, continuing anyway");
        }
    }

    // Periodic sweep: expired leases are inert either way, this just keeps
    // the store from accumulating stale entries.
    let sweep_store = store.clone();
    let sweep_interval = config.lease_sweep_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        // The first tick fires immediately and the startup sweep just ran.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match sweep_expired_leases(&sweep_store).await {
                Ok(0) => {}
                Ok(pruned) => {
                    tracing::info!(clients_pruned = pruned, "Pruned expired leases");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Lease sweep failed");
                }
            }
        }
    });

    // A permissive cors policy: the gateway runs behind the household
    // firewall and the SPA may be served from another port.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/statusz", get(statusz))
        .nest("/api/v1", policy_router(store))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check used by the service manager
async fn statusz() -> &'static str {
    "OK"
}

/// Remove expired leases from every stored client.
///
/// Returns how many clients were rewritten. Pruning is purely a storage
/// concern: evaluation treats expired leases as inert whether or not this
/// ever runs.
async fn sweep_expired_leases(store: &JsonFileStore) -> PolicyResult<usize> {
    let now = Utc::now();
    let mut pruned = 0;

    for client in store.list_clients().await? {
        let Some(id) = client.id else { continue };
        if let Some(updated) = client.prune_expired_leases(now) {
            store.replace_client(id, updated).await?;
            pruned += 1;
        }
    }

    Ok(pruned)
}
