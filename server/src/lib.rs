//! Pet clinic record API.
//!
//! # Overview
//! An axum router exposing create/list/get/update/delete for pet records
//! under `/api/records/petRecords`, backed by a `RecordStore` that is opened
//! once at startup and injected as router state.
//!
//! # Design
//! - Handlers are pass-through: the store coerces and validates bodies.
//! - Store errors are a tagged `StoreError`; the HTTP layer collapses them
//!   into `500 {message, error}` and logs the variant.
//! - `run` serves until Ctrl-C or SIGTERM, then drains in-flight requests.

use tokio::net::TcpListener;

pub mod config;
pub mod record;
pub mod routes;
pub mod store;
pub mod telemetry;

pub use config::{ConfigError, ServerConfig, StoreKind};
pub use record::{PetRecord, RecordId, RecordInput};
pub use routes::AppState;
pub use store::{FileStore, MemoryStore, RecordStore, SharedStore, StoreError};

pub fn app(state: AppState) -> axum::Router {
    routes::router(state)
}

/// Router over a fresh in-memory store.
pub fn in_memory_app() -> axum::Router {
    app(AppState::new(std::sync::Arc::new(MemoryStore::new())))
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
