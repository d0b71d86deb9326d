//! HTTP surface of the letter store: `POST /api/mails` and `GET /api/mails`.
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Settings;
use error::StartupError;
use routes::{list_mails_handler, submit_mail_handler};
use state::State;

pub fn router(state: Arc<State>) -> Router {
    Router::new()
        .route(
            "/api/mails",
            get(list_mails_handler).post(submit_mail_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(settings: Settings) -> Result<(), StartupError> {
    info!("Initializing state...");
    let state = State::new(settings)?;

    let address = state.config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running at http://localhost:{}", state.config.port);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
