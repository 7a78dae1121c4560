//! HTTP server setup and management

use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::*;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(300));

    Router::new()
        .route("/health", get(health))
        .route("/steam", get(steam))
        .route("/steam.text", get(steam_text))
        .route("/cloud", get(cloud))
        .route("/cloud.text", get(cloud_text))
        .route("/valorant", get(valorant))
        .route("/valorant.text", get(valorant_text))
        .route("/discord", get(discord))
        .route("/discord.text", get(discord_text))
        .route("/workstation", get(workstation).post(push_workstation))
        .route("/workstation.text", get(workstation_text))
        .layer(cors)
        .with_state(state)
}

/// Serve until `shutdown` is cancelled
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> crate::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("HTTP status server listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("HTTP status server stopped");
    Ok(())
}
