//! HTTP layer: the pilot-request form endpoint and read-only demo reports.

pub mod routes;
pub mod types;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    /// Outbound client for webhook delivery.
    pub http: Client,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("trial-bias/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building webhook client")?;
        Ok(Self { settings, http })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/pilot-request", post(routes::pilot_request))
        .route("/api/demo/datasets", get(routes::list_datasets))
        .route("/api/demo/stages", get(routes::list_stages))
        .route("/api/demo/demographic", get(routes::demographic_report))
        .route("/api/demo/attrition", get(routes::attrition_report))
        .route("/api/demo/metadata", get(routes::metadata_report))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let state = AppState::new(settings)?;
    let router = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving trial-bias API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
