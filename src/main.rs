// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::ingestion::BlockingIngestor;
use crate::application::session::Session;
use crate::infrastructure::config::{build_palettes, load_app_config};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_chart, create_dashboard, delete_dashboard, delete_dataset, get_dashboard, get_dataset,
    get_selection, health_check, import_dataset, list_dashboards, list_datasets, list_palettes,
    remove_chart, render_chart, update_selection,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;
    let palettes = build_palettes(&app_config.palettes);

    // Session state (application layer) and ingestion (infrastructure-backed)
    let state = Arc::new(AppState::new(
        Session::new(palettes),
        Arc::new(BlockingIngestor),
    ));

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/palettes", get(list_palettes))
        .route("/datasets", get(list_datasets).post(import_dataset))
        .route("/datasets/:id", get(get_dataset).delete(delete_dataset))
        .route("/dashboards", get(list_dashboards).post(create_dashboard))
        .route("/dashboards/:id", get(get_dashboard).delete(delete_dashboard))
        .route("/dashboards/:id/charts/:chart_id", delete(remove_chart))
        .route("/dashboards/:id/charts/:chart_id/render", get(render_chart))
        .route("/selection", get(get_selection).put(update_selection))
        .route("/charts", post(add_chart))
        .layer(DefaultBodyLimit::max(app_config.ingestion.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = app_config.server.bind_address.parse()?;
    tracing::info!("Starting dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
