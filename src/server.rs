use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tracing::info;

use crate::{Res, api, store::ShowStore};

pub fn router(store: Arc<ShowStore>) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/show/{id}", get(api::show_detail))
        .route("/show/{id}/favorite", post(api::toggle_favorite))
        .route("/search", get(api::search))
        .route("/genre/{genre}", get(api::genre))
        .route("/health", get(api::health))
        .layer(Extension(store))
}

pub async fn start_api_server(store: Arc<ShowStore>, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "serving views");

    axum::serve(listener, router(store)).await?;
    Ok(())
}
