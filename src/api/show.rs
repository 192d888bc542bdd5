use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    store::{EpisodeFilter, Resource, ShowStore},
    types::{Episode, Show},
};

#[derive(Debug, Serialize)]
pub struct ShowDetailView {
    pub id: u64,
    pub status: Resource,
    pub show: Option<Show>,
    pub favorite: bool,
    pub episodes_status: Resource,
    pub episodes: Vec<Episode>,
}

pub async fn show_detail(
    Path(id): Path<u64>,
    Query(filter): Query<EpisodeFilter>,
    Extension(store): Extension<Arc<ShowStore>>,
) -> Json<ShowDetailView> {
    let (show, _) = tokio::join!(store.fetch_show(id), store.fetch_episodes_for_show(id));

    Json(ShowDetailView {
        id,
        status: store.show_status(id).await,
        show: show.ok(),
        favorite: store.is_favorite(id).await,
        episodes_status: store.episodes_status(id).await,
        episodes: store.filtered_episodes(id, &filter).await,
    })
}

pub async fn toggle_favorite(
    Path(id): Path<u64>,
    Extension(store): Extension<Arc<ShowStore>>,
) -> (StatusCode, Json<Value>) {
    match store.toggle_favorite(id).await {
        Ok(favorite) => (StatusCode::OK, Json(json!({ "id": id, "favorite": favorite }))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "id": id, "error": e.to_string() })),
        ),
    }
}
