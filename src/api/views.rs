use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, Query},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    config,
    store::{FilterPatch, Filters, Resource, ShowStore},
    types::Show,
};

/// Number of shows a home carousel carries.
const CAROUSEL_SIZE: usize = 20;

#[derive(Debug, Serialize)]
pub struct Carousel {
    pub genre: String,
    pub status: Resource,
    pub shows: Vec<Show>,
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub query: Option<String>,
    pub carousels: Vec<Carousel>,
    pub matches: Vec<Show>,
    pub favorites: Vec<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub q: Option<String>,
}

pub async fn home(
    Query(params): Query<HomeQuery>,
    Extension(store): Extension<Arc<ShowStore>>,
) -> Json<HomeView> {
    let favorites = store.favorites().await;
    let query = params.q.filter(|q| !q.trim().is_empty());

    // a live filter replaces the carousels with matches from the cache
    if let Some(q) = query {
        let matches = store.search_cached(&q).await;
        return Json(HomeView {
            query: Some(q),
            carousels: Vec::new(),
            matches,
            favorites,
        });
    }

    let genres = config::home_genres();
    store.load_missing_genres(&genres).await;

    let mut carousels = Vec::with_capacity(genres.len());
    for genre in genres {
        let mut shows = store.sorted_filtered_shows(&genre).await;
        shows.truncate(CAROUSEL_SIZE);
        carousels.push(Carousel {
            status: store.genre_status(&genre).await,
            genre,
            shows,
        });
    }

    Json(HomeView {
        query: None,
        carousels,
        matches: Vec::new(),
        favorites,
    })
}

#[derive(Debug, Serialize)]
pub struct SearchView {
    pub query: String,
    pub status: Resource,
    pub results: Vec<Show>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search(
    Query(params): Query<SearchQuery>,
    Extension(store): Extension<Arc<ShowStore>>,
) -> Json<SearchView> {
    // the outcome is read back from the store below
    let _ = store.search_by_name(&params.q).await;

    Json(SearchView {
        query: params.q,
        status: store.search_status().await,
        results: store.search_results().await,
    })
}

#[derive(Debug, Serialize)]
pub struct GenreView {
    pub genre: String,
    pub status: Resource,
    pub page: Option<u32>,
    pub filters: Filters,
    pub shows: Vec<Show>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenreQuery {
    #[serde(default)]
    pub more: bool,
    pub has_image: Option<bool>,
    pub min_rating: Option<f64>,
}

pub async fn genre(
    Path(genre): Path<String>,
    Query(params): Query<GenreQuery>,
    Extension(store): Extension<Arc<ShowStore>>,
) -> Json<GenreView> {
    if params.has_image.is_some() || params.min_rating.is_some() {
        store
            .set_filters(FilterPatch {
                has_image: params.has_image,
                min_rating: params.min_rating,
            })
            .await;
    }

    if params.more {
        let _ = store.fetch_next_page(&genre).await;
    } else {
        store.load_missing_genres(std::slice::from_ref(&genre)).await;
    }

    Json(GenreView {
        status: store.genre_status(&genre).await,
        page: store.cursor(&genre).await,
        filters: store.filters().await,
        shows: store.sorted_filtered_shows(&genre).await,
        genre,
    })
}
