//! # TVmaze Integration Module
//!
//! This module is the integration layer between tvshelf and the public TVmaze
//! REST catalog. It exposes the read-only operations the show store needs
//! behind the [`Catalog`] trait, and implements that trait over HTTP in
//! [`TvMazeClient`].
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, JSON server)
//!          ↓
//! Show Store (cache, favorites, filters)
//!          ↓
//! Catalog trait ── TvMazeClient (reqwest, JSON)
//!          ↓
//! TVmaze REST API
//! ```
//!
//! ## Endpoints
//!
//! | Operation       | Request                        |
//! |-----------------|--------------------------------|
//! | `list_shows`    | `GET /shows?page={page}`       |
//! | `search_shows`  | `GET /search/shows?q={query}`  |
//! | `get_show`      | `GET /shows/{id}`              |
//! | `list_episodes` | `GET /shows/{id}/episodes`     |
//!
//! All requests are plain GETs without authentication. Nothing is retried
//! here; the caller decides whether to trigger a request again.
//!
//! ## Error Types
//!
//! Every operation returns [`CatalogError`]. A 404 is reported as
//! [`CatalogError::NotFound`] since TVmaze answers 404 both for unknown ids
//! and for pages past the end of the show index.

mod client;

pub use client::TvMazeClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Episode, SearchResult, Show};

/// Errors that can occur while talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The catalog answered with a non-success status.
    #[error("Catalog responded with status {0}")]
    Status(u16),

    /// The requested page or record does not exist.
    #[error("No matching data")]
    NotFound,

    /// The response body was not the expected JSON.
    #[error("Cannot decode catalog response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return CatalogError::Decode(err.to_string());
        }

        match err.status() {
            Some(status) if status == reqwest::StatusCode::NOT_FOUND => CatalogError::NotFound,
            Some(status) => CatalogError::Status(status.as_u16()),
            None => CatalogError::Network(err.to_string()),
        }
    }
}

/// Read-only access to a remote show catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Returns one page of the global show index.
    async fn list_shows(&self, page: u32) -> Result<Vec<Show>, CatalogError>;

    /// Returns wrapper records for shows whose name matches `query`.
    async fn search_shows(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError>;

    /// Returns a single show.
    async fn get_show(&self, show_id: u64) -> Result<Show, CatalogError>;

    /// Returns every episode of a show in airing order.
    async fn list_episodes(&self, show_id: u64) -> Result<Vec<Episode>, CatalogError>;
}
