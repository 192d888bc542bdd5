//! # API Module
//!
//! JSON views for the local tvshelf server. Every client path from
//! [`crate::routes`] has a handler here that triggers the same store actions
//! the CLI does and returns the resulting state as a JSON document.
//!
//! ## Endpoints
//!
//! - [`home`] - `GET /` genre carousels, or cached matches for `?q=`
//! - [`show_detail`] - `GET /show/{id}` show, episodes and favorite flag;
//!   accepts `season`, `min_rating` and `term` episode filters
//! - [`toggle_favorite`] - `POST /show/{id}/favorite`
//! - [`search`] - `GET /search?q=` catalog search
//! - [`genre`] - `GET /genre/{genre}` full genre listing; `more=true` loads
//!   the next page, `has_image` and `min_rating` update the filters
//! - [`health`] - `GET /health`
//!
//! Store failures never turn into HTTP errors on the read views; they are
//! reported in the document's `error` field the same way a browser view
//! would display them next to whatever state is cached.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use axum::{Extension, Router, routing::get};
//! use tvshelf::{api, store::ShowStore};
//!
//! let store = Arc::new(ShowStore::from_env().await);
//! let app = Router::new()
//!     .route("/", get(api::home))
//!     .layer(Extension(store));
//! ```

mod health;
mod show;
mod views;

pub use health::health;
pub use show::{show_detail, toggle_favorite};
pub use views::{genre, home, search};
