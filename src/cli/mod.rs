//! # CLI Module
//!
//! This module provides the command-line views of tvshelf. Each command is a
//! terminal rendition of one client route: it triggers the store actions the
//! route needs and prints the resulting state as tables.
//!
//! ## Commands
//!
//! - [`home`] - Genre carousels for the configured home genres
//! - [`genre`] - Full listing of one genre, loading as many pages as asked
//! - [`search`] - Catalog search by show name
//! - [`show`] - Show details and its episode list
//! - [`favorites`] - List bookmarked shows or toggle one
//! - [`open`] - Resolve a client path (`/show/1`, `/genre/Drama`, ...) and
//!   render its view
//! - [`serve`] - Run the JSON server over the same store
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (tables, colored messages)
//!     ↓
//! Show Store (cache, favorites, filters)
//!     ↓
//! TVmaze client (HTTP)
//! ```
//!
//! Commands receive the session store by reference and never talk to the
//! catalog directly.
//!
//! ## Error Handling
//!
//! Catalog failures are reported with `warning!` and whatever the store has
//! cached is still printed. Only failures that leave nothing to show, like
//! an unknown path passed to `open` or a server that cannot bind, end the
//! process through `error!`.
//!
//! ## Usage Patterns
//!
//! ```bash
//! tvshelf home                              # Carousels for the home genres
//! tvshelf genre Drama --pages 3 --has-image # Three pages of dramas with artwork
//! tvshelf search "breaking bad"             # Catalog search
//! tvshelf show 169 --season 2               # Details and season 2 episodes
//! tvshelf favorites toggle 169              # Bookmark a show
//! tvshelf open /genre/Comedy                # Render a client path
//! tvshelf serve --open                      # JSON views on SERVER_ADDRESS
//! ```

mod favorites;
mod genre;
mod home;
mod open;
mod search;
mod serve;
mod show;

pub use favorites::{favorite_shows, favorites};
pub use genre::genre;
pub use home::home;
pub use open::open;
pub use search::search;
pub use serve::serve;
pub use show::show;
