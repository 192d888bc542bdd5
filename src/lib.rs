//! tvshelf library
//!
//! This library provides functionality for browsing, searching and bookmarking
//! TV shows from the TVmaze catalog. It includes the catalog client, the
//! client-side show store, route definitions, and the CLI and JSON views that
//! sit on top of them.
//!
//! # Modules
//!
//! - `api` - JSON view handlers for the local server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Persisted favorites
//! - `routes` - Client paths and the views they lead to
//! - `server` - Local HTTP server serving the routes as JSON
//! - `store` - Session show store (genre pages, search, episodes, filters)
//! - `tvmaze` - TVmaze REST client
//! - `types` - Data structures and type definitions
//! - `utils` - Formatting helpers
//!
//! # Example
//!
//! ```
//! use tvshelf::store::ShowStore;
//!
//! #[tokio::main]
//! async fn main() -> tvshelf::Res<()> {
//!     tvshelf::config::load_env().await?;
//!     let store = ShowStore::from_env().await;
//!     store.fetch_next_page("Drama").await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod routes;
pub mod server;
pub mod store;
pub mod tvmaze;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it can
/// cross `.await` points and task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching page {} of {}", page, genre);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Added {} to favorites", show.name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1. Only for failures the current
/// command cannot recover from.
///
/// # Example
///
/// ```
/// error!("Cannot bind server address: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, such as a failed
/// catalog request.
///
/// # Example
///
/// ```
/// warning!("Failed to fetch shows: {}", message);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
