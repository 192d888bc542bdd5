//! Configuration management for tvshelf.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every value has a built-in default, so the
//! application works without any configuration at all.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_API_URL: &str = "https://api.tvmaze.com";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_HOME_GENRES: &str = "Drama,Comedy,Action,Thriller,Science-Fiction";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the data directory if it doesn't exist and loads variables from
/// `tvshelf/.env` inside it. A missing `.env` file is not an error; variables
/// already present in the process environment are never overwritten.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/tvshelf/.env`
/// - macOS: `~/Library/Application Support/tvshelf/.env`
/// - Windows: `%LOCALAPPDATA%/tvshelf/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Installs the diagnostic log subscriber.
///
/// Diagnostics go to stderr and are filtered with `RUST_LOG`, defaulting to
/// `warn` so regular command output stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Returns the directory holding the `.env` file and persisted favorites.
///
/// `TVSHELF_DATA_DIR` overrides the platform data directory.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("TVSHELF_DATA_DIR") {
        return PathBuf::from(dir);
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tvshelf");
    path
}

/// Returns the base URL of the show catalog, without a trailing slash.
///
/// # Example
///
/// ```
/// let url = api_url(); // e.g., "https://api.tvmaze.com"
/// ```
pub fn api_url() -> String {
    env::var("TVSHELF_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Returns the address the local JSON server binds to.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the genres shown as carousels on the home view.
///
/// Read from the comma separated `TVSHELF_HOME_GENRES` variable. Blank
/// segments are ignored; an empty list falls back to the defaults.
pub fn home_genres() -> Vec<String> {
    let raw = env::var("TVSHELF_HOME_GENRES").unwrap_or_default();
    let genres = parse_genre_list(&raw);
    if genres.is_empty() {
        parse_genre_list(DEFAULT_HOME_GENRES)
    } else {
        genres
    }
}

fn parse_genre_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}
