use std::{io::ErrorKind, path::PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::config;

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Cannot access favorites file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Cannot encode/decode favorites: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// The persisted set of bookmarked show ids.
///
/// Stored as a JSON array of ids, kept in insertion order.
#[derive(Debug, Clone)]
pub struct FavoritesManager {
    path: PathBuf,
    ids: Vec<u64>,
}

impl FavoritesManager {
    pub fn new(path: PathBuf, ids: Option<Vec<u64>>) -> Self {
        Self {
            path,
            ids: ids.unwrap_or_default(),
        }
    }

    pub fn default_path() -> PathBuf {
        config::data_dir().join("favorites.json")
    }

    pub async fn load(path: PathBuf) -> Result<Self, FavoritesError> {
        let content = async_fs::read_to_string(&path).await?;
        let ids: Vec<u64> = serde_json::from_str(&content)?;
        Ok(Self { path, ids })
    }

    /// Loads the favorites at `path`, starting empty when the file is missing
    /// or unreadable.
    pub async fn load_or_empty(path: PathBuf) -> Self {
        match Self::load(path.clone()).await {
            Ok(manager) => manager,
            Err(FavoritesError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                Self::new(path, None)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable favorites");
                Self::new(path, None)
            }
        }
    }

    pub async fn persist(&self) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string(&self.ids)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Flips membership of `show_id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, show_id: u64) -> bool {
        if self.contains(show_id) {
            self.ids.retain(|id| *id != show_id);
            false
        } else {
            self.ids.push(show_id);
            true
        }
    }

    pub fn contains(&self, show_id: u64) -> bool {
        self.ids.contains(&show_id)
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
