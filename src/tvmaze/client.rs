use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{Catalog, CatalogError};
use crate::{
    config,
    types::{Episode, SearchResult, Show},
};

/// HTTP implementation of [`Catalog`] for the TVmaze API.
#[derive(Debug, Clone)]
pub struct TvMazeClient {
    client: Client,
    base_url: String,
}

impl TvMazeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client for the configured catalog URL.
    pub fn from_env() -> Self {
        Self::new(config::api_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let api_url = format!("{uri}{path}", uri = self.base_url, path = path);
        debug!(url = %api_url, ?query, "catalog request");

        let response = self
            .client
            .get(&api_url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Catalog for TvMazeClient {
    async fn list_shows(&self, page: u32) -> Result<Vec<Show>, CatalogError> {
        self.get_json("/shows", &[("page", page.to_string())]).await
    }

    async fn search_shows(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        self.get_json("/search/shows", &[("q", query.to_string())])
            .await
    }

    async fn get_show(&self, show_id: u64) -> Result<Show, CatalogError> {
        self.get_json(&format!("/shows/{id}", id = show_id), &[])
            .await
    }

    async fn list_episodes(&self, show_id: u64) -> Result<Vec<Episode>, CatalogError> {
        let mut episodes: Vec<Episode> = self
            .get_json(&format!("/shows/{id}/episodes", id = show_id), &[])
            .await?;

        for episode in episodes.iter_mut() {
            episode.show_id = show_id;
        }
        Ok(episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = TvMazeClient::new("https://api.tvmaze.com/");
        assert_eq!(client.base_url(), "https://api.tvmaze.com");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_reports_network_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = TvMazeClient::new("http://127.0.0.1:9");
        let err = client.list_shows(0).await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }
}
