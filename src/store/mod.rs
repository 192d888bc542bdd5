//! Client-side show store.
//!
//! [`ShowStore`] owns every piece of cached catalog state for one session:
//! shows grouped by genre with a page cursor per genre, search results, show
//! details, episode lists, the favorites set and the active filters. Views
//! call its actions and read its derived state; they never talk to the
//! catalog directly.
//!
//! Each logical resource carries its own [`Resource`] status, so actions on
//! different keys cannot overwrite each other's loading or error state.
//! State sits behind a mutex that is released before every network call.
//! Genre page requests run on their own task, so a caller that gives up
//! waiting never leaves a genre marked as in flight. Favorites are written
//! from a snapshot taken under the state lock; a separate write lock keeps
//! the file in toggle order without blocking readers on disk I/O.

mod filter;
mod resource;

pub use filter::{EpisodeFilter, FilterPatch, Filters, filter_episodes, sort_filter_shows};
pub use resource::Resource;

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    management::{FavoritesError, FavoritesManager},
    tvmaze::{Catalog, TvMazeClient},
    types::{Episode, Show},
};

/// Outcome of a genre page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum PageFetch {
    /// The page was fetched and `added` matching shows were appended.
    Fetched { page: u32, added: usize },
    /// A fetch for the same genre was already running; nothing was requested.
    Skipped,
}

struct StoreState {
    shows_by_genre: BTreeMap<String, Vec<Show>>,
    pages_loaded: BTreeMap<String, u32>,
    genre_status: HashMap<String, Resource>,
    genres_in_flight: HashSet<String>,
    search_results: Vec<Show>,
    search_status: Resource,
    search_generation: u64,
    shows_by_id: HashMap<u64, Show>,
    show_status: HashMap<u64, Resource>,
    episodes_by_show: HashMap<u64, Vec<Episode>>,
    episodes_status: HashMap<u64, Resource>,
    filters: Filters,
    favorites: FavoritesManager,
}

pub struct ShowStore {
    catalog: Arc<dyn Catalog>,
    state: Arc<Mutex<StoreState>>,
    favorites_write: Mutex<()>,
}

impl ShowStore {
    pub fn new(catalog: Box<dyn Catalog>, favorites: FavoritesManager) -> Self {
        Self {
            catalog: Arc::from(catalog),
            favorites_write: Mutex::new(()),
            state: Arc::new(Mutex::new(StoreState {
                shows_by_genre: BTreeMap::new(),
                pages_loaded: BTreeMap::new(),
                genre_status: HashMap::new(),
                genres_in_flight: HashSet::new(),
                search_results: Vec::new(),
                search_status: Resource::Idle,
                search_generation: 0,
                shows_by_id: HashMap::new(),
                show_status: HashMap::new(),
                episodes_by_show: HashMap::new(),
                episodes_status: HashMap::new(),
                filters: Filters::default(),
                favorites,
            })),
        }
    }

    /// Creates the session store for the configured catalog, with favorites
    /// loaded from the data directory.
    pub async fn from_env() -> Self {
        let favorites = FavoritesManager::load_or_empty(FavoritesManager::default_path()).await;
        Self::new(Box::new(TvMazeClient::from_env()), favorites)
    }

    /* -----------------------------------
     * Genre pages
     * ----------------------------------- */

    /// Fetches page `page` of the show index and appends the shows tagged
    /// with `genre` to its bucket.
    ///
    /// On failure the bucket and cursor are untouched and the genre status
    /// holds the error message, which is also returned.
    pub async fn fetch_genre_page(&self, genre: &str, page: u32) -> Result<PageFetch, String> {
        if self.claim_genre(genre, Some(page)).await.is_none() {
            debug!(genre, page, "genre fetch already in flight");
            return Ok(PageFetch::Skipped);
        }
        self.run_genre_fetch(genre, page).await
    }

    /// Fetches the page after the genre's cursor, or page 0 when the genre was
    /// never fetched.
    pub async fn fetch_next_page(&self, genre: &str) -> Result<PageFetch, String> {
        match self.claim_genre(genre, None).await {
            Some(page) => self.run_genre_fetch(genre, page).await,
            None => {
                debug!(genre, "genre fetch already in flight");
                Ok(PageFetch::Skipped)
            }
        }
    }

    /// Requests the first page of every genre that has no shows and was never
    /// fetched. Returns the genres a request was issued for.
    pub async fn load_missing_genres(&self, genres: &[String]) -> Vec<String> {
        let missing: Vec<String> = {
            let state = self.state.lock().await;
            genres
                .iter()
                .filter(|genre| {
                    state
                        .shows_by_genre
                        .get(genre.as_str())
                        .is_none_or(|shows| shows.is_empty())
                        && !state.pages_loaded.contains_key(genre.as_str())
                        && !state.genres_in_flight.contains(genre.as_str())
                })
                .cloned()
                .collect()
        };

        let mut requested = Vec::new();
        for genre in missing {
            if let Ok(PageFetch::Fetched { .. }) | Err(_) = self.fetch_next_page(&genre).await {
                requested.push(genre);
            }
        }
        requested
    }

    /// Marks `genre` as in flight and returns the page to fetch, or `None`
    /// when a fetch for the genre is already running.
    async fn claim_genre(&self, genre: &str, page: Option<u32>) -> Option<u32> {
        let mut state = self.state.lock().await;
        if !state.genres_in_flight.insert(genre.to_string()) {
            return None;
        }

        let page = page.unwrap_or_else(|| {
            state
                .pages_loaded
                .get(genre)
                .map_or(0, |cursor| cursor + 1)
        });
        state
            .genre_status
            .insert(genre.to_string(), Resource::Loading);
        Some(page)
    }

    async fn run_genre_fetch(&self, genre: &str, page: u32) -> Result<PageFetch, String> {
        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        let genre = genre.to_string();

        let task = tokio::spawn(async move {
            debug!(genre = %genre, page, "fetching genre page");
            let result = catalog.list_shows(page).await;

            let mut state = state.lock().await;
            state.genres_in_flight.remove(&genre);

            match result {
                Ok(shows) => {
                    let matching: Vec<Show> =
                        shows.into_iter().filter(|s| s.in_genre(&genre)).collect();
                    let added = matching.len();

                    state
                        .shows_by_genre
                        .entry(genre.clone())
                        .or_default()
                        .extend(matching);
                    state.pages_loaded.insert(genre.clone(), page);
                    state.genre_status.insert(genre, Resource::Ready);
                    Ok(PageFetch::Fetched { page, added })
                }
                Err(e) => {
                    let message = e.to_string();
                    warn!(genre = %genre, page, error = %message, "genre page fetch failed");
                    state
                        .genre_status
                        .insert(genre, Resource::Error(message.clone()));
                    Err(message)
                }
            }
        });

        task.await.map_err(|e| e.to_string())?
    }

    /// Shows of `genre` with the active filters applied, best rated first.
    pub async fn sorted_filtered_shows(&self, genre: &str) -> Vec<Show> {
        let state = self.state.lock().await;
        let shows = state
            .shows_by_genre
            .get(genre)
            .map(Vec::as_slice)
            .unwrap_or_default();
        sort_filter_shows(shows, &state.filters)
    }

    pub async fn shows_by_genre(&self, genre: &str) -> Vec<Show> {
        let state = self.state.lock().await;
        state.shows_by_genre.get(genre).cloned().unwrap_or_default()
    }

    pub async fn cursor(&self, genre: &str) -> Option<u32> {
        self.state.lock().await.pages_loaded.get(genre).copied()
    }

    pub async fn genre_status(&self, genre: &str) -> Resource {
        let state = self.state.lock().await;
        state.genre_status.get(genre).cloned().unwrap_or_default()
    }

    /// Cached shows from every genre whose name contains `query`, ignoring
    /// case. Each show appears once even if it is in several buckets.
    pub async fn search_cached(&self, query: &str) -> Vec<Show> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let state = self.state.lock().await;
        let mut seen = HashSet::new();
        state
            .shows_by_genre
            .values()
            .flatten()
            .filter(|show| show.name.to_lowercase().contains(&needle))
            .filter(|show| seen.insert(show.id))
            .cloned()
            .collect()
    }

    /* -----------------------------------
     * Filters
     * ----------------------------------- */

    pub async fn set_filters(&self, patch: FilterPatch) {
        self.state.lock().await.filters.merge(patch);
    }

    pub async fn filters(&self) -> Filters {
        self.state.lock().await.filters.clone()
    }

    /* -----------------------------------
     * Favorites
     * ----------------------------------- */

    /// Flips `show_id` in the favorites set and writes the set to disk before
    /// returning. Returns whether the show is a favorite afterwards.
    pub async fn toggle_favorite(&self, show_id: u64) -> Result<bool, FavoritesError> {
        let _write = self.favorites_write.lock().await;
        let (is_favorite, snapshot) = {
            let mut state = self.state.lock().await;
            let is_favorite = state.favorites.toggle(show_id);
            (is_favorite, state.favorites.clone())
        };

        if let Err(e) = snapshot.persist().await {
            warn!(show_id, error = %e, "cannot persist favorites");
            return Err(e);
        }
        Ok(is_favorite)
    }

    pub async fn is_favorite(&self, show_id: u64) -> bool {
        self.state.lock().await.favorites.contains(show_id)
    }

    pub async fn favorites(&self) -> Vec<u64> {
        self.state.lock().await.favorites.ids().to_vec()
    }

    /* -----------------------------------
     * Search
     * ----------------------------------- */

    /// Replaces the search results with the catalog's matches for `query`.
    ///
    /// A blank query clears the results without a request. When searches
    /// overlap, only the most recently started one may write its results.
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<Show>, String> {
        let query = query.trim();
        let generation = {
            let mut state = self.state.lock().await;
            state.search_generation += 1;
            state.search_results.clear();

            if query.is_empty() {
                state.search_status = Resource::Idle;
                return Ok(Vec::new());
            }

            state.search_status = Resource::Loading;
            state.search_generation
        };

        debug!(query, "searching shows");
        let result = self.catalog.search_shows(query).await;

        let mut state = self.state.lock().await;
        let current = state.search_generation == generation;

        match result {
            Ok(records) => {
                let shows: Vec<Show> = records.into_iter().map(|r| r.show).collect();
                if current {
                    state.search_results = shows.clone();
                    state.search_status = Resource::Ready;
                }
                Ok(shows)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(query, error = %message, "show search failed");
                if current {
                    state.search_status = Resource::Error(message.clone());
                }
                Err(message)
            }
        }
    }

    pub async fn search_results(&self) -> Vec<Show> {
        self.state.lock().await.search_results.clone()
    }

    pub async fn search_status(&self) -> Resource {
        self.state.lock().await.search_status.clone()
    }

    /* -----------------------------------
     * Show details
     * ----------------------------------- */

    /// Returns the show with `show_id`, requesting it only on first use.
    pub async fn fetch_show(&self, show_id: u64) -> Result<Show, String> {
        {
            let mut state = self.state.lock().await;
            if let Some(show) = state.shows_by_id.get(&show_id) {
                return Ok(show.clone());
            }
            state.show_status.insert(show_id, Resource::Loading);
        }

        debug!(show_id, "fetching show");
        let result = self.catalog.get_show(show_id).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(show) => {
                let show = state.shows_by_id.entry(show_id).or_insert(show).clone();
                state.show_status.insert(show_id, Resource::Ready);
                Ok(show)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(show_id, error = %message, "show fetch failed");
                state
                    .show_status
                    .insert(show_id, Resource::Error(message.clone()));
                Err(message)
            }
        }
    }

    pub async fn show(&self, show_id: u64) -> Option<Show> {
        self.state.lock().await.shows_by_id.get(&show_id).cloned()
    }

    pub async fn show_status(&self, show_id: u64) -> Resource {
        let state = self.state.lock().await;
        state.show_status.get(&show_id).cloned().unwrap_or_default()
    }

    /* -----------------------------------
     * Episodes
     * ----------------------------------- */

    /// Returns the episodes of `show_id`, requesting them only if they were
    /// never fetched. Cached lists are never refreshed.
    ///
    /// Failures are recorded in the episode status for the show and logged.
    pub async fn fetch_episodes_for_show(&self, show_id: u64) -> Result<Vec<Episode>, String> {
        {
            let mut state = self.state.lock().await;
            if let Some(episodes) = state.episodes_by_show.get(&show_id) {
                return Ok(episodes.clone());
            }
            state.episodes_status.insert(show_id, Resource::Loading);
        }

        debug!(show_id, "fetching episodes");
        let result = self.catalog.list_episodes(show_id).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(episodes) => {
                let episodes = state
                    .episodes_by_show
                    .entry(show_id)
                    .or_insert(episodes)
                    .clone();
                state.episodes_status.insert(show_id, Resource::Ready);
                Ok(episodes)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(show_id, error = %message, "episode fetch failed");
                state
                    .episodes_status
                    .insert(show_id, Resource::Error(message.clone()));
                Err(message)
            }
        }
    }

    pub async fn episodes(&self, show_id: u64) -> Option<Vec<Episode>> {
        self.state.lock().await.episodes_by_show.get(&show_id).cloned()
    }

    pub async fn episodes_status(&self, show_id: u64) -> Resource {
        let state = self.state.lock().await;
        state
            .episodes_status
            .get(&show_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Cached episodes of `show_id` narrowed by `filter`; empty when the
    /// episodes were never fetched.
    pub async fn filtered_episodes(&self, show_id: u64, filter: &EpisodeFilter) -> Vec<Episode> {
        let state = self.state.lock().await;
        state
            .episodes_by_show
            .get(&show_id)
            .map(|episodes| filter_episodes(episodes, filter))
            .unwrap_or_default()
    }
}
