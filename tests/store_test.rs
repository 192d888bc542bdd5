use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use tempfile::TempDir;
use tvshelf::cli::favorite_shows;
use tvshelf::management::FavoritesManager;
use tvshelf::store::{FilterPatch, PageFetch, Resource, ShowStore};
use tvshelf::tvmaze::{Catalog, CatalogError};
use tvshelf::types::{Episode, Image, Rating, SearchResult, Show};

const SLOW_CALL: Duration = Duration::from_millis(200);

// Records every request and answers from canned data
#[derive(Clone, Default)]
struct FakeCatalog {
    requests: Arc<Mutex<Vec<String>>>,
    pages: Vec<Vec<Show>>,
    search: Vec<SearchResult>,
    episodes: Vec<Episode>,
    fail: bool,
    // the first `slow_calls` requests take SLOW_CALL to answer
    slow_calls: usize,
}

impl FakeCatalog {
    async fn record(&self, request: String) -> Result<(), CatalogError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len() - 1
        };
        if index < self.slow_calls {
            tokio::time::sleep(SLOW_CALL).await;
        }
        if self.fail {
            return Err(CatalogError::Network("Network error".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list_shows(&self, page: u32) -> Result<Vec<Show>, CatalogError> {
        self.record(format!("shows?page={}", page)).await?;
        // let overlapping callers run before this request completes
        tokio::task::yield_now().await;
        if self.pages.is_empty() {
            return Ok(Vec::new());
        }
        let index = (page as usize).min(self.pages.len() - 1);
        Ok(self.pages[index].clone())
    }

    async fn search_shows(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        self.record(format!("search?q={}", query)).await?;
        if self.search.is_empty() {
            // echo the query so overlapping searches can be told apart
            return Ok(vec![SearchResult {
                score: None,
                show: show(1, query, &["Drama"], None, false),
            }]);
        }
        Ok(self.search.clone())
    }

    async fn get_show(&self, show_id: u64) -> Result<Show, CatalogError> {
        self.record(format!("shows/{}", show_id)).await?;
        Ok(show(show_id, &format!("Show {}", show_id), &["Drama"], None, false))
    }

    async fn list_episodes(&self, show_id: u64) -> Result<Vec<Episode>, CatalogError> {
        self.record(format!("shows/{}/episodes", show_id)).await?;
        Ok(self.episodes.clone())
    }
}

fn show(id: u64, name: &str, genres: &[&str], rating: Option<f64>, image: bool) -> Show {
    Show {
        id,
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        rating: Rating { average: rating },
        image: image.then(Image::default),
        ..Default::default()
    }
}

fn episode(id: u64, season: u32, number: u32, name: &str) -> Episode {
    Episode {
        id,
        season,
        number: Some(number),
        name: name.to_string(),
        ..Default::default()
    }
}

fn favorites_path(dir: &TempDir) -> PathBuf {
    dir.path().join("favorites.json")
}

fn new_store(catalog: FakeCatalog, dir: &TempDir) -> ShowStore {
    ShowStore::new(
        Box::new(catalog),
        FavoritesManager::new(favorites_path(dir), None),
    )
}

fn requests(catalog: &FakeCatalog) -> Vec<String> {
    catalog.requests.lock().unwrap().clone()
}

fn mixed_page() -> Vec<Show> {
    vec![
        show(1, "Show A", &["Drama"], Some(8.0), true),
        show(2, "Show B", &["Comedy"], Some(6.0), false),
    ]
}

#[tokio::test]
async fn test_fetch_genre_page_keeps_only_matching_genre() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        pages: vec![mixed_page()],
        ..Default::default()
    };
    let store = new_store(catalog.clone(), &dir);

    let result = store.fetch_genre_page("Drama", 0).await;

    assert_eq!(result, Ok(PageFetch::Fetched { page: 0, added: 1 }));
    let shows = store.shows_by_genre("Drama").await;
    assert_eq!(shows.len(), 1);
    assert!(shows.iter().all(|s| s.in_genre("Drama")));
    assert_eq!(store.cursor("Drama").await, Some(0));
    assert_eq!(store.genre_status("Drama").await, Resource::Ready);
    assert_eq!(requests(&catalog), vec!["shows?page=0"]);
}

#[tokio::test]
async fn test_fetch_genre_page_failure_keeps_bucket() {
    let dir = tempfile::tempdir().unwrap();
    let ok_catalog = FakeCatalog {
        pages: vec![mixed_page()],
        ..Default::default()
    };
    let store = new_store(ok_catalog, &dir);
    store.fetch_genre_page("Drama", 0).await.unwrap();

    let failing = FakeCatalog {
        fail: true,
        ..Default::default()
    };
    let failing_store = new_store(failing, &dir);
    let result = failing_store.fetch_genre_page("Drama", 0).await;

    assert_eq!(result, Err("Network error: Network error".to_string()));
    assert_eq!(
        failing_store.genre_status("Drama").await,
        Resource::Error("Network error: Network error".to_string())
    );
    assert!(failing_store.shows_by_genre("Drama").await.is_empty());
    assert_eq!(failing_store.cursor("Drama").await, None);

    // the healthy store is unaffected
    assert_eq!(store.shows_by_genre("Drama").await.len(), 1);
}

#[tokio::test]
async fn test_fetch_next_page_advances_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        pages: vec![vec![show(1, "Show A", &["Drama"], Some(8.0), true)]],
        ..Default::default()
    };
    let store = new_store(catalog.clone(), &dir);

    store.fetch_next_page("Drama").await.unwrap();
    assert_eq!(store.cursor("Drama").await, Some(0));

    store.fetch_next_page("Drama").await.unwrap();
    assert_eq!(store.cursor("Drama").await, Some(1));
    assert_eq!(store.shows_by_genre("Drama").await.len(), 2);
    assert_eq!(requests(&catalog), vec!["shows?page=0", "shows?page=1"]);
}

#[tokio::test]
async fn test_overlapping_next_page_calls_issue_one_request() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        pages: vec![vec![show(1, "Show A", &["Drama"], Some(8.0), true)]],
        ..Default::default()
    };
    let store = new_store(catalog.clone(), &dir);

    let (first, second) = tokio::join!(
        store.fetch_next_page("Drama"),
        store.fetch_next_page("Drama")
    );

    assert_eq!(first, Ok(PageFetch::Fetched { page: 0, added: 1 }));
    assert_eq!(second, Ok(PageFetch::Skipped));
    assert_eq!(requests(&catalog), vec!["shows?page=0"]);
    assert_eq!(store.shows_by_genre("Drama").await.len(), 1);
}

#[tokio::test]
async fn test_abandoned_page_fetch_still_completes() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        pages: vec![vec![show(1, "Show A", &["Drama"], Some(8.0), true)]],
        slow_calls: 1,
        ..Default::default()
    };
    let store = new_store(catalog.clone(), &dir);

    let abandoned =
        tokio::time::timeout(Duration::from_millis(50), store.fetch_next_page("Drama")).await;
    assert!(abandoned.is_err());

    tokio::time::sleep(SLOW_CALL * 2).await;
    assert_eq!(store.genre_status("Drama").await, Resource::Ready);
    assert_eq!(store.cursor("Drama").await, Some(0));
    assert_eq!(store.shows_by_genre("Drama").await.len(), 1);

    // the genre is free again
    assert_eq!(
        store.fetch_next_page("Drama").await,
        Ok(PageFetch::Fetched { page: 1, added: 1 })
    );
    assert_eq!(requests(&catalog), vec!["shows?page=0", "shows?page=1"]);
}

#[tokio::test]
async fn test_load_missing_genres_skips_populated_genres() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        pages: vec![vec![
            show(1, "Show A", &["Drama"], Some(8.0), true),
            show(2, "Show B", &["Comedy"], Some(6.0), false),
        ]],
        ..Default::default()
    };
    let store = new_store(catalog.clone(), &dir);
    store.fetch_next_page("Comedy").await.unwrap();

    let genres = vec!["Drama".to_string(), "Comedy".to_string()];
    let requested = store.load_missing_genres(&genres).await;

    assert_eq!(requested, vec!["Drama".to_string()]);
    assert_eq!(requests(&catalog), vec!["shows?page=0", "shows?page=0"]);

    // both are loaded now, so a second mount requests nothing
    assert!(store.load_missing_genres(&genres).await.is_empty());
    assert_eq!(requests(&catalog).len(), 2);
}

#[tokio::test]
async fn test_toggle_favorite_is_an_involution() {
    let dir = tempfile::tempdir().unwrap();
    let store = new_store(FakeCatalog::default(), &dir);
    let path = favorites_path(&dir);

    assert_eq!(store.toggle_favorite(1).await.unwrap(), true);
    assert!(store.is_favorite(1).await);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1]");

    assert_eq!(store.toggle_favorite(1).await.unwrap(), false);
    assert!(!store.is_favorite(1).await);
    assert!(store.favorites().await.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}

#[tokio::test]
async fn test_favorites_survive_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = new_store(FakeCatalog::default(), &dir);
    store.toggle_favorite(1).await.unwrap();
    store.toggle_favorite(2).await.unwrap();

    let favorites = FavoritesManager::load_or_empty(favorites_path(&dir)).await;
    let next_session = ShowStore::new(Box::new(FakeCatalog::default()), favorites);

    assert!(next_session.is_favorite(1).await);
    assert!(next_session.is_favorite(2).await);
    assert!(!next_session.is_favorite(3).await);
}

#[tokio::test]
async fn test_concurrent_toggles_match_the_saved_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = new_store(FakeCatalog::default(), &dir);

    let (first, second) = tokio::join!(store.toggle_favorite(1), store.toggle_favorite(2));
    assert!(first.unwrap());
    assert!(second.unwrap());

    let saved = FavoritesManager::load(favorites_path(&dir)).await.unwrap();
    assert_eq!(saved.ids(), store.favorites().await.as_slice());
    assert_eq!(saved.ids().len(), 2);
}

#[tokio::test]
async fn test_favorite_lookup_failures_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        fail: true,
        ..Default::default()
    };
    let store = new_store(catalog, &dir);
    store.toggle_favorite(3).await.unwrap();

    let (shows, failures) = favorite_shows(&store, &store.favorites().await).await;

    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].id, 3);
    assert_eq!(
        failures,
        vec!["Cannot fetch show 3: Network error: Network error".to_string()]
    );
}

#[tokio::test]
async fn test_empty_search_makes_no_request() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog::default();
    let store = new_store(catalog.clone(), &dir);

    assert_eq!(store.search_by_name("").await, Ok(Vec::new()));
    assert!(store.search_results().await.is_empty());
    assert_eq!(store.search_status().await, Resource::Idle);
    assert!(requests(&catalog).is_empty());
}

#[tokio::test]
async fn test_search_unwraps_wrapper_records() {
    let dir = tempfile::tempdir().unwrap();
    let friends = Show {
        id: 1,
        name: "Friends".to_string(),
        ..Default::default()
    };
    let catalog = FakeCatalog {
        search: vec![SearchResult {
            score: Some(0.9),
            show: friends.clone(),
        }],
        ..Default::default()
    };
    let store = new_store(catalog.clone(), &dir);

    store.search_by_name("Friends").await.unwrap();

    assert_eq!(store.search_results().await, vec![friends]);
    assert_eq!(store.search_status().await, Resource::Ready);
    assert_eq!(requests(&catalog), vec!["search?q=Friends"]);

    // a blank query afterwards clears the previous results
    store.search_by_name("   ").await.unwrap();
    assert!(store.search_results().await.is_empty());
}

#[tokio::test]
async fn test_latest_search_wins_when_searches_overlap() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        slow_calls: 1,
        ..Default::default()
    };
    let store = new_store(catalog.clone(), &dir);

    let (slow, fast) = tokio::join!(store.search_by_name("Lost"), async {
        tokio::task::yield_now().await;
        store.search_by_name("Dexter").await
    });

    // each caller still gets its own answer
    assert_eq!(slow.unwrap()[0].name, "Lost");
    assert_eq!(fast.unwrap()[0].name, "Dexter");

    let names: Vec<String> = store
        .search_results()
        .await
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Dexter"]);
    assert_eq!(store.search_status().await, Resource::Ready);
    assert_eq!(requests(&catalog), vec!["search?q=Lost", "search?q=Dexter"]);
}

#[tokio::test]
async fn test_search_failure_leaves_results_empty() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        fail: true,
        ..Default::default()
    };
    let store = new_store(catalog, &dir);

    assert!(store.search_by_name("Friends").await.is_err());
    assert!(store.search_results().await.is_empty());
    assert!(store.search_status().await.error().is_some());
}

#[tokio::test]
async fn test_sorted_filtered_shows_applies_filters() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        pages: vec![vec![
            show(1, "Show A", &["Drama"], Some(7.0), true),
            show(2, "Show B", &["Drama"], Some(9.0), false),
            show(3, "Show C", &["Drama"], Some(10.0), true),
            show(4, "Show D", &["Drama"], None, true),
        ]],
        ..Default::default()
    };
    let store = new_store(catalog, &dir);
    store.fetch_next_page("Drama").await.unwrap();

    let names = |shows: Vec<Show>| shows.into_iter().map(|s| s.name).collect::<Vec<_>>();

    assert_eq!(
        names(store.sorted_filtered_shows("Drama").await),
        vec!["Show C", "Show B", "Show A", "Show D"]
    );

    store
        .set_filters(FilterPatch {
            has_image: Some(true),
            min_rating: Some(8.0),
        })
        .await;
    assert_eq!(
        names(store.sorted_filtered_shows("Drama").await),
        vec!["Show C"]
    );

    store
        .set_filters(FilterPatch {
            has_image: Some(false),
            min_rating: None,
        })
        .await;
    assert_eq!(store.filters().await.min_rating, 8.0);
    assert_eq!(
        names(store.sorted_filtered_shows("Drama").await),
        vec!["Show C", "Show B"]
    );

    // the bucket itself is untouched by filtering
    assert_eq!(store.shows_by_genre("Drama").await.len(), 4);
    assert!(store.sorted_filtered_shows("Comedy").await.is_empty());
}

#[tokio::test]
async fn test_episodes_are_fetched_once_per_show() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        episodes: vec![episode(1, 1, 1, "Episode 1")],
        ..Default::default()
    };
    let store = new_store(catalog.clone(), &dir);

    let first = store.fetch_episodes_for_show(1).await.unwrap();
    let second = store.fetch_episodes_for_show(1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].name, "Episode 1");
    assert_eq!(store.episodes_status(1).await, Resource::Ready);
    assert_eq!(requests(&catalog), vec!["shows/1/episodes"]);

    store.fetch_episodes_for_show(2).await.unwrap();
    assert_eq!(requests(&catalog).len(), 2);
}

#[tokio::test]
async fn test_episode_failure_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        fail: true,
        ..Default::default()
    };
    let store = new_store(catalog.clone(), &dir);

    assert!(store.fetch_episodes_for_show(7).await.is_err());
    assert!(store.episodes(7).await.is_none());
    assert!(store.episodes_status(7).await.error().is_some());

    // failures are not cached, a later call tries again
    assert!(store.fetch_episodes_for_show(7).await.is_err());
    assert_eq!(requests(&catalog).len(), 2);
}

#[tokio::test]
async fn test_filtered_episodes() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        episodes: vec![
            episode(101, 1, 1, "Pilot"),
            episode(102, 1, 2, "Cat's in the Bag..."),
            episode(201, 2, 1, "Seven Thirty-Seven"),
        ],
        ..Default::default()
    };
    let store = new_store(catalog, &dir);

    let filter = tvshelf::store::EpisodeFilter {
        season: Some(1),
        term: Some("bag".to_string()),
        ..Default::default()
    };
    assert!(store.filtered_episodes(1, &filter).await.is_empty());

    store.fetch_episodes_for_show(1).await.unwrap();
    let episodes = store.filtered_episodes(1, &filter).await;
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].id, 102);
}

#[tokio::test]
async fn test_fetch_show_is_cached() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog::default();
    let store = new_store(catalog.clone(), &dir);

    let show = store.fetch_show(5).await.unwrap();
    assert_eq!(show.name, "Show 5");
    assert_eq!(store.fetch_show(5).await.unwrap(), show);
    assert_eq!(store.show_status(5).await, Resource::Ready);
    assert_eq!(requests(&catalog), vec!["shows/5"]);
}

#[tokio::test]
async fn test_search_cached_dedups_across_genres() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        pages: vec![vec![
            show(1, "Breaking Bad", &["Drama", "Crime"], Some(9.2), true),
            show(2, "Friends", &["Comedy"], Some(8.5), true),
        ]],
        ..Default::default()
    };
    let store = new_store(catalog, &dir);
    store.fetch_next_page("Drama").await.unwrap();
    store.fetch_next_page("Crime").await.unwrap();
    store.fetch_next_page("Comedy").await.unwrap();

    let matches = store.search_cached("breaking").await;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "Breaking Bad");

    assert!(store.search_cached("Friends Forever").await.is_empty());
    assert!(store.search_cached("").await.is_empty());
}
