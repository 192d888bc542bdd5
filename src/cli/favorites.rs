use tabled::Table;

use crate::{info, store::ShowStore, success, types::Show, utils, warning};

/// Toggles `toggle` when given, otherwise lists every bookmarked show.
pub async fn favorites(store: &ShowStore, toggle: Option<u64>) {
    if let Some(show_id) = toggle {
        match store.toggle_favorite(show_id).await {
            Ok(true) => success!("Added show {} to favorites.", show_id),
            Ok(false) => success!("Removed show {} from favorites.", show_id),
            Err(e) => warning!("Cannot save favorites: {}", e),
        }
        return;
    }

    let ids = store.favorites().await;
    if ids.is_empty() {
        info!("No favorites yet. Add one with tvshelf favorites toggle <id>.");
        return;
    }

    let pb = utils::spinner("Fetching favorite shows...");
    let (shows, failures) = favorite_shows(store, &ids).await;
    pb.finish_and_clear();

    for failure in &failures {
        warning!("{}", failure);
    }
    println!("{}", Table::new(utils::show_rows(&shows, &ids)));
}

/// Looks up every id in `ids`, keeping a placeholder row for shows that
/// cannot be fetched. Returns the rows and one message per failed lookup.
pub async fn favorite_shows(store: &ShowStore, ids: &[u64]) -> (Vec<Show>, Vec<String>) {
    let mut shows: Vec<Show> = Vec::with_capacity(ids.len());
    let mut failures = Vec::new();

    for &id in ids {
        match store.fetch_show(id).await {
            Ok(show) => shows.push(show),
            Err(e) => {
                failures.push(format!("Cannot fetch show {}: {}", id, e));
                shows.push(Show {
                    id,
                    name: format!("(unavailable: {})", e),
                    ..Default::default()
                });
            }
        }
    }
    (shows, failures)
}
