use tabled::Table;

use crate::{info, store::ShowStore, utils, warning};

pub async fn search(store: &ShowStore, query: &str) {
    if query.trim().is_empty() {
        let _ = store.search_by_name(query).await;
        info!("Type a show name to search.");
        return;
    }

    let pb = utils::spinner(&format!("Searching for \"{}\"...", query));
    let result = store.search_by_name(query).await;
    pb.finish_and_clear();

    match result {
        Ok(shows) if shows.is_empty() => info!("No results found for \"{}\"", query),
        Ok(shows) => {
            let favorites = store.favorites().await;
            println!("{}", Table::new(utils::show_rows(&shows, &favorites)));
        }
        Err(e) => warning!("Failed to search shows: {}", e),
    }
}
