use tabled::Table;

use crate::{
    info,
    store::{FilterPatch, PageFetch, ShowStore},
    utils, warning,
};

/// Lists one genre after loading `pages` more pages of the show index.
///
/// Pages are requested one after another through the store's cursor, the
/// same way infinite scroll would. A failed page stops loading but the shows
/// gathered so far are still printed.
pub async fn genre(store: &ShowStore, genre: &str, pages: u32, filters: FilterPatch) {
    store.set_filters(filters).await;

    let pb = utils::spinner(&format!("Fetching {} shows...", genre));
    for _ in 0..pages {
        match store.fetch_next_page(genre).await {
            Ok(PageFetch::Fetched { page, added }) => {
                pb.set_message(format!(
                    "Fetched page {page}: {added} {genre} shows.",
                    page = page,
                    added = added,
                    genre = genre
                ));
            }
            Ok(PageFetch::Skipped) => continue,
            Err(e) => {
                pb.finish_and_clear();
                warning!("Failed to fetch {} shows: {}", genre, e);
                break;
            }
        }
    }
    pb.finish_and_clear();

    let shows = store.sorted_filtered_shows(genre).await;
    if shows.is_empty() {
        info!("No {} shows match the current filters.", genre);
        return;
    }

    let favorites = store.favorites().await;
    let table = Table::new(utils::show_rows(&shows, &favorites));
    println!(
        "Genre: {genre}\tPages: {pages}\n{table}",
        genre = genre,
        pages = store.cursor(genre).await.map_or(0, |p| p + 1),
        table = table
    );
}
