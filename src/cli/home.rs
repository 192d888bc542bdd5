use tabled::Table;

use crate::{config, info, store::ShowStore, utils, warning};

const CAROUSEL_ROWS: usize = 10;

pub async fn home(store: &ShowStore) {
    let genres = config::home_genres();

    let pb = utils::spinner("Loading genres...");
    let requested = store.load_missing_genres(&genres).await;
    pb.finish_and_clear();

    if !requested.is_empty() {
        info!("Loaded first page for {}", requested.join(", "));
    }

    let favorites = store.favorites().await;
    for genre in genres {
        if let Some(message) = store.genre_status(&genre).await.error() {
            warning!("{}: {}", genre, message);
            continue;
        }

        let mut shows = store.sorted_filtered_shows(&genre).await;
        if shows.is_empty() {
            println!("Genre: {genre}\nNo shows available\n", genre = genre);
            continue;
        }

        shows.truncate(CAROUSEL_ROWS);
        let table = Table::new(utils::show_rows(&shows, &favorites));
        println!("Genre: {genre}\n{table}\n", genre = genre, table = table);
    }
}
