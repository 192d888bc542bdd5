use colored::Colorize;
use tabled::Table;

use crate::{
    info,
    store::{EpisodeFilter, ShowStore},
    types::Show,
    utils, warning,
};

pub async fn show(store: &ShowStore, show_id: u64, filter: EpisodeFilter) {
    let pb = utils::spinner("Fetching show...");
    let (show, episodes) = tokio::join!(
        store.fetch_show(show_id),
        store.fetch_episodes_for_show(show_id)
    );
    pb.finish_and_clear();

    match show {
        Ok(show) => print_details(&show, store.is_favorite(show_id).await),
        Err(e) => {
            warning!("Failed to fetch show {}: {}", show_id, e);
            return;
        }
    }

    if let Err(e) = episodes {
        warning!("Failed to fetch episodes: {}", e);
        return;
    }

    let episodes = store.filtered_episodes(show_id, &filter).await;
    if episodes.is_empty() {
        info!("No episodes match your filters.");
        return;
    }

    println!("{}", Table::new(utils::episode_rows(&episodes)));
}

fn print_details(show: &Show, favorite: bool) {
    let marker = if favorite { " ★" } else { "" };
    println!("{}{}", show.name.bold(), marker.yellow());

    let mut facts = vec![utils::format_rating(show.rating())];
    if !show.genres.is_empty() {
        facts.push(show.genres.join(", "));
    }
    if let Some(runtime) = show.runtime {
        facts.push(format!("{} min", runtime));
    }
    if show.premiered.is_some() {
        facts.push(utils::format_premiered(show.premiered.as_deref()));
    }
    if let Some(network) = &show.network {
        facts.push(network.name.clone());
    }
    println!("{}", facts.join(" | "));

    if let Some(site) = &show.official_site {
        println!("{}", site.underline());
    }
    if let Some(summary) = &show.summary {
        println!("\n{}\n", utils::strip_html(summary));
    }
}
