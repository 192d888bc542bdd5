use std::time::Duration;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;

use crate::types::{Episode, EpisodeTableRow, Show, ShowTableRow};

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("⭐ {:.1}", r),
        None => "-".to_string(),
    }
}

/// Formats a catalog date (`YYYY-MM-DD`) for display, passing through
/// anything that doesn't parse.
pub fn format_premiered(premiered: Option<&str>) -> String {
    match premiered {
        Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|_| date_str.to_string()),
        None => "-".to_string(),
    }
}

pub fn episode_code(episode: &Episode) -> String {
    match episode.number {
        Some(number) => format!("S{:02}E{:02}", episode.season, number),
        None => format!("S{:02} special", episode.season),
    }
}

/// Removes markup from catalog summaries, decoding entities and collapsing
/// whitespace.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn show_rows(shows: &[Show], favorites: &[u64]) -> Vec<ShowTableRow> {
    shows
        .iter()
        .map(|s| ShowTableRow {
            id: s.id,
            name: s.name.clone(),
            rating: format_rating(s.rating()),
            premiered: format_premiered(s.premiered.as_deref()),
            genres: s.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","),
            favorite: if favorites.contains(&s.id) { "★" } else { "" }.to_string(),
        })
        .collect()
}

pub fn episode_rows(episodes: &[Episode]) -> Vec<EpisodeTableRow> {
    episodes
        .iter()
        .map(|e| EpisodeTableRow {
            episode: episode_code(e),
            name: e.name.clone(),
            rating: format_rating(e.rating()),
            summary: truncate(&strip_html(e.summary.as_deref().unwrap_or_default()), 60),
        })
        .collect()
}
