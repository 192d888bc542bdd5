use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{Episode, Show};

/// Read-time filter settings for genre listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub has_image: bool,
    pub min_rating: f64,
}

/// A partial [`Filters`] update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterPatch {
    #[serde(default)]
    pub has_image: Option<bool>,
    #[serde(default)]
    pub min_rating: Option<f64>,
}

impl Filters {
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(has_image) = patch.has_image {
            self.has_image = has_image;
        }
        if let Some(min_rating) = patch.min_rating {
            self.min_rating = min_rating;
        }
    }

    pub fn accepts(&self, show: &Show) -> bool {
        if self.has_image && !show.has_image() {
            return false;
        }
        // NaN means no threshold, like zero
        self.min_rating.is_nan()
            || self.min_rating <= 0.0
            || show.rating().unwrap_or(0.0) >= self.min_rating
    }
}

/// Applies `filters` and orders the result by rating, best first.
///
/// Shows without a rating rank as -1, after every rated show. The sort is
/// stable, so equally rated shows keep their bucket order.
pub fn sort_filter_shows(shows: &[Show], filters: &Filters) -> Vec<Show> {
    let mut result: Vec<Show> = shows
        .iter()
        .filter(|show| filters.accepts(show))
        .cloned()
        .collect();

    result.sort_by(|a, b| compare_rating_desc(a.rating(), b.rating()));
    result
}

fn compare_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(-1.0).total_cmp(&a.unwrap_or(-1.0))
}

/// Narrows a show's episode list on the detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeFilter {
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub min_rating: f64,
    #[serde(default)]
    pub term: Option<String>,
}

impl EpisodeFilter {
    pub fn accepts(&self, episode: &Episode) -> bool {
        if self.season.is_some_and(|season| episode.season != season) {
            return false;
        }

        if self.min_rating > 0.0 && episode.rating().unwrap_or(0.0) < self.min_rating {
            return false;
        }

        match self.term.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => episode
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

pub fn filter_episodes(episodes: &[Episode], filter: &EpisodeFilter) -> Vec<Episode> {
    episodes
        .iter()
        .filter(|episode| filter.accepts(episode))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Image, Rating};

    fn show(id: u64, name: &str, rating: Option<f64>, image: bool) -> Show {
        Show {
            id,
            name: name.to_string(),
            rating: Rating { average: rating },
            image: image.then(Image::default),
            ..Default::default()
        }
    }

    fn episode(id: u64, season: u32, name: &str, rating: Option<f64>) -> Episode {
        Episode {
            id,
            season,
            name: name.to_string(),
            rating: Rating { average: rating },
            ..Default::default()
        }
    }

    #[test]
    fn test_image_and_rating_filters() {
        let shows = vec![
            show(1, "Show A", Some(7.0), true),
            show(2, "Show B", Some(9.0), false),
            show(3, "Show C", Some(10.0), true),
        ];

        let filters = Filters {
            has_image: true,
            min_rating: 8.0,
        };
        let names: Vec<String> = sort_filter_shows(&shows, &filters)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Show C"]);

        let filters = Filters {
            has_image: false,
            min_rating: 8.0,
        };
        let names: Vec<String> = sort_filter_shows(&shows, &filters)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Show C", "Show B"]);
    }

    #[test]
    fn test_unrated_shows_sort_last_and_pass_without_threshold() {
        let shows = vec![
            show(1, "No Rating Show", None, false),
            show(2, "Rated Show", Some(5.0), false),
            show(3, "Zero Show", Some(0.0), false),
        ];

        let ids: Vec<u64> = sort_filter_shows(&shows, &Filters::default())
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_threshold_excludes_unrated() {
        let shows = vec![show(1, "No Rating", None, true)];
        let filters = Filters {
            has_image: false,
            min_rating: 0.5,
        };
        assert!(sort_filter_shows(&shows, &filters).is_empty());
    }

    #[test]
    fn test_nan_threshold_keeps_every_show() {
        let shows = vec![
            show(1, "Rated", Some(7.5), false),
            show(2, "Unrated", None, false),
        ];
        let filters = Filters {
            has_image: false,
            min_rating: f64::NAN,
        };
        assert_eq!(sort_filter_shows(&shows, &filters).len(), 2);
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut filters = Filters {
            has_image: true,
            min_rating: 4.0,
        };
        filters.merge(FilterPatch {
            has_image: None,
            min_rating: Some(-3.0),
        });
        assert!(filters.has_image);
        assert_eq!(filters.min_rating, -3.0);
    }

    #[test]
    fn test_episode_filter() {
        let episodes = vec![
            episode(101, 1, "Pilot", Some(9.0)),
            episode(102, 1, "Cat's in the Bag...", Some(8.5)),
            episode(201, 2, "Seven Thirty-Seven", None),
        ];

        let by_season = EpisodeFilter {
            season: Some(1),
            ..Default::default()
        };
        assert_eq!(filter_episodes(&episodes, &by_season).len(), 2);

        let by_rating = EpisodeFilter {
            min_rating: 9.0,
            ..Default::default()
        };
        let names: Vec<String> = filter_episodes(&episodes, &by_rating)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Pilot"]);

        let by_term = EpisodeFilter {
            term: Some("cat".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_episodes(&episodes, &by_term)[0].id, 102);

        let nothing = EpisodeFilter {
            term: Some("Nonexistent".to_string()),
            ..Default::default()
        };
        assert!(filter_episodes(&episodes, &nothing).is_empty());
    }
}
