use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
}

/// A show record as returned by the catalog.
///
/// Only `id` and `name` are required; every other field falls back to its
/// default when the catalog omits it or sends `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: Rating,
    #[serde(default)]
    pub premiered: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub network: Option<Network>,
    #[serde(default)]
    pub official_site: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Show {
    pub fn rating(&self) -> Option<f64> {
        self.rating.average
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn in_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: u64,
    #[serde(default)]
    pub show_id: u64,
    #[serde(default)]
    pub season: u32,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: Rating,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
}

impl Episode {
    pub fn rating(&self) -> Option<f64> {
        self.rating.average
    }
}

/// Envelope returned by the search endpoint, one show per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub score: Option<f64>,
    pub show: Show,
}

#[derive(Tabled)]
pub struct ShowTableRow {
    pub id: u64,
    pub name: String,
    pub rating: String,
    pub premiered: String,
    pub genres: String,
    #[tabled(rename = "★")]
    pub favorite: String,
}

#[derive(Tabled)]
pub struct EpisodeTableRow {
    pub episode: String,
    pub name: String,
    pub rating: String,
    pub summary: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
