//! Client paths and the views they lead to.
//!
//! | Path              | View                 |
//! |-------------------|----------------------|
//! | `/`               | home carousels       |
//! | `/show/{id}`      | show detail          |
//! | `/search?q=...`   | search results       |
//! | `/genre/{genre}`  | full genre listing   |

use std::{fmt, str::FromStr};

use thiserror::Error;
use url::form_urlencoded;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("No view for path '{0}'")]
    UnknownPath(String),
    #[error("Invalid show id '{0}'")]
    InvalidShowId(String),
    #[error("Cannot decode path segment '{0}'")]
    InvalidEncoding(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ShowDetail(u64),
    Search(Option<String>),
    Genre(String),
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["show", id] => id
                .parse::<u64>()
                .map(Route::ShowDetail)
                .map_err(|_| RouteError::InvalidShowId(id.to_string())),
            ["search"] => Ok(Route::Search(search_term(query))),
            ["genre", genre] => Ok(Route::Genre(decode(genre)?)),
            _ => Err(RouteError::UnknownPath(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::ShowDetail(id) => write!(f, "/show/{}", id),
            Route::Search(None) => write!(f, "/search"),
            Route::Search(Some(q)) => write!(f, "/search?q={}", urlencoding::encode(q)),
            Route::Genre(genre) => write!(f, "/genre/{}", urlencoding::encode(genre)),
        }
    }
}

fn decode(segment: &str) -> Result<String, RouteError> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|_| RouteError::InvalidEncoding(segment.to_string()))
}

fn search_term(query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .filter(|term| !term.trim().is_empty())
}
