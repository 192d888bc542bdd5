use crate::{
    cli, error,
    routes::Route,
    store::{EpisodeFilter, FilterPatch, ShowStore},
};

/// Renders the view a client path leads to.
pub async fn open(store: &ShowStore, path: &str) {
    let route: Route = match path.parse() {
        Ok(route) => route,
        Err(e) => error!("{}", e),
    };

    match route {
        Route::Home => cli::home(store).await,
        Route::ShowDetail(id) => cli::show(store, id, EpisodeFilter::default()).await,
        Route::Search(query) => cli::search(store, query.as_deref().unwrap_or_default()).await,
        Route::Genre(genre) => cli::genre(store, &genre, 1, FilterPatch::default()).await,
    }
}
