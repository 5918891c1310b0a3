use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use super::Route;
use crate::models::CatalogMovie;
use crate::tmdb::Catalog;

const SEARCH_FAILED: &str = "Failed to search movies";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<CatalogMovie>,
    pub loading: bool,
    pub error: Option<String>,
    /// Whether a search ran for the current query; tells "no matches"
    /// apart from "nothing typed yet".
    pub has_searched: bool,
}

struct Inner {
    state: SearchState,
    generation: u64,
}

/// Search-as-you-type. Every keystroke calls [`SearchScreen::set_query`];
/// the request only goes out once the query has been stable for the
/// debounce window, and only the newest query's response is applied.
pub struct SearchScreen {
    catalog: Arc<dyn Catalog>,
    debounce: Duration,
    inner: Mutex<Inner>,
}

impl SearchScreen {
    pub fn new(catalog: Arc<dyn Catalog>, debounce: Duration) -> Self {
        Self {
            catalog,
            debounce,
            inner: Mutex::new(Inner {
                state: SearchState::default(),
                generation: 0,
            }),
        }
    }

    pub fn state(&self) -> SearchState {
        self.inner.lock().state.clone()
    }

    /// Returns `true` if this call's search ran and its outcome was applied.
    #[instrument(skip(self))]
    pub async fn set_query(&self, query: &str) -> bool {
        let generation = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.state.query = query.to_string();
            if query.trim().is_empty() {
                inner.state.results.clear();
                inner.state.has_searched = false;
                inner.state.loading = false;
                inner.state.error = None;
                return false;
            }
            inner.generation
        };

        sleep(self.debounce).await;

        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                debug!("Query superseded during debounce");
                return false;
            }
            inner.state.loading = true;
            inner.state.error = None;
            inner.state.has_searched = true;
        }

        let outcome = self.catalog.search_movies(query.trim(), 1).await;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            debug!("Dropping results for superseded query");
            return false;
        }
        match outcome {
            Ok(results) => inner.state.results = results.results,
            Err(e) => {
                warn!("Search failed: {}", e);
                inner.state.error = Some(SEARCH_FAILED.to_string());
                inner.state.results.clear();
            }
        }
        inner.state.loading = false;
        true
    }

    pub async fn clear(&self) {
        self.set_query("").await;
    }

    pub fn open(&self, movie: &CatalogMovie) -> Route {
        Route::MovieDetail { movie_id: movie.id }
    }
}
