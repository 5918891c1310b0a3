use std::sync::Arc;

use tracing::{instrument, warn};

use super::Route;
use crate::models::WatchlistItem;
use crate::screen::{Screen, ScreenState, Ticket};
use crate::watchlist::Watchlist;

const PAGE_LIMIT: u32 = 50;
const LOAD_FAILED: &str = "Failed to load watchlist";
const REMOVE_FAILED: &str = "Failed to remove from watchlist";

pub struct WatchlistScreen {
    watchlist: Arc<dyn Watchlist>,
    screen: Screen<Vec<WatchlistItem>>,
}

impl WatchlistScreen {
    pub fn new(watchlist: Arc<dyn Watchlist>) -> Self {
        Self {
            watchlist,
            screen: Screen::new(),
        }
    }

    pub fn state(&self) -> ScreenState<Vec<WatchlistItem>> {
        self.screen.state()
    }

    pub async fn focus(&self) -> bool {
        let ticket = self.screen.focus();
        self.fetch(ticket).await
    }

    pub async fn refresh(&self) -> bool {
        let ticket = self.screen.refresh();
        self.fetch(ticket).await
    }

    #[instrument(skip(self))]
    async fn fetch(&self, ticket: Ticket) -> bool {
        let fetch = async { self.watchlist.list(1, PAGE_LIMIT).await.map(|page| page.data) };
        self.screen.load(ticket, fetch, |_| LOAD_FAILED.to_string()).await
    }

    /// Deletes the title and drops it from the list on screen.
    #[instrument(skip(self))]
    pub async fn remove(&self, tmdb_id: u64) -> Result<(), String> {
        if let Err(e) = self.watchlist.remove(tmdb_id).await {
            warn!("Failed to remove {} from watchlist: {}", tmdb_id, e);
            return Err(REMOVE_FAILED.to_string());
        }
        self.screen
            .update(|items| items.retain(|item| item.tmdb_id != tmdb_id));
        Ok(())
    }

    pub fn open(&self, item: &WatchlistItem) -> Route {
        Route::MovieDetail {
            movie_id: item.tmdb_id,
        }
    }
}
