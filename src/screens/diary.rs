use std::sync::Arc;

use tracing::instrument;

use super::Route;
use crate::entries::Diary;
use crate::models::DiaryEntry;
use crate::screen::{Screen, ScreenState, Ticket};

const LOAD_FAILED: &str = "Failed to load diary";

pub struct DiaryScreen {
    diary: Arc<dyn Diary>,
    page_limit: u32,
    screen: Screen<Vec<DiaryEntry>>,
}

impl DiaryScreen {
    pub fn new(diary: Arc<dyn Diary>, page_limit: u32) -> Self {
        Self {
            diary,
            page_limit,
            screen: Screen::new(),
        }
    }

    pub fn state(&self) -> ScreenState<Vec<DiaryEntry>> {
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
        let fetch = async {
            self.diary
                .list_entries(1, self.page_limit)
                .await
                .map(|page| page.data)
        };
        self.screen
            .load(ticket, fetch, |e| e.display_message(LOAD_FAILED))
            .await
    }

    pub fn open(&self, entry: &DiaryEntry) -> Route {
        Route::EntryDetail {
            entry: entry.clone(),
        }
    }
}
