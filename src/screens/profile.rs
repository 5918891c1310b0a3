use std::sync::Arc;

use tracing::instrument;

use crate::models::{ProfileEntry, ProfileSummary};
use crate::profile::Profiles;
use crate::screen::{Screen, ScreenState};

const LOAD_FAILED: &str = "Failed to load profile";
const ROW_LEN: usize = 4;

/// Profile summary as shown: header plus two poster rows of four.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub summary: ProfileSummary,
}

impl ProfileView {
    pub fn username(&self) -> &str {
        &self.summary.username
    }

    pub fn media_watched(&self) -> u64 {
        self.summary.media_watched
    }

    pub fn top_four(&self) -> &[ProfileEntry] {
        first(&self.summary.top)
    }

    pub fn recent_four(&self) -> &[ProfileEntry] {
        first(&self.summary.recent_logs)
    }
}

fn first(entries: &[ProfileEntry]) -> &[ProfileEntry] {
    &entries[..entries.len().min(ROW_LEN)]
}

pub struct ProfileScreen {
    profiles: Arc<dyn Profiles>,
    screen: Screen<ProfileView>,
}

impl ProfileScreen {
    pub fn new(profiles: Arc<dyn Profiles>) -> Self {
        Self {
            profiles,
            screen: Screen::new(),
        }
    }

    pub fn state(&self) -> ScreenState<ProfileView> {
        self.screen.state()
    }

    #[instrument(skip(self))]
    pub async fn focus(&self) -> bool {
        let ticket = self.screen.focus();
        let fetch = async {
            self.profiles
                .my_profile()
                .await
                .map(|summary| ProfileView { summary })
        };
        self.screen
            .load(ticket, fetch, |e| e.display_message(LOAD_FAILED))
            .await
    }
}
