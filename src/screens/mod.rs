//! Per-screen controllers. Each owns its own state and talks to the remote
//! services through the client traits; nothing is shared between screens.

mod diary;
mod entry_detail;
mod log_movie;
mod movie_detail;
mod profile;
mod search;
mod watchlist;

pub use diary::DiaryScreen;
pub use entry_detail::EntryDetail;
pub use log_movie::{LogError, LogMovieScreen};
pub use movie_detail::{MovieDetailScreen, MovieDetailView};
pub use profile::{ProfileScreen, ProfileView};
pub use search::{SearchScreen, SearchState};
pub use watchlist::WatchlistScreen;

use crate::models::DiaryEntry;

/// Navigation target together with the parameters the next screen needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    EntryDetail {
        entry: DiaryEntry,
    },
    MovieDetail {
        movie_id: u64,
    },
    LogMovie {
        movie_id: u64,
        title: String,
        poster_path: Option<String>,
    },
}
