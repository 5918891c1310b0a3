use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::Route;
use crate::entries::Diary;
use crate::models::{
    release_year, CastMember, CatalogMovieDetail, Credits, CrewMember, DiaryEntry, MediaType,
    NewWatchlistItem,
};
use crate::screen::{Screen, ScreenState, Ticket};
use crate::tmdb::Catalog;
use crate::watchlist::Watchlist;

const LOAD_FAILED: &str = "Failed to load movie details";
const ADD_FAILED: &str = "Failed to add to watchlist";

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetailView {
    pub movie: CatalogMovieDetail,
    pub credits: Credits,
    /// The user's own diary entry for this title, if logged.
    pub user_entry: Option<DiaryEntry>,
    pub in_watchlist: bool,
}

impl MovieDetailView {
    pub fn year(&self) -> Option<&str> {
        release_year(self.movie.release_date.as_deref())
    }

    pub fn directors(&self) -> Vec<&CrewMember> {
        self.crew_with(|job| job == "Director", 2)
    }

    pub fn cinematographers(&self) -> Vec<&CrewMember> {
        self.crew_with(|job| job == "Director of Photography", 1)
    }

    pub fn composers(&self) -> Vec<&CrewMember> {
        self.crew_with(|job| job == "Original Music Composer" || job == "Music", 1)
    }

    pub fn top_cast(&self) -> &[CastMember] {
        let cast = &self.credits.cast;
        &cast[..cast.len().min(6)]
    }

    fn crew_with(&self, job: impl Fn(&str) -> bool, limit: usize) -> Vec<&CrewMember> {
        self.credits
            .crew
            .iter()
            .filter(|member| job(&member.job))
            .take(limit)
            .collect()
    }
}

pub struct MovieDetailScreen {
    movie_id: u64,
    catalog: Arc<dyn Catalog>,
    diary: Arc<dyn Diary>,
    watchlist: Arc<dyn Watchlist>,
    screen: Screen<MovieDetailView>,
}

impl MovieDetailScreen {
    pub fn new(
        movie_id: u64,
        catalog: Arc<dyn Catalog>,
        diary: Arc<dyn Diary>,
        watchlist: Arc<dyn Watchlist>,
    ) -> Self {
        Self {
            movie_id,
            catalog,
            diary,
            watchlist,
            screen: Screen::new(),
        }
    }

    pub fn state(&self) -> ScreenState<MovieDetailView> {
        self.screen.state()
    }

    pub async fn load(&self) -> bool {
        let ticket = self.screen.focus();
        self.fetch(ticket).await
    }

    #[instrument(skip(self), fields(movie_id = self.movie_id))]
    async fn fetch(&self, ticket: Ticket) -> bool {
        let primary = tokio::try_join!(
            self.catalog.movie_detail(self.movie_id),
            self.catalog.movie_credits(self.movie_id),
        );
        let (movie, credits) = match primary {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Failed to load movie {}: {}", self.movie_id, e);
                return self.screen.resolve(ticket, Err(LOAD_FAILED.to_string()));
            }
        };

        if !self.screen.is_current(ticket) {
            return false;
        }

        // Probe failures read as "not logged" / "not in watchlist".
        let (lookup, membership) = tokio::join!(
            self.diary.entry_for_title(self.movie_id),
            self.watchlist.contains(self.movie_id),
        );
        let user_entry = lookup
            .map(|lookup| lookup.into_entry())
            .unwrap_or_else(|e| {
                debug!("Entry lookup failed, treating as not logged: {}", e);
                None
            });
        let in_watchlist = membership.unwrap_or_else(|e| {
            debug!("Watchlist check failed, treating as absent: {}", e);
            false
        });

        let view = MovieDetailView {
            movie,
            credits,
            user_entry,
            in_watchlist,
        };
        self.screen.resolve(ticket, Ok(view))
    }

    /// Adds the loaded movie to the watchlist. The success text is meant
    /// for a confirmation dialog.
    #[instrument(skip(self), fields(movie_id = self.movie_id))]
    pub async fn add_to_watchlist(&self) -> Result<String, String> {
        let Some(view) = self.screen.state().data().cloned() else {
            return Err(LOAD_FAILED.to_string());
        };

        let item = NewWatchlistItem {
            tmdb_id: view.movie.id,
            title: view.movie.title.clone(),
            poster_path: view.movie.poster_path.clone(),
            media_type: Some(MediaType::Movie),
        };
        match self.watchlist.add(&item).await {
            Ok(_) => {
                self.screen.update(|view| view.in_watchlist = true);
                info!("Added '{}' to watchlist", view.movie.title);
                Ok(format!(
                    "\"{}\" has been added to your watchlist.",
                    view.movie.title
                ))
            }
            Err(e) => Err(e.display_message(ADD_FAILED)),
        }
    }

    pub fn log_route(&self) -> Option<Route> {
        self.screen.state().data().map(|view| Route::LogMovie {
            movie_id: view.movie.id,
            title: view.movie.title.clone(),
            poster_path: view.movie.poster_path.clone(),
        })
    }

    /// Route to the user's own entry, when the title has been logged.
    pub fn my_review_route(&self) -> Option<Route> {
        let state = self.screen.state();
        let entry = state.data()?.user_entry.clone()?;
        Some(Route::EntryDetail { entry })
    }
}
