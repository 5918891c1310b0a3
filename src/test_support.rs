//! In-memory stand-ins for the remote services, used by screen tests.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::entries::Diary;
use crate::error::ApiError;
use crate::models::{
    CastMember, CatalogMovie, CatalogMovieDetail, Credits, CrewMember, DiaryEntry, EntryLookup,
    Genre, MediaType, NewEntry, NewWatchlistItem, Page, ProfileEntry, ProfileSummary, Rating,
    SearchResults, WatchlistItem,
};
use crate::profile::Profiles;
use crate::tmdb::Catalog;
use crate::watchlist::Watchlist;

pub fn status_error(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Status {
        status: StatusCode::from_u16(status).unwrap(),
        message: message.map(str::to_string),
    }
}

/// Failure mode a fake should answer with instead of data.
#[derive(Clone, Default)]
pub struct Failure(Option<(u16, Option<String>)>);

impl Failure {
    pub fn set(&mut self, status: u16, message: Option<&str>) {
        self.0 = Some((status, message.map(str::to_string)));
    }

    fn check(&self) -> Result<(), ApiError> {
        match &self.0 {
            Some((status, message)) => Err(status_error(*status, message.as_deref())),
            None => Ok(()),
        }
    }
}

/// Sleeps for the next queued delay, if any. Lets a test hold one call
/// in flight while a later one overtakes it.
async fn lag(latency: &Mutex<VecDeque<Duration>>) {
    let delay = latency.lock().pop_front();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

pub fn sample_detail(id: u64, title: &str) -> CatalogMovieDetail {
    CatalogMovieDetail {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/{id}.jpg")),
        overview: Some("A movie.".to_string()),
        release_date: Some("1995-12-15".to_string()),
        vote_average: Some(7.9),
        runtime: Some(170),
        genres: vec![Genre {
            id: 80,
            name: "Crime".to_string(),
        }],
    }
}

pub fn sample_credits(id: u64) -> Credits {
    let crew = |n: u64, job: &str| CrewMember {
        id: n,
        name: format!("Crew {n}"),
        job: job.to_string(),
        department: None,
        profile_path: None,
    };
    Credits {
        id,
        cast: (1..=8)
            .map(|n| CastMember {
                id: n,
                name: format!("Actor {n}"),
                character: Some(format!("Role {n}")),
                profile_path: None,
            })
            .collect(),
        crew: vec![
            crew(100, "Director"),
            crew(101, "Director"),
            crew(102, "Director"),
            crew(103, "Director of Photography"),
            crew(104, "Music"),
            crew(105, "Original Music Composer"),
            crew(106, "Editor"),
        ],
    }
}

pub fn sample_entry(id: &str, tmdb_id: u64, rating: u8) -> DiaryEntry {
    DiaryEntry {
        id: id.to_string(),
        media_type: MediaType::Movie,
        title: format!("Movie {tmdb_id}"),
        tmdb_id: Some(tmdb_id),
        poster_path: None,
        rating_overall: Rating::try_from(rating).ok(),
        remarks: None,
        date_logged: Utc.with_ymd_and_hms(2025, 3, 4, 18, 30, 0).unwrap(),
    }
}

pub fn sample_profile(top: usize, recent: usize) -> ProfileSummary {
    let entry = |n: usize| ProfileEntry {
        id: format!("e{n}"),
        title: format!("Title {n}"),
        media_type: MediaType::Movie,
        poster_path: None,
        rating_overall: Rating::try_from(7).ok(),
    };
    ProfileSummary {
        username: "aryan".to_string(),
        bio: None,
        media_watched: (top + recent) as u64,
        top: (0..top).map(entry).collect(),
        recent_logs: (0..recent).map(entry).collect(),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pub movies: Mutex<HashMap<u64, (CatalogMovieDetail, Credits)>>,
    pub listing: Mutex<Vec<CatalogMovie>>,
    pub failure: Mutex<Failure>,
    pub searches: Mutex<Vec<String>>,
    pub detail_calls: AtomicUsize,
    /// Per-call delays for `movie_detail`, consumed in call order.
    pub latency: Mutex<VecDeque<Duration>>,
}

impl FakeCatalog {
    pub fn with_movie(id: u64, title: &str) -> Self {
        let catalog = Self::default();
        catalog
            .movies
            .lock()
            .insert(id, (sample_detail(id, title), sample_credits(id)));
        catalog.listing.lock().push(CatalogMovie {
            id,
            title: title.to_string(),
            poster_path: None,
            overview: None,
            release_date: None,
            vote_average: None,
        });
        catalog
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchResults, ApiError> {
        self.searches.lock().push(query.to_string());
        self.failure.lock().check()?;
        let needle = query.to_lowercase();
        let results: Vec<_> = self
            .listing
            .lock()
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(SearchResults {
            page,
            total_pages: 1,
            total_results: results.len() as u32,
            results,
        })
    }

    async fn movie_detail(&self, movie_id: u64) -> Result<CatalogMovieDetail, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        lag(&self.latency).await;
        self.failure.lock().check()?;
        self.movies
            .lock()
            .get(&movie_id)
            .map(|(detail, _)| detail.clone())
            .ok_or_else(|| status_error(404, None))
    }

    async fn movie_credits(&self, movie_id: u64) -> Result<Credits, ApiError> {
        self.failure.lock().check()?;
        self.movies
            .lock()
            .get(&movie_id)
            .map(|(_, credits)| credits.clone())
            .ok_or_else(|| status_error(404, None))
    }
}

#[derive(Default)]
pub struct FakeDiary {
    pub entries: Mutex<Vec<DiaryEntry>>,
    pub failure: Mutex<Failure>,
    pub lookup_fails: AtomicBool,
    pub create_calls: AtomicUsize,
    pub lookup_calls: AtomicUsize,
    /// Per-call delays for `list_entries`, consumed in call order.
    pub latency: Mutex<VecDeque<Duration>>,
}

#[async_trait]
impl Diary for FakeDiary {
    async fn create_entry(&self, entry: &NewEntry) -> Result<DiaryEntry, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.failure.lock().check()?;
        let mut entries = self.entries.lock();
        let created = DiaryEntry {
            id: format!("entry-{}", entries.len() + 1),
            media_type: entry.media_type,
            title: entry.title.clone(),
            tmdb_id: entry.tmdb_id,
            poster_path: entry.poster_path.clone(),
            rating_overall: Some(entry.rating_overall),
            remarks: entry.remarks.clone(),
            date_logged: Utc::now(),
        };
        entries.insert(0, created.clone());
        Ok(created)
    }

    async fn list_entries(&self, page: u32, limit: u32) -> Result<Page<DiaryEntry>, ApiError> {
        self.failure.lock().check()?;
        // Snapshot before any delay so a slow call answers with what was
        // stored when it was made.
        let snapshot = {
            let entries = self.entries.lock();
            let skip = (page.saturating_sub(1) * limit) as usize;
            Page {
                data: entries.iter().skip(skip).take(limit as usize).cloned().collect(),
                page: Some(page),
                limit: Some(limit),
                total: Some(entries.len() as u64),
            }
        };
        lag(&self.latency).await;
        Ok(snapshot)
    }

    async fn entry_for_title(&self, tmdb_id: u64) -> Result<EntryLookup, ApiError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.lookup_fails.load(Ordering::SeqCst) {
            return Err(status_error(500, Some("lookup exploded")));
        }
        let data = self
            .entries
            .lock()
            .iter()
            .find(|e| e.tmdb_id == Some(tmdb_id))
            .cloned();
        Ok(EntryLookup {
            logged: data.is_some(),
            data,
        })
    }
}

#[derive(Default)]
pub struct FakeWatchlist {
    pub items: Mutex<Vec<WatchlistItem>>,
    pub failure: Mutex<Failure>,
    pub check_fails: AtomicBool,
    pub check_calls: AtomicUsize,
}

#[async_trait]
impl Watchlist for FakeWatchlist {
    async fn add(&self, item: &NewWatchlistItem) -> Result<WatchlistItem, ApiError> {
        self.failure.lock().check()?;
        let added = WatchlistItem {
            id: format!("w{}", item.tmdb_id),
            tmdb_id: item.tmdb_id,
            title: item.title.clone(),
            poster_path: item.poster_path.clone(),
            media_type: item.media_type.unwrap_or_default(),
            added_at: Utc::now(),
        };
        self.items.lock().push(added.clone());
        Ok(added)
    }

    async fn list(&self, _page: u32, limit: u32) -> Result<Page<WatchlistItem>, ApiError> {
        self.failure.lock().check()?;
        Ok(Page {
            data: self.items.lock().iter().take(limit as usize).cloned().collect(),
            page: Some(1),
            limit: Some(limit),
            total: None,
        })
    }

    async fn remove(&self, tmdb_id: u64) -> Result<(), ApiError> {
        self.failure.lock().check()?;
        self.items.lock().retain(|i| i.tmdb_id != tmdb_id);
        Ok(())
    }

    async fn contains(&self, tmdb_id: u64) -> Result<bool, ApiError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        if self.check_fails.load(Ordering::SeqCst) {
            return Err(status_error(503, None));
        }
        Ok(self.items.lock().iter().any(|i| i.tmdb_id == tmdb_id))
    }
}

#[derive(Default)]
pub struct FakeProfiles {
    pub profile: Mutex<Option<ProfileSummary>>,
    pub failure: Mutex<Failure>,
}

#[async_trait]
impl Profiles for FakeProfiles {
    async fn my_profile(&self) -> Result<ProfileSummary, ApiError> {
        self.failure.lock().check()?;
        self.profile
            .lock()
            .clone()
            .ok_or_else(|| status_error(404, Some("User not found")))
    }
}
