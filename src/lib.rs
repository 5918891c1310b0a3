//! Client core of the movie diary: remote catalog and backend clients, and
//! the per-screen controllers that drive them.

pub mod config;
pub mod entries;
pub mod error;
pub mod http;
pub mod models;
pub mod profile;
pub mod screen;
pub mod screens;
pub mod tmdb;
pub mod watchlist;

#[cfg(test)]
pub mod test_support;

use std::sync::Arc;

use config::Configuration;
use entries::{Diary, EntriesClient};
use error::ApiError;
use http::HttpClient;
use profile::{ProfileClient, Profiles};
use tmdb::{Catalog, TmdbClient};
use watchlist::{Watchlist, WatchlistClient};

/// The remote collaborators, built once and handed to each screen.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn Catalog>,
    pub diary: Arc<dyn Diary>,
    pub watchlist: Arc<dyn Watchlist>,
    pub profiles: Arc<dyn Profiles>,
}

impl Services {
    pub fn from_config(config: &Configuration) -> Result<Self, ApiError> {
        let http = HttpClient::new(config.request_timeout())?;

        Ok(Self {
            catalog: Arc::new(TmdbClient::from_config(&http, config)),
            diary: Arc::new(EntriesClient::from_config(&http, config)),
            watchlist: Arc::new(WatchlistClient::from_config(&http, config)),
            profiles: Arc::new(ProfileClient::from_config(&http, config)),
        })
    }
}
