use crate::config::Configuration;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::models::{Envelope, NewWatchlistItem, Page, WatchlistCheck, WatchlistItem};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Watchlist membership on the application backend. Uniqueness per title is
/// the backend's concern; adding a title twice returns whatever it returns.
#[async_trait]
pub trait Watchlist: Send + Sync {
    async fn add(&self, item: &NewWatchlistItem) -> Result<WatchlistItem, ApiError>;

    async fn list(&self, page: u32, limit: u32) -> Result<Page<WatchlistItem>, ApiError>;

    async fn remove(&self, tmdb_id: u64) -> Result<(), ApiError>;

    async fn contains(&self, tmdb_id: u64) -> Result<bool, ApiError>;
}

pub struct WatchlistClient {
    http: HttpClient,
    base_url: String,
}

impl WatchlistClient {
    pub fn new(http: HttpClient, base_url: &str, token: Option<&str>) -> Self {
        Self {
            http: http.authorized(token),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(http: &HttpClient, config: &Configuration) -> Self {
        Self::new(http.clone(), config.backend_url(), config.backend_token())
    }
}

#[async_trait]
impl Watchlist for WatchlistClient {
    #[instrument(skip(self, item), fields(tmdb_id = item.tmdb_id))]
    async fn add(&self, item: &NewWatchlistItem) -> Result<WatchlistItem, ApiError> {
        let url = format!("{}/watchlist", self.base_url);
        let body = NewWatchlistItem {
            media_type: Some(item.media_type.unwrap_or_default()),
            ..item.clone()
        };

        let added: Envelope<WatchlistItem> = self.http.post_json(&url, &body).await?;
        info!("Added '{}' to watchlist", added.data.title);
        Ok(added.data)
    }

    #[instrument(skip(self))]
    async fn list(&self, page: u32, limit: u32) -> Result<Page<WatchlistItem>, ApiError> {
        let url = format!("{}/watchlist", self.base_url);
        self.http
            .get_json(&url, &[("page", page.to_string()), ("limit", limit.to_string())])
            .await
    }

    #[instrument(skip(self))]
    async fn remove(&self, tmdb_id: u64) -> Result<(), ApiError> {
        let url = format!("{}/watchlist/{}", self.base_url, tmdb_id);
        self.http.delete(&url).await?;
        info!("Removed {} from watchlist", tmdb_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn contains(&self, tmdb_id: u64) -> Result<bool, ApiError> {
        let url = format!("{}/watchlist/check/{}", self.base_url, tmdb_id);
        let check: WatchlistCheck = self.http.get_json(&url, &[]).await?;
        Ok(check.in_watchlist)
    }
}
