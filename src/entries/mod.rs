use crate::config::Configuration;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::models::{DiaryEntry, EntryLookup, Envelope, NewEntry, Page};
use async_trait::async_trait;
use tracing::{error, info, instrument};

/// The signed-in user's diary on the application backend.
#[async_trait]
pub trait Diary: Send + Sync {
    async fn create_entry(&self, entry: &NewEntry) -> Result<DiaryEntry, ApiError>;

    async fn list_entries(&self, page: u32, limit: u32) -> Result<Page<DiaryEntry>, ApiError>;

    /// Looks up the entry logged for a catalog title.
    async fn entry_for_title(&self, tmdb_id: u64) -> Result<EntryLookup, ApiError>;
}

pub struct EntriesClient {
    http: HttpClient,
    base_url: String,
}

impl EntriesClient {
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
impl Diary for EntriesClient {
    #[instrument(skip(self, entry), fields(title = %entry.title))]
    async fn create_entry(&self, entry: &NewEntry) -> Result<DiaryEntry, ApiError> {
        let url = format!("{}/entries", self.base_url);

        match self.http.post_json::<Envelope<DiaryEntry>, _>(&url, entry).await {
            Ok(created) => {
                info!("Logged '{}' with rating {}", entry.title, entry.rating_overall);
                Ok(created.data)
            }
            Err(e) => {
                error!("Failed to log '{}': {}", entry.title, e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_entries(&self, page: u32, limit: u32) -> Result<Page<DiaryEntry>, ApiError> {
        let url = format!("{}/entries", self.base_url);
        self.http
            .get_json(&url, &[("page", page.to_string()), ("limit", limit.to_string())])
            .await
    }

    #[instrument(skip(self))]
    async fn entry_for_title(&self, tmdb_id: u64) -> Result<EntryLookup, ApiError> {
        let url = format!("{}/entries/tmdb/{}", self.base_url, tmdb_id);
        self.http.get_json(&url, &[]).await
    }
}
