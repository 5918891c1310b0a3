use crate::config::Configuration;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::models::{Envelope, ProfileSummary};
use async_trait::async_trait;
use tracing::instrument;

/// Profile summary assembled by the backend; nothing is aggregated client-side.
#[async_trait]
pub trait Profiles: Send + Sync {
    async fn my_profile(&self) -> Result<ProfileSummary, ApiError>;
}

pub struct ProfileClient {
    http: HttpClient,
    base_url: String,
}

impl ProfileClient {
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
impl Profiles for ProfileClient {
    #[instrument(skip(self))]
    async fn my_profile(&self) -> Result<ProfileSummary, ApiError> {
        let url = format!("{}/users/me", self.base_url);
        let profile: Envelope<ProfileSummary> = self.http.get_json(&url, &[]).await?;
        Ok(profile.data)
    }
}
