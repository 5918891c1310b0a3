use crate::config::Configuration;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::models::{CatalogMovieDetail, Credits, SearchResults};
use async_trait::async_trait;
use tracing::{debug, error, info, instrument};

/// Read-only access to the movie metadata service.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchResults, ApiError>;

    async fn movie_detail(&self, movie_id: u64) -> Result<CatalogMovieDetail, ApiError>;

    async fn movie_credits(&self, movie_id: u64) -> Result<Credits, ApiError>;
}

pub struct TmdbClient {
    http: HttpClient,
    base_url: String,
}

impl TmdbClient {
    pub fn new(http: HttpClient, base_url: &str, token: Option<&str>) -> Self {
        Self {
            http: http.authorized(token),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(http: &HttpClient, config: &Configuration) -> Self {
        Self::new(http.clone(), config.tmdb_base_url(), config.tmdb_token())
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    #[instrument(skip(self))]
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchResults, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank search query, skipping request");
            return Ok(SearchResults::default());
        }

        let url = format!(
            "{}/search/movie?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        let results: SearchResults = self
            .http
            .get_json(&url, &[("page", page.max(1).to_string())])
            .await?;

        info!("Search '{}' matched {} movies", query, results.total_results);
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn movie_detail(&self, movie_id: u64) -> Result<CatalogMovieDetail, ApiError> {
        let url = format!("{}/movie/{}", self.base_url, movie_id);
        match self.http.get_json(&url, &[]).await {
            Ok(detail) => Ok(detail),
            Err(e) => {
                error!("Failed to fetch movie {}: {}", movie_id, e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    async fn movie_credits(&self, movie_id: u64) -> Result<Credits, ApiError> {
        let url = format!("{}/movie/{}/credits", self.base_url, movie_id);
        self.http.get_json(&url, &[]).await
    }
}
