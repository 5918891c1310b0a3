use crate::error::ApiError;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

const USER_AGENT: &str = concat!("moviediary/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    bearer: Option<Arc<str>>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            bearer: None,
        })
    }

    /// Returns a client sharing the same connection pool that sends `token`
    /// as a bearer credential on every request.
    pub fn authorized(&self, token: Option<&str>) -> Self {
        Self {
            client: self.client.clone(),
            bearer: token.map(Arc::from),
        }
    }

    fn request(&self, method: reqwest::Method, url: &str) -> Result<RequestBuilder, ApiError> {
        let builder = self.client.request(method, Url::parse(url)?);
        Ok(match self.bearer.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!("Making GET request");
        let response = self
            .request(reqwest::Method::GET, url)?
            .query(query)
            .send()
            .await?;
        let response = check_status(response, "GET").await?;
        Ok(response.json::<T>().await?)
    }

    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!("Making POST request");
        let response = self
            .request(reqwest::Method::POST, url)?
            .json(body)
            .send()
            .await?;
        let response = check_status(response, "POST").await?;
        Ok(response.json::<T>().await?)
    }

    #[instrument(skip(self), fields(url = %url))]
    pub async fn delete(&self, url: &str) -> Result<(), ApiError> {
        debug!("Making DELETE request");
        let response = self.request(reqwest::Method::DELETE, url)?.send().await?;
        check_status(response, "DELETE").await?;
        Ok(())
    }
}

async fn check_status(response: Response, verb: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    error!("HTTP {} failed with status: {}", verb, status);
    // A body we can't read or parse still yields the status error.
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.message);

    Err(ApiError::Status { status, message })
}
