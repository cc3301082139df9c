use crate::config::{Config, Credentials};
use crate::error::{Result, ShopCatchError, UpstreamError};
use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{SearchRequest, SearchResponse};

const CLIENT_ID_HEADER: &str = "x-naver-client-id";
const CLIENT_SECRET_HEADER: &str = "x-naver-client-secret";

/// The seam between tool handling and the network.
pub trait ProductSearch: Send + Sync {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, std::result::Result<SearchResponse, UpstreamError>>;
}

pub struct NaverShoppingClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl NaverShoppingClient {
    pub fn new(credentials: &Credentials, endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CLIENT_ID_HEADER,
            HeaderValue::from_str(&credentials.client_id).map_err(|e| {
                ShopCatchError::ConfigError(format!("Invalid client id header: {}", e))
            })?,
        );
        let mut secret = HeaderValue::from_str(&credentials.client_secret).map_err(|e| {
            ShopCatchError::ConfigError(format!("Invalid client secret header: {}", e))
        })?;
        secret.set_sensitive(true);
        headers.insert(CLIENT_SECRET_HEADER, secret);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.credentials, config.api_endpoint.clone(), config.timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the request and return the status code with the unparsed body.
    pub async fn fetch_raw(
        &self,
        request: &SearchRequest,
    ) -> std::result::Result<(u16, String), UpstreamError> {
        debug!(
            query = %request.query,
            display = request.display,
            min_price = ?request.min_price,
            max_price = ?request.max_price,
            "Sending shopping search request"
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&request.query_params())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        Ok((status, body))
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}

impl ProductSearch for NaverShoppingClient {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, std::result::Result<SearchResponse, UpstreamError>> {
        Box::pin(async move {
            let (status, body) = self.fetch_raw(request).await?;

            if !(200..300).contains(&status) {
                warn!(status, "Shopping search returned an error status");
                return Err(UpstreamError::Status { status, body });
            }

            serde_json::from_str::<SearchResponse>(&body)
                .map_err(|e| UpstreamError::Decode(e.to_string()))
        })
    }
}
