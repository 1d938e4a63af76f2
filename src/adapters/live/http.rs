//! Live adapter that fetches images over HTTP.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::error::CatError;
use crate::ports::image_fetcher::{FetchFuture, FetchedImage, ImageFetcher};

/// Fetches images with a shared `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, CatError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        Box::pin(async move {
            let response = self.client.get(&url).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(CatError::Status { status: status.as_u16(), url });
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let data = response.bytes().await?.to_vec();

            Ok(FetchedImage { data, content_type })
        })
    }
}
