//! Image fetcher port for the captioned-image service.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::CatError;

/// Encoded image bytes returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedImage {
    /// Raw encoded bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// `Content-Type` reported by the service, if any.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Boxed future type returned by [`ImageFetcher::fetch`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FetchedImage, CatError>> + Send + 'a>>;

/// Retrieves encoded images by URL.
pub trait ImageFetcher: Send + Sync {
    /// Fetch the image at `url`.
    fn fetch(&self, url: &str) -> FetchFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
