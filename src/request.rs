//! Request URL construction for the captioned-cat service.

use reqwest::Url;

/// Default image service host.
pub const DEFAULT_BASE_URL: &str = "https://cataas.com";

/// Parameters for a single captioned image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequestParams {
    /// Text the service renders onto the image.
    pub caption: String,
    /// Requested image width in pixels.
    pub width: u32,
    /// Requested image height in pixels.
    pub height: u32,
    /// Caption color name (e.g., `"Pink"`).
    pub color: String,
    /// Caption font size.
    pub size: u32,
}

/// Base URL of the image service.
///
/// Only URLs that can carry path segments (`http`, `https`, ...) are accepted,
/// so building a request from a `ServiceHost` never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHost(Url);

impl ServiceHost {
    /// Parse and validate a base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a URL or cannot carry a path.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let url = Url::parse(raw).map_err(|e| format!("Invalid service URL '{raw}': {e}"))?;
        if url.cannot_be_a_base() {
            return Err(format!("Service URL '{raw}' cannot carry a path"));
        }
        Ok(Self(url))
    }

    /// The underlying URL.
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

/// Build the URL for one captioned image: `/cat/says/{caption}?width=&height=&color=&s=`.
///
/// The caption is pushed as a single percent-encoded path segment, so any
/// string (empty, containing `/`, non-ASCII) yields a valid URL.
#[must_use]
pub fn build_request_url(host: &ServiceHost, params: &ImageRequestParams) -> Url {
    let mut url = host.0.clone();
    url.set_query(None);
    url.set_fragment(None);

    // ServiceHost rejects cannot-be-a-base URLs, so this always succeeds.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["cat", "says", params.caption.as_str()]);
    }

    url.query_pairs_mut()
        .append_pair("width", &params.width.to_string())
        .append_pair("height", &params.height.to_string())
        .append_pair("color", &params.color)
        .append_pair("s", &params.size.to_string());

    url
}
