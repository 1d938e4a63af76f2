//! Adapter implementations for port traits.
//!
//! - `live/` — Real HTTP implementation
//! - `recording/` — Record fetches to cassettes
//! - `replaying/` — Replay fetches from cassettes

pub mod live;
pub mod recording;
pub mod replaying;

/// Cassette port name for the image fetcher.
pub(crate) const FETCHER_PORT: &str = "image_fetcher";
/// Cassette method name for [`crate::ports::ImageFetcher::fetch`].
pub(crate) const FETCH_METHOD: &str = "fetch";

/// Cassette input recorded for a fetch of `url`.
pub(crate) fn fetch_input(url: &str) -> serde_json::Value {
    serde_json::json!({ "url": url })
}
