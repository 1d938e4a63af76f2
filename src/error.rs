//! Unified error type for catsays.

use thiserror::Error;

/// Errors that can occur while fetching, compositing, or writing images.
#[derive(Debug, Error)]
pub enum CatError {
    /// The image service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// A transport error occurred (connection, timeout, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A network failure served from a cassette.
    #[error("Network error (replayed): {0}")]
    ReplayedNetwork(String),

    /// A fetched image could not be decoded.
    #[error("Failed to decode image {index}: {source}")]
    Decode {
        /// Position of the offending placement.
        index: usize,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// The composite could not be encoded to the output format.
    #[error("Failed to encode {format}: {source}")]
    Encode {
        /// Target format name.
        format: &'static str,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A cassette could not be loaded or has no matching interaction.
    #[error("Cassette error: {0}")]
    Cassette(String),
}

