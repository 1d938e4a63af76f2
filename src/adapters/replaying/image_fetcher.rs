//! Replaying adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result, Replayed};
use crate::adapters::{fetch_input, FETCHER_PORT, FETCH_METHOD};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::CatError;
use crate::ports::image_fetcher::{FetchFuture, FetchedImage, ImageFetcher};

/// Serves recorded fetch results from a cassette, matched by URL.
pub struct ReplayingImageFetcher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageFetcher {
    /// Create a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageFetcher for ReplayingImageFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let output = next_output(&self.replayer, FETCHER_PORT, FETCH_METHOD, &fetch_input(url));
        Box::pin(async move {
            match replay_result::<FetchedImage>(output.map_err(CatError::Cassette)?) {
                Ok(Replayed::Ok(image)) => Ok(image),
                Ok(Replayed::Err(message)) => Err(CatError::ReplayedNetwork(message)),
                Err(e) => Err(CatError::Cassette(e)),
            }
        })
    }
}
