//! Recording adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::{fetch_input, FETCHER_PORT, FETCH_METHOD};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_fetcher::{FetchFuture, ImageFetcher};

/// Records fetch interactions while delegating to an inner fetcher.
pub struct RecordingImageFetcher {
    inner: Box<dyn ImageFetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageFetcher {
    /// Wrap `inner`, recording every call into `recorder`.
    pub fn new(inner: Box<dyn ImageFetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageFetcher for RecordingImageFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.fetch(&url).await;
            record_result(&recorder, FETCHER_PORT, FETCH_METHOD, fetch_input(&url), &result);
            result
        })
    }
}
