//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::http::HttpFetcher;
use crate::adapters::recording::image_fetcher::RecordingImageFetcher;
use crate::adapters::replaying::image_fetcher::ReplayingImageFetcher;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::CatError;
use crate::ports::ImageFetcher;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Image fetcher port.
    pub fetcher: Box<dyn ImageFetcher>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette to disk.
    ///
    /// The owning [`ServiceContext`] must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context that fetches over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is invalid or the client cannot be built.
    pub fn live(config: &Config) -> Result<Self, CatError> {
        let timeout = config.timeout().map_err(CatError::Config)?;
        Ok(Self { fetcher: Box::new(HttpFetcher::new(timeout)?) })
    }

    /// Create a recording context that wraps the live fetcher with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), CatError> {
        let live_ctx = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".catsays/cassettes")
            .join(&timestamp)
            .join("image_fetcher.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_fetcher"),
            get_commit_hash(),
        )));

        let fetcher = RecordingImageFetcher::new(live_ctx.fetcher, Arc::clone(&recorder));

        Ok((Self { fetcher: Box::new(fetcher) }, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, CatError> {
        let replayer = load_cassette(path).map_err(CatError::Cassette)?;
        let fetcher = ReplayingImageFetcher::new(Arc::new(Mutex::new(replayer)));
        Ok(Self { fetcher: Box::new(fetcher) })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
