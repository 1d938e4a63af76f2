//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_fetcher;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;

/// Take the recorded output for a call, matched on port, method, and input.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
    input: &serde_json::Value,
) -> Result<serde_json::Value, String> {
    let mut guard = replayer.lock().map_err(|e| format!("replayer lock poisoned: {e}"))?;
    guard.take_matching(port, method, input).map(|interaction| interaction.output)
}

/// Outcome of a replayed call.
#[derive(Debug)]
pub(crate) enum Replayed<T> {
    /// The recorded call succeeded with this value.
    Ok(T),
    /// The recorded call failed with this message.
    Err(String),
}

/// Deserialize a recorded output using the Ok/Err JSON convention.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<Replayed<T>, String> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Ok(Replayed::Err(msg));
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map(Replayed::Ok)
        .map_err(|e| format!("malformed recorded output: {e}"))
}
