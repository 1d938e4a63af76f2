//! Recording adapters that capture interactions to cassettes.

pub mod image_fetcher;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
pub(crate) fn record_result<T, E>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: serde_json::Value,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
{
    let output_json = match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => serde_json::json!({ "Ok": inner }),
            Err(e) => serde_json::json!({ "Err": format!("unrecordable value: {e}") }),
        },
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    // A poisoned recorder only loses this interaction; the live result still flows.
    if let Ok(mut guard) = recorder.lock() {
        guard.record(port, method, input, output_json);
    }
}
