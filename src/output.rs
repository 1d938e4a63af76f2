//! Output path resolution, format inference, and writing the composite.

use std::path::{Path, PathBuf};

use crate::compose::OutputFormat;
use crate::error::CatError;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "cat.jpg";

/// Resolve `output` against `cwd` unless it is already absolute.
#[must_use]
pub fn resolve_output_path(output: &str, cwd: &Path) -> PathBuf {
    cwd.join(output)
}

/// Pick the output format: explicit choice, else the path's extension, else JPEG.
#[must_use]
pub fn infer_format(explicit: Option<OutputFormat>, path: &Path) -> OutputFormat {
    explicit
        .or_else(|| {
            path.extension().and_then(|e| e.to_str()).and_then(OutputFormat::from_extension)
        })
        .unwrap_or(OutputFormat::Jpeg)
}

/// Write the encoded composite, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_image(path: &Path, data: &[u8]) -> Result<(), CatError> {
    std::fs::write(path, data).map_err(CatError::Io)
}
