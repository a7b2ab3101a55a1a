//! Best-effort provisioning of the Haar cascade definition file.

use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Upstream location of the frontal-face cascade shipped with OpenCV.
pub const DEFAULT_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/master/data/haarcascades/haarcascade_frontalface_default.xml";

#[derive(Error, Debug)]
pub enum CascadeError {
    #[error("download failed: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Ensure the cascade definition exists at `path`, fetching it from `url` if
/// absent. No retry, no checksum, no versioning.
///
/// Callers treat failure as non-fatal: detector construction reports its own
/// descriptive error once the file is actually needed.
pub fn ensure_cascade(path: &Path, url: &str) -> Result<(), CascadeError> {
    if path.exists() {
        return Ok(());
    }

    tracing::info!(url, path = %path.display(), "cascade not found, downloading");
    let response = ureq::get(url).call().map_err(Box::new)?;
    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;
    fs::write(path, body)?;
    tracing::info!(path = %path.display(), "downloaded cascade");
    Ok(())
}
