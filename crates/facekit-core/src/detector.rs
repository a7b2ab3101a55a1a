//! Haar cascade face detection via OpenCV's `objdetect` module.

use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("cascade file not found: {0} — download haarcascade_frontalface_default.xml and place it there")]
    CascadeNotFound(PathBuf),
    #[error("cascade at {0} is not a usable classifier definition")]
    CascadeNotLoaded(PathBuf),
    #[error("opencv: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// Multi-scale detection parameters.
///
/// Enrollment and recognition share one set of values so crop geometry stays
/// consistent with what the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Image pyramid step between detection scales.
    pub scale_factor: f64,
    /// Minimum neighbor votes for a candidate to survive.
    pub min_neighbors: i32,
    /// Minimum face side length in pixels.
    pub min_size: i32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.2,
            min_neighbors: 5,
            min_size: 100,
        }
    }
}

/// Capability boundary for face detection: anything that can turn a
/// grayscale frame into face rectangles can drive the capture loops.
pub trait Detector {
    fn detect(&mut self, gray: &Mat) -> Result<Vec<Rect>, DetectorError>;
}

/// Haar cascade detector backed by OpenCV's `CascadeClassifier`.
#[derive(Debug)]
pub struct HaarDetector {
    cascade: CascadeClassifier,
    params: DetectionParams,
}

impl HaarDetector {
    /// Load a cascade definition from disk.
    pub fn load(path: &Path, params: DetectionParams) -> Result<Self, DetectorError> {
        if !path.exists() {
            return Err(DetectorError::CascadeNotFound(path.to_path_buf()));
        }
        let cascade = CascadeClassifier::new(path.to_string_lossy().as_ref())?;
        if cascade.empty()? {
            return Err(DetectorError::CascadeNotLoaded(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), ?params, "loaded Haar cascade");
        Ok(Self { cascade, params })
    }
}

impl Detector for HaarDetector {
    fn detect(&mut self, gray: &Mat) -> Result<Vec<Rect>, DetectorError> {
        let mut faces: Vector<Rect> = Vector::new();
        self.cascade.detect_multi_scale(
            gray,
            &mut faces,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            Size::new(self.params.min_size, self.params.min_size),
            Size::new(0, 0),
        )?;
        Ok(faces.to_vec())
    }
}
