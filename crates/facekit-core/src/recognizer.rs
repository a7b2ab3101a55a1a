//! LBPH face recognition via OpenCV's contrib `face` module.
//!
//! The recognizer itself is an opaque external collaborator; this module
//! wraps creation, training, prediction, and model persistence behind the
//! [`Recognizer`] seam.

use opencv::core::{Mat, Ptr, Vector};
use opencv::face::LBPHFaceRecognizer;
use opencv::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("model file not found: {0} — run `facekit train` first")]
    ModelNotFound(PathBuf),
    #[error("opencv: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// LBPH training hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LbphParams {
    /// LBP operator radius.
    pub radius: i32,
    /// Sampling points around each pixel.
    pub neighbors: i32,
    /// Histogram grid columns.
    pub grid_x: i32,
    /// Histogram grid rows.
    pub grid_y: i32,
}

impl Default for LbphParams {
    fn default() -> Self {
        Self {
            radius: 1,
            neighbors: 8,
            grid_x: 8,
            grid_y: 8,
        }
    }
}

/// A classification result: the winning label id and a distance-style score
/// (lower = closer match, unbounded above).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: i32,
    pub confidence: f64,
}

/// Map a raw LBPH distance to the percentage shown on screen:
/// `clamp(0, 100, 100 - score)`.
///
/// Cosmetic and uncalibrated against the actual score distribution; kept
/// as-is for compatibility with existing operator expectations.
pub fn display_percent(confidence: f64) -> i32 {
    (100.0 - confidence).clamp(0.0, 100.0) as i32
}

/// Capability boundary for recognition: train on labeled samples, classify
/// a normalized probe.
pub trait Recognizer {
    fn train(&mut self, images: &Vector<Mat>, labels: &Vector<i32>) -> Result<(), RecognizerError>;
    fn predict(&self, probe: &Mat) -> Result<Prediction, RecognizerError>;
}

/// LBPH recognizer backed by OpenCV contrib.
#[derive(Debug)]
pub struct LbphRecognizer {
    model: Ptr<LBPHFaceRecognizer>,
}

impl LbphRecognizer {
    /// Create an untrained recognizer with the given hyperparameters.
    pub fn with_params(params: LbphParams) -> Result<Self, RecognizerError> {
        let model = LBPHFaceRecognizer::create(
            params.radius,
            params.neighbors,
            params.grid_x,
            params.grid_y,
            f64::MAX,
        )?;
        Ok(Self { model })
    }

    /// Load a trained model previously written by [`save`](Self::save).
    pub fn open(path: &Path) -> Result<Self, RecognizerError> {
        if !path.exists() {
            return Err(RecognizerError::ModelNotFound(path.to_path_buf()));
        }
        let mut model = LBPHFaceRecognizer::create_def()?;
        opencv::prelude::FaceRecognizerTrait::read(&mut model, path.to_string_lossy().as_ref())?;
        tracing::debug!(path = %path.display(), "loaded LBPH model");
        Ok(Self { model })
    }

    /// Persist the trained model. The file format is owned by OpenCV.
    pub fn save(&self, path: &Path) -> Result<(), RecognizerError> {
        opencv::prelude::FaceRecognizerTraitConst::write(&self.model, path.to_string_lossy().as_ref())?;
        Ok(())
    }
}

impl Recognizer for LbphRecognizer {
    fn train(&mut self, images: &Vector<Mat>, labels: &Vector<i32>) -> Result<(), RecognizerError> {
        self.model.train(images, labels)?;
        Ok(())
    }

    fn predict(&self, probe: &Mat) -> Result<Prediction, RecognizerError> {
        let mut label = -1i32;
        let mut confidence = 0.0f64;
        self.model.predict(probe, &mut label, &mut confidence)?;
        Ok(Prediction { label, confidence })
    }
}
