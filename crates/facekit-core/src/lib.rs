//! facekit-core — Face enrollment, training, and recognition orchestration.
//!
//! Detection (Haar cascade) and recognition (LBPH) are delegated to OpenCV.
//! This crate owns everything around those calls: the on-disk dataset
//! layout, label-id bookkeeping, sample normalization, and cascade
//! provisioning.

pub mod cascade;
pub mod dataset;
pub mod detector;
pub mod labels;
pub mod recognizer;
pub mod sample;

pub use dataset::{DatasetError, TrainingSet};
pub use detector::{DetectionParams, Detector, DetectorError, HaarDetector};
pub use labels::{LabelMap, LabelsError};
pub use recognizer::{LbphParams, LbphRecognizer, Prediction, Recognizer, RecognizerError};
