//! Startup configuration. Every path and parameter the pipeline needs is a
//! flag with a `FACEKIT_*` environment fallback; the defaults reproduce the
//! conventional layout (`dataset/`, `model.yml`, `labels.json`, cascade XML
//! next to the binary).

use clap::Args;
use facekit_core::cascade::DEFAULT_CASCADE_URL;
use facekit_core::{DetectionParams, LbphParams};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Root folder holding one sample subfolder per person
    #[arg(long, global = true)]
    dataset_root: Option<PathBuf>,

    /// Trained model file
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Label id→name mapping file
    #[arg(long, global = true)]
    labels: Option<PathBuf>,

    /// Haar cascade definition file
    #[arg(long, global = true)]
    cascade: Option<PathBuf>,

    /// URL the cascade is fetched from when the file is missing
    #[arg(long, global = true)]
    cascade_url: Option<String>,

    /// Camera device index
    #[arg(long, global = true)]
    camera: Option<i32>,
}

/// Resolved runtime configuration. Precedence per option: flag, then
/// `FACEKIT_*` environment variable, then the built-in default.
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_root: PathBuf,
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub cascade_path: PathBuf,
    pub cascade_url: String,
    pub camera_index: i32,
}

impl Config {
    pub fn resolve(args: PathArgs) -> Self {
        Self {
            dataset_root: args
                .dataset_root
                .unwrap_or_else(|| env_path("FACEKIT_DATASET_ROOT", "dataset")),
            model_path: args
                .model
                .unwrap_or_else(|| env_path("FACEKIT_MODEL", "model.yml")),
            labels_path: args
                .labels
                .unwrap_or_else(|| env_path("FACEKIT_LABELS", "labels.json")),
            cascade_path: args.cascade.unwrap_or_else(|| {
                env_path("FACEKIT_CASCADE", "haarcascade_frontalface_default.xml")
            }),
            cascade_url: args
                .cascade_url
                .unwrap_or_else(|| env_string("FACEKIT_CASCADE_URL", DEFAULT_CASCADE_URL)),
            camera_index: args.camera.unwrap_or_else(|| env_i32("FACEKIT_CAMERA", 0)),
        }
    }
}

/// Multi-scale detection flags, shared by `enroll` and `recognize` so crop
/// geometry stays consistent with training.
#[derive(Args, Debug)]
pub struct DetectionArgs {
    /// Image pyramid step between detection scales
    #[arg(long, default_value_t = 1.2)]
    scale_factor: f64,

    /// Minimum neighbor votes for a detection to survive
    #[arg(long, default_value_t = 5)]
    min_neighbors: i32,

    /// Minimum detected face side length in pixels
    #[arg(long, default_value_t = 100)]
    min_size: i32,
}

impl DetectionArgs {
    pub fn to_params(&self) -> DetectionParams {
        DetectionParams {
            scale_factor: self.scale_factor,
            min_neighbors: self.min_neighbors,
            min_size: self.min_size,
        }
    }
}

/// LBPH hyperparameter flags for `train`.
#[derive(Args, Debug)]
pub struct TrainingArgs {
    /// LBP operator radius
    #[arg(long, default_value_t = 1)]
    radius: i32,

    /// Sampling points around each pixel
    #[arg(long, default_value_t = 8)]
    neighbors: i32,

    /// Histogram grid columns
    #[arg(long, default_value_t = 8)]
    grid_x: i32,

    /// Histogram grid rows
    #[arg(long, default_value_t = 8)]
    grid_y: i32,
}

impl TrainingArgs {
    pub fn to_params(&self) -> LbphParams {
        LbphParams {
            radius: self.radius,
            neighbors: self.neighbors,
            grid_x: self.grid_x,
            grid_y: self.grid_y,
        }
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_i32(key: &str, default: i32) -> i32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
