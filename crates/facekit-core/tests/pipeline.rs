//! Full train-then-classify pass over a synthetic on-disk dataset.

use facekit_core::{dataset, LabelMap, LbphParams, LbphRecognizer, Recognizer};
use opencv::core::{Mat, Scalar, CV_8UC1};
use opencv::imgcodecs;
use opencv::prelude::*;
use std::path::Path;

/// A 200×200 striped texture. Orientation separates the two classes, phase
/// provides within-class variation.
fn stripes(vertical: bool, phase: i32) -> Mat {
    let mut img = Mat::new_rows_cols_with_default(200, 200, CV_8UC1, Scalar::all(0.0)).unwrap();
    for row in 0..200 {
        for col in 0..200 {
            let band = if vertical { col } else { row };
            if (band + phase) % 8 < 4 {
                *img.at_2d_mut::<u8>(row, col).unwrap() = 255;
            }
        }
    }
    img
}

fn write_class(root: &Path, name: &str, vertical: bool, count: i32) {
    let dir = dataset::person_dir(root, name).unwrap();
    for i in 0..count {
        let img = stripes(vertical, i % 4);
        let path = dir.join(format!("{i}_0.jpg"));
        assert!(imgcodecs::imwrite_def(path.to_string_lossy().as_ref(), &img).unwrap());
    }
}

#[test]
fn train_and_classify_round_trip() {
    let root = tempfile::tempdir().unwrap();
    write_class(root.path(), "alice", true, 20);
    write_class(root.path(), "bob", false, 15);

    let set = dataset::load_training_set(root.path()).unwrap();
    assert_eq!(set.len(), 35);
    assert_eq!(set.label_map.len(), 2);

    let mut recognizer = LbphRecognizer::with_params(LbphParams::default()).unwrap();
    recognizer.train(&set.images, &set.labels).unwrap();

    let model_path = root.path().join("model.yml");
    let labels_path = root.path().join("labels.json");
    recognizer.save(&model_path).unwrap();
    set.label_map.save(&labels_path).unwrap();
    assert!(model_path.exists());
    assert!(labels_path.exists());

    // Reload both artifacts the way the recognition tool does.
    let labels = LabelMap::load(&labels_path).unwrap();
    let loaded = LbphRecognizer::open(&model_path).unwrap();

    let prediction = loaded.predict(&stripes(true, 1)).unwrap();
    assert_eq!(labels.name_of(prediction.label), Some("alice"));

    let prediction = loaded.predict(&stripes(false, 1)).unwrap();
    assert_eq!(labels.name_of(prediction.label), Some("bob"));
}

#[test]
fn training_failure_leaves_no_artifacts() {
    let root = tempfile::tempdir().unwrap();
    let dir = dataset::person_dir(root.path(), "alice").unwrap();
    std::fs::write(dir.join("broken.jpg"), b"junk").unwrap();

    // Loading fails before any model exists, so nothing gets written.
    assert!(dataset::load_training_set(root.path()).is_err());
    assert!(!root.path().join("model.yml").exists());
    assert!(!root.path().join("labels.json").exists());
}
