//! On-disk dataset layout: one folder per person under a root, flat image
//! samples inside. The layout is the only contract between enrollment and
//! training.

use crate::labels::LabelMap;
use crate::sample::{self, SAMPLE_SIZE};
use opencv::core::{Mat, Size, Vector};
use opencv::prelude::*;
use opencv::{imgcodecs, imgproc};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("dataset root not found: {0} — run `facekit enroll` first")]
    MissingRoot(PathBuf),
    #[error("no usable training images under {0} — capture samples first")]
    Empty(PathBuf),
    #[error("invalid person name {0:?} — must be non-empty and free of path separators")]
    InvalidName(String),
    #[error("failed to encode sample to {0}")]
    SampleWrite(PathBuf),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("opencv: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// Validate a person name and return their sample folder, creating it if
/// absent. Idempotent: an existing folder is reused and samples accumulate
/// across runs.
pub fn person_dir(root: &Path, name: &str) -> Result<PathBuf, DatasetError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(DatasetError::InvalidName(name.to_string()));
    }
    let dir = root.join(name);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Write a normalized sample into `person_dir`, named by the current Unix
/// timestamp and the face's index within its frame.
pub fn save_sample(person_dir: &Path, index: usize, img: &Mat) -> Result<PathBuf, DatasetError> {
    let path = person_dir.join(sample::sample_file_name(
        chrono::Utc::now().timestamp(),
        index,
    ));
    if !imgcodecs::imwrite_def(path.to_string_lossy().as_ref(), img)? {
        return Err(DatasetError::SampleWrite(path));
    }
    Ok(path)
}

/// Everything the trainer needs: normalized images, their integer labels,
/// and the id→name mapping those labels refer to.
#[derive(Debug)]
pub struct TrainingSet {
    pub images: Vector<Mat>,
    pub labels: Vector<i32>,
    pub label_map: LabelMap,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Load every decodable image under `root`, one subfolder per person.
///
/// Subfolders are enumerated in sorted name order and assigned dense labels
/// starting at 0; a folder keeps its label even when every file in it fails
/// to decode. Undecodable files are skipped with a debug log. Images are
/// resized to [`SAMPLE_SIZE`]² so stray originals cannot skew training.
pub fn load_training_set(root: &Path) -> Result<TrainingSet, DatasetError> {
    if !root.is_dir() {
        return Err(DatasetError::MissingRoot(root.to_path_buf()));
    }

    let mut person_dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    person_dirs.sort();

    let label_map = LabelMap::from_names(
        person_dirs
            .iter()
            .filter_map(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned()),
    );

    let mut images: Vector<Mat> = Vector::new();
    let mut labels: Vector<i32> = Vector::new();

    for dir in &person_dirs {
        let name = match dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        let Some(label) = label_map.id_of(&name) else {
            continue;
        };

        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_image_file(path))
            .collect();
        files.sort();

        for file in files {
            let img = imgcodecs::imread(
                file.to_string_lossy().as_ref(),
                imgcodecs::IMREAD_GRAYSCALE,
            )?;
            if img.empty() {
                tracing::debug!(file = %file.display(), "skipping undecodable image");
                continue;
            }
            let mut resized = Mat::default();
            imgproc::resize(
                &img,
                &mut resized,
                Size::new(SAMPLE_SIZE, SAMPLE_SIZE),
                0.0,
                0.0,
                imgproc::INTER_LINEAR,
            )?;
            images.push(resized);
            labels.push(label);
        }
    }

    if images.is_empty() {
        return Err(DatasetError::Empty(root.to_path_buf()));
    }

    tracing::info!(
        images = images.len(),
        classes = label_map.len(),
        "loaded training set"
    );
    Ok(TrainingSet {
        images,
        labels,
        label_map,
    })
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC1};

    fn write_image(dir: &Path, name: &str, value: f64) {
        let img = Mat::new_rows_cols_with_default(50, 40, CV_8UC1, Scalar::all(value)).unwrap();
        let path = dir.join(name);
        assert!(imgcodecs::imwrite_def(path.to_string_lossy().as_ref(), &img).unwrap());
    }

    #[test]
    fn test_person_dir_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let first = person_dir(root.path(), "alice").unwrap();
        write_image(&first, "1_0.jpg", 10.0);

        let second = person_dir(root.path(), "alice").unwrap();
        assert_eq!(first, second);
        assert!(first.join("1_0.jpg").exists(), "prior samples must survive");
    }

    #[test]
    fn test_person_dir_rejects_illegal_names() {
        let root = tempfile::tempdir().unwrap();
        for bad in ["", ".", "..", "a/b", "a\\b"] {
            let err = person_dir(root.path(), bad).unwrap_err();
            assert!(matches!(err, DatasetError::InvalidName(_)), "{bad:?}");
        }
    }

    #[test]
    fn test_save_sample_writes_unique_files() {
        let root = tempfile::tempdir().unwrap();
        let dir = person_dir(root.path(), "alice").unwrap();
        let img =
            Mat::new_rows_cols_with_default(SAMPLE_SIZE, SAMPLE_SIZE, CV_8UC1, Scalar::all(128.0))
                .unwrap();

        let a = save_sample(&dir, 0, &img).unwrap();
        let b = save_sample(&dir, 1, &img).unwrap();
        assert_ne!(a, b);
        assert!(a.exists());
        assert!(b.exists());
    }

    #[test]
    fn test_labels_assigned_in_sorted_folder_order() {
        let root = tempfile::tempdir().unwrap();
        for (name, value) in [("bob", 200.0), ("alice", 40.0)] {
            let dir = person_dir(root.path(), name).unwrap();
            write_image(&dir, "1_0.jpg", value);
        }

        let set = load_training_set(root.path()).unwrap();
        assert_eq!(set.label_map.id_of("alice"), Some(0));
        assert_eq!(set.label_map.id_of("bob"), Some(1));
        assert_eq!(set.len(), 2);
        assert_eq!(set.labels.to_vec(), vec![0, 1]);
    }

    #[test]
    fn test_images_normalized_to_sample_size() {
        let root = tempfile::tempdir().unwrap();
        let dir = person_dir(root.path(), "alice").unwrap();
        write_image(&dir, "1_0.jpg", 128.0);

        let set = load_training_set(root.path()).unwrap();
        let img = set.images.get(0).unwrap();
        assert_eq!((img.rows(), img.cols()), (SAMPLE_SIZE, SAMPLE_SIZE));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let err = load_training_set(&root.path().join("nope")).unwrap_err();
        assert!(matches!(err, DatasetError::MissingRoot(_)));
    }

    #[test]
    fn test_undecodable_files_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        let dir = person_dir(root.path(), "alice").unwrap();
        write_image(&dir, "good.jpg", 90.0);
        fs::write(dir.join("bad.jpg"), b"not an image").unwrap();

        let set = load_training_set(root.path()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_all_undecodable_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let dir = person_dir(root.path(), "alice").unwrap();
        fs::write(dir.join("bad.jpg"), b"junk").unwrap();

        let err = load_training_set(root.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty(_)));
    }

    #[test]
    fn test_empty_folder_still_consumes_a_label() {
        let root = tempfile::tempdir().unwrap();
        person_dir(root.path(), "alice").unwrap();
        let dir = person_dir(root.path(), "bob").unwrap();
        write_image(&dir, "1_0.jpg", 70.0);

        let set = load_training_set(root.path()).unwrap();
        assert_eq!(set.label_map.id_of("bob"), Some(1));
        assert_eq!(set.labels.to_vec(), vec![1]);
    }
}
