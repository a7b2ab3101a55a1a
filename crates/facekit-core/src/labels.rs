//! Label-id bookkeeping: a build-once bijection between dense integer ids
//! and person names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelsError {
    #[error("label file not found: {0} — run `facekit train` first")]
    NotFound(PathBuf),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("label file is not a valid id→name mapping: {0}")]
    Format(#[from] serde_json::Error),
}

/// Immutable id→name mapping, built in a single deterministic pass at
/// training time and never mutated afterwards.
///
/// Ids are dense integers starting at 0, assigned in sorted-name order, so
/// the same set of person folders always yields the same mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap {
    names: BTreeMap<i32, String>,
}

impl LabelMap {
    /// Build a mapping from person names. Names are sorted and deduplicated;
    /// ids are assigned in the resulting order.
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut sorted: Vec<String> = names.into_iter().collect();
        sorted.sort();
        sorted.dedup();
        let names = sorted
            .into_iter()
            .enumerate()
            .map(|(id, name)| (id as i32, name))
            .collect();
        Self { names }
    }

    /// Name for a label id, or `None` for ids outside the mapping.
    pub fn name_of(&self, id: i32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Id assigned to a person name, if any.
    pub fn id_of(&self, name: &str) -> Option<i32> {
        self.names
            .iter()
            .find_map(|(id, n)| (n == name).then_some(*id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Persist the mapping as JSON.
    pub fn save(&self, path: &Path) -> Result<(), LabelsError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a mapping previously written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self, LabelsError> {
        if !path.exists() {
            return Err(LabelsError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
