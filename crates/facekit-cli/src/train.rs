//! `facekit train` — retrain the LBPH model from the complete dataset.

use crate::config::Config;
use anyhow::Result;
use facekit_core::{dataset, LbphParams, LbphRecognizer, Recognizer};

pub fn run(config: &Config, params: LbphParams) -> Result<()> {
    println!("Loading dataset from {}...", config.dataset_root.display());
    let set = dataset::load_training_set(&config.dataset_root)?;
    println!(
        "Loaded {} images across {} classes: {:?}",
        set.len(),
        set.label_map.len(),
        set.label_map.iter().map(|(_, name)| name).collect::<Vec<_>>()
    );

    let mut recognizer = LbphRecognizer::with_params(params)?;
    println!("Training model (LBPH)...");
    recognizer.train(&set.images, &set.labels)?;

    recognizer.save(&config.model_path)?;
    println!("Saved model to {}", config.model_path.display());

    set.label_map.save(&config.labels_path)?;
    println!("Saved labels to {}", config.labels_path.display());

    Ok(())
}
