//! `facekit enroll` — capture labeled face samples from the camera.

use crate::config::Config;
use anyhow::{bail, Context, Result};
use facekit_core::{cascade, dataset, sample, DetectionParams, Detector, HaarDetector};
use facekit_hw::{display, Camera, Display};
use opencv::core::Mat;
use opencv::imgproc;
use std::io::Write;

pub fn run(config: &Config, name: Option<String>, params: DetectionParams) -> Result<()> {
    if let Err(err) = cascade::ensure_cascade(&config.cascade_path, &config.cascade_url) {
        tracing::warn!(%err, "cascade download failed; detection cannot start without the file");
    }

    let name = match name {
        Some(name) => name.trim().to_string(),
        None => prompt_name()?,
    };
    if name.is_empty() {
        bail!("person name cannot be empty");
    }

    let person_dir = dataset::person_dir(&config.dataset_root, &name)?;
    let mut detector = HaarDetector::load(&config.cascade_path, params)?;
    let mut camera = Camera::open(config.camera_index)?;
    let window = Display::open("Capture Faces")?;

    println!("Press 'c' to capture, 'q' to quit. Aim for 20-50 samples with varied angles and lighting.");
    let mut count = 0usize;

    loop {
        let Some(frame) = camera.read_frame()? else {
            tracing::warn!("failed to grab frame, stopping capture");
            break;
        };

        let mut gray = Mat::default();
        imgproc::cvt_color_def(&frame, &mut gray, imgproc::COLOR_BGR2GRAY)?;
        let faces = detector.detect(&gray)?;

        let mut canvas = frame;
        for &face in &faces {
            display::draw_box(&mut canvas, face, display::green())?;
        }
        display::draw_hud(&mut canvas, &format!("Samples: {count}"))?;
        window.show(&canvas)?;

        match window.poll_key()? {
            Some('q') => break,
            Some('c') => {
                if faces.is_empty() {
                    println!("No face detected. Try again.");
                    continue;
                }
                for (index, &face) in faces.iter().enumerate() {
                    let crop = sample::normalize_crop(&gray, face)?;
                    let path = dataset::save_sample(&person_dir, index, &crop)?;
                    count += 1;
                    println!("Saved {}", path.display());
                }
            }
            _ => {}
        }
    }

    camera.release()?;
    Ok(())
}

fn prompt_name() -> Result<String> {
    print!("Enter person name (folder-safe, e.g. 'ada_lovelace'): ");
    std::io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("reading person name")?;
    Ok(line.trim().to_string())
}
