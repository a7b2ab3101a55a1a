//! `facekit recognize` — live recognition with the trained model.

use crate::config::Config;
use anyhow::Result;
use facekit_core::recognizer::display_percent;
use facekit_core::{
    cascade, sample, DetectionParams, Detector, HaarDetector, LabelMap, LbphRecognizer, Recognizer,
};
use facekit_hw::{display, Camera, Display};
use opencv::core::Mat;
use opencv::imgproc;

pub fn run(config: &Config, params: DetectionParams) -> Result<()> {
    if let Err(err) = cascade::ensure_cascade(&config.cascade_path, &config.cascade_url) {
        tracing::warn!(%err, "cascade download failed; detection cannot start without the file");
    }

    // Both artifacts must exist before any hardware is touched.
    let labels = LabelMap::load(&config.labels_path)?;
    let recognizer = LbphRecognizer::open(&config.model_path)?;
    let mut detector = HaarDetector::load(&config.cascade_path, params)?;
    let mut camera = Camera::open(config.camera_index)?;
    let window = Display::open("Face Recognition")?;

    println!("Press 'q' to quit.");

    loop {
        let Some(frame) = camera.read_frame()? else {
            tracing::warn!("failed to grab frame, stopping recognition");
            break;
        };

        let mut gray = Mat::default();
        imgproc::cvt_color_def(&frame, &mut gray, imgproc::COLOR_BGR2GRAY)?;
        let faces = detector.detect(&gray)?;

        let mut canvas = frame;
        for &face in &faces {
            let probe = sample::normalize_crop(&gray, face)?;
            let prediction = recognizer.predict(&probe)?;
            let percent = display_percent(prediction.confidence);

            let (caption, color) = match labels.name_of(prediction.label) {
                Some(name) => (format!("{name} {percent}%"), display::green()),
                None => (format!("Unknown {percent}%"), display::red()),
            };
            tracing::debug!(
                label = prediction.label,
                confidence = prediction.confidence,
                caption,
                "classified face"
            );

            display::draw_box(&mut canvas, face, color)?;
            display::draw_caption(&mut canvas, &caption, face, color)?;
        }

        window.show(&canvas)?;
        if window.poll_key()? == Some('q') {
            break;
        }
    }

    camera.release()?;
    Ok(())
}
