//! Face sample normalization: every crop that reaches the recognizer is a
//! 200×200 grayscale image, both at enrollment and at prediction time.

use opencv::core::{Mat, Rect, Size};
use opencv::imgproc;
use opencv::prelude::*;

/// Side length of a normalized face sample, in pixels.
pub const SAMPLE_SIZE: i32 = 200;

/// Crop a face region out of a grayscale frame and resize it to the
/// canonical sample size. The region is clamped to the frame bounds first.
pub fn normalize_crop(gray: &Mat, region: Rect) -> opencv::Result<Mat> {
    let x = region.x.max(0);
    let y = region.y.max(0);
    let width = (region.x + region.width).min(gray.cols()) - x;
    let height = (region.y + region.height).min(gray.rows()) - y;
    if width <= 0 || height <= 0 {
        return Err(opencv::Error::new(
            opencv::core::StsBadArg,
            "empty face region",
        ));
    }

    let roi = Mat::roi(gray, Rect::new(x, y, width, height))?.try_clone()?;
    let mut sample = Mat::default();
    imgproc::resize(
        &roi,
        &mut sample,
        Size::new(SAMPLE_SIZE, SAMPLE_SIZE),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;
    Ok(sample)
}

/// File name for a sample captured at `timestamp` as the `index`-th face in
/// its frame. The index keeps simultaneous faces from colliding within the
/// same second.
pub fn sample_file_name(timestamp: i64, index: usize) -> String {
    format!("{timestamp}_{index}.jpg")
}
