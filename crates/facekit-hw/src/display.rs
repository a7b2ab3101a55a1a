//! Display window, keyboard polling, and frame overlays via OpenCV
//! `highgui` / `imgproc`.

use opencv::core::{Mat, Point, Rect, Scalar};
use opencv::{highgui, imgproc};
use thiserror::Error;

/// Keyboard poll wait per loop iteration, in milliseconds.
pub const KEY_POLL_MS: i32 = 1;

/// Box color for enrollment boxes and recognized faces.
pub fn green() -> Scalar {
    Scalar::new(0.0, 255.0, 0.0, 0.0)
}

/// Box color for unrecognized faces.
pub fn red() -> Scalar {
    Scalar::new(0.0, 0.0, 255.0, 0.0)
}

/// HUD text color.
pub fn white() -> Scalar {
    Scalar::new(255.0, 255.0, 255.0, 0.0)
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("opencv: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// One named HighGUI window. Destroyed on drop.
pub struct Display {
    name: String,
}

impl Display {
    pub fn open(name: &str) -> Result<Self, DisplayError> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn show(&self, frame: &Mat) -> Result<(), DisplayError> {
        highgui::imshow(&self.name, frame)?;
        Ok(())
    }

    /// Pump the GUI event loop and return the key pressed during the wait,
    /// if any.
    pub fn poll_key(&self) -> Result<Option<char>, DisplayError> {
        Ok(key_to_char(highgui::wait_key(KEY_POLL_MS)?))
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.name);
    }
}

/// Map a `wait_key` return code to a character. Negative codes mean no key
/// was pressed; only the low byte carries the key.
pub fn key_to_char(code: i32) -> Option<char> {
    if code < 0 {
        return None;
    }
    char::from_u32((code & 0xFF) as u32)
}

/// Draw a face bounding box.
pub fn draw_box(frame: &mut Mat, region: Rect, color: Scalar) -> Result<(), DisplayError> {
    imgproc::rectangle(frame, region, color, 2, imgproc::LINE_8, 0)?;
    Ok(())
}

/// Draw a caption just above a face box.
pub fn draw_caption(
    frame: &mut Mat,
    text: &str,
    region: Rect,
    color: Scalar,
) -> Result<(), DisplayError> {
    imgproc::put_text(
        frame,
        text,
        Point::new(region.x, region.y - 10),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.8,
        color,
        2,
        imgproc::LINE_8,
        false,
    )?;
    Ok(())
}

/// Draw the status line in the top-left corner.
pub fn draw_hud(frame: &mut Mat, text: &str) -> Result<(), DisplayError> {
    imgproc::put_text(
        frame,
        text,
        Point::new(10, 30),
        imgproc::FONT_HERSHEY_SIMPLEX,
        1.0,
        white(),
        2,
        imgproc::LINE_8,
        false,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_char() {
        assert_eq!(key_to_char(-1), None);
        assert_eq!(key_to_char('q' as i32), Some('q'));
        assert_eq!(key_to_char('c' as i32), Some('c'));
        // Some backends set high bits; only the low byte is the key.
        assert_eq!(key_to_char(0x0010_0071), Some('q'));
    }

    #[test]
    fn test_overlays_draw_onto_bgr_frame() {
        use opencv::core::{Scalar, CV_8UC3};
        use opencv::prelude::*;

        let mut frame =
            Mat::new_rows_cols_with_default(240, 320, CV_8UC3, Scalar::all(0.0)).unwrap();
        let region = Rect::new(40, 40, 100, 100);
        draw_box(&mut frame, region, green()).unwrap();
        draw_caption(&mut frame, "alice 97%", region, green()).unwrap();
        draw_hud(&mut frame, "Samples: 3").unwrap();

        // The box edge must have been painted green.
        let px = frame.at_2d::<opencv::core::Vec3b>(40, 90).unwrap();
        assert_eq!(px[1], 255);
    }
}
