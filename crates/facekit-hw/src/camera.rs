//! Webcam capture via OpenCV `videoio`.

use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("could not open camera device {0}")]
    DeviceUnavailable(i32),
    #[error("opencv: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// Exclusive handle on one camera device for the lifetime of a capture loop.
pub struct Camera {
    inner: VideoCapture,
    index: i32,
}

impl Camera {
    /// Open a camera by device index (0 = system default).
    pub fn open(index: i32) -> Result<Self, CameraError> {
        let inner = VideoCapture::new(index, videoio::CAP_ANY)?;
        if !inner.is_opened()? {
            return Err(CameraError::DeviceUnavailable(index));
        }
        tracing::info!(index, "opened camera");
        Ok(Self { inner, index })
    }

    /// Read one frame. `None` means the device produced nothing — the signal
    /// for callers to shut their loop down gracefully.
    pub fn read_frame(&mut self) -> Result<Option<Mat>, CameraError> {
        let mut frame = Mat::default();
        if !self.inner.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }

    /// Release the device. Dropping the handle releases it too; the explicit
    /// call keeps the shutdown order visible in the capture loops.
    pub fn release(&mut self) -> Result<(), CameraError> {
        self.inner.release()?;
        tracing::info!(index = self.index, "released camera");
        Ok(())
    }
}
