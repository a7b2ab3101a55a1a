//! facekit-hw — Camera capture and display-window plumbing over OpenCV.
//!
//! Each tool owns one camera handle and one window for the lifetime of its
//! capture loop; both release on drop.

pub mod camera;
pub mod display;

pub use camera::{Camera, CameraError};
pub use display::{Display, DisplayError};
