//! Live face detection over a camera or video stream.
//!
//! Frames are captured, converted to grayscale, passed to a cascade
//! classifier, outlined and shown in a window until the user quits. The
//! domain layer (traits, frame and region types, the loop itself) builds
//! without OpenCV; the `opencv` feature adds the capture, color conversion,
//! classifier, drawing and window implementations.

pub mod annotation;
pub mod detection;
pub mod display;
pub mod pipeline;
pub mod preprocessing;
pub mod shared;
pub mod video;
