use std::fmt;
use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;

/// A live sequence of frames from a camera or video file.
///
/// Implementations own an OS-level capture handle; `release` frees it and
/// is safe to call more than once.
pub trait FrameSource: Send {
    /// Reads the next frame. `Ok(None)` means no frame was delivered this
    /// time (end of file, dropped camera frame).
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    fn release(&mut self);
}

/// Opens capture sessions for files and camera devices.
pub trait SourceOpener {
    fn open_file(&mut self, path: &Path) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>>;

    fn open_camera(&mut self, index: i32)
        -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>>;
}

/// Where an opened capture reads from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureOrigin {
    File(PathBuf),
    Camera(i32),
}

impl fmt::Display for CaptureOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureOrigin::File(path) => write!(f, "video file {}", path.display()),
            CaptureOrigin::Camera(index) => write!(f, "camera {index}"),
        }
    }
}
