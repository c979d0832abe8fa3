use std::path::Path;

use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{VideoCapture, CAP_ANY};

use crate::shared::frame::Frame;
use crate::shared::mat_conversion::mat_to_frame;
use crate::video::domain::frame_source::{FrameSource, SourceOpener};

/// Reads frames through OpenCV's videoio (files and camera devices alike).
///
/// Frames arrive as BGR bytes; the capture handle is released on
/// [`FrameSource::release`] or when dropped.
pub struct OpenCvCapture {
    capture: VideoCapture,
    buffer: Mat,
    frame_index: usize,
    released: bool,
}

// Safety: OpenCvCapture is only used from a single thread at a time.
// The native capture handle is not shared across threads.
unsafe impl Send for OpenCvCapture {}

impl OpenCvCapture {
    fn from_capture(capture: VideoCapture) -> Self {
        Self {
            capture,
            buffer: Mat::default(),
            frame_index: 0,
            released: false,
        }
    }
}

impl FrameSource for OpenCvCapture {
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        if self.released {
            return Err("OpenCvCapture: read after release".into());
        }
        if !self.capture.read(&mut self.buffer)? || self.buffer.empty() {
            return Ok(None);
        }
        let frame = mat_to_frame(&self.buffer, self.frame_index)?;
        self.frame_index += 1;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release capture: {e}");
        }
    }
}

impl Drop for OpenCvCapture {
    fn drop(&mut self) {
        self.release();
    }
}

/// Opens [`OpenCvCapture`] sessions with the backend chosen by OpenCV.
#[derive(Default)]
pub struct OpenCvSourceOpener;

impl OpenCvSourceOpener {
    pub fn new() -> Self {
        Self
    }
}

impl SourceOpener for OpenCvSourceOpener {
    fn open_file(&mut self, path: &Path) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
        let name = path
            .to_str()
            .ok_or_else(|| format!("path is not valid UTF-8: {}", path.display()))?;
        let capture = VideoCapture::from_file(name, CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(format!("could not open video file {}", path.display()).into());
        }
        log::debug!("Opened video file {}", path.display());
        Ok(Box::new(OpenCvCapture::from_capture(capture)))
    }

    fn open_camera(
        &mut self,
        index: i32,
    ) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
        let capture = VideoCapture::new(index, CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(format!("could not open camera {index}").into());
        }
        log::debug!("Opened camera {index}");
        Ok(Box::new(OpenCvCapture::from_capture(capture)))
    }
}
