use std::path::Path;

use thiserror::Error;

use crate::video::domain::frame_source::{CaptureOrigin, FrameSource, SourceOpener};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptureError {
    #[error("No video file specified or camera connected.")]
    NoSource,
}

pub struct OpenedCapture {
    pub origin: CaptureOrigin,
    pub source: Box<dyn FrameSource>,
}

/// Opens the video file when one is given and openable, otherwise the camera.
pub fn open_capture(
    opener: &mut dyn SourceOpener,
    video_file: Option<&Path>,
    camera: i32,
) -> Result<OpenedCapture, CaptureError> {
    if let Some(path) = video_file.filter(|p| !p.as_os_str().is_empty()) {
        match opener.open_file(path) {
            Ok(source) => {
                return Ok(OpenedCapture {
                    origin: CaptureOrigin::File(path.to_path_buf()),
                    source,
                })
            }
            Err(e) => log::warn!("Could not open {}: {e}; trying camera {camera}", path.display()),
        }
    }

    match opener.open_camera(camera) {
        Ok(source) => Ok(OpenedCapture {
            origin: CaptureOrigin::Camera(camera),
            source,
        }),
        Err(e) => {
            log::warn!("Could not open camera {camera}: {e}");
            Err(CaptureError::NoSource)
        }
    }
}
