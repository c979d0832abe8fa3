use crate::preprocessing::domain::grayscale::{to_grayscale, PreprocessError};
use crate::shared::frame::Frame;

/// Domain interface for turning a captured frame into detector input.
///
/// Implementations return a 1-channel frame of the same size and index.
/// An empty frame is `PreprocessError::EmptyFrame`, which the loop treats
/// as a skipped iteration.
pub trait GrayscaleConverter: Send {
    fn convert(&self, frame: &Frame) -> Result<Frame, PreprocessError>;
}

/// Pure-Rust converter backed by [`to_grayscale`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuGrayscaleConverter;

impl GrayscaleConverter for CpuGrayscaleConverter {
    fn convert(&self, frame: &Frame) -> Result<Frame, PreprocessError> {
        to_grayscale(frame)
    }
}
