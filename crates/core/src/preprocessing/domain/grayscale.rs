use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("frame {0} is empty")]
    EmptyFrame(usize),
    #[error("unsupported channel count {0} (expected 1 or 3)")]
    UnsupportedChannels(u8),
    #[error("color conversion failed: {0}")]
    Conversion(String),
}

// BT.601 luma weights in Q14 fixed point: 0.299, 0.587, 0.114.
const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Converts a BGR frame to single-channel luma of identical size.
///
/// Grayscale input is returned as a copy.
pub fn to_grayscale(frame: &Frame) -> Result<Frame, PreprocessError> {
    if frame.is_empty() {
        return Err(PreprocessError::EmptyFrame(frame.index()));
    }
    match frame.channels() {
        1 => Ok(frame.clone()),
        3 => {
            let luma = frame
                .data()
                .chunks_exact(3)
                .map(|px| luma(px[2], px[1], px[0]))
                .collect();
            Ok(Frame::new(
                luma,
                frame.width(),
                frame.height(),
                1,
                frame.index(),
            ))
        }
        n => Err(PreprocessError::UnsupportedChannels(n)),
    }
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32 + LUMA_ROUND;
    (y >> LUMA_SHIFT) as u8
}
