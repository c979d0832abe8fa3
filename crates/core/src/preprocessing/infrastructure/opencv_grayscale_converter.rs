use opencv::core::Mat;
use opencv::imgproc::{self, COLOR_BGR2GRAY};

use crate::preprocessing::domain::grayscale::PreprocessError;
use crate::preprocessing::domain::grayscale_converter::GrayscaleConverter;
use crate::shared::frame::Frame;
use crate::shared::mat_conversion::{frame_to_mat, mat_to_frame};

/// Converts BGR frames with `imgproc::cvt_color`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenCvGrayscaleConverter;

impl GrayscaleConverter for OpenCvGrayscaleConverter {
    fn convert(&self, frame: &Frame) -> Result<Frame, PreprocessError> {
        if frame.is_empty() {
            return Err(PreprocessError::EmptyFrame(frame.index()));
        }
        match frame.channels() {
            1 => Ok(frame.clone()),
            3 => {
                let src = frame_to_mat(frame).map_err(conversion)?;
                let mut gray = Mat::default();
                imgproc::cvt_color_def(&src, &mut gray, COLOR_BGR2GRAY).map_err(conversion)?;
                mat_to_frame(&gray, frame.index()).map_err(conversion)
            }
            n => Err(PreprocessError::UnsupportedChannels(n)),
        }
    }
}

fn conversion(e: impl std::fmt::Display) -> PreprocessError {
    PreprocessError::Conversion(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::domain::grayscale::to_grayscale;
    use rstest::rstest;

    fn bgr_frame(width: u32, height: u32, bgr: [u8; 3]) -> Frame {
        let data = bgr
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Frame::new(data, width, height, 3, 8)
    }

    #[rstest]
    #[case::black([0, 0, 0], 0)]
    #[case::white([255, 255, 255], 255)]
    #[case::pure_blue([255, 0, 0], 29)]
    #[case::pure_green([0, 255, 0], 150)]
    #[case::pure_red([0, 0, 255], 76)]
    fn test_luma_values(#[case] bgr: [u8; 3], #[case] expected: u8) {
        let gray = OpenCvGrayscaleConverter
            .convert(&bgr_frame(3, 2, bgr))
            .unwrap();
        assert_eq!((gray.width(), gray.height(), gray.channels()), (3, 2, 1));
        assert_eq!(gray.index(), 8);
        assert!(gray.data().iter().all(|&v| v == expected));
    }

    #[test]
    fn test_agrees_with_cpu_conversion() {
        let data: Vec<u8> = (0..16 * 9 * 3).map(|i| (i * 37 % 256) as u8).collect();
        let frame = Frame::new(data, 16, 9, 3, 0);
        let opencv = OpenCvGrayscaleConverter.convert(&frame).unwrap();
        let cpu = to_grayscale(&frame).unwrap();
        for (a, b) in opencv.data().iter().zip(cpu.data()) {
            assert!(a.abs_diff(*b) <= 1, "{a} vs {b}");
        }
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        assert_eq!(
            OpenCvGrayscaleConverter.convert(&Frame::empty(4)).unwrap_err(),
            PreprocessError::EmptyFrame(4)
        );
    }

    #[test]
    fn test_gray_input_is_copied() {
        let frame = Frame::new(vec![1, 2, 3, 4], 2, 2, 1, 0);
        let gray = OpenCvGrayscaleConverter.convert(&frame).unwrap();
        assert_eq!(gray.data(), frame.data());
    }
}
