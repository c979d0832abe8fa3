use opencv::core::{Point, Scalar};
use opencv::imgproc::{self, LINE_8};

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::shared::constants::{FACE_COLOR, OUTLINE_THICKNESS};
use crate::shared::frame::Frame;
use crate::shared::mat_conversion::{frame_to_mat, mat_to_frame};
use crate::shared::region::Region;

/// Outlines each region with `imgproc::rectangle_points`.
///
/// The corners are `(x, y)` and `(x + w, y + h)`, and the stroke is centred
/// on those edges. OpenCV clips whatever falls outside the frame.
pub struct RectangleAnnotator {
    color: [u8; 3],
    thickness: i32,
}

impl RectangleAnnotator {
    /// `color` is in the frame's BGR byte order; grayscale frames use its
    /// first component.
    pub fn new(color: [u8; 3], thickness: i32) -> Self {
        Self {
            color,
            thickness: thickness.max(1),
        }
    }

    fn scalar(&self) -> Scalar {
        let [b, g, r] = self.color;
        Scalar::new(b as f64, g as f64, r as f64, 0.0)
    }
}

impl Default for RectangleAnnotator {
    fn default() -> Self {
        Self::new(FACE_COLOR, OUTLINE_THICKNESS)
    }
}

impl FrameAnnotator for RectangleAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        regions: &[Region],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let regions: Vec<_> = regions.iter().filter(|r| !r.is_empty()).collect();
        if regions.is_empty() || frame.is_empty() {
            return Ok(());
        }

        let mut mat = frame_to_mat(frame)?;
        for r in regions {
            imgproc::rectangle_points(
                &mut mat,
                Point::new(r.x, r.y),
                Point::new(r.right(), r.bottom()),
                self.scalar(),
                self.thickness,
                LINE_8,
                0,
            )?;
        }
        *frame = mat_to_frame(&mat, frame.index())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BLUE: [u8; 3] = [255, 0, 0];
    const BG: [u8; 3] = [10, 10, 10];

    fn make_frame(width: u32, height: u32, value: u8) -> Frame {
        Frame::new(vec![value; (width * height * 3) as usize], width, height, 3, 0)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let arr = frame.as_ndarray();
        [arr[[y, x, 0]], arr[[y, x, 1]], arr[[y, x, 2]]]
    }

    #[test]
    fn test_default_is_blue_two_pixels() {
        let annotator = RectangleAnnotator::default();
        assert_eq!(annotator.color, [255, 0, 0]);
        assert_eq!(annotator.thickness, 2);
    }

    #[test]
    fn test_edges_run_through_both_corner_points() {
        let mut frame = make_frame(50, 50, 10);
        RectangleAnnotator::new(BLUE, 2)
            .annotate(&mut frame, &[Region::new(10, 10, 20, 20)])
            .unwrap();

        // Left edge at x, right edge at x + w, top at y, bottom at y + h.
        assert_eq!(pixel(&frame, 10, 20), BLUE);
        assert_eq!(pixel(&frame, 30, 20), BLUE);
        assert_eq!(pixel(&frame, 20, 10), BLUE);
        assert_eq!(pixel(&frame, 20, 30), BLUE);
        assert_eq!(pixel(&frame, 30, 30), BLUE);
        // Interior and far outside stay untouched.
        assert_eq!(pixel(&frame, 20, 20), BG);
        assert_eq!(pixel(&frame, 14, 20), BG);
        assert_eq!(pixel(&frame, 26, 20), BG);
        assert_eq!(pixel(&frame, 5, 20), BG);
        assert_eq!(pixel(&frame, 35, 20), BG);
    }

    #[test]
    fn test_stroke_is_wider_than_one_pixel() {
        let mut frame = make_frame(50, 50, 10);
        RectangleAnnotator::new(BLUE, 2)
            .annotate(&mut frame, &[Region::new(10, 10, 20, 20)])
            .unwrap();
        let painted = (8..=12).filter(|&x| pixel(&frame, x, 20) == BLUE).count();
        assert!(painted >= 2, "left edge painted {painted} columns");
    }

    #[rstest]
    #[case::left_edge(Region::new(-10, 5, 30, 20))]
    #[case::bottom_right(Region::new(30, 20, 40, 40))]
    #[case::fully_outside(Region::new(100, 100, 10, 10))]
    #[case::covers_frame(Region::new(-5, -5, 60, 40))]
    #[case::zero_size(Region::new(5, 5, 0, 0))]
    fn test_dimensions_preserved(#[case] region: Region) {
        let mut frame = make_frame(40, 30, 10);
        RectangleAnnotator::default()
            .annotate(&mut frame, &[region])
            .unwrap();
        assert_eq!((frame.width(), frame.height(), frame.channels()), (40, 30, 3));
        assert_eq!(frame.data().len(), 40 * 30 * 3);
    }

    #[test]
    fn test_zero_size_region_is_skipped() {
        let mut frame = make_frame(20, 20, 10);
        RectangleAnnotator::default()
            .annotate(&mut frame, &[Region::new(5, 5, 0, 0)])
            .unwrap();
        assert!(frame.data().iter().all(|&v| v == 10));
    }

    #[test]
    fn test_grayscale_frame_uses_first_component() {
        let mut frame = Frame::new(vec![0; 400], 20, 20, 1, 3);
        RectangleAnnotator::new([200, 0, 0], 1)
            .annotate(&mut frame, &[Region::new(2, 2, 10, 10)])
            .unwrap();
        assert_eq!(frame.channels(), 1);
        assert_eq!(frame.index(), 3);
        assert_eq!(frame.as_ndarray()[[2, 6, 0]], 200);
        assert_eq!(frame.as_ndarray()[[7, 7, 0]], 0);
    }

    #[test]
    fn test_no_regions_leaves_frame_unchanged() {
        let mut frame = make_frame(8, 8, 42);
        RectangleAnnotator::default().annotate(&mut frame, &[]).unwrap();
        assert!(frame.data().iter().all(|&v| v == 42));
    }
}
