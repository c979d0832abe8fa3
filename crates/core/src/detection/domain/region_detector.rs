use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for an object detector run on grayscale frames.
///
/// Results carry no ordering guarantee. Implementations hold no state
/// between calls, but take `&mut self` because the underlying classifiers
/// reuse internal buffers.
pub trait RegionDetector: Send {
    fn detect(&mut self, gray: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
