use crate::detection::domain::region_detector::RegionDetector;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Second detection stage: searches for eyes in the top half of each face.
///
/// The inner detector sees only the cropped face band; its hits are
/// translated back into full-frame coordinates.
pub struct EyeLocator {
    detector: Box<dyn RegionDetector>,
}

impl EyeLocator {
    pub fn new(detector: Box<dyn RegionDetector>) -> Self {
        Self { detector }
    }

    pub fn locate(
        &mut self,
        gray: &Frame,
        faces: &[Region],
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let mut eyes = Vec::new();
        for face in faces {
            let band = face.upper_half();
            let Some(visible) = band.clamp_to(gray.width() as i32, gray.height() as i32) else {
                continue;
            };
            let Some(crop) = gray.crop(&visible) else {
                continue;
            };
            let hits = self.detector.detect(&crop)?;
            eyes.extend(hits.into_iter().map(|eye| eye.translate(visible.x, visible.y)));
        }
        Ok(eyes)
    }
}
