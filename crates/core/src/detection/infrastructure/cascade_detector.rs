use std::path::{Path, PathBuf};

use opencv::core::{Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use thiserror::Error;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::region_detector::RegionDetector;
use crate::shared::frame::Frame;
use crate::shared::mat_conversion::frame_to_mat;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum CascadeLoadError {
    #[error("cascade path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
    #[error("failed to load cascade from {path}: {source}")]
    OpenCv {
        path: PathBuf,
        #[source]
        source: opencv::Error,
    },
    #[error("failed to load cascade from {0}: file is missing or not a cascade model")]
    Empty(PathBuf),
}

/// Multi-scale cascade classifier (Haar or LBP) backed by OpenCV's objdetect.
pub struct CascadeDetector {
    classifier: CascadeClassifier,
    params: DetectionParams,
}

// Safety: CascadeDetector is owned and driven by a single thread at a time;
// the classifier's native handle is never shared.
unsafe impl Send for CascadeDetector {}

impl CascadeDetector {
    pub fn load(path: &Path, params: DetectionParams) -> Result<Self, CascadeLoadError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| CascadeLoadError::InvalidPath(path.to_path_buf()))?;
        let opencv_err = |source| CascadeLoadError::OpenCv {
            path: path.to_path_buf(),
            source,
        };

        let classifier = CascadeClassifier::new(path_str).map_err(opencv_err)?;
        if classifier.empty().map_err(opencv_err)? {
            return Err(CascadeLoadError::Empty(path.to_path_buf()));
        }

        log::info!(
            "Loaded cascade {} (scale factor {}, min neighbors {}, min size {}x{})",
            path.display(),
            params.scale_factor,
            params.min_neighbors,
            params.min_size.0,
            params.min_size.1
        );
        Ok(Self { classifier, params })
    }
}

impl RegionDetector for CascadeDetector {
    fn detect(&mut self, gray: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let image = frame_to_mat(gray)?;
        let mut found: Vector<Rect> = Vector::new();
        let (min_w, min_h) = self.params.min_size;
        self.classifier.detect_multi_scale(
            &image,
            &mut found,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            Size::new(min_w, min_h),
            Size::new(0, 0),
        )?;
        Ok(found
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}
