use thiserror::Error;

pub const DEFAULT_SCALE_FACTOR: f64 = 1.3;
pub const DEFAULT_MIN_NEIGHBORS: i32 = 3;
pub const DEFAULT_MIN_SIZE: (i32, i32) = (30, 30);
/// Eyes are searched inside a half-face crop, so they need a smaller floor.
pub const DEFAULT_EYE_MIN_SIZE: (i32, i32) = (10, 10);

#[derive(Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("scale factor must be greater than 1.0, got {0}")]
    ScaleFactor(f64),
    #[error("min neighbors must be non-negative, got {0}")]
    MinNeighbors(i32),
    #[error("min size must be at least 1x1, got {0}x{1}")]
    MinSize(i32, i32),
}

/// Multi-scale detection tuning passed to the cascade on every call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    /// Downscale ratio between successive pyramid levels.
    pub scale_factor: f64,
    /// Overlapping raw hits required to confirm a candidate.
    pub min_neighbors: i32,
    /// Smallest accepted (width, height) in pixels.
    pub min_size: (i32, i32),
}

impl DetectionParams {
    pub fn new(scale_factor: f64, min_neighbors: i32, min_size: (i32, i32)) -> Self {
        Self {
            scale_factor,
            min_neighbors,
            min_size,
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.scale_factor.is_nan() || self.scale_factor <= 1.0 {
            return Err(ParamsError::ScaleFactor(self.scale_factor));
        }
        if self.min_neighbors < 0 {
            return Err(ParamsError::MinNeighbors(self.min_neighbors));
        }
        let (w, h) = self.min_size;
        if w < 1 || h < 1 {
            return Err(ParamsError::MinSize(w, h));
        }
        Ok(())
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_FACTOR, DEFAULT_MIN_NEIGHBORS, DEFAULT_MIN_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let params = DetectionParams::default();
        assert_relative_eq!(params.scale_factor, 1.3);
        assert_eq!(params.min_neighbors, 3);
        assert_eq!(params.min_size, (30, 30));
        assert!(params.validate().is_ok());
    }

    #[rstest]
    #[case::scale_one(DetectionParams::new(1.0, 3, (30, 30)), ParamsError::ScaleFactor(1.0))]
    #[case::scale_below_one(DetectionParams::new(0.5, 3, (30, 30)), ParamsError::ScaleFactor(0.5))]
    #[case::negative_neighbors(DetectionParams::new(1.1, -1, (30, 30)), ParamsError::MinNeighbors(-1))]
    #[case::zero_width(DetectionParams::new(1.1, 3, (0, 30)), ParamsError::MinSize(0, 30))]
    #[case::negative_height(DetectionParams::new(1.1, 3, (30, -2)), ParamsError::MinSize(30, -2))]
    fn test_invalid(#[case] params: DetectionParams, #[case] expected: ParamsError) {
        assert_eq!(params.validate().unwrap_err(), expected);
    }

    #[test]
    fn test_nan_scale_rejected() {
        let params = DetectionParams::new(f64::NAN, 3, (30, 30));
        assert!(matches!(params.validate(), Err(ParamsError::ScaleFactor(_))));
    }

    #[test]
    fn test_zero_neighbors_allowed() {
        assert!(DetectionParams::new(1.05, 0, (1, 1)).validate().is_ok());
    }
}
