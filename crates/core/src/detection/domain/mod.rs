pub mod detection_params;
pub mod eye_locator;
pub mod region_detector;
