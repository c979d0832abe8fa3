pub mod cascade_detector;
