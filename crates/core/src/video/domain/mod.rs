pub mod capture_selector;
pub mod frame_source;
