pub mod live_detection_use_case;
pub mod loop_controller;
pub mod pipeline_logger;
