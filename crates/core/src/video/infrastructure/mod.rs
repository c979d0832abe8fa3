pub mod opencv_capture;
