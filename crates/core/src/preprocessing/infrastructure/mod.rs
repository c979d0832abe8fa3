pub mod opencv_grayscale_converter;
