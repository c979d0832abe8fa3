pub mod grayscale;
pub mod grayscale_converter;
