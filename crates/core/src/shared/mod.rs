pub mod constants;
pub mod frame;
#[cfg(feature = "opencv")]
pub mod mat_conversion;
pub mod model_resolver;
pub mod region;
