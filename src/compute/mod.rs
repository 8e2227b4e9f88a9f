// Vectorised numeric kernels
pub mod distance;

// Re-exports
pub use distance::{great_circle, great_circle_series, great_circle_vec, EARTH_RADIUS_KM};
