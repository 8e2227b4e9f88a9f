// Core value types shared by every tidyseries module
pub mod error;
pub mod scalar;

// Re-exports for convenience
pub use error::{Error, Result};
pub use scalar::{DType, Scalar};
