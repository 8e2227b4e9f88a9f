//! Label-aligned series arithmetic
//!
//! Binary operations between [`LabeledSeries`] align both operands on the
//! sorted union of their labels; a label present on only one side yields
//! [`NA`]. Operations a dtype pair does not support fail with
//! [`Error::Type`] before any value is computed.

// Core module with fundamental data structures and traits
pub mod core;

pub mod compute;
pub mod config;
pub mod dataframe;
pub mod index;
pub mod io;
pub mod na;
pub mod parallel;
pub mod series;

// Re-export core types
pub use core::error::{Error, Result};
pub use core::scalar::{DType, Scalar};

pub use compute::{great_circle, great_circle_series, great_circle_vec, EARTH_RADIUS_KM};
pub use config::{ComputeConfig, CsvConfig, LoggingConfig, TidyConfig};
pub use dataframe::SeriesFrame;
pub use index::{Index, JoinHow, Label};
pub use io::{read_csv, read_csv_from_reader, write_csv, write_csv_to_writer, CsvOptions};
pub use na::NA;
pub use parallel::ParallelUtils;
pub use series::{align, binary_op, binary_op_fill, rebase, BinaryOp, FillMethod, LabeledSeries, Rolling};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
