//! Module providing parallel processing functionality

use rayon::prelude::*;

use crate::config::ComputeConfig;
use crate::core::error::Result;
use crate::core::scalar::{DType, Scalar};
use crate::index::Label;
use crate::na::NA;
use crate::series::LabeledSeries;

/// Parallel processing extension: series element mapping
impl<L> LabeledSeries<L>
where
    L: Label,
{
    /// Apply a function to every numeric value in parallel (ignoring NA)
    ///
    /// Produces the same series as [`LabeledSeries::map_f64`].
    pub fn par_map_f64<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(f64) -> f64 + Send + Sync,
    {
        self.require_numeric("par_map_f64")?;
        let values: Vec<NA<Scalar>> = self
            .values()
            .par_iter()
            .map(|v| match v.value().and_then(|s| s.as_f64()) {
                Some(x) => NA::Value(Scalar::Float(f(x))),
                None => NA::NA,
            })
            .collect();

        Ok(LabeledSeries::from_parts(
            self.index().clone(),
            values,
            DType::Float64,
            self.name().cloned(),
        ))
    }
}

/// Parallel processing utilities
pub struct ParallelUtils;

impl ParallelUtils {
    /// Whether an input of `len` elements should be processed in parallel
    pub fn should_parallelize(config: &ComputeConfig, len: usize) -> bool {
        config.parallel_enabled && len >= config.parallel_threshold
    }

    /// Map `0..len` through `f`, in parallel when the configuration allows it
    pub fn map_indexed<F, R>(config: &ComputeConfig, len: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Send + Sync,
        R: Send,
    {
        if Self::should_parallelize(config, len) {
            log::debug!("mapping {} elements in parallel", len);
            (0..len).into_par_iter().map(f).collect()
        } else {
            (0..len).map(f).collect()
        }
    }
}
