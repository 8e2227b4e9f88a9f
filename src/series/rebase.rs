//! Rebasing an index series onto a base period

use std::ops::RangeInclusive;

use crate::core::error::{Error, Result};
use crate::core::scalar::{DType, Scalar};
use crate::index::Label;
use crate::na::NA;
use crate::series::LabeledSeries;

/// Value the base period averages to after rebasing
pub const REBASE_LEVEL: f64 = 100.0;

impl<L> LabeledSeries<L>
where
    L: Label,
{
    /// Mean of the present values whose label lies in `base`
    ///
    /// # Errors
    /// `Error::EmptySelection` when the range selects no present value.
    pub fn base_mean(&self, base: &RangeInclusive<L>) -> Result<f64> {
        self.require_numeric("rebase")?;

        let selected: Vec<f64> = self
            .index()
            .positions_in(base)
            .into_iter()
            .filter_map(|pos| self.values()[pos].value().and_then(|s| s.as_f64()))
            .collect();

        if selected.is_empty() {
            return Err(Error::EmptySelection(format!(
                "base period {} ..= {} selects no values",
                base.start(),
                base.end()
            )));
        }

        Ok(selected.iter().sum::<f64>() / selected.len() as f64)
    }

    /// Rescale so the mean over the base period equals 100
    ///
    /// Every value becomes `100 * value / base_mean`; missing values stay
    /// missing and the result is always `Float64`.
    ///
    /// # Errors
    /// `Error::EmptySelection` when the base period has no values,
    /// `Error::Type` for non-numeric series, `Error::InvalidValue` when the
    /// base mean is zero.
    pub fn rebase(&self, base: RangeInclusive<L>) -> Result<Self> {
        let mean = self.base_mean(&base)?;
        if mean == 0.0 || !mean.is_finite() {
            return Err(Error::InvalidValue(format!(
                "cannot rebase on a base period averaging {}",
                mean
            )));
        }
        log::debug!(
            "rebasing {} values on {} ..= {} (mean {})",
            self.len(),
            base.start(),
            base.end(),
            mean
        );

        let values = self
            .values()
            .iter()
            .map(|v| {
                v.and_then(|s| NA::from(s.as_f64().map(|x| Scalar::Float(REBASE_LEVEL * x / mean))))
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

/// Rebase `series` so the mean over `base` equals 100
pub fn rebase<L: Label>(series: &LabeledSeries<L>, base: RangeInclusive<L>) -> Result<LabeledSeries<L>> {
    series.rebase(base)
}
