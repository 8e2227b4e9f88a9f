//! Positional window operations for series
//!
//! Shifts, differences, percentage changes and rolling aggregations. These
//! work on positions in index order, so sort the series first when the
//! labels are not already ascending.

use crate::core::error::{Error, Result};
use crate::core::scalar::{DType, Scalar};
use crate::index::Label;
use crate::na::NA;
use crate::series::{BinaryOp, LabeledSeries};

impl<L> LabeledSeries<L>
where
    L: Label,
{
    /// Move values `periods` positions down (negative moves up)
    ///
    /// Labels stay in place; vacated positions become `NA`.
    pub fn shift(&self, periods: i64) -> Self {
        let len = self.len() as i64;
        let values = (0..len)
            .map(|i| {
                match i.checked_sub(periods) {
                    Some(src) if (0..len).contains(&src) => self.values()[src as usize],
                    _ => NA::NA,
                }
            })
            .collect();
        LabeledSeries::from_parts(
            self.index().clone(),
            values,
            self.dtype(),
            self.name().cloned(),
        )
    }

    /// Difference with the value `periods` positions earlier
    ///
    /// Dates difference into durations.
    pub fn diff(&self, periods: i64) -> Result<Self> {
        let dtype = BinaryOp::Sub.result_dtype(self.dtype(), self.dtype())?;
        let shifted = self.shift(periods);
        let values = self
            .values()
            .iter()
            .zip(shifted.values().iter())
            .map(|(a, b)| a.zip_with(b, |a, b| BinaryOp::Sub.apply(a, b)))
            .collect();
        Ok(LabeledSeries::from_parts(
            self.index().clone(),
            values,
            dtype,
            self.name().cloned(),
        ))
    }

    /// Fractional change from the value `periods` positions earlier
    pub fn pct_change(&self, periods: i64) -> Result<Self> {
        self.require_numeric("pct_change")?;
        let shifted = self.shift(periods);
        let values = self
            .values()
            .iter()
            .zip(shifted.values().iter())
            .map(|(a, b)| {
                a.zip_with(b, |a, b| match (a.as_f64(), b.as_f64()) {
                    (Some(a), Some(b)) => NA::Value(Scalar::Float(a / b - 1.0)),
                    _ => NA::NA,
                })
            })
            .collect();
        Ok(LabeledSeries::from_parts(
            self.index().clone(),
            values,
            DType::Float64,
            self.name().cloned(),
        ))
    }

    /// Start a rolling window of `window` positions
    pub fn rolling(&self, window: usize) -> Result<Rolling<'_, L>> {
        Rolling::new(self, window)
    }
}

/// Rolling window configuration and operations
#[derive(Debug, Clone)]
pub struct Rolling<'a, L>
where
    L: Label,
{
    series: &'a LabeledSeries<L>,
    window_size: usize,
    min_periods: Option<usize>,
}

impl<'a, L> Rolling<'a, L>
where
    L: Label,
{
    /// Create a new rolling window
    pub fn new(series: &'a LabeledSeries<L>, window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::InvalidValue(
                "Window size must be greater than 0".to_string(),
            ));
        }
        series.require_numeric("rolling")?;

        Ok(Self {
            series,
            window_size,
            min_periods: None,
        })
    }

    /// Set minimum number of observations required to have a value
    pub fn min_periods(mut self, min_periods: usize) -> Self {
        self.min_periods = Some(min_periods);
        self
    }

    fn effective_min_periods(&self) -> usize {
        self.min_periods.unwrap_or(self.window_size).max(1)
    }

    pub fn mean(&self) -> Result<LabeledSeries<L>> {
        self.aggregate(|w| w.iter().sum::<f64>() / w.len() as f64)
    }

    pub fn sum(&self) -> Result<LabeledSeries<L>> {
        self.aggregate(|w| w.iter().sum())
    }

    pub fn min(&self) -> Result<LabeledSeries<L>> {
        self.aggregate(|w| w.iter().copied().fold(f64::INFINITY, f64::min))
    }

    pub fn max(&self) -> Result<LabeledSeries<L>> {
        self.aggregate(|w| w.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Apply `func` to the present values of every full-enough window
    pub fn aggregate<F>(&self, func: F) -> Result<LabeledSeries<L>>
    where
        F: Fn(&[f64]) -> f64,
    {
        let values = self.series.to_f64_vec()?;
        let min_periods = self.effective_min_periods();

        let result = (0..values.len())
            .map(|end| {
                let start = (end + 1).saturating_sub(self.window_size);
                let window: Vec<f64> = values[start..=end]
                    .iter()
                    .filter_map(|v| v.value().copied())
                    .collect();
                if window.len() >= min_periods {
                    NA::Value(Scalar::Float(func(&window)))
                } else {
                    NA::NA
                }
            })
            .collect();

        Ok(LabeledSeries::from_parts(
            self.series.index().clone(),
            result,
            DType::Float64,
            self.series.name().cloned(),
        ))
    }
}
