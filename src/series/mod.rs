//! Series module - labelled one-dimensional data
//!
//! A [`LabeledSeries`] pairs an [`Index`] of unique labels with one value per
//! label. Values carry an explicit missing marker ([`NA`]) and share a single
//! [`DType`]. A series is never modified in place: every transform returns a
//! new series.

use std::ops::RangeInclusive;

use crate::core::error::{Error, Result};
use crate::core::scalar::{DType, Scalar};
use crate::index::{Index, Label};
use crate::na::NA;

pub mod ops;
pub mod rebase;
pub mod window;

pub use ops::{align, binary_op, binary_op_fill, BinaryOp, FillMethod};
pub use rebase::rebase;
pub use window::Rolling;

/// Labelled series with missing-value support
#[derive(Debug, Clone)]
pub struct LabeledSeries<L>
where
    L: Label,
{
    /// Labels, one per value
    index: Index<L>,
    /// Values (missing values are `NA::NA`)
    values: Vec<NA<Scalar>>,
    /// Element type shared by every value
    dtype: DType,
    /// Optional name for the series
    name: Option<String>,
}

impl<L> LabeledSeries<L>
where
    L: Label,
{
    /// Create a series from an index and matching values
    ///
    /// Values are checked against `dtype`; integers are widened when the
    /// dtype is `Float64`.
    ///
    /// # Errors
    /// `Error::LengthMismatch` when lengths differ, `Error::Type` when a value
    /// does not fit the dtype.
    pub fn new(index: Index<L>, values: Vec<NA<Scalar>>, dtype: DType) -> Result<Self> {
        if values.len() != index.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                actual: values.len(),
            });
        }

        let values = values
            .into_iter()
            .map(|v| match v {
                NA::Value(s) => dtype.coerce(s).map(NA::Value),
                NA::NA => Ok(NA::NA),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_parts(index, values, dtype, None))
    }

    /// Create a series from `(label, value)` pairs, inferring the dtype
    ///
    /// # Example
    /// ```
    /// use tidyseries::LabeledSeries;
    ///
    /// let s = LabeledSeries::from_pairs(vec![(2000, 10), (2001, 20)]).unwrap();
    /// assert_eq!(s.len(), 2);
    /// ```
    pub fn from_pairs<V>(pairs: Vec<(L, V)>) -> Result<Self>
    where
        V: Into<Scalar>,
    {
        let (labels, values): (Vec<L>, Vec<Option<V>>) =
            pairs.into_iter().map(|(l, v)| (l, Some(v))).unzip();
        Self::from_options(labels, values)
    }

    /// Create a series from labels and optional values (`None` is missing)
    ///
    /// The dtype is the common dtype of the present values; a series of only
    /// missing values is `Float64`.
    pub fn from_options<V>(labels: Vec<L>, values: Vec<Option<V>>) -> Result<Self>
    where
        V: Into<Scalar>,
    {
        let index = Index::new(labels)?;
        let values: Vec<NA<Scalar>> = values
            .into_iter()
            .map(|v| NA::from(v.map(Into::into)))
            .collect();
        let dtype = infer_dtype(&values)?;
        Self::new(index, values, dtype)
    }

    /// Create a `Float64` series from raw floats; NaN is read as missing
    pub fn from_f64(labels: Vec<L>, values: Vec<f64>) -> Result<Self> {
        let index = Index::new(labels)?;
        let values = values
            .into_iter()
            .map(|v| {
                if v.is_nan() {
                    NA::NA
                } else {
                    NA::Value(Scalar::Float(v))
                }
            })
            .collect();
        Self::new(index, values, DType::Float64)
    }

    /// Create an `Int64` series from raw integers
    pub fn from_i64(labels: Vec<L>, values: Vec<i64>) -> Result<Self> {
        let index = Index::new(labels)?;
        let values = values.into_iter().map(|v| NA::Value(Scalar::Int(v))).collect();
        Self::new(index, values, DType::Int64)
    }

    /// An empty series of the given dtype
    pub fn empty(dtype: DType) -> Self {
        Self::from_parts(Index::empty(), Vec::new(), dtype, None)
    }

    // Callers guarantee matching lengths and dtype-conforming values
    pub(crate) fn from_parts(
        index: Index<L>,
        values: Vec<NA<Scalar>>,
        dtype: DType,
        name: Option<String>,
    ) -> Self {
        debug_assert_eq!(index.len(), values.len());
        LabeledSeries {
            index,
            values,
            dtype,
            name,
        }
    }

    /// Set the name and return self (builder pattern)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Copy of the series under a different name
    pub fn rename(&self, name: Option<String>) -> Self {
        let mut renamed = self.clone();
        renamed.name = name;
        renamed
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index(&self) -> &Index<L> {
        &self.index
    }

    pub fn labels(&self) -> &[L] {
        self.index.values()
    }

    pub fn values(&self) -> &[NA<Scalar>] {
        &self.values
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Value stored under `label`, `None` when the label is absent
    pub fn get(&self, label: &L) -> Option<&NA<Scalar>> {
        self.index.get_loc(label).map(|pos| &self.values[pos])
    }

    /// Numeric value under `label`, `None` when absent, missing or not numeric
    pub fn get_f64(&self, label: &L) -> Option<f64> {
        self.get(label)
            .and_then(|v| v.value())
            .and_then(|s| s.as_f64())
    }

    /// Label and value at a position
    pub fn iloc(&self, pos: usize) -> Option<(&L, &NA<Scalar>)> {
        Some((self.index.get_value(pos)?, self.values.get(pos)?))
    }

    /// Iterate `(label, value)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&L, &NA<Scalar>)> + '_ {
        self.index.iter().zip(self.values.iter())
    }

    /// Values as floats, for numeric series only
    pub fn to_f64_vec(&self) -> Result<Vec<NA<f64>>> {
        self.require_numeric("to_f64_vec")?;
        Ok(self
            .values
            .iter()
            .map(|v| v.and_then(|s| NA::from(s.as_f64())))
            .collect())
    }

    /// Boolean mask of missing values
    pub fn is_na(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.is_na()).collect()
    }

    /// Get the count of NA values
    pub fn na_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_na()).count()
    }

    /// Get the count of non-NA values
    pub fn count(&self) -> usize {
        self.values.iter().filter(|v| v.is_value()).count()
    }

    pub fn has_na(&self) -> bool {
        self.values.iter().any(|v| v.is_na())
    }

    /// Return a series with NA values (and their labels) removed
    pub fn dropna(&self) -> Self {
        let positions: Vec<usize> = (0..self.len())
            .filter(|&i| self.values[i].is_value())
            .collect();
        self.take(&positions)
    }

    /// Fill NA values with `fill_value`
    ///
    /// Filling an integer series with a float widens it to `Float64`.
    pub fn fillna(&self, fill_value: impl Into<Scalar>) -> Result<Self> {
        let fill_value = fill_value.into();
        let dtype = self.dtype.common(fill_value.dtype()).ok_or_else(|| {
            Error::Type(format!(
                "cannot fill a {} series with {} value '{}'",
                self.dtype,
                fill_value.dtype(),
                fill_value
            ))
        })?;
        let fill_value = dtype.coerce(fill_value)?;

        let values = self
            .values
            .iter()
            .map(|v| match v {
                NA::Value(s) => dtype.coerce(*s).map(NA::Value),
                NA::NA => Ok(NA::Value(fill_value)),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_parts(
            self.index.clone(),
            values,
            dtype,
            self.name.clone(),
        ))
    }

    /// Elements whose label falls inside an inclusive range, in index order
    pub fn loc_range(&self, range: RangeInclusive<L>) -> Self {
        let positions = self.index.positions_in(&range);
        self.take(&positions)
    }

    /// Copy of the series with labels in ascending order
    pub fn sort_index(&self) -> Self {
        let mut positions: Vec<usize> = (0..self.len()).collect();
        positions.sort_by(|&a, &b| self.labels()[a].cmp(&self.labels()[b]));
        self.take(&positions)
    }

    /// Sum of the non-missing values (0 for none)
    pub fn sum(&self) -> Result<f64> {
        Ok(self.present_f64("sum")?.iter().sum())
    }

    /// Mean of the non-missing values
    ///
    /// # Errors
    /// `Error::EmptySelection` when there are no values
    pub fn mean(&self) -> Result<f64> {
        let values = self.present_f64("mean")?;
        if values.is_empty() {
            return Err(Error::EmptySelection(
                "cannot calculate mean of a series without values".to_string(),
            ));
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    pub fn min(&self) -> Result<f64> {
        self.present_f64("min")?
            .into_iter()
            .reduce(f64::min)
            .ok_or_else(|| {
                Error::EmptySelection(
                    "cannot calculate minimum of a series without values".to_string(),
                )
            })
    }

    pub fn max(&self) -> Result<f64> {
        self.present_f64("max")?
            .into_iter()
            .reduce(f64::max)
            .ok_or_else(|| {
                Error::EmptySelection(
                    "cannot calculate maximum of a series without values".to_string(),
                )
            })
    }

    /// Apply a function to every numeric value, producing a `Float64` series
    pub fn map_f64<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        self.require_numeric("map_f64")?;
        let values = self
            .values
            .iter()
            .map(|v| v.and_then(|s| NA::from(s.as_f64().map(&f).map(Scalar::Float))))
            .collect();
        Ok(Self::from_parts(
            self.index.clone(),
            values,
            DType::Float64,
            self.name.clone(),
        ))
    }

    pub(crate) fn require_numeric(&self, operation: &str) -> Result<()> {
        if self.dtype.is_numeric() {
            Ok(())
        } else {
            Err(Error::Type(format!(
                "{} is not defined for a {} series",
                operation, self.dtype
            )))
        }
    }

    fn present_f64(&self, operation: &str) -> Result<Vec<f64>> {
        self.require_numeric(operation)?;
        Ok(self
            .values
            .iter()
            .filter_map(|v| v.value().and_then(|s| s.as_f64()))
            .collect())
    }

    // Positions come from this series' own index and are distinct
    pub(crate) fn take(&self, positions: &[usize]) -> Self {
        let values = positions.iter().map(|&p| self.values[p]).collect();
        Self::from_parts(
            self.index.select(positions),
            values,
            self.dtype,
            self.name.clone(),
        )
    }
}

impl<L: Label> PartialEq for LabeledSeries<L> {
    fn eq(&self, other: &Self) -> bool {
        self.dtype == other.dtype && self.index == other.index && self.values == other.values
    }
}

/// Common dtype of the present values, `Float64` when there are none
fn infer_dtype(values: &[NA<Scalar>]) -> Result<DType> {
    let mut dtype: Option<DType> = None;
    for value in values.iter().filter_map(|v| v.value()) {
        dtype = match dtype {
            None => Some(value.dtype()),
            Some(current) => Some(current.common(value.dtype()).ok_or_else(|| {
                Error::Type(format!(
                    "cannot mix {} and {} values in one series",
                    current,
                    value.dtype()
                ))
            })?),
        };
    }
    Ok(dtype.unwrap_or(DType::Float64))
}
