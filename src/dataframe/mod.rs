//! Frames of series sharing one label index
//!
//! A [`SeriesFrame`] is what the CSV loader produces: one label column and a
//! set of named value columns. Columns added later are aligned onto the
//! frame index, so labels the frame does not know are dropped and labels the
//! column lacks become `NA`.

use std::ops::RangeInclusive;

use crate::core::error::{Error, Result};
use crate::index::{Index, Label};
use crate::series::LabeledSeries;

/// Ordered collection of named series over one index
#[derive(Debug, Clone)]
pub struct SeriesFrame<L>
where
    L: Label,
{
    index: Index<L>,
    columns: Vec<(String, LabeledSeries<L>)>,
}

impl<L> SeriesFrame<L>
where
    L: Label,
{
    /// An empty frame over `index`
    pub fn new(index: Index<L>) -> Self {
        SeriesFrame {
            index,
            columns: Vec::new(),
        }
    }

    /// Build a frame from named columns, aligning each onto `index`
    pub fn from_columns(index: Index<L>, columns: Vec<(String, LabeledSeries<L>)>) -> Result<Self> {
        columns
            .into_iter()
            .try_fold(Self::new(index), |frame, (name, series)| {
                frame.with_column(name, &series)
            })
    }

    /// Add a column, aligning it onto the frame index
    ///
    /// # Errors
    /// `Error::DuplicateColumnName` when the name is taken.
    pub fn add_column(&mut self, name: impl Into<String>, series: &LabeledSeries<L>) -> Result<()> {
        let name = name.into();
        if self.columns.iter().any(|(n, _)| *n == name) {
            return Err(Error::DuplicateColumnName(name));
        }
        let aligned = series.reindex(&self.index).with_name(name.clone());
        self.columns.push((name, aligned));
        Ok(())
    }

    /// Builder form of [`SeriesFrame::add_column`]
    pub fn with_column(mut self, name: impl Into<String>, series: &LabeledSeries<L>) -> Result<Self> {
        self.add_column(name, series)?;
        Ok(self)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &Index<L> {
        &self.index
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Result<&LabeledSeries<L>> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Iterate `(name, column)` pairs in insertion order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &LabeledSeries<L>)> + '_ {
        self.columns.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Frame holding only the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        let mut frame = Self::new(self.index.clone());
        for name in names {
            frame.add_column(*name, self.column(name)?)?;
        }
        Ok(frame)
    }

    /// Apply `f` to every column, keeping names
    pub fn map_columns<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(&LabeledSeries<L>) -> Result<LabeledSeries<L>>,
    {
        let mut frame = Self::new(self.index.clone());
        for (name, series) in &self.columns {
            frame.add_column(name.clone(), &f(series)?)?;
        }
        Ok(frame)
    }

    /// Rebase every column on the same base period
    pub fn rebase(&self, base: RangeInclusive<L>) -> Result<Self> {
        self.map_columns(|s| s.rebase(base.clone()))
    }

    /// Rows whose label lies in an inclusive range
    pub fn loc_range(&self, range: RangeInclusive<L>) -> Self {
        let positions = self.index.positions_in(&range);
        SeriesFrame {
            index: self.index.select(&positions),
            columns: self
                .columns
                .iter()
                .map(|(n, s)| (n.clone(), s.take(&positions)))
                .collect(),
        }
    }

    /// Feed the frame through `f`, for method-chain style pipelines
    ///
    /// # Example
    /// ```
    /// use tidyseries::{Index, LabeledSeries, SeriesFrame};
    ///
    /// let index = Index::new(vec![1, 2, 3]).unwrap();
    /// let s = LabeledSeries::from_f64(vec![1, 2, 3], vec![50.0, 100.0, 150.0]).unwrap();
    /// let rebased = SeriesFrame::new(index)
    ///     .with_column("gdp", &s)
    ///     .unwrap()
    ///     .pipe(|f| f.rebase(2..=2))
    ///     .unwrap();
    /// assert_eq!(rebased.column("gdp").unwrap().get_f64(&3), Some(150.0));
    /// ```
    pub fn pipe<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}
