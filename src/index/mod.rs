use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Range, RangeInclusive};

use crate::core::error::{Error, Result};

/// Requirements for a value used as a series label
///
/// Labels must be orderable so aligned results can be sorted, and hashable so
/// lookups by label are constant time.
pub trait Label: Debug + Clone + Eq + Hash + Ord + Display + Send + Sync {}

impl<T> Label for T where T: Debug + Clone + Eq + Hash + Ord + Display + Send + Sync {}

/// How two indexes are combined when aligning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinHow {
    /// Sorted union of both label sets
    #[default]
    Outer,
    /// Labels of the left index that also appear in the right one
    Inner,
    /// The left index unchanged
    Left,
    /// The right index unchanged
    Right,
}

/// Index structure
///
/// Row labels for a series or frame. Maintains a collection of unique values
/// and their positions.
#[derive(Debug, Clone)]
pub struct Index<T>
where
    T: Label,
{
    /// Index values
    values: Vec<T>,

    /// Mapping from values to positions
    map: HashMap<T, usize>,

    /// Index name (optional)
    name: Option<String>,
}

impl<T> Index<T>
where
    T: Label,
{
    /// Creates a new index
    ///
    /// # Errors
    /// Returns `Error::DuplicateLabel` if there are duplicate values
    pub fn new(values: Vec<T>) -> Result<Self> {
        Self::with_name(values, None)
    }

    /// Creates a new index with a name
    ///
    /// # Errors
    /// Returns `Error::DuplicateLabel` if there are duplicate values
    pub fn with_name(values: Vec<T>, name: Option<String>) -> Result<Self> {
        let mut map = HashMap::with_capacity(values.len());

        for (i, value) in values.iter().enumerate() {
            if map.insert(value.clone(), i).is_some() {
                return Err(Error::DuplicateLabel(format!(
                    "index value '{}' is duplicated",
                    value
                )));
            }
        }

        Ok(Index { values, map, name })
    }

    /// Creates an empty index
    pub fn empty() -> Self {
        Index {
            values: Vec::new(),
            map: HashMap::new(),
            name: None,
        }
    }

    /// Get the length of the index
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the position of a label
    pub fn get_loc(&self, key: &T) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// Get the label at a position
    pub fn get_value(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    pub fn contains(&self, key: &T) -> bool {
        self.map.contains_key(key)
    }

    /// Get all labels in index order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Get the index name
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Set the index name
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Copy the index with a new name
    pub fn rename(&self, name: Option<String>) -> Self {
        let mut new_index = self.clone();
        new_index.name = name;
        new_index
    }

    /// Whether labels are strictly ascending
    pub fn is_monotonic_increasing(&self) -> bool {
        self.values.windows(2).all(|w| w[0] < w[1])
    }

    /// Copy of the index with labels in ascending order
    pub fn sorted(&self) -> Self {
        let mut values = self.values.clone();
        values.sort();
        Self::from_unique(values, self.name.clone())
    }

    /// Sorted union of two label sets
    ///
    /// The name is kept only when both indexes share it.
    pub fn union(&self, other: &Index<T>) -> Self {
        let mut values: Vec<T> = self
            .values
            .iter()
            .chain(other.values.iter().filter(|v| !self.contains(v)))
            .cloned()
            .collect();
        values.sort();
        Self::from_unique(values, self.shared_name(other))
    }

    /// Labels of `self` that also appear in `other`, in `self`'s order
    pub fn intersection(&self, other: &Index<T>) -> Self {
        let values: Vec<T> = self
            .values
            .iter()
            .filter(|v| other.contains(v))
            .cloned()
            .collect();
        Self::from_unique(values, self.shared_name(other))
    }

    /// Combine two indexes according to `how`
    pub fn join(&self, other: &Index<T>, how: JoinHow) -> Self {
        match how {
            JoinHow::Outer => self.union(other),
            JoinHow::Inner => self.intersection(other),
            JoinHow::Left => self.clone(),
            JoinHow::Right => other.clone(),
        }
    }

    /// For every label of `target`, its position in `self` (if any)
    pub fn get_indexer(&self, target: &Index<T>) -> Vec<Option<usize>> {
        target.values.iter().map(|v| self.get_loc(v)).collect()
    }

    /// Positions of labels falling inside an inclusive label range, in index order
    pub fn positions_in(&self, range: &RangeInclusive<T>) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| range.contains(v))
            .map(|(i, _)| i)
            .collect()
    }

    /// Build a new index from a subset of positions
    pub fn take(&self, positions: &[usize]) -> Result<Self> {
        let mut values = Vec::with_capacity(positions.len());
        for &pos in positions {
            let value = self.values.get(pos).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "position {} out of bounds for index of length {}",
                    pos,
                    self.len()
                ))
            })?;
            values.push(value.clone());
        }
        Self::with_name(values, self.name.clone())
    }

    // Positions must be in bounds and distinct
    pub(crate) fn select(&self, positions: &[usize]) -> Self {
        let values = positions.iter().map(|&p| self.values[p].clone()).collect();
        Self::from_unique(values, self.name.clone())
    }

    fn shared_name(&self, other: &Index<T>) -> Option<String> {
        match (&self.name, &other.name) {
            (Some(a), Some(b)) if a == b => Some(a.clone()),
            _ => None,
        }
    }

    // Callers guarantee uniqueness
    fn from_unique(values: Vec<T>, name: Option<String>) -> Self {
        let map = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        Index { values, map, name }
    }
}

impl Index<usize> {
    /// Creates an index from an integer range
    pub fn from_range(range: Range<usize>) -> Self {
        Index::from_unique(range.collect(), None)
    }
}

impl<T: Label> PartialEq for Index<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<'a, T: Label> IntoIterator for &'a Index<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_sorted_and_unique() {
        let a = Index::new(vec![2001, 2000]).unwrap();
        let b = Index::new(vec![2002, 2001]).unwrap();
        assert_eq!(a.union(&b).values(), &[2000, 2001, 2002]);
    }

    #[test]
    fn intersection_keeps_left_order() {
        let a = Index::new(vec![3, 1, 2]).unwrap();
        let b = Index::new(vec![1, 3]).unwrap();
        assert_eq!(a.intersection(&b).values(), &[3, 1]);
    }

    #[test]
    fn name_survives_union_only_when_shared() {
        let a = Index::with_name(vec![1], Some("year".to_string())).unwrap();
        let b = Index::with_name(vec![2], Some("year".to_string())).unwrap();
        let c = Index::with_name(vec![3], Some("date".to_string())).unwrap();
        assert_eq!(a.union(&b).name(), Some(&"year".to_string()));
        assert_eq!(a.union(&c).name(), None);
    }
}
