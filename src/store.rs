//! Labelled point storage.
//!
//! A [`PointStore`] maps labels to values in first-insertion order. Plotting an existing
//! label overwrites its value without moving it, so bars keep their slot across updates.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// Label → value mapping accepted by [`PointStore::merge`].
pub type PointMap = IndexMap<String, f64>;

/// One plot input: a sequence of mappings merged left-to-right.
///
/// A single `(label, value)` pair is a one-entry mapping. Conversions exist for pairs,
/// maps, arrays and vectors of pairs, and vectors of maps.
///
/// # Example
///
/// ```
/// use histo::store::Points;
///
/// let single = Points::from(("a", 10.0));
/// assert_eq!(single.len(), 1);
///
/// let batch = Points::from(vec![vec![("x", 3.0)], vec![("x", 7.0), ("y", 2.0)]]);
/// assert_eq!(batch.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Points {
    maps: Vec<PointMap>,
}

impl Points {
    /// Create an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one label/value pair as its own mapping.
    #[must_use]
    pub fn pair(mut self, label: impl Into<String>, value: f64) -> Self {
        let mut map = PointMap::new();
        map.insert(label.into(), value);
        self.maps.push(map);
        self
    }

    /// Append a mapping; later mappings win for repeated labels.
    #[must_use]
    pub fn map<K, I>(mut self, map: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        self.maps.push(map.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Total number of label/value pairs across all mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.iter().map(IndexMap::len).sum()
    }

    /// Whether the input carries no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.maps.iter().flat_map(IndexMap::iter)
    }
}

impl<K: Into<String>> From<(K, f64)> for Points {
    fn from((label, value): (K, f64)) -> Self {
        Self::new().pair(label, value)
    }
}

impl<K: Into<String>> From<Vec<(K, f64)>> for Points {
    fn from(pairs: Vec<(K, f64)>) -> Self {
        Self::new().map(pairs)
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for Points {
    fn from(pairs: [(K, f64); N]) -> Self {
        Self::new().map(pairs)
    }
}

impl<K: Into<String>> From<Vec<Vec<(K, f64)>>> for Points {
    fn from(maps: Vec<Vec<(K, f64)>>) -> Self {
        maps.into_iter().fold(Self::new(), |points, map| points.map(map))
    }
}

impl From<PointMap> for Points {
    fn from(map: PointMap) -> Self {
        Self { maps: vec![map] }
    }
}

impl From<Vec<PointMap>> for Points {
    fn from(maps: Vec<PointMap>) -> Self {
        Self { maps }
    }
}

impl<K: Into<String>, S> From<HashMap<K, f64, S>> for Points {
    fn from(map: HashMap<K, f64, S>) -> Self {
        Self::new().map(map)
    }
}

impl<K: Into<String>> From<BTreeMap<K, f64>> for Points {
    fn from(map: BTreeMap<K, f64>) -> Self {
        Self::new().map(map)
    }
}

/// Label → value collection with a cached maximum magnitude.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointStore {
    points: PointMap,
    upper: Option<f64>,
}

impl PointStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `input` into the store, left-to-right, last write per label wins.
    ///
    /// Returns the number of pairs applied. The merge is all-or-nothing: on error the store
    /// is unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPlot`] if `input` carries no pairs.
    /// - [`Error::NonFiniteValue`] if any value is NaN or infinite.
    pub fn merge(&mut self, input: impl Into<Points>) -> Result<usize> {
        let input = input.into();
        if input.is_empty() {
            return Err(Error::EmptyPlot);
        }
        if let Some((label, _)) = input.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteValue {
                label: label.clone(),
            });
        }

        let mut applied = 0;
        for (label, &value) in input.iter() {
            self.points.insert(label.clone(), value);
            applied += 1;
        }
        self.upper = self.points.values().map(|v| v.abs()).reduce(f64::max);
        Ok(applied)
    }

    /// Largest absolute value stored, or `None` while empty.
    #[must_use]
    pub const fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Value stored for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.points.get(label).copied()
    }

    /// Points in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.points.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The underlying mapping.
    #[must_use]
    pub const fn as_map(&self) -> &PointMap {
        &self.points
    }

    /// Number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
