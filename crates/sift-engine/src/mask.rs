//! Row-aligned boolean masks.

use polars::prelude::{BooleanChunked, NamedFrom};

/// One boolean per dataset row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask(Vec<bool>);

impl Mask {
    pub fn all_true(len: usize) -> Self {
        Self(vec![true; len])
    }

    /// The fail-safe mask: selects nothing.
    pub fn all_false(len: usize) -> Self {
        Self(vec![false; len])
    }

    pub fn from_fn(len: usize, f: impl FnMut(usize) -> bool) -> Self {
        Self((0..len).map(f).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<bool> {
        self.0.get(idx).copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Number of selected rows.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|v| **v).count()
    }

    #[must_use]
    pub fn and(mut self, other: &Mask) -> Self {
        debug_assert_eq!(self.len(), other.len());
        for (left, right) in self.0.iter_mut().zip(&other.0) {
            *left &= *right;
        }
        self
    }

    #[must_use]
    pub fn or(mut self, other: &Mask) -> Self {
        debug_assert_eq!(self.len(), other.len());
        for (left, right) in self.0.iter_mut().zip(&other.0) {
            *left |= *right;
        }
        self
    }

    #[must_use]
    pub fn invert(mut self) -> Self {
        for value in &mut self.0 {
            *value = !*value;
        }
        self
    }

    /// Converts to a Polars mask for `DataFrame::filter`.
    pub fn to_chunked(&self) -> BooleanChunked {
        BooleanChunked::new("mask".into(), self.0.as_slice())
    }
}

impl FromIterator<bool> for Mask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
