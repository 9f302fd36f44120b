//! Row selections.
//!
//! A [`Selection`] is an ascending set of distinct 0-based row positions. Queries on a
//! [`crate::column::Column`] produce fresh selections; they never alias column storage.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Ascending, duplicate-free set of row indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    rows: Vec<usize>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row in `range`.
    pub fn with_range(range: Range<usize>) -> Self {
        Self {
            rows: range.collect(),
        }
    }

    /// Build from arbitrary row indices; sorts and removes duplicates.
    pub fn from_rows(rows: impl IntoIterator<Item = usize>) -> Self {
        let mut rows: Vec<usize> = rows.into_iter().collect();
        rows.sort_unstable();
        rows.dedup();
        Self { rows }
    }

    /// Rows already known to be strictly ascending.
    pub(crate) fn from_sorted(rows: Vec<usize>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0] < w[1]), "rows must be ascending");
        Self { rows }
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Alias of [`Selection::len`].
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no row is selected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if `row` is selected.
    pub fn contains(&self, row: usize) -> bool {
        self.rows.binary_search(&row).is_ok()
    }

    /// Add a row, keeping the set ordered.
    pub fn add(&mut self, row: usize) {
        if let Err(pos) = self.rows.binary_search(&row) {
            self.rows.insert(pos, row);
        }
    }

    /// Selected rows in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    /// Selected rows as a sorted slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.rows
    }

    /// Largest selected row, if any.
    pub fn last(&self) -> Option<usize> {
        self.rows.last().copied()
    }

    /// Rows present in both selections.
    pub fn and(&self, other: &Selection) -> Selection {
        let mut out = Vec::with_capacity(self.len().min(other.len()));
        let (mut i, mut j) = (0, 0);
        while i < self.rows.len() && j < other.rows.len() {
            match self.rows[i].cmp(&other.rows[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    out.push(self.rows[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        Selection::from_sorted(out)
    }

    /// Rows present in either selection.
    pub fn or(&self, other: &Selection) -> Selection {
        let mut out = Vec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);
        while i < self.rows.len() && j < other.rows.len() {
            match self.rows[i].cmp(&other.rows[j]) {
                std::cmp::Ordering::Less => {
                    out.push(self.rows[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(other.rows[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push(self.rows[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&self.rows[i..]);
        out.extend_from_slice(&other.rows[j..]);
        Selection::from_sorted(out)
    }

    /// Rows in `self` but not in `other`.
    pub fn and_not(&self, other: &Selection) -> Selection {
        Selection::from_sorted(
            self.rows
                .iter()
                .copied()
                .filter(|row| !other.contains(*row))
                .collect(),
        )
    }

    /// Rows of `0..len` that are not selected.
    pub fn complement(&self, len: usize) -> Selection {
        Selection::with_range(0..len).and_not(self)
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter().copied()
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Selection::from_rows(iter)
    }
}
