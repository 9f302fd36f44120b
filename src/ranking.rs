//! Ordering and ranking.
//!
//! [`compare_values`] is a total order over stored values in which the missing indicator is
//! the smallest element. Sorting uses it directly. Ranking (`top`/`bottom`) ignores missing
//! rows entirely and breaks ties by original row order.

use std::cmp::Ordering;

use crate::column::Column;
use crate::domain::ColumnType;

/// Total order over stored values; missing sorts before every value.
pub fn compare_values<T: ColumnType>(a: &T::Value, b: &T::Value) -> Ordering {
    match (T::native(a), T::native(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => T::compare_native(&x, &y),
    }
}

impl<T: ColumnType> Column<T> {
    /// The `k` largest non-missing values, largest first.
    ///
    /// Equal values keep their original row order. Returns every non-missing value when fewer
    /// than `k` exist.
    pub fn top(&self, k: usize) -> Self {
        self.ranked(k, |a, b| T::compare_native(b, a))
    }

    /// The `k` smallest non-missing values, smallest first.
    pub fn bottom(&self, k: usize) -> Self {
        self.ranked(k, |a, b| T::compare_native(a, b))
    }

    /// Stable in-place sort, missing rows first.
    pub fn sort_ascending(&mut self) -> &mut Self {
        self.values.sort_by(compare_values::<T>);
        self
    }

    /// Stable in-place sort, missing rows last.
    pub fn sort_descending(&mut self) -> &mut Self {
        self.values.sort_by(|a, b| compare_values::<T>(b, a));
        self
    }

    fn ranked<F>(&self, k: usize, mut order: F) -> Self
    where
        F: FnMut(&T::Native, &T::Native) -> Ordering,
    {
        let mut present: Vec<T::Native> = self.values.iter().filter_map(T::native).collect();
        // `sort_by` is stable, so ties stay in row order.
        present.sort_by(|a, b| order(a, b));
        present.truncate(k);
        self.derive(present.into_iter().map(T::from_native).collect())
    }
}
