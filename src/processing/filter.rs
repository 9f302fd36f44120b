//! Selection engine: predicates over a [`Column`] producing a [`Selection`].
//!
//! Comparisons treat missing as incomparable: a missing row never satisfies `>`, `<`, `==` or
//! `!=` against a value, and comparing against a missing query value selects nothing.
//! Membership (`is_in`) is different: a missing query value matches missing rows, and
//! `is_not_in` is the exact complement of `is_in` over all rows.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::column::Column;
use crate::domain::ColumnType;
use crate::error::ColumnResult;
use crate::selection::Selection;
use crate::types::CellInput;

/// Rows of `column` whose stored value satisfies `predicate`.
///
/// This is a convenience wrapper around [`Column::eval`].
pub fn filter<T, F>(column: &Column<T>, predicate: F) -> Selection
where
    T: ColumnType,
    F: FnMut(&T::Value) -> bool,
{
    column.eval(predicate)
}

impl<T: ColumnType> Column<T> {
    /// Rows whose stored value (missing indicator included) satisfies `predicate`.
    pub fn eval<F>(&self, mut predicate: F) -> Selection
    where
        F: FnMut(&T::Value) -> bool,
    {
        Selection::from_sorted(
            self.values
                .iter()
                .enumerate()
                .filter(|&(_, v)| predicate(v))
                .map(|(row, _)| row)
                .collect(),
        )
    }

    /// Non-missing rows greater than `value`.
    pub fn is_greater_than<'a>(&self, value: impl Into<CellInput<'a>>) -> ColumnResult<Selection> {
        self.compare_with(value.into(), |o| o == Ordering::Greater)
    }

    /// Non-missing rows greater than or equal to `value`.
    pub fn is_greater_than_or_equal_to<'a>(
        &self,
        value: impl Into<CellInput<'a>>,
    ) -> ColumnResult<Selection> {
        self.compare_with(value.into(), |o| o != Ordering::Less)
    }

    /// Non-missing rows less than `value`.
    pub fn is_less_than<'a>(&self, value: impl Into<CellInput<'a>>) -> ColumnResult<Selection> {
        self.compare_with(value.into(), |o| o == Ordering::Less)
    }

    /// Non-missing rows less than or equal to `value`.
    pub fn is_less_than_or_equal_to<'a>(
        &self,
        value: impl Into<CellInput<'a>>,
    ) -> ColumnResult<Selection> {
        self.compare_with(value.into(), |o| o != Ordering::Greater)
    }

    /// Rows numerically equal to `value`; 2.0 equals 2 in the decimal domain.
    pub fn is_equal_to<'a>(&self, value: impl Into<CellInput<'a>>) -> ColumnResult<Selection> {
        self.compare_with(value.into(), |o| o == Ordering::Equal)
    }

    /// Non-missing rows not equal to `value`.
    pub fn is_not_equal_to<'a>(&self, value: impl Into<CellInput<'a>>) -> ColumnResult<Selection> {
        self.compare_with(value.into(), |o| o != Ordering::Equal)
    }

    /// Rows with `low <= value <= high`.
    pub fn is_between_inclusive<'a, 'b>(
        &self,
        low: impl Into<CellInput<'a>>,
        high: impl Into<CellInput<'b>>,
    ) -> ColumnResult<Selection> {
        let low = self.is_greater_than_or_equal_to(low)?;
        let high = self.is_less_than_or_equal_to(high)?;
        Ok(low.and(&high))
    }

    /// Rows holding the missing indicator.
    pub fn missing_rows(&self) -> Selection {
        self.eval(T::is_missing_value)
    }

    /// Rows holding a present value.
    pub fn non_missing_rows(&self) -> Selection {
        self.eval(|v| !T::is_missing_value(v))
    }

    /// Rows whose value is one of `values`. A missing entry in `values` matches missing rows.
    ///
    /// Query values are coerced like appended values; a malformed one is a parse error.
    pub fn is_in<'a, I>(&self, values: I) -> ColumnResult<Selection>
    where
        I: IntoIterator,
        I::Item: Into<CellInput<'a>>,
    {
        let parser = T::default_parser();
        let wanted = values
            .into_iter()
            .map(|v| parser.parse(v.into()).map(|v| T::key(&v)))
            .collect::<ColumnResult<HashSet<_>>>()?;
        Ok(self.eval(|v| wanted.contains(&T::key(v))))
    }

    /// Complement of [`Column::is_in`] over every row.
    pub fn is_not_in<'a, I>(&self, values: I) -> ColumnResult<Selection>
    where
        I: IntoIterator,
        I::Item: Into<CellInput<'a>>,
    {
        Ok(self.is_in(values)?.complement(self.size()))
    }

    fn compare_with<A>(&self, value: CellInput<'_>, accept: A) -> ColumnResult<Selection>
    where
        A: Fn(Ordering) -> bool,
    {
        let query = T::default_parser().parse(value)?;
        let Some(query) = T::native(&query) else {
            return Ok(Selection::new());
        };
        Ok(self.eval(|v| T::native(v).is_some_and(|x| accept(T::compare_native(&x, &query)))))
    }
}
