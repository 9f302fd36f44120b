//! Derived views: each returns a new, independent column.

use std::collections::HashSet;

use super::Column;
use crate::domain::{ColumnType, DecimalType, DoubleType, LongType};
use crate::error::ColumnResult;
use crate::selection::Selection;
use crate::types::CellInput;

impl<T: ColumnType> Column<T> {
    /// Rows listed in `selection`, in ascending row order.
    pub fn select(&self, selection: &Selection) -> ColumnResult<Self> {
        if let Some(last) = selection.last() {
            self.check_row(last)?;
        }
        Ok(self.derive(selection.iter().map(|row| self.values[row].clone()).collect()))
    }

    /// Rows at `rows`, in the given order; repeats are allowed.
    pub fn subset(&self, rows: &[usize]) -> ColumnResult<Self> {
        let values = rows
            .iter()
            .map(|&row| self.get(row))
            .collect::<ColumnResult<Vec<_>>>()?;
        Ok(self.derive(values))
    }

    /// One row per distinct value in first-occurrence order. Missing counts as one value.
    pub fn unique(&self) -> Self {
        let mut seen = HashSet::with_capacity(self.values.len());
        let values = self
            .values
            .iter()
            .filter(|v| seen.insert(T::key(v)))
            .cloned()
            .collect();
        self.derive(values)
    }

    /// Number of distinct values, missing counted once.
    pub fn count_unique(&self) -> usize {
        self.as_set().len()
    }

    /// Distinct domain keys of the column; all missing rows share one key.
    pub fn as_set(&self) -> HashSet<T::Key> {
        self.values.iter().map(T::key).collect()
    }

    /// Drop missing rows, keeping the order of the rest.
    pub fn remove_missing(&self) -> Self {
        self.filter(|v| !T::is_missing_value(v))
    }

    /// Number of missing rows.
    pub fn count_missing(&self) -> usize {
        self.values.iter().filter(|v| T::is_missing_value(v)).count()
    }

    /// Rows whose value satisfies `predicate`.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T::Value) -> bool,
    {
        self.derive(self.values.iter().filter(|v| predicate(v)).cloned().collect())
    }

    /// Shift values toward later rows by `n`, filling the first `n` rows with missing.
    ///
    /// A negative `n` shifts toward earlier rows and fills the trailing rows (see
    /// [`Column::lead`]). The result always has the same size.
    pub fn lag(&self, n: isize) -> Self {
        let len = self.values.len();
        let shift = n.unsigned_abs().min(len);
        let missing = T::missing_value_indicator();
        let mut out = Vec::with_capacity(len);
        if n >= 0 {
            out.extend(std::iter::repeat_n(missing, shift));
            out.extend_from_slice(&self.values[..len - shift]);
        } else {
            out.extend_from_slice(&self.values[shift..]);
            out.extend(std::iter::repeat_n(missing, shift));
        }
        self.derive(out)
    }

    /// `lead(n)` is `lag(-n)`.
    pub fn lead(&self, n: isize) -> Self {
        self.lag(n.saturating_neg())
    }

    /// Replace every missing row with `value`.
    pub fn fill_missing<'a>(&self, value: impl Into<CellInput<'a>>) -> ColumnResult<Self> {
        let fill = T::default_parser().parse(value.into())?;
        Ok(self.derive(
            self.values
                .iter()
                .map(|v| if T::is_missing_value(v) { &fill } else { v })
                .cloned()
                .collect(),
        ))
    }

    /// Convert every cell into domain `S` through its native numeric representation.
    ///
    /// Fails on the first cell that does not fit `S` (e.g. a fractional decimal into a long).
    pub fn convert<S: ColumnType>(&self) -> ColumnResult<Column<S>> {
        let mut out = Column::<S>::from_values(self.name.clone(), Vec::with_capacity(self.size()));
        out.observer = self.observer.clone();
        out.append_column(self)?;
        Ok(out)
    }

    /// Convert into a [`crate::column::DoubleColumn`].
    pub fn as_double_column(&self) -> ColumnResult<Column<DoubleType>> {
        self.convert()
    }

    /// Convert into a [`crate::column::LongColumn`]; fractional values fail.
    pub fn as_long_column(&self) -> ColumnResult<Column<LongType>> {
        self.convert()
    }

    /// Convert into a [`crate::column::DecimalColumn`].
    pub fn as_decimal_column(&self) -> ColumnResult<Column<DecimalType>> {
        self.convert()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use crate::column::{DecimalColumn, DoubleColumn, LongColumn};
    use crate::domain::{ColumnType, DecimalType};
    use crate::selection::Selection;

    fn dec(s: &str) -> Option<BigDecimal> {
        Some(BigDecimal::from_str(s).unwrap())
    }

    fn longs() -> LongColumn {
        LongColumn::from_values("n", vec![4, i64::MIN, 4, 7, i64::MIN, 1])
    }

    #[test]
    fn select_keeps_row_order_and_checks_bounds() {
        let col = longs();
        let out = col.select(&Selection::from_rows([3, 0])).unwrap();
        assert_eq!(out.values(), &[4, 7]);
        assert!(col.select(&Selection::from_rows([6])).is_err());
        assert!(col.select(&Selection::new()).unwrap().is_empty());
    }

    #[test]
    fn subset_allows_repeats_and_reordering() {
        let col = longs();
        let out = col.subset(&[5, 0, 5]).unwrap();
        assert_eq!(out.values(), &[1, 4, 1]);
        assert!(col.subset(&[0, 42]).unwrap_err().is_index_error());
    }

    #[test]
    fn unique_counts_missing_once() {
        let col = longs();
        let u = col.unique();
        assert_eq!(u.values(), &[4, i64::MIN, 7, 1]);
        assert_eq!(col.count_unique(), 4);
    }

    #[test]
    fn as_set_merges_numerically_equal_values() {
        let col = DecimalColumn::from_values("d", vec![dec("2"), dec("2.00"), None, dec("3"), None]);
        let set = col.as_set();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&DecimalType::key(&dec("2.0"))));
        assert!(set.contains(&DecimalType::key(&None)));
        assert_eq!(col.count_unique(), 3);
    }

    #[test]
    fn remove_missing_preserves_order() {
        let col = longs();
        assert_eq!(col.remove_missing().values(), &[4, 4, 7, 1]);
        assert_eq!(col.count_missing(), 2);
    }

    #[test]
    fn lag_and_lead_fill_with_missing() {
        let col = LongColumn::from_values("n", vec![1, 2, 3, 4]);
        assert_eq!(col.lag(1).values(), &[i64::MIN, 1, 2, 3]);
        assert_eq!(col.lag(-1).values(), &[2, 3, 4, i64::MIN]);
        assert_eq!(col.lead(2).values(), &[3, 4, i64::MIN, i64::MIN]);
        assert_eq!(col.lag(0), col);
        assert_eq!(col.lag(10).count_missing(), 4);
        assert_eq!(col.lead(10).count_missing(), 4);
    }

    #[test]
    fn fill_missing_replaces_only_missing_rows() {
        let col = DecimalColumn::from_values("d", vec![dec("1.5"), None]);
        let filled = col.fill_missing("0").unwrap();
        assert_eq!(filled.values(), &[dec("1.5"), dec("0")]);
        assert!(col.fill_missing("zero").is_err());
    }

    #[test]
    fn convert_between_domains() {
        let col = DecimalColumn::from_values("d", vec![dec("2"), None, dec("3.5")]);
        let doubles = col.as_double_column().unwrap();
        assert_eq!(doubles.get(2).unwrap(), 3.5);
        assert!(doubles.get(1).unwrap().is_nan());
        assert!(col.as_long_column().unwrap_err().is_parse_error());

        let back: DecimalColumn = DoubleColumn::from_values("x", vec![12.1]).as_decimal_column().unwrap();
        assert_eq!(back.get(0).unwrap(), dec("12.1"));
    }

    #[test]
    fn derived_views_are_independent() {
        let col = longs();
        let mut copy = col.copy();
        copy.set(0, 99).unwrap();
        assert_eq!(col.get(0).unwrap(), 4);
        let mut unique = col.unique();
        unique.set_missing(0).unwrap();
        assert_eq!(col.get(0).unwrap(), 4);
    }
}
