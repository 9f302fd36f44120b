//! Reduction operations for [`crate::column::Column`].

use std::fmt;

use bigdecimal::BigDecimal;

use crate::column::Column;
use crate::domain::ColumnType;
use crate::error::{ColumnError, ColumnResult};
use crate::ranking::compare_values;
use crate::types::NumericCell;

/// Built-in reduction operations over a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including missing).
    Count,
    /// Count missing rows.
    CountMissing,
    /// Sum of values, ignoring missing.
    Sum,
    /// Minimum value, ignoring missing.
    Min,
    /// Maximum value, ignoring missing.
    Max,
    /// Arithmetic mean, ignoring missing.
    Mean,
}

impl fmt::Display for ReduceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Count => "count",
            Self::CountMissing => "count_missing",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Mean => "mean",
        };
        f.write_str(name)
    }
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - `Count`/`CountMissing` return [`NumericCell::Integer`].
/// - `Sum`/`Min`/`Max`/`Mean` return [`NumericCell::Missing`] if there are no present values.
/// - Sums are exact for decimal and long columns. A long sum that leaves the `i64` range fails
///   with [`ColumnError::Overflow`]. The mean of a long column is a float.
pub fn reduce<T: ColumnType>(column: &Column<T>, op: ReduceOp) -> ColumnResult<NumericCell> {
    match op {
        ReduceOp::Count => Ok(NumericCell::Integer(column.size() as i64)),
        ReduceOp::CountMissing => Ok(NumericCell::Integer(column.count_missing() as i64)),
        ReduceOp::Min => Ok(extreme(column, std::cmp::Ordering::Less)),
        ReduceOp::Max => Ok(extreme(column, std::cmp::Ordering::Greater)),
        ReduceOp::Sum => sum(column).map(|(total, _)| total),
        ReduceOp::Mean => {
            let (total, count) = sum(column)?;
            Ok(mean(total, count))
        }
    }
}

fn extreme<T: ColumnType>(column: &Column<T>, wanted: std::cmp::Ordering) -> NumericCell {
    let mut best: Option<&T::Value> = None;
    for v in column.values.iter().filter(|v| !T::is_missing_value(v)) {
        if best.is_none_or(|b| compare_values::<T>(v, b) == wanted) {
            best = Some(v);
        }
    }
    best.map_or(NumericCell::Missing, T::to_numeric)
}

enum Total {
    Empty,
    Integer(i128),
    Float(f64),
    Decimal(BigDecimal),
}

fn sum<T: ColumnType>(column: &Column<T>) -> ColumnResult<(NumericCell, usize)> {
    let overflow = || ColumnError::Overflow {
        column: column.name().to_string(),
        op: ReduceOp::Sum.to_string(),
    };

    let mut total = Total::Empty;
    let mut count = 0usize;
    for v in &column.values {
        let cell = T::to_numeric(v);
        if !cell.is_missing() {
            count += 1;
        }
        total = match (total, cell) {
            (t, NumericCell::Missing) => t,
            (Total::Empty, NumericCell::Integer(x)) => Total::Integer(i128::from(x)),
            (Total::Empty, NumericCell::Float(x)) => Total::Float(x),
            (Total::Empty, NumericCell::Decimal(x)) => Total::Decimal(x),
            (Total::Integer(a), NumericCell::Integer(x)) => Total::Integer(a + i128::from(x)),
            (Total::Float(a), NumericCell::Float(x)) => Total::Float(a + x),
            (Total::Decimal(a), NumericCell::Decimal(x)) => Total::Decimal(a + x),
            // A column yields a single cell variant.
            (t, _) => t,
        };
    }

    let cell = match total {
        Total::Empty => NumericCell::Missing,
        Total::Integer(a) => NumericCell::Integer(i64::try_from(a).map_err(|_| overflow())?),
        Total::Float(a) => NumericCell::Float(a),
        Total::Decimal(a) => NumericCell::Decimal(a),
    };
    Ok((cell, count))
}

fn mean(total: NumericCell, count: usize) -> NumericCell {
    match total {
        NumericCell::Missing => NumericCell::Missing,
        NumericCell::Integer(a) => NumericCell::Float(a as f64 / count as f64),
        NumericCell::Float(a) => NumericCell::Float(a / count as f64),
        NumericCell::Decimal(a) => NumericCell::Decimal(a / BigDecimal::from(count as u64)),
    }
}
