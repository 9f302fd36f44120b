//! Core value types shared by every column domain.
//!
//! - [`ColumnKind`] names a domain (decimal, double, long).
//! - [`CellInput`] is the tagged union of everything a column accepts on `create`, `set`,
//!   `append` and in queries. Every entry point funnels through one coercion per domain.
//! - [`NumericCell`] is the native numeric representation a column hands to other columns.

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Logical domain of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Exact decimal numbers.
    Decimal,
    /// 64-bit floating point numbers.
    Double,
    /// 64-bit signed integers.
    Long,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Long => "long",
        };
        f.write_str(name)
    }
}

/// An external value offered to a column.
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput<'a> {
    /// Legitimately absent value.
    Missing,
    /// Textual literal, parsed by the domain.
    Text(&'a str),
    /// 64-bit (or narrower) integer.
    Integer(i64),
    /// 128-bit integer.
    Wide(i128),
    /// Arbitrary-precision integer.
    BigInteger(BigInt),
    /// Double precision float.
    Float(f64),
    /// Single precision float.
    Float32(f32),
    /// Exact decimal of any precision.
    Decimal(BigDecimal),
}

impl CellInput<'_> {
    /// Renders the input for error messages.
    pub fn raw(&self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Text(s) => (*s).to_string(),
            Self::Integer(v) => v.to_string(),
            Self::Wide(v) => v.to_string(),
            Self::BigInteger(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Float32(v) => v.to_string(),
            Self::Decimal(v) => v.to_string(),
        }
    }

    /// Returns `true` for binary floating point inputs.
    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Float(_) | Self::Float32(_))
    }
}

impl<'a> From<&'a str> for CellInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for CellInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<i32> for CellInput<'_> {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for CellInput<'_> {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for CellInput<'_> {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i128> for CellInput<'_> {
    fn from(value: i128) -> Self {
        Self::Wide(value)
    }
}

impl From<f32> for CellInput<'_> {
    fn from(value: f32) -> Self {
        Self::Float32(value)
    }
}

impl From<f64> for CellInput<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<BigInt> for CellInput<'_> {
    fn from(value: BigInt) -> Self {
        Self::BigInteger(value)
    }
}

impl From<&BigInt> for CellInput<'_> {
    fn from(value: &BigInt) -> Self {
        Self::BigInteger(value.clone())
    }
}

impl From<BigDecimal> for CellInput<'_> {
    fn from(value: BigDecimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&BigDecimal> for CellInput<'_> {
    fn from(value: &BigDecimal) -> Self {
        Self::Decimal(value.clone())
    }
}

impl From<NumericCell> for CellInput<'_> {
    fn from(value: NumericCell) -> Self {
        match value {
            NumericCell::Missing => Self::Missing,
            NumericCell::Integer(v) => Self::Integer(v),
            NumericCell::Float(v) => Self::Float(v),
            NumericCell::Decimal(v) => Self::Decimal(v),
        }
    }
}

impl<'a, T> From<Option<T>> for CellInput<'a>
where
    T: Into<CellInput<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Native numeric representation of a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericCell {
    /// The cell holds the domain's missing indicator.
    Missing,
    /// Integer cell (long domain, counts).
    Integer(i64),
    /// Floating point cell (double domain, means).
    Float(f64),
    /// Decimal cell (decimal domain).
    Decimal(BigDecimal),
}

impl NumericCell {
    /// Returns `true` for [`NumericCell::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Nearest `f64`, or `NaN` when missing.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Missing => f64::NAN,
            Self::Integer(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Decimal(v) => decimal_to_f64(v),
        }
    }
}

/// Nearest double to a decimal.
///
/// Goes through the canonical text so the result is correctly rounded.
pub(crate) fn decimal_to_f64(value: &BigDecimal) -> f64 {
    value.to_string().parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use num_bigint::BigInt;

    use super::{CellInput, ColumnKind, NumericCell};

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(CellInput::from(7), CellInput::Integer(7));
        assert_eq!(CellInput::from(7_i64), CellInput::Integer(7));
        assert_eq!(CellInput::from(7_i128), CellInput::Wide(7));
        assert_eq!(CellInput::from(1.5), CellInput::Float(1.5));
        assert_eq!(CellInput::from(1.5_f32), CellInput::Float32(1.5));
        assert_eq!(CellInput::from("1.5"), CellInput::Text("1.5"));
        assert_eq!(CellInput::from(None::<BigDecimal>), CellInput::Missing);
        assert_eq!(
            CellInput::from(Some(BigDecimal::new(BigInt::from(15), 1))),
            CellInput::Decimal(BigDecimal::new(BigInt::from(15), 1))
        );
        let big = BigInt::from(10).pow(40);
        assert_eq!(CellInput::from(&big), CellInput::BigInteger(big.clone()));
        assert_eq!(CellInput::from(&big).raw(), format!("1{}", "0".repeat(40)));
    }

    #[test]
    fn numeric_cell_maps_onto_input() {
        assert_eq!(CellInput::from(NumericCell::Missing), CellInput::Missing);
        assert_eq!(CellInput::from(NumericCell::Integer(3)), CellInput::Integer(3));
        assert!(NumericCell::Missing.to_f64().is_nan());
    }

    #[test]
    fn decimal_to_f64_is_correctly_rounded() {
        let d = BigDecimal::from_str("3456.4").unwrap();
        assert_eq!(NumericCell::Decimal(d).to_f64(), 3456.4);
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(ColumnKind::Decimal.to_string(), "decimal");
        assert_eq!(ColumnKind::Double.to_string(), "double");
        assert_eq!(ColumnKind::Long.to_string(), "long");
    }
}
