//! Column domains.
//!
//! A [`ColumnType`] bundles what a [`crate::column::Column`] needs to know about its values:
//! the stored representation, the missing indicator, ordering, hashing for distinctness and a
//! single coercion function from [`CellInput`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::missing::{
    DECIMAL_MISSING_VALUE, DOUBLE_MISSING_VALUE, LONG_MISSING_VALUE, is_missing_decimal,
    is_missing_double, is_missing_long,
};
use crate::parser::ValueParser;
use crate::types::{CellInput, ColumnKind, NumericCell, decimal_to_f64};

/// The value domain of a column.
///
/// Implementors are zero-sized markers; all methods are associated functions.
pub trait ColumnType: Sized + Send + Sync + 'static {
    /// Stored cell representation, including the missing indicator.
    type Value: Clone + fmt::Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static;
    /// Non-missing value as handed to callers.
    type Native: Clone + fmt::Debug + fmt::Display + PartialEq;
    /// Hashable identity used for distinctness and membership.
    type Key: Eq + Hash;

    /// The domain's name, as reported in errors.
    const KIND: ColumnKind;

    /// The reserved value standing in for "missing".
    fn missing_value_indicator() -> Self::Value;

    /// Value-equality test against the missing indicator.
    fn is_missing_value(value: &Self::Value) -> bool;

    /// `None` when `value` is missing.
    fn native(value: &Self::Value) -> Option<Self::Native>;

    /// Wraps a present value back into its stored form.
    fn from_native(native: Self::Native) -> Self::Value;

    /// Natural order of two non-missing values.
    fn compare_native(a: &Self::Native, b: &Self::Native) -> Ordering;

    /// Identity for hashing: numerically equal values share a key, all missing values share one.
    fn key(value: &Self::Value) -> Self::Key;

    /// The value as a [`NumericCell`] for transfer into another domain.
    fn to_numeric(value: &Self::Value) -> NumericCell;

    /// Coerces one input into the domain.
    ///
    /// Text arrives already trimmed and known not to be a missing token. The error is a
    /// human-readable reason; callers wrap it into [`crate::ColumnError::Parse`].
    fn coerce(input: &CellInput<'_>) -> Result<Self::Value, String>;

    /// Whether coercing `input` crosses a binary/decimal precision boundary.
    fn crosses_precision_boundary(_input: &CellInput<'_>) -> bool {
        false
    }

    /// The default parser for this domain.
    fn default_parser() -> ValueParser<Self> {
        ValueParser::default()
    }
}

/// Arbitrary-precision decimal domain backed by [`bigdecimal::BigDecimal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalType;

/// 64-bit float domain, `NaN` is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoubleType;

/// 64-bit integer domain, `i64::MIN` is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongType;

impl ColumnType for DecimalType {
    type Value = Option<BigDecimal>;
    type Native = BigDecimal;
    type Key = Option<BigDecimal>;

    const KIND: ColumnKind = ColumnKind::Decimal;

    fn missing_value_indicator() -> Self::Value {
        DECIMAL_MISSING_VALUE
    }

    fn is_missing_value(value: &Self::Value) -> bool {
        is_missing_decimal(value)
    }

    fn native(value: &Self::Value) -> Option<BigDecimal> {
        value.clone()
    }

    fn from_native(native: BigDecimal) -> Self::Value {
        Some(native)
    }

    fn compare_native(a: &BigDecimal, b: &BigDecimal) -> Ordering {
        a.cmp(b)
    }

    // Normalized, so 2.0 and 2 share a key.
    fn key(value: &Self::Value) -> Self::Key {
        value.as_ref().map(BigDecimal::normalized)
    }

    fn to_numeric(value: &Self::Value) -> NumericCell {
        value.clone().map_or(NumericCell::Missing, NumericCell::Decimal)
    }

    fn coerce(input: &CellInput<'_>) -> Result<Self::Value, String> {
        match input {
            CellInput::Missing => Ok(None),
            CellInput::Text(s) => BigDecimal::from_str(s).map(Some).map_err(|e| e.to_string()),
            CellInput::Integer(v) => Ok(Some(BigDecimal::from(*v))),
            CellInput::Wide(v) => Ok(Some(BigDecimal::new(BigInt::from(*v), 0))),
            CellInput::BigInteger(v) => Ok(Some(BigDecimal::new(v.clone(), 0))),
            CellInput::Float(v) => float_to_decimal(v.is_finite(), v.to_string()).map(Some),
            CellInput::Float32(v) => float_to_decimal(v.is_finite(), v.to_string()).map(Some),
            CellInput::Decimal(v) => Ok(Some(v.clone())),
        }
    }

    fn crosses_precision_boundary(input: &CellInput<'_>) -> bool {
        input.is_floating()
    }
}

// Floats convert through their shortest round-trip text, keeping at least one fraction
// digit: 12.1 becomes exactly 12.1 and 2.0 becomes 2.0 (scale 1).
fn float_to_decimal(finite: bool, mut text: String) -> Result<BigDecimal, String> {
    if !finite {
        return Err("not a finite number".to_string());
    }
    if !text.contains('.') {
        text.push_str(".0");
    }
    BigDecimal::from_str(&text).map_err(|e| e.to_string())
}

impl ColumnType for DoubleType {
    type Value = f64;
    type Native = f64;
    type Key = u64;

    const KIND: ColumnKind = ColumnKind::Double;

    fn missing_value_indicator() -> f64 {
        DOUBLE_MISSING_VALUE
    }

    fn is_missing_value(value: &f64) -> bool {
        is_missing_double(value)
    }

    fn native(value: &f64) -> Option<f64> {
        (!value.is_nan()).then_some(*value)
    }

    fn from_native(native: f64) -> f64 {
        native
    }

    fn compare_native(a: &f64, b: &f64) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }

    fn key(value: &f64) -> u64 {
        if value.is_nan() {
            f64::NAN.to_bits()
        } else if *value == 0.0 {
            0.0_f64.to_bits()
        } else {
            value.to_bits()
        }
    }

    fn to_numeric(value: &f64) -> NumericCell {
        if value.is_nan() {
            NumericCell::Missing
        } else {
            NumericCell::Float(*value)
        }
    }

    fn coerce(input: &CellInput<'_>) -> Result<f64, String> {
        match input {
            CellInput::Missing => Ok(DOUBLE_MISSING_VALUE),
            CellInput::Text(s) => s.parse::<f64>().map_err(|e| e.to_string()),
            CellInput::Integer(v) => Ok(*v as f64),
            CellInput::Wide(v) => Ok(*v as f64),
            CellInput::BigInteger(v) => v
                .to_f64()
                .ok_or_else(|| "integer outside the double range".to_string()),
            CellInput::Float(v) => Ok(*v),
            CellInput::Float32(v) => v.to_string().parse::<f64>().map_err(|e| e.to_string()),
            CellInput::Decimal(v) => Ok(decimal_to_f64(v)),
        }
    }

    fn crosses_precision_boundary(input: &CellInput<'_>) -> bool {
        const EXACT: i64 = 1 << 53;
        match input {
            CellInput::Decimal(_) => true,
            CellInput::Integer(v) => v.unsigned_abs() > EXACT as u64,
            CellInput::Wide(v) => v.unsigned_abs() > EXACT as u128,
            CellInput::BigInteger(v) => v.bits() > 53,
            _ => false,
        }
    }
}

impl ColumnType for LongType {
    type Value = i64;
    type Native = i64;
    type Key = i64;

    const KIND: ColumnKind = ColumnKind::Long;

    fn missing_value_indicator() -> i64 {
        LONG_MISSING_VALUE
    }

    fn is_missing_value(value: &i64) -> bool {
        is_missing_long(value)
    }

    fn native(value: &i64) -> Option<i64> {
        (!is_missing_long(value)).then_some(*value)
    }

    fn from_native(native: i64) -> i64 {
        native
    }

    fn compare_native(a: &i64, b: &i64) -> Ordering {
        a.cmp(b)
    }

    fn key(value: &i64) -> i64 {
        *value
    }

    fn to_numeric(value: &i64) -> NumericCell {
        if is_missing_long(value) {
            NumericCell::Missing
        } else {
            NumericCell::Integer(*value)
        }
    }

    fn coerce(input: &CellInput<'_>) -> Result<i64, String> {
        let value = match input {
            CellInput::Missing => return Ok(LONG_MISSING_VALUE),
            CellInput::Text(s) => s.parse::<i64>().map_err(|e| e.to_string())?,
            CellInput::Integer(v) => *v,
            CellInput::Wide(v) => {
                i64::try_from(*v).map_err(|_| "integer outside the long range".to_string())?
            }
            CellInput::BigInteger(v) => v
                .to_i64()
                .ok_or_else(|| "integer outside the long range".to_string())?,
            CellInput::Float(v) => integral_f64_to_i64(*v)?,
            CellInput::Float32(v) => integral_f64_to_i64(f64::from(*v))?,
            CellInput::Decimal(v) => {
                if !v.is_integer() {
                    return Err("decimal has a fractional part".to_string());
                }
                v.to_i64()
                    .ok_or_else(|| "decimal outside the long range".to_string())?
            }
        };
        if is_missing_long(&value) {
            return Err("value is reserved as the missing indicator".to_string());
        }
        Ok(value)
    }
}

fn integral_f64_to_i64(v: f64) -> Result<i64, String> {
    // 2^63 as f64; `as` saturates, so check the range first.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !v.is_finite() || v.fract() != 0.0 {
        return Err("not an integral number".to_string());
    }
    if !(-LIMIT..LIMIT).contains(&v) {
        return Err("number outside the long range".to_string());
    }
    Ok(v as i64)
}
