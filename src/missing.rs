//! Missing-value indicators, one place for every domain.
//!
//! | domain  | stored as            | missing indicator       |
//! |---------|----------------------|-------------------------|
//! | decimal | `Option<BigDecimal>` | `None`                  |
//! | double  | `f64`                | `NaN` (any bit pattern) |
//! | long    | `i64`                | `i64::MIN`              |
//!
//! The decimal domain keeps "missing" out of band, so every decimal value is legitimate. The
//! double and long domains reserve an in-band value. Parsing never produces the long
//! indicator from a literal (see [`crate::domain::LongType`]); a `NaN` offered to a double
//! column *is* the missing value.

use bigdecimal::BigDecimal;

/// Missing indicator of the decimal domain.
pub const DECIMAL_MISSING_VALUE: Option<BigDecimal> = None;

/// Missing indicator of the double domain.
pub const DOUBLE_MISSING_VALUE: f64 = f64::NAN;

/// Missing indicator of the long domain.
pub const LONG_MISSING_VALUE: i64 = i64::MIN;

/// Default textual tokens that parse to the missing indicator.
pub const DEFAULT_MISSING_VALUE_STRINGS: &[&str] = &["", "NA", "N/A", "NaN", "null"];

pub(crate) fn is_missing_decimal(value: &Option<BigDecimal>) -> bool {
    value.is_none()
}

pub(crate) fn is_missing_double(value: &f64) -> bool {
    value.is_nan()
}

pub(crate) fn is_missing_long(value: &i64) -> bool {
    *value == LONG_MISSING_VALUE
}
