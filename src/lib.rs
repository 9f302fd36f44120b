//! `rust-data-columns` is the typed column core beneath a tabular data-processing library: an
//! ordered, named sequence of domain values with first-class missing values.
//!
//! The primary type is [`column::Column`], generic over a [`domain::ColumnType`]:
//!
//! - [`column::DecimalColumn`]: arbitrary-precision decimals ([`bigdecimal::BigDecimal`]),
//!   missing is `None`
//! - [`column::DoubleColumn`]: `f64`, missing is `NaN`
//! - [`column::LongColumn`]: `i64`, missing is `i64::MIN`
//!
//! Every reserved missing indicator is documented in [`missing`].
//!
//! ## What a column does
//!
//! - **Parse**: every external value ([`types::CellInput`]: text, integers, floats, decimals)
//!   goes through one [`parser::ValueParser`]; malformed input is a [`ColumnError::Parse`] and
//!   never becomes a silent missing value.
//! - **Query**: comparisons and membership tests produce a [`selection::Selection`] of row
//!   indices.
//! - **Derive**: `copy`, `select`, `subset`, `unique`, `top`, `bottom`, `lag`, `lead`,
//!   `remove_missing` all return new, independent columns.
//! - **Mutate**: `set`, `set_missing`, `set_if`, `set_from`, `append*` change a column in place,
//!   all-or-nothing.
//!
//! ## Quick example
//!
//! ```rust
//! use rust_data_columns::column::{DecimalColumn, DoubleColumn};
//! use rust_data_columns::types::CellInput;
//!
//! # fn main() -> Result<(), rust_data_columns::ColumnError> {
//! let values: Vec<CellInput> = vec![
//!     1200.into(), CellInput::Missing, 3456.into(), 12.1.into(), 3456.4.into(),
//!     985.into(), 1211.9.into(), CellInput::Missing, 12.1.into(),
//! ];
//! let obs = DecimalColumn::create("values", values)?;
//!
//! assert_eq!(obs.top(3).get_string(0)?, "3456.4");
//! assert_eq!(obs.unique().size(), 7);
//! assert_eq!(obs.is_in([1200.0, 12.1])?.size(), 3);
//! assert!(obs.lag(1).is_missing(0)?);
//!
//! // Fill the gaps from another column, row by row.
//! let replacement = DoubleColumn::from_values(
//!     "replacement",
//!     vec![1200.0, 2.0, 3456.0, 12.1, 3456.4, 985.0, 1211.9, 8.0, 12.1],
//! );
//! let mut filled = obs.copy();
//! filled.set_if(|v| v.is_none(), &replacement)?;
//! assert_eq!(filled.get_string(7)?, "8.0");
//! assert_eq!(obs.count_missing(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`column`]: the typed column and its derived views
//! - [`domain`]: column domains (value type, ordering, coercion)
//! - [`missing`]: missing-value indicators per domain
//! - [`parser`]: value parsing and [`parser::ParserOptions`]
//! - [`selection`]: row selections
//! - [`processing`]: selection engine, mapping and reductions
//! - [`ranking`]: total ordering, top/bottom-k and sorting
//! - [`observability`]: column events and observers
//! - [`error`]: error types

pub mod column;
pub mod domain;
pub mod error;
pub mod missing;
pub mod observability;
pub mod parser;
pub mod processing;
pub mod ranking;
pub mod selection;
pub mod types;

pub use column::{Column, DecimalColumn, DoubleColumn, LongColumn};
pub use domain::{ColumnType, DecimalType, DoubleType, LongType};
pub use error::{ColumnError, ColumnResult};
pub use selection::Selection;
