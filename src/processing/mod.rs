//! Column processing: selections, mapping and reductions.
//!
//! Currently implemented:
//!
//! - [`filter()`] and the comparison / membership queries on [`crate::column::Column`]
//!   (`is_greater_than`, `is_in`, `is_not_in`, ...), all producing a
//!   [`crate::selection::Selection`]
//! - [`map()`]: value mapping by user function
//! - [`reduce()`]: common reductions (count/sum/min/max/mean)
//!
//! ## Example: select → project → reduce
//!
//! ```rust
//! use rust_data_columns::column::DoubleColumn;
//! use rust_data_columns::processing::{reduce, ReduceOp};
//! use rust_data_columns::types::NumericCell;
//!
//! let col = DoubleColumn::from_values("score", vec![10.0, f64::NAN, 20.0, 5.0]);
//!
//! // Keep rows scoring at least 10.
//! let rows = col.is_greater_than_or_equal_to(10.0).unwrap();
//! let high = col.select(&rows).unwrap();
//!
//! // Sum scores (missing ignored).
//! assert_eq!(reduce(&high, ReduceOp::Sum).unwrap(), NumericCell::Float(30.0));
//! ```

pub mod filter;
pub mod map;
pub mod reduce;

pub use filter::filter;
pub use map::map;
pub use reduce::{ReduceOp, reduce};
