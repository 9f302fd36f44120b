//! The typed column.
//!
//! A [`Column`] is a named, ordered sequence of domain values where every slot is either a
//! well-formed value or the domain's missing indicator. Row order is insertion order.
//!
//! - Construction and mutation coerce every external value through [`ValueParser`].
//! - Derived views (`copy`, `select`, `subset`, `unique`, `top`, `lag`, ...) allocate new storage
//!   and never alias the source column.
//! - A column is not internally synchronized; concurrent mutation must be serialized by the
//!   caller.
//!
//! ## Example
//!
//! ```rust
//! use rust_data_columns::column::DecimalColumn;
//! use rust_data_columns::types::CellInput;
//!
//! let values: Vec<CellInput> = vec![1200.into(), CellInput::Missing, 3456.into(), 12.1.into()];
//! let mut col = DecimalColumn::create("values", values).unwrap();
//! assert_eq!(col.size(), 4);
//! assert_eq!(col.get_string(1).unwrap(), "");
//!
//! col.set(1, "-23.8").unwrap();
//! assert_eq!(col.get_string(1).unwrap(), "-23.8");
//! assert_eq!(col.is_greater_than(1000).unwrap().size(), 2);
//! ```

mod views;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{ColumnType, DecimalType, DoubleType, LongType};
use crate::error::{ColumnError, ColumnResult};
use crate::observability::{ColumnEvent, ColumnObserver};
use crate::parser::ValueParser;
use crate::types::{CellInput, ColumnKind, NumericCell};

/// Column of exact decimals; missing is `None`.
pub type DecimalColumn = Column<DecimalType>;
/// Column of doubles; missing is `NaN`.
pub type DoubleColumn = Column<DoubleType>;
/// Column of longs; missing is `i64::MIN`.
pub type LongColumn = Column<LongType>;

/// Named, owned, ordered sequence of values of domain `T`.
#[derive(Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct Column<T: ColumnType> {
    name: String,
    pub(crate) values: Vec<T::Value>,
    #[serde(skip)]
    observer: Option<Arc<dyn ColumnObserver>>,
    #[serde(skip)]
    _domain: PhantomData<T>,
}

impl<T: ColumnType> Column<T> {
    /// An empty column.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_values(name, Vec::new())
    }

    /// Wrap already-typed values (missing indicators included) without coercion.
    pub fn from_values(name: impl Into<String>, values: Vec<T::Value>) -> Self {
        Self {
            name: name.into(),
            values,
            observer: None,
            _domain: PhantomData,
        }
    }

    /// Create a column from heterogeneous inputs, each coerced with the default parser.
    ///
    /// Fails with [`ColumnError::Parse`] on the first input that does not fit the domain.
    pub fn create<'a, I>(name: impl Into<String>, values: I) -> ColumnResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<CellInput<'a>>,
    {
        let parser = T::default_parser();
        let values = values
            .into_iter()
            .map(|v| parser.parse(v.into()))
            .collect::<ColumnResult<Vec<_>>>()?;
        Ok(Self::from_values(name, values))
    }

    /// Attach an observer for column events.
    ///
    /// Derived columns share the observer.
    pub fn with_observer(mut self, observer: Arc<dyn ColumnObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The domain's missing indicator.
    pub fn missing_value_indicator() -> T::Value {
        T::missing_value_indicator()
    }

    /// Tests `value` against the missing indicator by value.
    pub fn is_missing_value(value: &T::Value) -> bool {
        T::is_missing_value(value)
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the column in place.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Domain of the column.
    pub fn kind(&self) -> ColumnKind {
        T::KIND
    }

    /// Number of rows, missing rows included.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Same as [`Column::size`].
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored values in row order.
    pub fn values(&self) -> &[T::Value] {
        &self.values
    }

    /// Owned values in row order.
    pub fn iter(&self) -> impl Iterator<Item = T::Value> + '_ {
        self.values.iter().cloned()
    }

    /// Value at `row`; may be the missing indicator.
    pub fn get(&self, row: usize) -> ColumnResult<T::Value> {
        self.check_row(row)?;
        Ok(self.values[row].clone())
    }

    /// Value at `row`, `None` when missing.
    pub fn get_native(&self, row: usize) -> ColumnResult<Option<T::Native>> {
        self.get(row).map(|v| T::native(&v))
    }

    /// Returns `true` if `row` holds the missing indicator.
    pub fn is_missing(&self, row: usize) -> ColumnResult<bool> {
        self.get(row).map(|v| T::is_missing_value(&v))
    }

    /// Text of the value at `row`; a missing slot renders as an empty string.
    pub fn get_string(&self, row: usize) -> ColumnResult<String> {
        Ok(self
            .get_native(row)?
            .map(|v| v.to_string())
            .unwrap_or_default())
    }

    /// Same as [`Column::get_string`]; columns carry no print formatter.
    pub fn get_unformatted_string(&self, row: usize) -> ColumnResult<String> {
        self.get_string(row)
    }

    /// Nearest double to the value at `row`.
    ///
    /// Missing slots return `NaN` in every domain; use [`Column::is_missing`] to tell a
    /// missing slot from a stored `NaN`.
    pub fn get_double(&self, row: usize) -> ColumnResult<f64> {
        self.numeric_cell(row).map(|c| c.to_f64())
    }

    /// Native numeric representation of the value at `row`.
    pub fn numeric_cell(&self, row: usize) -> ColumnResult<NumericCell> {
        self.get(row).map(|v| T::to_numeric(&v))
    }

    /// Replace the value at `row`, coercing `value` with the default parser.
    ///
    /// On error the slot keeps its previous value.
    pub fn set<'a>(&mut self, row: usize, value: impl Into<CellInput<'a>>) -> ColumnResult<&mut Self> {
        self.set_with(row, value.into(), &T::default_parser())
    }

    /// Parse `text` with `parser` and store it at `row`.
    pub fn set_parsed(
        &mut self,
        row: usize,
        text: &str,
        parser: &ValueParser<T>,
    ) -> ColumnResult<&mut Self> {
        self.set_with(row, CellInput::Text(text), parser)
    }

    /// Store the missing indicator at `row`. Idempotent.
    pub fn set_missing(&mut self, row: usize) -> ColumnResult<&mut Self> {
        self.check_row(row)?;
        self.values[row] = T::missing_value_indicator();
        Ok(self)
    }

    /// Copy one cell from another numeric column, converting through its native numeric
    /// representation.
    pub fn set_from<S: ColumnType>(
        &mut self,
        row: usize,
        source: &Column<S>,
        source_row: usize,
    ) -> ColumnResult<&mut Self> {
        let cell = source.numeric_cell(source_row)?;
        self.set_with(row, CellInput::from(cell), &T::default_parser())
    }

    /// For every row whose current value satisfies `predicate`, take the value at the same
    /// row of `source`.
    ///
    /// The predicate sees the values as they were before the call. `source` must have at
    /// least [`Column::size`] rows. Either every matching row is replaced or, on error, none is.
    pub fn set_if<S, P>(&mut self, mut predicate: P, source: &Column<S>) -> ColumnResult<&mut Self>
    where
        S: ColumnType,
        P: FnMut(&T::Value) -> bool,
    {
        if source.size() < self.size() {
            return Err(ColumnError::SourceTooShort {
                column: self.name.clone(),
                source_column: source.name().to_string(),
                required: self.size(),
                actual: source.size(),
            });
        }

        let parser = T::default_parser();
        let mut replaced = self.values.clone();
        let mut crossed = Vec::new();
        let mut count = 0usize;
        for (row, slot) in replaced.iter_mut().enumerate() {
            if !predicate(&self.values[row]) {
                continue;
            }
            let input = CellInput::from(S::to_numeric(&source.values[row]));
            let boundary = T::crosses_precision_boundary(&input).then(|| input.raw());
            let value = match parser.parse(input) {
                Ok(v) => v,
                Err(err) => {
                    self.emit_rejected(row, &err);
                    return Err(err);
                }
            };
            if let Some(raw) = boundary.filter(|_| !T::is_missing_value(&value)) {
                crossed.push((row, raw));
            }
            *slot = value;
            count += 1;
        }

        self.values = replaced;
        for (row, input) in crossed {
            self.emit(ColumnEvent::PrecisionBoundary {
                column: self.name.clone(),
                row,
                input,
            });
        }
        self.emit(ColumnEvent::BulkAssigned {
            column: self.name.clone(),
            rows: count,
        });
        Ok(self)
    }

    /// Append one value, coerced with the default parser. Size grows by exactly one.
    pub fn append<'a>(&mut self, value: impl Into<CellInput<'a>>) -> ColumnResult<&mut Self> {
        self.append_with(value.into(), &T::default_parser())
    }

    /// Parse `text` with `parser` and append it.
    pub fn append_parsed(&mut self, text: &str, parser: &ValueParser<T>) -> ColumnResult<&mut Self> {
        self.append_with(CellInput::Text(text), parser)
    }

    /// Append the missing indicator.
    pub fn append_missing(&mut self) -> &mut Self {
        self.values.push(T::missing_value_indicator());
        self
    }

    /// Append one cell of another numeric column.
    pub fn append_from<S: ColumnType>(
        &mut self,
        source: &Column<S>,
        source_row: usize,
    ) -> ColumnResult<&mut Self> {
        let cell = source.numeric_cell(source_row)?;
        self.append_with(CellInput::from(cell), &T::default_parser())
    }

    /// Append every cell of `source`. Nothing is appended if any cell fails to convert.
    pub fn append_column<S: ColumnType>(&mut self, source: &Column<S>) -> ColumnResult<&mut Self> {
        let parser = T::default_parser();
        let start = self.size();
        let mut converted = Vec::with_capacity(source.size());
        for (offset, v) in source.values.iter().enumerate() {
            let input = CellInput::from(S::to_numeric(v));
            let boundary = T::crosses_precision_boundary(&input).then(|| input.raw());
            match parser.parse(input) {
                Ok(value) => converted.push((value, boundary)),
                Err(err) => {
                    self.emit_rejected(start + offset, &err);
                    return Err(err);
                }
            }
        }
        for (offset, (value, boundary)) in converted.into_iter().enumerate() {
            if let Some(raw) = boundary.filter(|_| !T::is_missing_value(&value)) {
                self.emit(ColumnEvent::PrecisionBoundary {
                    column: self.name.clone(),
                    row: start + offset,
                    input: raw,
                });
            }
            self.values.push(value);
        }
        Ok(self)
    }

    /// Full independent duplicate.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Same name, domain and observer, no rows.
    pub fn empty_copy(&self) -> Self {
        self.derive(Vec::new())
    }

    /// Materialize every row, `None` for missing slots.
    pub fn as_object_array(&self) -> Vec<Option<T::Native>> {
        self.values.iter().map(T::native).collect()
    }

    /// Materialize every stored value, missing indicators included.
    pub fn as_domain_value_array(&self) -> Vec<T::Value> {
        self.values.clone()
    }

    pub(crate) fn derive(&self, values: Vec<T::Value>) -> Self {
        Self {
            name: self.name.clone(),
            values,
            observer: self.observer.clone(),
            _domain: PhantomData,
        }
    }

    pub(crate) fn check_row(&self, row: usize) -> ColumnResult<()> {
        if row < self.values.len() {
            Ok(())
        } else {
            Err(ColumnError::IndexOutOfBounds {
                column: self.name.clone(),
                index: row,
                size: self.values.len(),
            })
        }
    }

    /// Coerce `input` for `row`, reporting to the observer.
    pub(crate) fn coerce_for(
        &self,
        row: usize,
        input: CellInput<'_>,
        parser: &ValueParser<T>,
    ) -> ColumnResult<T::Value> {
        let boundary = T::crosses_precision_boundary(&input).then(|| input.raw());
        match parser.parse(input) {
            Ok(value) => {
                if let Some(raw) = boundary.filter(|_| !T::is_missing_value(&value)) {
                    self.emit(ColumnEvent::PrecisionBoundary {
                        column: self.name.clone(),
                        row,
                        input: raw,
                    });
                }
                Ok(value)
            }
            Err(err) => {
                self.emit_rejected(row, &err);
                Err(err)
            }
        }
    }

    fn set_with(
        &mut self,
        row: usize,
        input: CellInput<'_>,
        parser: &ValueParser<T>,
    ) -> ColumnResult<&mut Self> {
        self.check_row(row)?;
        let value = self.coerce_for(row, input, parser)?;
        self.values[row] = value;
        Ok(self)
    }

    fn append_with(&mut self, input: CellInput<'_>, parser: &ValueParser<T>) -> ColumnResult<&mut Self> {
        let value = self.coerce_for(self.values.len(), input, parser)?;
        self.values.push(value);
        Ok(self)
    }

    fn emit(&self, event: ColumnEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }

    fn emit_rejected(&self, row: usize, err: &ColumnError) {
        self.emit(ColumnEvent::ParseRejected {
            column: self.name.clone(),
            row,
            error: err.to_string(),
        });
    }
}

impl<T: ColumnType> Clone for Column<T> {
    fn clone(&self) -> Self {
        self.derive(self.values.clone())
    }
}

/// Columns are equal when names match and every pair of cells has the same domain key, so
/// missing equals missing.
impl<T: ColumnType> PartialEq for Column<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| T::key(a) == T::key(b))
    }
}

impl<T: ColumnType> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("kind", &T::KIND)
            .field("values", &self.values)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl<'a, T: ColumnType> IntoIterator for &'a Column<T> {
    type Item = T::Value;
    type IntoIter = std::iter::Cloned<std::slice::Iter<'a, T::Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter().cloned()
    }
}
