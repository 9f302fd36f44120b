//! Value mapping for [`crate::column::Column`].

use crate::column::Column;
use crate::domain::ColumnType;

/// Returns a new column by applying `mapper` to every stored value.
///
/// This is a convenience wrapper around [`Column::map_values`].
pub fn map<T, F>(column: &Column<T>, mapper: F) -> Column<T>
where
    T: ColumnType,
    F: FnMut(T::Value) -> T::Value,
{
    column.map_values(mapper)
}

impl<T: ColumnType> Column<T> {
    /// Apply `mapper` to every stored value, missing indicators included.
    pub fn map_values<F>(&self, mapper: F) -> Self
    where
        F: FnMut(T::Value) -> T::Value,
    {
        self.derive(self.values.iter().cloned().map(mapper).collect())
    }

    /// Apply `mapper` to present values only; missing rows stay missing.
    pub fn map_present<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(T::Native) -> T::Native,
    {
        self.map_values(|v| match T::native(&v) {
            Some(x) => T::from_native(mapper(x)),
            None => v,
        })
    }
}
