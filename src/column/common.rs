use std::fmt;
use std::sync::Arc;

use crate::column::{BooleanColumn, Float64Column, GeometryColumn, Int64Column, StringColumn};
use crate::column::value::{KeyPart, Value};
use crate::error::{Error, Result};

/// Element type carried by a column, fixed when the column is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int64,
    Float64,
    String,
    Boolean,
    Geometry,
}

impl ColumnType {
    /// Whether arithmetic and sums are defined for this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int64 | ColumnType::Float64)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::String => "string",
            ColumnType::Boolean => "bool",
            ColumnType::Geometry => "geometry",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Behaviour shared by every typed column
pub trait ColumnTrait {
    /// Number of rows
    fn len(&self) -> usize;

    /// Whether the column has no rows
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type
    fn column_type(&self) -> ColumnType;

    /// Whether the cell at `index` holds no value
    fn is_null(&self, index: usize) -> bool;

    /// Number of missing cells
    fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_null(i)).count()
    }
}

/// Enum representing a column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int64(Int64Column),
    Float64(Float64Column),
    String(StringColumn),
    Boolean(BooleanColumn),
    Geometry(GeometryColumn),
}

/// Utility functions for null bitmasks
pub mod utils {
    use super::*;

    /// Builds a bitmask from per-row null flags, or `None` when nothing is null
    pub fn create_bitmask(nulls: &[bool]) -> Option<Arc<[u8]>> {
        if !nulls.iter().any(|&is_null| is_null) {
            return None;
        }

        let bytes_needed = (nulls.len() + 7) / 8;
        let mut data = vec![0u8; bytes_needed];

        for (i, &is_null) in nulls.iter().enumerate() {
            if is_null {
                data[i / 8] |= 1 << (i % 8);
            }
        }

        Some(data.into())
    }

    /// Checks a bit in an optional bitmask
    #[inline]
    pub fn is_set(mask: &Option<Arc<[u8]>>, index: usize) -> bool {
        match mask {
            Some(mask) => {
                let byte_idx = index / 8;
                byte_idx < mask.len() && (mask[byte_idx] & (1 << (index % 8))) != 0
            }
            None => false,
        }
    }

    /// Gathers values by optional position; `None` positions become nulls
    pub fn gather<T: Clone>(
        data: &[T],
        mask: &Option<Arc<[u8]>>,
        indices: &[Option<usize>],
        fill: T,
    ) -> (Vec<T>, Vec<bool>) {
        let mut values = Vec::with_capacity(indices.len());
        let mut nulls = Vec::with_capacity(indices.len());
        for idx in indices {
            match idx {
                Some(i) if !is_set(mask, *i) => {
                    values.push(data[*i].clone());
                    nulls.push(false);
                }
                _ => {
                    values.push(fill.clone());
                    nulls.push(true);
                }
            }
        }
        (values, nulls)
    }
}

macro_rules! each_column {
    ($column:expr, $col:ident => $body:expr) => {
        match $column {
            Column::Int64($col) => $body,
            Column::Float64($col) => $body,
            Column::String($col) => $body,
            Column::Boolean($col) => $body,
            Column::Geometry($col) => $body,
        }
    };
}

macro_rules! map_column {
    ($column:expr, $col:ident => $body:expr) => {
        match $column {
            Column::Int64($col) => Column::Int64($body),
            Column::Float64($col) => Column::Float64($body),
            Column::String($col) => Column::String($body),
            Column::Boolean($col) => Column::Boolean($body),
            Column::Geometry($col) => Column::Geometry($body),
        }
    };
}

// Column enum implementation
impl Column {
    /// Returns the length of the column
    pub fn len(&self) -> usize {
        each_column!(self, col => col.len())
    }

    /// Returns whether the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the type of the column
    pub fn column_type(&self) -> ColumnType {
        each_column!(self, col => col.column_type())
    }

    /// Whether the cell at `index` is missing
    pub fn is_null(&self, index: usize) -> bool {
        each_column!(self, col => col.is_null(index))
    }

    /// Number of missing cells
    pub fn null_count(&self) -> usize {
        each_column!(self, col => col.null_count())
    }

    /// Number of non-missing cells
    pub fn count(&self) -> usize {
        self.len() - self.null_count()
    }

    /// Reads one cell
    pub fn get(&self, index: usize) -> Result<Value> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        let value = match self {
            Column::Int64(col) => col.get(index)?.map(Value::Int64),
            Column::Float64(col) => col.get(index)?.map(Value::Float64),
            Column::String(col) => col.get(index)?.map(|s| Value::String(s.to_string())),
            Column::Boolean(col) => col.get(index)?.map(Value::Boolean),
            Column::Geometry(col) => col.get(index)?.cloned().map(Value::Geometry),
        };
        Ok(value.unwrap_or(Value::Null))
    }

    /// Selects rows by position, in the given order
    pub fn take(&self, indices: &[usize]) -> Result<Self> {
        let len = self.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(Error::IndexOutOfBounds {
                index: bad,
                size: len,
            });
        }
        let optional: Vec<Option<usize>> = indices.iter().map(|&i| Some(i)).collect();
        Ok(self.take_optional(&optional))
    }

    /// Selects rows by position where `None` produces a missing cell.
    ///
    /// Positions must be in range; callers validate them.
    pub(crate) fn take_optional(&self, indices: &[Option<usize>]) -> Self {
        map_column!(self, col => col.take(indices))
    }

    /// Builds an all-missing column of the given type
    pub fn nulls(column_type: ColumnType, len: usize) -> Self {
        let indices = vec![None; len];
        match column_type {
            ColumnType::Int64 => Column::Int64(Int64Column::new(Vec::new()).take(&indices)),
            ColumnType::Float64 => Column::Float64(Float64Column::new(Vec::new()).take(&indices)),
            ColumnType::String => Column::String(StringColumn::new(Vec::new()).take(&indices)),
            ColumnType::Boolean => Column::Boolean(BooleanColumn::new(Vec::new()).take(&indices)),
            ColumnType::Geometry => {
                Column::Geometry(GeometryColumn::new(Vec::new()).take(&indices))
            }
        }
    }

    /// Hashable grouping/join key for one cell
    pub(crate) fn key_at(&self, index: usize) -> Result<KeyPart> {
        if self.is_null(index) {
            return Ok(KeyPart::Null);
        }
        let key = match self {
            Column::Int64(col) => KeyPart::Int(col.data[index]),
            Column::Float64(col) => KeyPart::from_f64(col.data[index]),
            Column::String(col) => KeyPart::Str(col.data[index].clone()),
            Column::Boolean(col) => KeyPart::Bool(col.data[index]),
            Column::Geometry(_) => {
                return Err(Error::Type(
                    "geometry values cannot be used as keys".to_string(),
                ))
            }
        };
        Ok(key)
    }

    /// Casts to Int64Column
    pub fn as_int64(&self) -> Option<&Int64Column> {
        match self {
            Column::Int64(col) => Some(col),
            _ => None,
        }
    }

    /// Casts to Float64Column
    pub fn as_float64(&self) -> Option<&Float64Column> {
        match self {
            Column::Float64(col) => Some(col),
            _ => None,
        }
    }

    /// Casts to StringColumn
    pub fn as_string(&self) -> Option<&StringColumn> {
        match self {
            Column::String(col) => Some(col),
            _ => None,
        }
    }

    /// Casts to BooleanColumn
    pub fn as_boolean(&self) -> Option<&BooleanColumn> {
        match self {
            Column::Boolean(col) => Some(col),
            _ => None,
        }
    }

    /// Casts to GeometryColumn
    pub fn as_geometry(&self) -> Option<&GeometryColumn> {
        match self {
            Column::Geometry(col) => Some(col),
            _ => None,
        }
    }
}

// From implementations for type conversion
impl From<Int64Column> for Column {
    fn from(col: Int64Column) -> Self {
        Column::Int64(col)
    }
}

impl From<Float64Column> for Column {
    fn from(col: Float64Column) -> Self {
        Column::Float64(col)
    }
}

impl From<StringColumn> for Column {
    fn from(col: StringColumn) -> Self {
        Column::String(col)
    }
}

impl From<BooleanColumn> for Column {
    fn from(col: BooleanColumn) -> Self {
        Column::Boolean(col)
    }
}

impl From<GeometryColumn> for Column {
    fn from(col: GeometryColumn) -> Self {
        Column::Geometry(col)
    }
}

impl From<Vec<i64>> for Column {
    fn from(data: Vec<i64>) -> Self {
        Column::Int64(Int64Column::new(data))
    }
}

impl From<Vec<f64>> for Column {
    fn from(data: Vec<f64>) -> Self {
        Column::Float64(Float64Column::new(data))
    }
}

impl From<Vec<String>> for Column {
    fn from(data: Vec<String>) -> Self {
        Column::String(StringColumn::new(data))
    }
}

impl From<Vec<&str>> for Column {
    fn from(data: Vec<&str>) -> Self {
        Column::String(StringColumn::from_strs(&data))
    }
}

impl From<Vec<bool>> for Column {
    fn from(data: Vec<bool>) -> Self {
        Column::Boolean(BooleanColumn::new(data))
    }
}
