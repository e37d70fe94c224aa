//! Element-wise expressions over columns: predicates, arithmetic and string
//! manipulation used to derive new columns.

use std::cmp::Ordering;

use crate::column::common::{Column, ColumnType};
use crate::column::value::{CompareOp, Value};
use crate::column::{BooleanColumn, Float64Column, Int64Column, StringColumn};
use crate::error::{Error, Result};

/// Arithmetic operators for derived columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }

    fn apply_f64(&self, a: f64, b: f64) -> f64 {
        match self {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
        }
    }

    fn apply_i64(&self, a: i64, b: i64) -> Option<i64> {
        match self {
            ArithOp::Add => a.checked_add(b),
            ArithOp::Sub => a.checked_sub(b),
            ArithOp::Mul => a.checked_mul(b),
            ArithOp::Div => None,
        }
    }
}

/// Numeric cells of one operand, broadcast to the row count
enum NumericCells {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
}

impl NumericCells {
    fn from_column(column: &Column, op: ArithOp) -> Result<Self> {
        match column {
            Column::Int64(col) => Ok(NumericCells::Int(col.iter().collect())),
            Column::Float64(col) => Ok(NumericCells::Float(col.iter().collect())),
            other => Err(Error::Type(format!(
                "operator '{}' is not defined for {} columns",
                op.symbol(),
                other.column_type()
            ))),
        }
    }

    fn from_scalar(value: &Value, len: usize, op: ArithOp) -> Result<Self> {
        match value {
            Value::Int64(v) => Ok(NumericCells::Int(vec![Some(*v); len])),
            Value::Float64(v) => Ok(NumericCells::Float(vec![Some(*v); len])),
            Value::Null => Ok(NumericCells::Float(vec![None; len])),
            other => Err(Error::Type(format!(
                "operator '{}' is not defined for {} operands",
                op.symbol(),
                other.type_name()
            ))),
        }
    }

    fn into_f64(self) -> Vec<Option<f64>> {
        match self {
            NumericCells::Int(v) => v.into_iter().map(|c| c.map(|x| x as f64)).collect(),
            NumericCells::Float(v) => v,
        }
    }
}

fn combine(lhs: NumericCells, rhs: NumericCells, op: ArithOp) -> Result<Column> {
    match (lhs, rhs) {
        (NumericCells::Int(a), NumericCells::Int(b)) if op != ArithOp::Div => {
            let mut out = Vec::with_capacity(a.len());
            for (x, y) in a.into_iter().zip(b) {
                let cell = match (x, y) {
                    (Some(x), Some(y)) => Some(op.apply_i64(x, y).ok_or_else(|| {
                        Error::InvalidValue(format!("integer overflow in {} {} {}", x, op.symbol(), y))
                    })?),
                    _ => None,
                };
                out.push(cell);
            }
            Ok(Column::Int64(Int64Column::from_options(out)))
        }
        (a, b) => {
            let out: Vec<Option<f64>> = a
                .into_f64()
                .into_iter()
                .zip(b.into_f64())
                .map(|(x, y)| match (x, y) {
                    (Some(x), Some(y)) => Some(op.apply_f64(x, y)),
                    _ => None,
                })
                .collect();
            Ok(Column::Float64(Float64Column::from_options(out)))
        }
    }
}

impl Column {
    /// Element-wise arithmetic between two numeric columns.
    ///
    /// Integer operands stay integer except for division, which always
    /// yields floats. A missing operand yields a missing result.
    pub fn arith(&self, op: ArithOp, other: &Column) -> Result<Column> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        let lhs = NumericCells::from_column(self, op)?;
        let rhs = NumericCells::from_column(other, op)?;
        combine(lhs, rhs, op)
    }

    /// Element-wise arithmetic against a scalar right-hand side
    pub fn arith_scalar(&self, op: ArithOp, value: impl Into<Value>) -> Result<Column> {
        let lhs = NumericCells::from_column(self, op)?;
        let rhs = NumericCells::from_scalar(&value.into(), self.len(), op)?;
        combine(lhs, rhs, op)
    }

    pub fn add(&self, other: &Column) -> Result<Column> {
        self.arith(ArithOp::Add, other)
    }

    pub fn sub(&self, other: &Column) -> Result<Column> {
        self.arith(ArithOp::Sub, other)
    }

    pub fn mul(&self, other: &Column) -> Result<Column> {
        self.arith(ArithOp::Mul, other)
    }

    pub fn div(&self, other: &Column) -> Result<Column> {
        self.arith(ArithOp::Div, other)
    }

    /// Compares every cell against `value`. Missing cells compare false.
    pub fn compare(&self, op: CompareOp, value: impl Into<Value>) -> Result<BooleanColumn> {
        let value = value.into();
        if value.is_null() {
            return Ok(BooleanColumn::new(vec![false; self.len()]));
        }

        let mismatch = || {
            Error::Type(format!(
                "cannot compare {} column with {} value",
                self.column_type(),
                value.type_name()
            ))
        };

        let flags: Vec<bool> = match (self, &value) {
            (Column::Int64(col), Value::Int64(v)) => col
                .iter()
                .map(|c| c.map_or(false, |x| op.test(x.cmp(v))))
                .collect(),
            (Column::Int64(col), Value::Float64(v)) => col
                .iter()
                .map(|c| c.map_or(false, |x| float_test(op, x as f64, *v)))
                .collect(),
            (Column::Float64(col), _) => {
                let v = value.as_f64().ok_or_else(mismatch)?;
                col.iter()
                    .map(|c| c.map_or(false, |x| float_test(op, x, v)))
                    .collect()
            }
            (Column::String(col), Value::String(v)) => col
                .iter()
                .map(|c| c.map_or(false, |x| op.test(x.cmp(&v.as_str()))))
                .collect(),
            (Column::Boolean(col), Value::Boolean(v)) => col
                .iter()
                .map(|c| c.map_or(false, |x| op.test(x.cmp(v))))
                .collect(),
            _ => return Err(mismatch()),
        };

        Ok(BooleanColumn::new(flags))
    }

    pub fn lt(&self, value: impl Into<Value>) -> Result<BooleanColumn> {
        self.compare(CompareOp::Lt, value)
    }

    pub fn le(&self, value: impl Into<Value>) -> Result<BooleanColumn> {
        self.compare(CompareOp::Le, value)
    }

    pub fn gt(&self, value: impl Into<Value>) -> Result<BooleanColumn> {
        self.compare(CompareOp::Gt, value)
    }

    pub fn ge(&self, value: impl Into<Value>) -> Result<BooleanColumn> {
        self.compare(CompareOp::Ge, value)
    }

    pub fn equal(&self, value: impl Into<Value>) -> Result<BooleanColumn> {
        self.compare(CompareOp::Eq, value)
    }

    pub fn not_equal(&self, value: impl Into<Value>) -> Result<BooleanColumn> {
        self.compare(CompareOp::Ne, value)
    }

    /// Membership test; the disjunction of `equal` over every candidate
    pub fn is_in(&self, candidates: &[Value]) -> Result<BooleanColumn> {
        let mut mask = BooleanColumn::new(vec![false; self.len()]);
        for candidate in candidates {
            mask = mask.or(&self.equal(candidate.clone())?)?;
        }
        Ok(mask)
    }

    /// Concatenates two string columns cell by cell with `sep` in between
    pub fn str_cat(&self, other: &Column, sep: &str) -> Result<Column> {
        let (lhs, rhs) = match (self, other) {
            (Column::String(a), Column::String(b)) => (a, b),
            _ => {
                return Err(Error::Type(format!(
                    "string concatenation needs string columns, found {} and {}",
                    self.column_type(),
                    other.column_type()
                )))
            }
        };
        if lhs.data.len() != rhs.data.len() {
            return Err(Error::LengthMismatch {
                expected: lhs.data.len(),
                actual: rhs.data.len(),
            });
        }
        let joined: Vec<Option<String>> = lhs
            .iter()
            .zip(rhs.iter())
            .map(|(a, b)| Some(format!("{}{}{}", a?, sep, b?)))
            .collect();
        Ok(Column::String(StringColumn::from_options(joined)))
    }

    /// Splits every string on `sep` and spreads the parts over new columns.
    ///
    /// Produces as many columns as the longest split; shorter rows are
    /// padded with missing cells.
    pub fn str_split(&self, sep: &str) -> Result<Vec<Column>> {
        let col = self.as_string().ok_or_else(|| {
            Error::Type(format!(
                "string split needs a string column, found {}",
                self.column_type()
            ))
        })?;
        if sep.is_empty() {
            return Err(Error::InvalidValue("separator must not be empty".to_string()));
        }

        let rows: Vec<Option<Vec<&str>>> = col
            .iter()
            .map(|cell| cell.map(|s| s.split(sep).collect()))
            .collect();
        let width = rows
            .iter()
            .flatten()
            .map(Vec::len)
            .max()
            .unwrap_or(1);

        let columns = (0..width)
            .map(|part| {
                let cells: Vec<Option<String>> = rows
                    .iter()
                    .map(|row| row.as_ref().and_then(|p| p.get(part)).map(|s| s.to_string()))
                    .collect();
                Column::String(StringColumn::from_options(cells))
            })
            .collect();
        Ok(columns)
    }
}

fn float_test(op: CompareOp, a: f64, b: f64) -> bool {
    match a.partial_cmp(&b) {
        Some(ordering) => op.test(ordering),
        None => false,
    }
}

/// Orders two cells of the same column for sorting; `None` if either is missing
pub(crate) fn cell_ordering(column: &Column, a: usize, b: usize) -> Option<Ordering> {
    match column {
        Column::Int64(col) => Some(col.get(a).ok()??.cmp(&col.get(b).ok()??)),
        Column::Float64(col) => col.get(a).ok()??.partial_cmp(&col.get(b).ok()??),
        Column::String(col) => Some(col.get(a).ok()??.cmp(&col.get(b).ok()??)),
        Column::Boolean(col) => Some(col.get(a).ok()??.cmp(&col.get(b).ok()??)),
        Column::Geometry(_) => None,
    }
}

/// Whether sorting is defined for the column type
pub(crate) fn is_orderable(column_type: ColumnType) -> bool {
    !matches!(column_type, ColumnType::Geometry)
}
