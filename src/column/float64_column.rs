use std::sync::Arc;

use crate::column::common::{utils, ColumnTrait, ColumnType};
use crate::error::{Error, Result};

/// Structure representing a Float64 column.
///
/// A cell is missing when its null bit is set or when it holds NaN.
#[derive(Debug, Clone)]
pub struct Float64Column {
    pub(crate) data: Arc<[f64]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
}

impl Float64Column {
    /// Create a new Float64Column
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    /// Create a Float64Column with NULL values
    pub fn with_nulls(data: Vec<f64>, nulls: Vec<bool>) -> Result<Self> {
        if data.len() != nulls.len() {
            return Err(Error::LengthMismatch {
                expected: data.len(),
                actual: nulls.len(),
            });
        }
        Ok(Self {
            data: data.into(),
            null_mask: utils::create_bitmask(&nulls),
        })
    }

    /// Create a Float64Column from optional values
    pub fn from_options(values: Vec<Option<f64>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
        let data: Vec<f64> = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        Self {
            data: data.into(),
            null_mask: utils::create_bitmask(&nulls),
        }
    }

    /// Get data at the specified index
    pub fn get(&self, index: usize) -> Result<Option<f64>> {
        if index >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            });
        }

        if self.is_null(index) {
            return Ok(None);
        }

        Ok(Some(self.data[index]))
    }

    /// Iterate over cells, `None` for NULL or NaN
    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.data.len()).map(move |i| (!self.is_null(i)).then(|| self.data[i]))
    }

    /// Calculate the sum of data (excluding NULL values)
    pub fn sum(&self) -> f64 {
        self.iter().flatten().sum()
    }

    /// Calculate the mean (average) of data (excluding NULL values)
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .iter()
            .flatten()
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Calculate the minimum value of data (excluding NULL values)
    pub fn min(&self) -> Option<f64> {
        self.iter()
            .flatten()
            .fold(None, |min, x| Some(min.map_or(x, |m: f64| m.min(x))))
    }

    /// Calculate the maximum value of data (excluding NULL values)
    pub fn max(&self) -> Option<f64> {
        self.iter()
            .flatten()
            .fold(None, |max, x| Some(max.map_or(x, |m: f64| m.max(x))))
    }

    pub(crate) fn take(&self, indices: &[Option<usize>]) -> Self {
        let (data, nulls) = utils::gather(&self.data, &self.null_mask, indices, f64::NAN);
        Self {
            data: data.into(),
            null_mask: utils::create_bitmask(&nulls),
        }
    }
}

impl ColumnTrait for Float64Column {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Float64
    }

    fn is_null(&self, index: usize) -> bool {
        utils::is_set(&self.null_mask, index) || self.data[index].is_nan()
    }
}

// Missing cells compare equal whatever payload they store
impl PartialEq for Float64Column {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}
