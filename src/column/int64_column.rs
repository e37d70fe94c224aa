use std::sync::Arc;

use crate::column::common::{utils, ColumnTrait, ColumnType};
use crate::error::{Error, Result};

/// Structure representing an Int64 column
#[derive(Debug, Clone, PartialEq)]
pub struct Int64Column {
    pub(crate) data: Arc<[i64]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
}

impl Int64Column {
    /// Create a new Int64Column
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    /// Create an Int64Column with NULL values
    pub fn with_nulls(data: Vec<i64>, nulls: Vec<bool>) -> Result<Self> {
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

    /// Create an Int64Column from optional values
    pub fn from_options(values: Vec<Option<i64>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
        let data: Vec<i64> = values.into_iter().map(|v| v.unwrap_or_default()).collect();
        Self {
            data: data.into(),
            null_mask: utils::create_bitmask(&nulls),
        }
    }

    /// Get data at the specified index
    pub fn get(&self, index: usize) -> Result<Option<i64>> {
        if index >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            });
        }

        if utils::is_set(&self.null_mask, index) {
            return Ok(None);
        }

        Ok(Some(self.data[index]))
    }

    /// Iterate over cells, `None` for NULL
    pub fn iter(&self) -> impl Iterator<Item = Option<i64>> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (!utils::is_set(&self.null_mask, i)).then_some(v))
    }

    /// Calculate the sum of data (excluding NULL values)
    pub fn sum(&self) -> i64 {
        self.iter().flatten().sum()
    }

    /// Calculate the mean (average) of data (excluding NULL values)
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .iter()
            .flatten()
            .fold((0i64, 0usize), |(s, c), v| (s + v, c + 1));
        (count > 0).then(|| sum as f64 / count as f64)
    }

    /// Calculate the minimum value of data (excluding NULL values)
    pub fn min(&self) -> Option<i64> {
        self.iter().flatten().min()
    }

    /// Calculate the maximum value of data (excluding NULL values)
    pub fn max(&self) -> Option<i64> {
        self.iter().flatten().max()
    }

    pub(crate) fn take(&self, indices: &[Option<usize>]) -> Self {
        let (data, nulls) = utils::gather(&self.data, &self.null_mask, indices, 0);
        Self {
            data: data.into(),
            null_mask: utils::create_bitmask(&nulls),
        }
    }
}

impl ColumnTrait for Int64Column {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Int64
    }

    fn is_null(&self, index: usize) -> bool {
        utils::is_set(&self.null_mask, index)
    }
}
