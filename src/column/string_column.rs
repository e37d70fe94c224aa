use std::sync::Arc;

use crate::column::common::{utils, ColumnTrait, ColumnType};
use crate::error::{Error, Result};

/// Structure representing a string column
#[derive(Debug, Clone, PartialEq)]
pub struct StringColumn {
    pub(crate) data: Arc<[String]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
}

impl StringColumn {
    /// Create a new StringColumn from a vector of strings
    pub fn new(data: Vec<String>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    /// Create a StringColumn from string slices
    pub fn from_strs(data: &[&str]) -> Self {
        Self::new(data.iter().map(|s| s.to_string()).collect())
    }

    /// Create a StringColumn from optional values
    pub fn from_options(values: Vec<Option<String>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
        let data: Vec<String> = values.into_iter().map(Option::unwrap_or_default).collect();
        Self {
            data: data.into(),
            null_mask: utils::create_bitmask(&nulls),
        }
    }

    /// Get data at the specified index
    pub fn get(&self, index: usize) -> Result<Option<&str>> {
        if index >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            });
        }

        if utils::is_set(&self.null_mask, index) {
            return Ok(None);
        }

        Ok(Some(&self.data[index]))
    }

    /// Iterate over cells, `None` for NULL
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, s)| (!utils::is_set(&self.null_mask, i)).then_some(s.as_str()))
    }

    /// Lexicographically smallest non-NULL value
    pub fn min(&self) -> Option<&str> {
        self.iter().flatten().min()
    }

    /// Lexicographically largest non-NULL value
    pub fn max(&self) -> Option<&str> {
        self.iter().flatten().max()
    }

    pub(crate) fn take(&self, indices: &[Option<usize>]) -> Self {
        let (data, nulls) = utils::gather(&self.data, &self.null_mask, indices, String::new());
        Self {
            data: data.into(),
            null_mask: utils::create_bitmask(&nulls),
        }
    }
}

impl ColumnTrait for StringColumn {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::String
    }

    fn is_null(&self, index: usize) -> bool {
        utils::is_set(&self.null_mask, index)
    }
}
