use std::sync::Arc;

use crate::column::common::{utils, ColumnTrait, ColumnType};
use crate::error::{Error, Result};

/// Structure representing a boolean column.
///
/// Also serves as the row predicate for filtering; a NULL cell never selects
/// its row.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanColumn {
    pub(crate) data: Arc<[bool]>,
    pub(crate) null_mask: Option<Arc<[u8]>>,
}

impl BooleanColumn {
    /// Create a new BooleanColumn from a vector of booleans
    pub fn new(data: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            null_mask: None,
        }
    }

    /// Create a BooleanColumn from optional values
    pub fn from_options(values: Vec<Option<bool>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
        let data: Vec<bool> = values.into_iter().map(|v| v.unwrap_or(false)).collect();
        Self {
            data: data.into(),
            null_mask: utils::create_bitmask(&nulls),
        }
    }

    /// Get data at the specified index
    pub fn get(&self, index: usize) -> Result<Option<bool>> {
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
    pub fn iter(&self) -> impl Iterator<Item = Option<bool>> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (!utils::is_set(&self.null_mask, i)).then_some(v))
    }

    /// Row selection flags: true only where the cell is true and not NULL
    pub fn selected(&self) -> Vec<bool> {
        self.iter().map(|v| v.unwrap_or(false)).collect()
    }

    /// Number of rows the predicate selects
    pub fn count_true(&self) -> usize {
        self.iter().filter(|v| *v == Some(true)).count()
    }

    /// Element-wise logical AND
    pub fn and(&self, other: &BooleanColumn) -> Result<Self> {
        self.zip_with(other, |a, b| a && b)
    }

    /// Element-wise logical OR
    pub fn or(&self, other: &BooleanColumn) -> Result<Self> {
        self.zip_with(other, |a, b| a || b)
    }

    /// Element-wise exclusive OR
    pub fn xor(&self, other: &BooleanColumn) -> Result<Self> {
        self.zip_with(other, |a, b| a ^ b)
    }

    /// Element-wise negation; NULL cells stay NULL
    pub fn not(&self) -> Self {
        Self {
            data: self.data.iter().map(|&v| !v).collect::<Vec<_>>().into(),
            null_mask: self.null_mask.clone(),
        }
    }

    fn zip_with<F>(&self, other: &BooleanColumn, op: F) -> Result<Self>
    where
        F: Fn(bool, bool) -> bool,
    {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        // NULL operands are read as false
        let values: Vec<bool> = self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| op(a.unwrap_or(false), b.unwrap_or(false)))
            .collect();
        Ok(Self::new(values))
    }

    pub(crate) fn take(&self, indices: &[Option<usize>]) -> Self {
        let (data, nulls) = utils::gather(&self.data, &self.null_mask, indices, false);
        Self {
            data: data.into(),
            null_mask: utils::create_bitmask(&nulls),
        }
    }
}

impl From<Vec<bool>> for BooleanColumn {
    fn from(data: Vec<bool>) -> Self {
        Self::new(data)
    }
}

impl ColumnTrait for BooleanColumn {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Boolean
    }

    fn is_null(&self, index: usize) -> bool {
        utils::is_set(&self.null_mask, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinators_are_element_wise() -> Result<()> {
        let small = BooleanColumn::new(vec![true, true, false, false]);
        let asia = BooleanColumn::new(vec![true, false, true, false]);

        assert_eq!(small.and(&asia)?.selected(), vec![true, false, false, false]);
        assert_eq!(small.or(&asia)?.selected(), vec![true, true, true, false]);
        assert_eq!(small.xor(&asia)?.selected(), vec![false, true, true, false]);
        assert_eq!(small.not().selected(), vec![false, false, true, true]);
        Ok(())
    }

    #[test]
    fn combinators_reject_unequal_lengths() {
        let a = BooleanColumn::new(vec![true, false]);
        let b = BooleanColumn::new(vec![true]);
        assert!(matches!(
            a.or(&b),
            Err(Error::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn null_never_selects() {
        let col = BooleanColumn::from_options(vec![Some(true), None]);
        assert_eq!(col.selected(), vec![true, false]);
        assert_eq!(col.not().selected(), vec![false, false]);
    }
}
