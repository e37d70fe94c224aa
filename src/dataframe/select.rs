//! Selection functionality for TabularFrame

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::dataframe::core::TabularFrame;
use crate::error::{Error, Result};
use crate::index::RowLabel;

/// Positional selector along one axis of a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// One position
    Single(usize),
    /// Positions in the given order; repeats allowed
    List(Vec<usize>),
    /// Half-open `[start, stop)`; `start` defaults to 0 and `stop` to the
    /// axis length. Bounds past the end are clipped.
    Range {
        start: Option<usize>,
        stop: Option<usize>,
    },
    /// Every position
    All,
}

impl Selector {
    /// Half-open range `[start, stop)`
    pub fn range(start: usize, stop: usize) -> Self {
        Selector::Range {
            start: Some(start),
            stop: Some(stop),
        }
    }

    /// Range from 0 up to, but excluding, `stop`
    pub fn to(stop: usize) -> Self {
        Selector::Range {
            start: None,
            stop: Some(stop),
        }
    }

    /// Resolves to concrete positions on an axis of length `len`
    pub fn resolve(&self, len: usize) -> Result<Vec<usize>> {
        let check = |i: usize| {
            if i < len {
                Ok(i)
            } else {
                Err(Error::IndexOutOfBounds {
                    index: i,
                    size: len,
                })
            }
        };
        match self {
            Selector::Single(i) => Ok(vec![check(*i)?]),
            Selector::List(positions) => positions.iter().map(|&i| check(i)).collect(),
            Selector::Range { start, stop } => {
                let stop = stop.unwrap_or(len).min(len);
                let start = start.unwrap_or(0).min(stop);
                Ok((start..stop).collect())
            }
            Selector::All => Ok((0..len).collect()),
        }
    }
}

impl From<usize> for Selector {
    fn from(i: usize) -> Self {
        Selector::Single(i)
    }
}

impl From<Vec<usize>> for Selector {
    fn from(positions: Vec<usize>) -> Self {
        Selector::List(positions)
    }
}

impl From<&[usize]> for Selector {
    fn from(positions: &[usize]) -> Self {
        Selector::List(positions.to_vec())
    }
}

impl From<Range<usize>> for Selector {
    fn from(r: Range<usize>) -> Self {
        Selector::range(r.start, r.end)
    }
}

impl From<RangeTo<usize>> for Selector {
    fn from(r: RangeTo<usize>) -> Self {
        Selector::to(r.end)
    }
}

impl From<RangeFrom<usize>> for Selector {
    fn from(r: RangeFrom<usize>) -> Self {
        Selector::Range {
            start: Some(r.start),
            stop: None,
        }
    }
}

impl From<RangeFull> for Selector {
    fn from(_: RangeFull) -> Self {
        Selector::All
    }
}

impl TabularFrame {
    /// Select rows and columns by position (`iloc`)
    ///
    /// # Arguments
    /// * `rows` - Row selector
    /// * `cols` - Column selector
    ///
    /// # Returns
    /// * `Result<Self>` - New frame with the selected rows and columns, in
    ///   selection order
    pub fn select_by_position(
        &self,
        rows: impl Into<Selector>,
        cols: impl Into<Selector>,
    ) -> Result<Self> {
        let row_positions = rows.into().resolve(self.row_count)?;
        let col_positions = cols.into().resolve(self.columns.len())?;

        let names: Vec<String> = col_positions
            .iter()
            .map(|&i| self.column_names[i].clone())
            .collect();
        let columns = col_positions
            .iter()
            .map(|&i| self.columns[i].clone())
            .collect();
        let projected = Self::from_parts(
            names,
            columns,
            self.row_count,
            self.index.clone(),
            self.geometry.clone(),
        );
        projected.take_rows(&row_positions)
    }

    /// Select columns by name to create a new frame
    ///
    /// Repeated names produce repeated columns.
    pub fn select_columns(&self, names: &[&str]) -> Result<Self> {
        let positions = names
            .iter()
            .map(|name| self.column_position(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_parts(
            names.iter().map(|s| s.to_string()).collect(),
            positions.iter().map(|&i| self.columns[i].clone()).collect(),
            self.row_count,
            self.index.clone(),
            self.geometry.clone(),
        ))
    }

    /// Select the contiguous run of columns from `from` through `to`,
    /// inclusive, in current column order
    pub fn select_columns_range(&self, from: &str, to: &str) -> Result<Self> {
        let start = self.column_position(from)?;
        let end = self.column_position(to)?;
        if start > end {
            return Err(Error::InvalidOperation(format!(
                "column '{}' comes after column '{}'",
                from, to
            )));
        }
        self.select_by_position(Selector::All, start..end + 1)
    }

    /// Reorder columns; every existing column must appear exactly once
    pub fn reorder_columns(&self, names: &[&str]) -> Result<Self> {
        if names.len() != self.columns.len() {
            return Err(Error::LengthMismatch {
                expected: self.columns.len(),
                actual: names.len(),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for name in names {
            if !seen.insert(*name) {
                return Err(Error::DuplicateColumnName(name.to_string()));
            }
        }
        self.select_columns(names)
    }

    /// First `n` rows; all rows when `n` exceeds the row count
    pub fn head(&self, n: usize) -> Result<Self> {
        self.select_by_position(Selector::to(n), Selector::All)
    }

    /// Select rows by label (`loc`), in the requested order
    pub fn select_rows_by_label<L: Into<RowLabel>>(&self, labels: Vec<L>) -> Result<Self> {
        let positions = labels
            .into_iter()
            .map(|label| {
                let label = label.into();
                self.label_position(&label)?
                    .ok_or_else(|| Error::LabelNotFound(label.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.take_rows(&positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_half_open_and_clipped() -> Result<()> {
        assert_eq!(Selector::range(0, 3).resolve(5)?, vec![0, 1, 2]);
        assert_eq!(Selector::to(3).resolve(2)?, vec![0, 1]);
        assert_eq!(Selector::range(4, 2).resolve(5)?, Vec::<usize>::new());
        assert_eq!(Selector::from(2..).resolve(4)?, vec![2, 3]);
        Ok(())
    }

    #[test]
    fn explicit_positions_must_exist() {
        assert!(matches!(
            Selector::List(vec![0, 5]).resolve(3),
            Err(Error::IndexOutOfBounds { index: 5, size: 3 })
        ));
        assert!(Selector::Single(3).resolve(3).is_err());
    }
}
