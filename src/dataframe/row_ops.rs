//! Row removal and predicate filtering for TabularFrame

use std::collections::HashSet;

use crate::column::{BooleanColumn, Value};
use crate::dataframe::core::TabularFrame;
use crate::error::{Error, Result};
use crate::index::RowLabel;

impl TabularFrame {
    /// Remove rows whose label is listed; unknown labels are ignored
    ///
    /// Every row carrying a listed label goes, including repeated labels.
    pub fn drop_rows<L: Into<RowLabel>>(&self, labels: Vec<L>) -> Result<Self> {
        let doomed: HashSet<RowLabel> = labels.into_iter().map(Into::into).collect();
        let keep: Vec<usize> = self
            .row_labels()
            .iter()
            .enumerate()
            .filter_map(|(i, label)| (!doomed.contains(label)).then_some(i))
            .collect();
        self.take_rows(&keep)
    }

    /// Keep rows where the predicate is true, in original order.
    ///
    /// NULL predicate cells drop their row.
    pub fn filter(&self, predicate: &BooleanColumn) -> Result<Self> {
        let flags = predicate.selected();
        if flags.len() != self.row_count {
            return Err(Error::LengthMismatch {
                expected: self.row_count,
                actual: flags.len(),
            });
        }
        let keep: Vec<usize> = flags
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.take_rows(&keep)
    }

    /// Keep rows whose `column` value is one of `candidates`
    pub fn filter_isin(&self, column: &str, candidates: &[Value]) -> Result<Self> {
        let mask = self.column(column)?.is_in(candidates)?;
        self.filter(&mask)
    }
}
