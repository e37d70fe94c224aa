//! Sorting functionality for TabularFrame

use std::cmp::Ordering;

use crate::column::{cell_ordering, is_orderable};
use crate::dataframe::core::TabularFrame;
use crate::error::{Error, Result};

impl TabularFrame {
    /// Sort rows by one column
    ///
    /// # Arguments
    /// * `by` - Column to sort by
    /// * `ascending` - Direction
    ///
    /// # Returns
    /// * `Result<Self>` - Stably sorted frame; missing cells go last in
    ///   either direction
    pub fn sort_by(&self, by: &str, ascending: bool) -> Result<Self> {
        let column = self.column(by)?;
        if !is_orderable(column.column_type()) {
            return Err(Error::Type(format!(
                "cannot sort by {} column '{}'",
                column.column_type(),
                by
            )));
        }

        let mut order: Vec<usize> = (0..self.row_count).collect();
        order.sort_by(|&a, &b| match (column.is_null(a), column.is_null(b)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = cell_ordering(column, a, b).unwrap_or(Ordering::Equal);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            }
        });

        self.take_rows(&order)
    }
}
