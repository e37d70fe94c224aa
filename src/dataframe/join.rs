//! Join functionality for TabularFrame

use std::collections::HashMap;

use crate::column::value::KeyPart;
use crate::dataframe::core::TabularFrame;
use crate::error::{Error, Result};

/// Suffix appended to right-hand columns whose name the left side already uses
pub const RIGHT_SUFFIX: &str = "_right";

/// Enumeration representing join types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// Inner join (only rows with a match on both sides)
    Inner,
    /// Left join (every left row, with matching right rows or missing cells)
    Left,
}

impl TabularFrame {
    /// Join with another frame on shared key columns
    ///
    /// # Arguments
    /// * `right` - Right frame to join with
    /// * `on` - Key columns present in both frames
    /// * `how` - Join type
    ///
    /// # Returns
    /// * `Result<Self>` - Left columns followed by the right frame's non-key
    ///   columns, rows in left order; a left row matching several right
    ///   rows repeats once per match, in right order
    pub fn merge(&self, right: &TabularFrame, on: &[&str], how: JoinType) -> Result<Self> {
        if on.is_empty() {
            return Err(Error::InvalidOperation(
                "merge needs at least one key column".to_string(),
            ));
        }

        let mut left_keys = Vec::with_capacity(on.len());
        let mut right_keys = Vec::with_capacity(on.len());
        for name in on {
            let l = self.column(name)?;
            let r = right.column(name)?;
            if l.column_type() != r.column_type() {
                return Err(Error::ColumnTypeMismatch {
                    name: name.to_string(),
                    expected: l.column_type(),
                    found: r.column_type(),
                });
            }
            left_keys.push(l);
            right_keys.push(r);
        }

        // Right-side lookup; keys containing a missing cell never match
        let mut lookup: HashMap<Vec<KeyPart>, Vec<usize>> = HashMap::new();
        for row in 0..right.row_count {
            let key = right_keys
                .iter()
                .map(|col| col.key_at(row))
                .collect::<Result<Vec<_>>>()?;
            if !key.contains(&KeyPart::Null) {
                lookup.entry(key).or_default().push(row);
            }
        }

        let mut left_rows = Vec::with_capacity(self.row_count);
        let mut right_rows: Vec<Option<usize>> = Vec::with_capacity(self.row_count);
        let mut expanded = 0usize;
        for row in 0..self.row_count {
            let key = left_keys
                .iter()
                .map(|col| col.key_at(row))
                .collect::<Result<Vec<_>>>()?;
            match lookup.get(&key).filter(|_| !key.contains(&KeyPart::Null)) {
                Some(matches) => {
                    if matches.len() > 1 {
                        expanded += 1;
                    }
                    for &m in matches {
                        left_rows.push(row);
                        right_rows.push(Some(m));
                    }
                }
                None if how == JoinType::Left => {
                    left_rows.push(row);
                    right_rows.push(None);
                }
                None => {}
            }
        }

        if expanded > 0 {
            log::warn!(
                "merge on {:?}: {} left rows matched several right rows and were repeated",
                on,
                expanded
            );
        }

        let mut names = Vec::with_capacity(self.columns.len() + right.columns.len());
        let mut columns = Vec::with_capacity(names.capacity());
        for (name, column) in self.column_names.iter().zip(&self.columns) {
            names.push(name.clone());
            columns.push(column.take(&left_rows)?);
        }

        let mut right_geometry = None;
        for (name, column) in right.column_names.iter().zip(&right.columns) {
            if on.contains(&name.as_str()) {
                continue;
            }
            let out_name = if self.contains_column(name) {
                format!("{}{}", name, RIGHT_SUFFIX)
            } else {
                name.clone()
            };
            if names.contains(&out_name) {
                return Err(Error::DuplicateColumnName(out_name));
            }
            if right.geometry_name() == Some(name.as_str()) {
                right_geometry = Some(out_name.clone());
            }
            names.push(out_name);
            columns.push(column.take_optional(&right_rows));
        }

        log::debug!(
            "{:?} merge on {:?}: {} x {} rows -> {} rows",
            how,
            on,
            self.row_count,
            right.row_count,
            left_rows.len()
        );

        let geometry = self.geometry.clone().or(right_geometry);
        Ok(Self::from_parts(names, columns, left_rows.len(), None, geometry))
    }
}
