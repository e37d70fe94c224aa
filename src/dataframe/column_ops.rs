//! Column operation features for TabularFrame

use std::collections::{HashMap, HashSet};

use crate::column::Column;
use crate::dataframe::core::TabularFrame;
use crate::error::{Error, Result};

impl TabularFrame {
    /// Append or overwrite a column, returning a new frame.
    ///
    /// Overwriting keeps the column's position; a new name goes last.
    pub fn with_column<C: Into<Column>>(&self, name: &str, column: C) -> Result<Self> {
        let column = column.into();
        if !self.columns.is_empty() && column.len() != self.row_count {
            return Err(Error::LengthMismatch {
                expected: self.row_count,
                actual: column.len(),
            });
        }

        let mut names = self.column_names.clone();
        let mut columns = self.columns.clone();
        match self.column_indices.get(name) {
            Some(&pos) => columns[pos] = column,
            None => {
                names.push(name.to_string());
                columns.push(column);
            }
        }

        let row_count = columns[0].len();
        Ok(Self::from_parts(
            names,
            columns,
            row_count,
            self.index.clone(),
            self.geometry.clone(),
        ))
    }

    /// `with_column` applied pairwise, left to right
    pub fn with_columns(&self, names: &[&str], columns: Vec<Column>) -> Result<Self> {
        if names.len() != columns.len() {
            return Err(Error::LengthMismatch {
                expected: names.len(),
                actual: columns.len(),
            });
        }
        let mut df = self.clone();
        for (name, column) in names.iter().zip(columns) {
            df = df.with_column(name, column)?;
        }
        Ok(df)
    }

    /// Drop columns by name.
    ///
    /// Dropping the geometry column clears the geometry designation.
    pub fn drop_columns(&self, names: &[&str]) -> Result<Self> {
        for name in names {
            self.column_position(name)?;
        }
        let doomed: HashSet<&str> = names.iter().copied().collect();

        let (kept_names, kept_columns): (Vec<String>, Vec<Column>) = self
            .column_names
            .iter()
            .zip(&self.columns)
            .filter(|(name, _)| !doomed.contains(name.as_str()))
            .map(|(name, col)| (name.clone(), col.clone()))
            .unzip();

        let geometry = self
            .geometry
            .clone()
            .filter(|g| !doomed.contains(g.as_str()));

        Ok(Self::from_parts(
            kept_names,
            kept_columns,
            self.row_count,
            self.index.clone(),
            geometry,
        ))
    }

    /// Rename columns through an old → new mapping.
    ///
    /// Names absent from the frame are ignored. Fails if the result would
    /// hold a renamed column under a name another column also uses.
    pub fn rename_columns(&self, mapping: &[(&str, &str)]) -> Result<Self> {
        let lookup: HashMap<&str, &str> = mapping.iter().copied().collect();

        let renamed: Vec<String> = self
            .column_names
            .iter()
            .map(|name| {
                lookup
                    .get(name.as_str())
                    .map_or_else(|| name.clone(), |new| new.to_string())
            })
            .collect();

        for (i, name) in renamed.iter().enumerate() {
            if !lookup.contains_key(self.column_names[i].as_str()) {
                continue;
            }
            if renamed.iter().enumerate().any(|(j, other)| j != i && other == name) {
                return Err(Error::DuplicateColumnName(name.clone()));
            }
        }

        let geometry = self.geometry.as_ref().map(|g| {
            lookup
                .get(g.as_str())
                .map_or_else(|| g.clone(), |new| new.to_string())
        });

        Ok(Self::from_parts(
            renamed,
            self.columns.clone(),
            self.row_count,
            self.index.clone(),
            geometry,
        ))
    }

    /// Replace every column name at once; the geometry designation follows
    /// its column
    pub fn set_column_names(&self, names: &[&str]) -> Result<Self> {
        if names.len() != self.columns.len() {
            return Err(Error::LengthMismatch {
                expected: self.columns.len(),
                actual: names.len(),
            });
        }
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(*name) {
                return Err(Error::DuplicateColumnName(name.to_string()));
            }
        }

        let geometry = match self.geometry {
            Some(ref g) => {
                let pos = self.column_position(g)?;
                Some(names[pos].to_string())
            }
            None => None,
        };

        Ok(Self::from_parts(
            names.iter().map(|s| s.to_string()).collect(),
            self.columns.clone(),
            self.row_count,
            self.index.clone(),
            geometry,
        ))
    }

    /// Drop the geometry column and its designation, leaving a plain table
    pub fn to_plain_table(&self) -> Result<Self> {
        match self.geometry {
            Some(ref g) => self.drop_columns(&[g.as_str()]),
            None => Ok(self.clone()),
        }
    }
}
