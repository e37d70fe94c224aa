//! Core structure definition and basic functionality for TabularFrame

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use crate::column::{Column, ColumnType, Value};
use crate::config;
use crate::error::{Error, Result};
use crate::index::{Index, RowLabel};

/// Column-oriented table with optional row labels and an optional
/// designated geometry column.
///
/// Every transformation returns a new frame; only `add_column` mutates.
#[derive(Clone, PartialEq)]
pub struct TabularFrame {
    // Column data
    pub(crate) columns: Vec<Column>,
    // Column name → first position holding it
    pub(crate) column_indices: HashMap<String, usize>,
    // Column order
    pub(crate) column_names: Vec<String>,
    // Row count
    pub(crate) row_count: usize,
    // Explicit row labels; positional when absent
    pub(crate) index: Option<Index<RowLabel>>,
    // Designated geometry column
    pub(crate) geometry: Option<String>,
}

impl Default for TabularFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularFrame {
    /// Create a new empty frame
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            column_indices: HashMap::new(),
            column_names: Vec::new(),
            row_count: 0,
            index: None,
            geometry: None,
        }
    }

    /// Build a frame from named columns, in order
    pub fn from_columns<S, C>(columns: Vec<(S, C)>) -> Result<Self>
    where
        S: Into<String>,
        C: Into<Column>,
    {
        let mut df = Self::new();
        for (name, column) in columns {
            df.add_column(name, column)?;
        }
        Ok(df)
    }

    /// Assemble a frame from parts already known to be consistent.
    ///
    /// Duplicate names are allowed here; lookups resolve to the first one.
    pub(crate) fn from_parts(
        column_names: Vec<String>,
        columns: Vec<Column>,
        row_count: usize,
        index: Option<Index<RowLabel>>,
        geometry: Option<String>,
    ) -> Self {
        let mut column_indices = HashMap::with_capacity(column_names.len());
        for (i, name) in column_names.iter().enumerate() {
            column_indices.entry(name.clone()).or_insert(i);
        }
        // The designation only survives if a geometry column still carries it
        let geometry = geometry.filter(|g| {
            column_indices
                .get(g)
                .map_or(false, |&i| columns[i].column_type() == ColumnType::Geometry)
        });
        Self {
            columns,
            column_indices,
            column_names,
            row_count,
            index,
            geometry,
        }
    }

    /// Add a column
    pub fn add_column<C: Into<Column>>(&mut self, name: impl Into<String>, column: C) -> Result<()> {
        let name = name.into();
        let column = column.into();

        // Check for duplicate column names
        if self.column_indices.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }

        // Check row count consistency
        let column_len = column.len();
        if !self.columns.is_empty() && column_len != self.row_count {
            return Err(Error::LengthMismatch {
                expected: self.row_count,
                actual: column_len,
            });
        }
        if let Some(ref index) = self.index {
            if index.len() != column_len {
                return Err(Error::LengthMismatch {
                    expected: index.len(),
                    actual: column_len,
                });
            }
        }

        let column_idx = self.columns.len();
        self.columns.push(column);
        self.column_indices.insert(name.clone(), column_idx);
        self.column_names.push(name);
        self.row_count = column_len;

        Ok(())
    }

    /// Get row count
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get column count
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get list of column names
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Check if specified column exists
    pub fn contains_column(&self, name: &str) -> bool {
        self.column_indices.contains_key(name)
    }

    /// Borrow a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.column_position(name).map(|i| &self.columns[i])
    }

    /// Element type of a column
    pub fn column_type(&self, name: &str) -> Result<ColumnType> {
        self.column(name).map(Column::column_type)
    }

    /// Read one cell by row position and column name
    pub fn value(&self, row: usize, column: &str) -> Result<Value> {
        self.column(column)?.get(row)
    }

    /// Name of the designated geometry column
    pub fn geometry_name(&self) -> Option<&str> {
        self.geometry.as_deref()
    }

    /// Whether a geometry column is designated
    pub fn is_geo(&self) -> bool {
        self.geometry.is_some()
    }

    /// Designate an existing geometry-typed column as the geometry column
    pub fn set_geometry(&self, name: &str) -> Result<Self> {
        let found = self.column_type(name)?;
        if found != ColumnType::Geometry {
            return Err(Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: ColumnType::Geometry,
                found,
            });
        }
        let mut df = self.clone();
        df.geometry = Some(name.to_string());
        Ok(df)
    }

    /// Current row labels; positional `0..n` unless explicit labels were set
    pub fn row_labels(&self) -> Vec<RowLabel> {
        match self.index {
            Some(ref index) => index.values().to_vec(),
            None => (0..self.row_count as i64).map(RowLabel::Int).collect(),
        }
    }

    /// Whether explicit labels are attached
    pub fn has_custom_labels(&self) -> bool {
        self.index.is_some()
    }

    /// Attach explicit, unique row labels
    pub fn with_labels<L: Into<RowLabel>>(&self, labels: Vec<L>) -> Result<Self> {
        if labels.len() != self.row_count {
            return Err(Error::LengthMismatch {
                expected: self.row_count,
                actual: labels.len(),
            });
        }
        let index = Index::new(labels.into_iter().map(Into::into).collect())?;
        let mut df = self.clone();
        df.index = Some(index);
        Ok(df)
    }

    /// Return to positional labels
    pub fn reset_labels(&self) -> Self {
        let mut df = self.clone();
        df.index = None;
        df
    }

    pub(crate) fn column_position(&self, name: &str) -> Result<usize> {
        self.column_indices
            .get(name)
            .copied()
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Position of the row carrying `label`; a repeated label is an error
    pub(crate) fn label_position(&self, label: &RowLabel) -> Result<Option<usize>> {
        match self.index {
            Some(ref index) => index.get_loc(label),
            None => Ok(match label {
                RowLabel::Int(v) if *v >= 0 && (*v as usize) < self.row_count => {
                    Some(*v as usize)
                }
                _ => None,
            }),
        }
    }

    /// Gathers rows by position; explicit labels travel with their rows.
    ///
    /// Positions must be in range. Repeated positions repeat the label.
    pub(crate) fn take_rows(&self, positions: &[usize]) -> Result<Self> {
        let columns = self
            .columns
            .iter()
            .map(|c| c.take(positions))
            .collect::<Result<Vec<_>>>()?;
        let index = match self.index {
            Some(ref index) => Some(index.take(positions)?),
            None => None,
        };
        Ok(Self::from_parts(
            self.column_names.clone(),
            columns,
            positions.len(),
            index,
            self.geometry.clone(),
        ))
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = config::get().display;

        if self.columns.is_empty() {
            return write!(f, "TabularFrame ({} rows x 0 columns)", self.row_count);
        }

        writeln!(
            f,
            "TabularFrame ({} rows x {} columns):",
            self.row_count,
            self.columns.len()
        )?;

        let shown_cols = self.columns.len().min(display.max_columns);
        let width = display.max_colwidth.min(15);
        let clip = |s: String| -> String {
            if s.chars().count() > display.max_colwidth {
                s.chars().take(display.max_colwidth).collect()
            } else {
                s
            }
        };

        // Display column headers
        write!(f, "{:<5} |", "idx")?;
        for name in self.column_names.iter().take(shown_cols) {
            write!(f, " {:<width$} |", clip(name.clone()), width = width)?;
        }
        if shown_cols < self.columns.len() {
            write!(f, " ...")?;
        }
        writeln!(f)?;

        // Separator line
        write!(f, "{:-<5}-+", "")?;
        for _ in 0..shown_cols {
            write!(f, "-{:-<width$}-+", "", width = width)?;
        }
        writeln!(f)?;

        let labels = self.row_labels();
        let shown_rows = self.row_count.min(display.max_rows);
        for row in 0..shown_rows {
            write!(f, "{:<5} |", labels[row].to_string())?;
            for column in self.columns.iter().take(shown_cols) {
                let text = match column.get(row) {
                    Ok(Value::Float64(v)) => format!("{:.*}", display.float_precision, v),
                    Ok(Value::String(s)) => format!("\"{}\"", s),
                    Ok(other) => other.to_string(),
                    Err(_) => "NULL".to_string(),
                };
                write!(f, " {:<width$} |", clip(text), width = width)?;
            }
            if shown_cols < self.columns.len() {
                write!(f, " ...")?;
            }
            writeln!(f)?;
        }

        // Ellipsis for additional rows
        if self.row_count > shown_rows {
            writeln!(f, "... ({} more rows)", self.row_count - shown_rows)?;
        }

        Ok(())
    }
}

impl Display for TabularFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl Debug for TabularFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Float64Column, GeometryColumn};
    use geo_types::{point, Geometry};

    #[test]
    fn add_column_checks_length_and_names() {
        let mut df = TabularFrame::new();
        df.add_column("pop", vec![1i64, 2, 3]).unwrap();
        assert!(matches!(
            df.add_column("area", vec![1.0, 2.0]),
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
        assert!(matches!(
            df.add_column("pop", vec![1i64, 2, 3]),
            Err(Error::DuplicateColumnName(_))
        ));
    }

    #[test]
    fn frames_with_missing_floats_equal_their_clone() -> Result<()> {
        let df = TabularFrame::from_columns(vec![(
            "a",
            Column::Float64(Float64Column::from_options(vec![Some(1.0), None])),
        )])?;
        assert_eq!(df, df.clone());
        assert_eq!(df.head(2)?, df);
        Ok(())
    }

    #[test]
    fn geometry_designation_requires_geometry_type() -> Result<()> {
        let geoms: Vec<Geometry<f64>> = vec![point!(x: 0.0, y: 0.0).into()];
        let df = TabularFrame::from_columns(vec![
            ("name", Column::from(vec!["Fiji"])),
            ("geometry", Column::from(GeometryColumn::new(geoms))),
        ])?;
        assert!(df.set_geometry("name").is_err());
        let geo = df.set_geometry("geometry")?;
        assert_eq!(geo.geometry_name(), Some("geometry"));
        Ok(())
    }

    #[test]
    fn label_lookup_uses_explicit_labels() -> Result<()> {
        let df = TabularFrame::from_columns(vec![("v", vec![1i64, 2, 3])])?;
        assert_eq!(df.label_position(&RowLabel::Int(2))?, Some(2));
        let labeled = df.with_labels(vec!["a", "b", "c"])?;
        assert_eq!(labeled.label_position(&RowLabel::from("b"))?, Some(1));
        assert_eq!(labeled.label_position(&RowLabel::Int(1))?, None);
        Ok(())
    }

    #[test]
    fn repeated_positions_keep_labels() -> Result<()> {
        let df = TabularFrame::from_columns(vec![("v", vec![1i64, 2, 3])])?
            .with_labels(vec!["a", "b", "c"])?;
        let twice = df.take_rows(&[0, 0, 2])?;
        assert_eq!(
            twice.row_labels(),
            vec![RowLabel::from("a"), RowLabel::from("a"), RowLabel::from("c")]
        );
        assert_eq!(twice.label_position(&RowLabel::from("c"))?, Some(2));
        assert!(twice.label_position(&RowLabel::from("a")).is_err());
        Ok(())
    }

    #[test]
    fn rendering_summarizes_extra_rows() -> Result<()> {
        let df = TabularFrame::from_columns(vec![("v", (0..25i64).collect::<Vec<_>>())])?;
        let text = df.to_string();
        assert!(text.starts_with("TabularFrame (25 rows x 1 columns):"));
        assert!(text.contains("more rows)"));
        Ok(())
    }
}
