//! Grouping and aggregation functionality for TabularFrame

use std::cmp::Ordering;

use geo_types::{Geometry, GeometryCollection, MultiPolygon, Polygon};
use indexmap::IndexMap;

use crate::column::value::KeyPart;
use crate::column::{
    cell_ordering, is_orderable, Column, ColumnType, Float64Column, GeometryColumn, Int64Column,
};
use crate::dataframe::core::TabularFrame;
use crate::error::{Error, Result};

/// Per-column aggregation applied within each group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggFunc {
    /// Number of non-missing cells, any column type
    Count,
    /// Sum of numeric cells
    Sum,
    /// Smallest value of an orderable column
    Min,
    /// Largest value of an orderable column
    Max,
    /// Arithmetic mean of numeric cells, as float
    Mean,
    /// First non-missing value in row order
    First,
    /// Last non-missing value in row order
    Last,
}

impl AggFunc {
    pub fn name(&self) -> &'static str {
        match self {
            AggFunc::Count => "count",
            AggFunc::Sum => "sum",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::Mean => "mean",
            AggFunc::First => "first",
            AggFunc::Last => "last",
        }
    }
}

/// Combines the geometries of one group into a single geometry
pub trait GeometryUnion {
    /// `geometries` is never empty
    fn union(&self, geometries: &[Geometry<f64>]) -> Result<Geometry<f64>>;
}

/// Union that only collects parts, without any geometric computation.
///
/// Polygons and multipolygons become one `MultiPolygon`; any other mix
/// becomes a `GeometryCollection`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectUnion;

impl GeometryUnion for CollectUnion {
    fn union(&self, geometries: &[Geometry<f64>]) -> Result<Geometry<f64>> {
        if geometries.is_empty() {
            return Err(Error::Geometry("union of an empty geometry set".to_string()));
        }

        let mut polygons: Vec<Polygon<f64>> = Vec::new();
        for geometry in geometries {
            match geometry {
                Geometry::Polygon(p) => polygons.push(p.clone()),
                Geometry::MultiPolygon(mp) => polygons.extend(mp.0.iter().cloned()),
                _ => {
                    return Ok(Geometry::GeometryCollection(GeometryCollection(
                        geometries.to_vec(),
                    )))
                }
            }
        }
        Ok(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
    }
}

/// Row partition by key tuple, in order of first appearance
struct GroupBy {
    groups: IndexMap<Vec<KeyPart>, Vec<usize>>,
}

impl GroupBy {
    fn new(df: &TabularFrame, group_columns: &[&str]) -> Result<Self> {
        let key_columns = group_columns
            .iter()
            .map(|name| df.column(name))
            .collect::<Result<Vec<_>>>()?;

        let mut groups: IndexMap<Vec<KeyPart>, Vec<usize>> = IndexMap::new();
        for row in 0..df.row_count {
            let key = key_columns
                .iter()
                .map(|col| col.key_at(row))
                .collect::<Result<Vec<_>>>()?;
            groups.entry(key).or_default().push(row);
        }

        log::debug!(
            "grouped {} rows by {:?} into {} groups",
            df.row_count,
            group_columns,
            groups.len()
        );
        Ok(Self { groups })
    }

    fn len(&self) -> usize {
        self.groups.len()
    }

    /// First row of each group; group key columns are read from here
    fn first_rows(&self) -> Vec<usize> {
        self.groups.values().map(|rows| rows[0]).collect()
    }

    fn members(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.groups.values().map(Vec::as_slice)
    }

    fn aggregate(&self, name: &str, column: &Column, func: AggFunc) -> Result<Column> {
        log::trace!("aggregating column '{}' with {}", name, func.name());
        let type_error = || {
            Error::Type(format!(
                "aggregation '{}' is not defined for {} column '{}'",
                func.name(),
                column.column_type(),
                name
            ))
        };

        match func {
            AggFunc::Count => {
                let counts = self
                    .members()
                    .map(|rows| rows.iter().filter(|&&r| !column.is_null(r)).count() as i64)
                    .collect();
                Ok(Column::Int64(Int64Column::new(counts)))
            }
            AggFunc::Sum => match column {
                Column::Int64(col) => {
                    let mut sums = Vec::with_capacity(self.len());
                    for rows in self.members() {
                        let mut total = 0i64;
                        for &r in rows {
                            if let Some(v) = col.get(r)? {
                                total = total.checked_add(v).ok_or_else(|| {
                                    Error::InvalidValue(format!(
                                        "integer overflow summing column '{}'",
                                        name
                                    ))
                                })?;
                            }
                        }
                        sums.push(total);
                    }
                    Ok(Column::Int64(Int64Column::new(sums)))
                }
                Column::Float64(col) => {
                    let mut sums = Vec::with_capacity(self.len());
                    for rows in self.members() {
                        let mut total = 0.0;
                        for &r in rows {
                            total += col.get(r)?.unwrap_or(0.0);
                        }
                        sums.push(total);
                    }
                    Ok(Column::Float64(Float64Column::new(sums)))
                }
                _ => Err(type_error()),
            },
            AggFunc::Mean => {
                if !column.column_type().is_numeric() {
                    return Err(type_error());
                }
                let mut means = Vec::with_capacity(self.len());
                for rows in self.members() {
                    let mut total = 0.0;
                    let mut n = 0usize;
                    for &r in rows {
                        if let Some(v) = column.get(r)?.as_f64() {
                            total += v;
                            n += 1;
                        }
                    }
                    means.push((n > 0).then(|| total / n as f64));
                }
                Ok(Column::Float64(Float64Column::from_options(means)))
            }
            AggFunc::Min | AggFunc::Max => {
                if !is_orderable(column.column_type()) {
                    return Err(type_error());
                }
                let wanted = if func == AggFunc::Min {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
                let picks: Vec<Option<usize>> = self
                    .members()
                    .map(|rows| {
                        rows.iter()
                            .copied()
                            .filter(|&r| !column.is_null(r))
                            .fold(None, |best: Option<usize>, r| match best {
                                Some(b) if cell_ordering(column, r, b) != Some(wanted) => Some(b),
                                _ => Some(r),
                            })
                    })
                    .collect();
                Ok(column.take_optional(&picks))
            }
            AggFunc::First | AggFunc::Last => {
                let picks: Vec<Option<usize>> = self
                    .members()
                    .map(|rows| {
                        let mut valid = rows.iter().copied().filter(|&r| !column.is_null(r));
                        if func == AggFunc::First {
                            valid.next()
                        } else {
                            valid.last()
                        }
                    })
                    .collect();
                Ok(column.take_optional(&picks))
            }
        }
    }

    fn union_geometries(&self, column: &Column, union: &dyn GeometryUnion) -> Result<Column> {
        let geometries = column
            .as_geometry()
            .ok_or_else(|| Error::Geometry("designated geometry column is not geometry-typed".to_string()))?;

        let mut merged = Vec::with_capacity(self.len());
        for rows in self.members() {
            let parts: Vec<Geometry<f64>> = rows
                .iter()
                .filter_map(|&r| geometries.data[r].clone())
                .collect();
            if parts.is_empty() {
                merged.push(None);
            } else {
                merged.push(Some(union.union(&parts)?));
            }
        }
        Ok(Column::Geometry(GeometryColumn::from_options(merged)))
    }
}

impl TabularFrame {
    /// Group rows and sum numeric value columns.
    ///
    /// Output columns are the group columns followed by the value columns,
    /// one row per distinct key tuple in order of first appearance. Missing
    /// group keys form a group of their own.
    pub fn group_sum(&self, group_columns: &[&str], value_columns: &[&str]) -> Result<Self> {
        for name in value_columns {
            let found = self.column_type(name)?;
            if !found.is_numeric() {
                return Err(Error::ColumnTypeMismatch {
                    name: name.to_string(),
                    expected: ColumnType::Float64,
                    found,
                });
            }
        }

        let aggregations: Vec<(&str, AggFunc)> =
            value_columns.iter().map(|&name| (name, AggFunc::Sum)).collect();
        let grouped = GroupBy::new(self, group_columns)?;
        self.assemble_groups(&grouped, group_columns, &aggregations, None)
    }

    /// Grouped aggregation that also unions each group's geometries.
    ///
    /// # Arguments
    /// * `group_columns` - Key columns
    /// * `aggregations` - Column name and function pairs, in output order
    /// * `union` - Combines the geometries of one group
    ///
    /// # Returns
    /// * `Result<Self>` - Group columns, then aggregated columns, then the
    ///   geometry column when one is designated
    pub fn dissolve(
        &self,
        group_columns: &[&str],
        aggregations: &[(&str, AggFunc)],
        union: &dyn GeometryUnion,
    ) -> Result<Self> {
        let grouped = GroupBy::new(self, group_columns)?;
        self.assemble_groups(&grouped, group_columns, aggregations, Some(union))
    }

    /// `dissolve` applying one function to every column that is neither a
    /// group key nor the geometry column
    pub fn dissolve_all(
        &self,
        group_columns: &[&str],
        func: AggFunc,
        union: &dyn GeometryUnion,
    ) -> Result<Self> {
        for name in group_columns {
            self.column_position(name)?;
        }
        let aggregations: Vec<(&str, AggFunc)> = self
            .column_names
            .iter()
            .map(String::as_str)
            .filter(|name| !group_columns.contains(name) && Some(*name) != self.geometry_name())
            .map(|name| (name, func))
            .collect();
        self.dissolve(group_columns, &aggregations, union)
    }

    fn assemble_groups(
        &self,
        grouped: &GroupBy,
        group_columns: &[&str],
        aggregations: &[(&str, AggFunc)],
        union: Option<&dyn GeometryUnion>,
    ) -> Result<Self> {
        let first_rows = grouped.first_rows();
        let mut names: Vec<String> = Vec::with_capacity(group_columns.len() + aggregations.len() + 1);
        let mut columns = Vec::with_capacity(names.capacity());

        let mut push_name = |name: &str| {
            if names.iter().any(|n| n == name) {
                return Err(Error::DuplicateColumnName(name.to_string()));
            }
            names.push(name.to_string());
            Ok(())
        };
        for name in group_columns {
            push_name(*name)?;
            columns.push(self.column(name)?.take(&first_rows)?);
        }
        for (name, func) in aggregations {
            push_name(*name)?;
            columns.push(grouped.aggregate(name, self.column(name)?, *func)?);
        }

        let mut geometry = None;
        if let (Some(union), Some(geom_name)) = (union, self.geometry_name()) {
            let merged = grouped.union_geometries(self.column(geom_name)?, union)?;
            if let Some(pos) = names.iter().position(|n| n == geom_name) {
                columns[pos] = merged;
            } else {
                names.push(geom_name.to_string());
                columns.push(merged);
            }
            geometry = Some(geom_name.to_string());
        }

        Ok(Self::from_parts(names, columns, grouped.len(), None, geometry))
    }
}
