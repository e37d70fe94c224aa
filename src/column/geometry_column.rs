use std::sync::Arc;

use geo_types::Geometry;

use crate::column::common::{ColumnTrait, ColumnType};
use crate::error::{Error, Result};

/// Column of opaque geometry values.
///
/// Geometries are carried and handed to a union collaborator but never
/// inspected here.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryColumn {
    pub(crate) data: Arc<[Option<Geometry<f64>>]>,
}

impl GeometryColumn {
    pub fn new(data: Vec<Geometry<f64>>) -> Self {
        Self {
            data: data.into_iter().map(Some).collect::<Vec<_>>().into(),
        }
    }

    pub fn from_options(data: Vec<Option<Geometry<f64>>>) -> Self {
        Self { data: data.into() }
    }

    pub fn get(&self, index: usize) -> Result<Option<&Geometry<f64>>> {
        self.data
            .get(index)
            .map(Option::as_ref)
            .ok_or(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Geometry<f64>>> + '_ {
        self.data.iter().map(Option::as_ref)
    }

    pub(crate) fn take(&self, indices: &[Option<usize>]) -> Self {
        let data: Vec<Option<Geometry<f64>>> = indices
            .iter()
            .map(|idx| idx.and_then(|i| self.data[i].clone()))
            .collect();
        Self { data: data.into() }
    }
}

impl ColumnTrait for GeometryColumn {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Geometry
    }

    fn is_null(&self, index: usize) -> bool {
        self.data[index].is_none()
    }
}
