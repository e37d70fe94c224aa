//! Dense numeric grids with indexed access and type conversion

use ndarray::{Array1, ArrayD, Axis, IxDyn, Slice};

use crate::error::{Error, Result};
use crate::grid::dtype::{DType, GridElement, Scalar};
use crate::grid::index::AxisIndex;
use crate::macros::{dyn_map, dyn_map_fun, dyn_match};

/// Typed backing buffer of a grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridData {
    UInt8(ArrayD<u8>),
    UInt16(ArrayD<u16>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

/// A single-layer (rows × cols) or multi-layer (layers × rows × cols)
/// numeric grid in row-major order.
///
/// `set` and `set_at` are the only operations that modify a grid in place.
#[derive(Debug, Clone, PartialEq)]
pub struct GridArray {
    pub(crate) data: GridData,
}

const MAX_NDIM: usize = 3;

fn check_ndim(shape: &[usize]) -> Result<()> {
    if shape.is_empty() || shape.len() > MAX_NDIM {
        return Err(Error::InvalidValue(format!(
            "grids have 1 to {} dimensions, got shape {:?}",
            MAX_NDIM, shape
        )));
    }
    Ok(())
}

impl GridArray {
    pub(crate) fn wrap<T: GridElement>(array: ArrayD<T>) -> Self {
        GridArray {
            data: T::into_data(array),
        }
    }

    /// Build a grid from a row-major buffer and its shape.
    ///
    /// # Errors
    /// `ShapeMismatch` when the buffer length is not the product of `shape`.
    pub fn from_shape_vec<T: GridElement>(shape: &[usize], data: Vec<T>) -> Result<Self> {
        check_ndim(shape)?;
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(Error::ShapeMismatch {
                shape: shape.to_vec(),
                expected,
                actual: data.len(),
            });
        }
        let array = ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|e| {
            Error::InvalidValue(format!("cannot build grid of shape {:?}: {}", shape, e))
        })?;
        Ok(Self::wrap(array))
    }

    pub fn from_array<T: GridElement>(array: ArrayD<T>) -> Result<Self> {
        check_ndim(array.shape())?;
        Ok(Self::wrap(array))
    }

    /// Zero-filled grid of the given type
    pub fn zeros(dtype: DType, shape: &[usize]) -> Result<Self> {
        check_ndim(shape)?;
        macro_rules! zeros {
            ($ty:ty) => {
                Self::wrap(ArrayD::<$ty>::zeros(IxDyn(shape)))
            };
        }
        Ok(dyn_match!(dtype, DType, zeros))
    }

    /// Borrow the backing array when `T` is the grid's element type
    pub fn as_array<T: GridElement>(&self) -> Option<&ArrayD<T>> {
        T::data_ref(&self.data)
    }

    pub fn dtype(&self) -> DType {
        macro_rules! dtype {
            ($variant:ident, $arr:expr) => {
                DType::$variant
            };
        }
        dyn_map!(&self.data, GridData, dtype)
    }

    pub fn shape(&self) -> &[usize] {
        dyn_map_fun!(&self.data, GridData, shape)
    }

    pub fn ndim(&self) -> usize {
        dyn_map_fun!(&self.data, GridData, ndim)
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        dyn_map_fun!(&self.data, GridData, len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_indices(&self, indices: &[usize]) -> Result<()> {
        if indices.len() != self.ndim() {
            return Err(Error::DimensionMismatch {
                expected: self.ndim(),
                found: indices.len(),
            });
        }
        for (&index, &size) in indices.iter().zip(self.shape()) {
            if index >= size {
                return Err(Error::IndexOutOfBounds { index, size });
            }
        }
        Ok(())
    }

    /// Read one element; one index per dimension
    pub fn get(&self, indices: &[usize]) -> Result<Scalar> {
        self.check_indices(indices)?;
        macro_rules! get {
            ($variant:ident, $arr:expr) => {
                $arr[IxDyn(indices)].into_scalar()
            };
        }
        Ok(dyn_map!(&self.data, GridData, get))
    }

    /// Overwrite every element addressed by the cartesian product of the
    /// per-axis index components.
    ///
    /// The value is converted and every component checked before the
    /// buffer is touched.
    ///
    /// # Errors
    /// * `DimensionMismatch` - component count differs from `ndim`
    /// * `IndexOutOfBounds` - an `At` component is past its axis
    /// * `MissingInIntegerGrid` - missing marker into an integer grid
    /// * `Cast` - value does not fit the element type
    pub fn set(&mut self, index: &[AxisIndex], value: impl Into<Scalar>) -> Result<()> {
        let value = value.into();
        if index.len() != self.ndim() {
            return Err(Error::DimensionMismatch {
                expected: self.ndim(),
                found: index.len(),
            });
        }
        let bounds = index
            .iter()
            .zip(self.shape())
            .map(|(component, &len)| component.bounds(len))
            .collect::<Result<Vec<_>>>()?;

        let dtype = self.dtype();
        if value.is_missing() && !dtype.is_float() {
            return Err(Error::MissingInIntegerGrid(dtype));
        }

        macro_rules! fill {
            ($variant:ident, $arr:expr) => {{
                let element = value.to_element()?;
                $arr.slice_each_axis_mut(|ax| {
                    let (start, stop) = bounds[ax.axis.index()];
                    Slice::from(start..stop)
                })
                .fill(element);
            }};
        }
        dyn_map!(&mut self.data, GridData, fill);
        Ok(())
    }

    /// Overwrite a single element
    pub fn set_at(&mut self, indices: &[usize], value: impl Into<Scalar>) -> Result<()> {
        let index: Vec<AxisIndex> = indices.iter().map(|&i| AxisIndex::At(i)).collect();
        self.set(&index, value)
    }

    /// Cast every element to `dtype`, producing a new grid.
    ///
    /// # Errors
    /// `Cast` when an element is missing and the target is an integer type,
    /// or when a value does not fit the target.
    pub fn astype(&self, dtype: DType) -> Result<Self> {
        let scalars = self.scalars();
        let shape = self.shape();
        macro_rules! cast {
            ($ty:ty) => {{
                let values = scalars
                    .iter()
                    .map(|s| s.to_element::<$ty>())
                    .collect::<Result<Vec<$ty>>>()?;
                Self::from_shape_vec(shape, values)?
            }};
        }
        let converted = dyn_match!(dtype, DType, cast);
        log::debug!(
            "converted {:?} grid from {} to {}",
            self.shape(),
            self.dtype(),
            dtype
        );
        Ok(converted)
    }

    /// Copy of the elements as a 1-D grid, in row-major order
    pub fn flatten(&self) -> Self {
        macro_rules! flatten {
            ($variant:ident, $arr:expr) => {{
                GridData::$variant(Array1::from_iter($arr.iter().copied()).into_dyn())
            }};
        }
        GridArray {
            data: dyn_map!(&self.data, GridData, flatten),
        }
    }

    /// Copy of layer `i` of a multi-layer grid
    pub fn layer(&self, i: usize) -> Result<Self> {
        if self.ndim() != 3 {
            return Err(Error::InvalidOperation(format!(
                "layer access needs a 3-dimensional grid, this one has {}",
                self.ndim()
            )));
        }
        let layers = self.shape()[0];
        if i >= layers {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: layers,
            });
        }
        macro_rules! layer {
            ($variant:ident, $arr:expr) => {
                GridData::$variant($arr.index_axis(Axis(0), i).to_owned())
            };
        }
        Ok(GridArray {
            data: dyn_map!(&self.data, GridData, layer),
        })
    }

    /// Every element widened to a `Scalar`, row-major
    pub(crate) fn scalars(&self) -> Vec<Scalar> {
        macro_rules! scalars {
            ($variant:ident, $arr:expr) => {
                $arr.iter().map(|v| v.into_scalar()).collect()
            };
        }
        dyn_map!(&self.data, GridData, scalars)
    }
}
