use std::fmt::{self, Debug, Display};

use ndarray::ArrayD;
use num_traits::NumCast;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::GridData;

/// Element type of a grid buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    UInt8,
    UInt16,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl DType {
    /// Only floating-point grids can hold the missing marker
    pub fn is_float(&self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DType::UInt8 => "uint8",
            DType::UInt16 => "uint16",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
        }
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single grid element, widened to the largest type of its family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

impl Scalar {
    /// The missing-value marker
    pub const MISSING: Scalar = Scalar::Float(f64::NAN);

    pub fn is_missing(&self) -> bool {
        matches!(self, Scalar::Float(v) if v.is_nan())
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Scalar::Int(v) => v as f64,
            Scalar::Float(v) => v,
        }
    }

    /// Converts into a concrete element type.
    ///
    /// Floats headed for integer types are truncated toward zero; the
    /// result must fit the target type and must not be missing.
    pub fn to_element<T: GridElement>(self) -> Result<T> {
        let converted = match self {
            Scalar::Int(v) => <T as NumCast>::from(v),
            Scalar::Float(v) if v.is_nan() && !T::DTYPE.is_float() => None,
            Scalar::Float(v) if T::DTYPE.is_float() => <T as NumCast>::from(v),
            Scalar::Float(v) => <T as NumCast>::from(v.trunc()),
        };
        converted.ok_or_else(|| Error::Cast(format!("{} does not fit {}", self, T::DTYPE)))
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) if v.is_nan() => write!(f, "nan"),
            Scalar::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(v as f64)
    }
}

/// Rust types that can back a grid
pub trait GridElement:
    Copy + PartialOrd + NumCast + Default + Debug + Send + Sync + 'static
{
    const DTYPE: DType;

    fn into_data(array: ArrayD<Self>) -> GridData;
    fn data_ref(data: &GridData) -> Option<&ArrayD<Self>>;

    fn into_scalar(self) -> Scalar;
    fn as_f64(self) -> f64;

    /// Whether the element is the missing marker
    fn is_missing(self) -> bool;
}

macro_rules! impl_grid_element {
    ($ty:ty, $variant:ident, int) => {
        impl_grid_element!(@base $ty, $variant);
        impl GridElement for $ty {
            const DTYPE: DType = DType::$variant;
            impl_grid_element!(@access $ty, $variant);

            fn into_scalar(self) -> Scalar {
                Scalar::Int(self as i64)
            }

            fn as_f64(self) -> f64 {
                self as f64
            }

            fn is_missing(self) -> bool {
                false
            }
        }
    };
    ($ty:ty, $variant:ident, float) => {
        impl_grid_element!(@base $ty, $variant);
        impl GridElement for $ty {
            const DTYPE: DType = DType::$variant;
            impl_grid_element!(@access $ty, $variant);

            fn into_scalar(self) -> Scalar {
                Scalar::Float(self as f64)
            }

            fn as_f64(self) -> f64 {
                self as f64
            }

            fn is_missing(self) -> bool {
                self.is_nan()
            }
        }
    };
    (@base $ty:ty, $variant:ident) => {
        impl From<ndarray::Array2<$ty>> for crate::grid::GridArray {
            fn from(array: ndarray::Array2<$ty>) -> Self {
                crate::grid::GridArray::wrap(array.into_dyn())
            }
        }

        impl From<ndarray::Array3<$ty>> for crate::grid::GridArray {
            fn from(array: ndarray::Array3<$ty>) -> Self {
                crate::grid::GridArray::wrap(array.into_dyn())
            }
        }
    };
    (@access $ty:ty, $variant:ident) => {
        fn into_data(array: ArrayD<Self>) -> GridData {
            GridData::$variant(array)
        }

        fn data_ref(data: &GridData) -> Option<&ArrayD<Self>> {
            match data {
                GridData::$variant(array) => Some(array),
                _ => None,
            }
        }
    };
}

impl_grid_element!(u8, UInt8, int);
impl_grid_element!(u16, UInt16, int);
impl_grid_element!(i16, Int16, int);
impl_grid_element!(i32, Int32, int);
impl_grid_element!(i64, Int64, int);
impl_grid_element!(f32, Float32, float);
impl_grid_element!(f64, Float64, float);
