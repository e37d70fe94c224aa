//! Numeric grids: single- and multi-layer rasters held in memory

mod array;
mod dtype;
mod index;
mod reduce;

pub use array::{GridArray, GridData};
pub use dtype::{DType, GridElement, Scalar};
pub use index::AxisIndex;
pub use reduce::ReduceOp;
