//! In-memory attribute manipulation for vector and raster data.
//!
//! [`TabularFrame`] holds typed columns, optional row labels and an optional
//! geometry column, and supports subsetting, filtering, grouped
//! aggregation, dissolving and joins. [`GridArray`] holds single- or
//! multi-layer numeric rasters with indexed reads and writes, type
//! conversion and missing-aware reductions.
//!
//! ```
//! use geoframe::{Column, TabularFrame};
//!
//! let world = TabularFrame::from_columns(vec![
//!     ("continent", Column::from(vec!["Asia", "Asia", "Europe"])),
//!     ("pop", Column::from(vec![10i64, 20, 5])),
//! ])?;
//! let by_continent = world.group_sum(&["continent"], &["pop"])?;
//! assert_eq!(by_continent.row_count(), 2);
//! # Ok::<(), geoframe::Error>(())
//! ```

mod macros;

// Core module with crate-wide error definitions
pub mod core;

pub mod column;
pub mod config;
pub mod dataframe;
pub mod error;
pub mod grid;
pub mod index;

// Re-export core types
pub use crate::core::error::{Error, ErrorKind, Result};

pub use column::{
    ArithOp, BooleanColumn, Column, ColumnTrait, ColumnType, CompareOp, Float64Column,
    GeometryColumn, Int64Column, StringColumn, Value,
};
pub use config::GeoframeConfig;
pub use dataframe::{AggFunc, CollectUnion, GeometryUnion, JoinType, Selector, TabularFrame};
pub use grid::{AxisIndex, DType, GridArray, GridElement, ReduceOp, Scalar};
pub use index::{Index, RowLabel};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
