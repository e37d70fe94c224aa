mod boolean_column;
pub(crate) mod common;
mod compute;
mod float64_column;
mod geometry_column;
mod int64_column;
mod string_column;
pub(crate) mod value;

pub use boolean_column::BooleanColumn;
pub use common::{Column, ColumnTrait, ColumnType};
pub use compute::ArithOp;
pub use float64_column::Float64Column;
pub use geometry_column::GeometryColumn;
pub use int64_column::Int64Column;
pub use string_column::StringColumn;
pub use value::{CompareOp, Value};

pub(crate) use compute::{cell_ordering, is_orderable};

// Re-export column utility functions
pub use common::utils;
