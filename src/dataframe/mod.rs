// TabularFrame implementation, split by concern
pub mod column_ops;
pub mod core;
pub mod group;
pub mod join;
pub mod row_ops;
pub mod select;
pub mod sort;

// Re-exports for convenience
pub use self::core::TabularFrame;
pub use group::{AggFunc, CollectUnion, GeometryUnion};
pub use join::{JoinType, RIGHT_SUFFIX};
pub use select::Selector;
