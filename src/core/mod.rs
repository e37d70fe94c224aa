// Core definitions shared by the frame and grid modules
pub mod error;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};
