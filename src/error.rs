// Re-export from core module
pub use crate::core::error::{Error, ErrorKind, Result};
