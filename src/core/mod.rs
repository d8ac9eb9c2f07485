//! Core utilities and common types for VIGIL.

pub mod error;
pub mod types;
pub mod validate;

pub use error::{Error, Result};
pub use types::*;
