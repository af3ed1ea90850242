//! Common utilities module
//!
//! Error catalog and the base64url codec shared across the pipeline.

pub mod base64url;
pub mod error;

pub use error::{ConversionError, ErrorCode, Result};
