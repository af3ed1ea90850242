//! Format registry module
//!
//! Compile-time tables of source and target format codes, the modality each
//! source maps to, and the conversion parameter codes.

mod registry;
pub mod parameters;
pub mod source;
pub mod target;

pub use parameters::{ImageParameters, ParameterCode};
pub use registry::FormatRegistry;
pub use source::{Modality, SourceFormat};
pub use target::{RasterFormat, TargetFormat};
