use thiserror::Error;

/// Failures while parsing an ISO 19794 container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("record truncated: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("bad format identifier {found:?}, expected {expected:?}")]
    BadFormatIdentifier {
        expected: &'static str,
        found: String,
    },

    #[error("unsupported version {found:?}, expected {expected:?}")]
    UnsupportedVersion {
        expected: &'static str,
        found: String,
    },

    #[error("record declares no representations")]
    NoRepresentation,

    #[error("{field} declares {declared} bytes but only {available} are available")]
    LengthMismatch {
        field: &'static str,
        declared: usize,
        available: usize,
    },
}
