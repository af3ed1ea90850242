use thiserror::Error;

/// Stable (code, message) catalog shared by every stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InputSource,
    InvalidRequest,
    InvalidSourceFormat,
    InvalidTargetFormat,
    SourceValueEmpty,
    SourceNotValidBase64,
    CouldNotReadIsoImageData,
    SourceNotValidFingerIso,
    SourceNotValidFaceIso,
    SourceNotValidIrisIso,
    UnsupportedTargetForSource,
    UnsupportedCompressionType,
    TechnicalError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::InputSource,
        ErrorCode::InvalidRequest,
        ErrorCode::InvalidSourceFormat,
        ErrorCode::InvalidTargetFormat,
        ErrorCode::SourceValueEmpty,
        ErrorCode::SourceNotValidBase64,
        ErrorCode::CouldNotReadIsoImageData,
        ErrorCode::SourceNotValidFingerIso,
        ErrorCode::SourceNotValidFaceIso,
        ErrorCode::SourceNotValidIrisIso,
        ErrorCode::UnsupportedTargetForSource,
        ErrorCode::UnsupportedCompressionType,
        ErrorCode::TechnicalError,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            ErrorCode::InputSource => "MOS-CNV-001",
            ErrorCode::InvalidRequest => "MOS-CNV-002",
            ErrorCode::InvalidSourceFormat => "MOS-CNV-003",
            ErrorCode::InvalidTargetFormat => "MOS-CNV-004",
            ErrorCode::SourceValueEmpty => "MOS-CNV-005",
            ErrorCode::SourceNotValidBase64 => "MOS-CNV-006",
            ErrorCode::CouldNotReadIsoImageData => "MOS-CNV-007",
            ErrorCode::SourceNotValidFingerIso => "MOS-CNV-008",
            ErrorCode::SourceNotValidFaceIso => "MOS-CNV-009",
            ErrorCode::SourceNotValidIrisIso => "MOS-CNV-010",
            ErrorCode::UnsupportedTargetForSource => "MOS-CNV-011",
            ErrorCode::UnsupportedCompressionType => "MOS-CNV-012",
            ErrorCode::TechnicalError => "MOS-CNV-500",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::InputSource => {
                "Input Source Request may be null or Source Format may be null or Target Format may be null"
            }
            ErrorCode::InvalidRequest => "Invalid Request Value",
            ErrorCode::InvalidSourceFormat => {
                "Invalid Source Value or Source Format not supported[ex:\"ISO19794_4_2011\", \"ISO19794_5_2011\", \"ISO19794_6_2011\"]"
            }
            ErrorCode::InvalidTargetFormat => {
                "Invalid Target Value or Target Format not supported[ex:\"IMAGE/JPEG\", \"IMAGE/PNG\"]"
            }
            ErrorCode::SourceValueEmpty => "Source value can not be empty or null",
            ErrorCode::SourceNotValidBase64 => "Source not valid base64urlencoded",
            ErrorCode::CouldNotReadIsoImageData => "Could not read Source ISO Image Data",
            ErrorCode::SourceNotValidFingerIso => "Source not valid ISO ISO19794_4_2011",
            ErrorCode::SourceNotValidFaceIso => "Source not valid ISO ISO19794_5_2011",
            ErrorCode::SourceNotValidIrisIso => "Source not valid ISO ISO19794_6_2011",
            ErrorCode::UnsupportedTargetForSource => {
                "Target Format Not Supported For the Given Source Format"
            }
            ErrorCode::UnsupportedCompressionType => "Compression type not supported",
            ErrorCode::TechnicalError => "Technical Error",
        }
    }

    /// Resolves a wire code back to its catalog entry. Unknown codes map to
    /// `TechnicalError`.
    pub fn from_code(code: &str) -> ErrorCode {
        ErrorCode::ALL
            .into_iter()
            .find(|entry| entry.code().eq_ignore_ascii_case(code))
            .unwrap_or(ErrorCode::TechnicalError)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("{msg}", msg = ErrorCode::InputSource.message())]
    InputSource,

    #[error("{msg}", msg = ErrorCode::InvalidRequest.message())]
    InvalidRequest,

    #[error("{msg}", msg = ErrorCode::InvalidSourceFormat.message())]
    InvalidSourceFormat,

    #[error("{msg}", msg = ErrorCode::InvalidTargetFormat.message())]
    InvalidTargetFormat,

    #[error("{msg}", msg = ErrorCode::SourceValueEmpty.message())]
    SourceValueEmpty,

    #[error("{msg}: {0}", msg = ErrorCode::SourceNotValidBase64.message())]
    SourceNotValidBase64(String),

    #[error("{msg}: {0}", msg = ErrorCode::CouldNotReadIsoImageData.message())]
    CouldNotReadIsoImageData(String),

    #[error("{msg}: {0}", msg = ErrorCode::SourceNotValidFingerIso.message())]
    SourceNotValidFingerIso(String),

    #[error("{msg}: {0}", msg = ErrorCode::SourceNotValidFaceIso.message())]
    SourceNotValidFaceIso(String),

    #[error("{msg}: {0}", msg = ErrorCode::SourceNotValidIrisIso.message())]
    SourceNotValidIrisIso(String),

    #[error("Target Format({target_format}) Not Supported For the Given Source Format({source_format})")]
    UnsupportedTargetForSource {
        source_format: String,
        target_format: String,
    },

    #[error("{msg}: {0}", msg = ErrorCode::UnsupportedCompressionType.message())]
    UnsupportedCompressionType(String),

    #[error("{msg}: {0}", msg = ErrorCode::TechnicalError.message())]
    Technical(String),
}

impl ConversionError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ConversionError::InputSource => ErrorCode::InputSource,
            ConversionError::InvalidRequest => ErrorCode::InvalidRequest,
            ConversionError::InvalidSourceFormat => ErrorCode::InvalidSourceFormat,
            ConversionError::InvalidTargetFormat => ErrorCode::InvalidTargetFormat,
            ConversionError::SourceValueEmpty => ErrorCode::SourceValueEmpty,
            ConversionError::SourceNotValidBase64(_) => ErrorCode::SourceNotValidBase64,
            ConversionError::CouldNotReadIsoImageData(_) => ErrorCode::CouldNotReadIsoImageData,
            ConversionError::SourceNotValidFingerIso(_) => ErrorCode::SourceNotValidFingerIso,
            ConversionError::SourceNotValidFaceIso(_) => ErrorCode::SourceNotValidFaceIso,
            ConversionError::SourceNotValidIrisIso(_) => ErrorCode::SourceNotValidIrisIso,
            ConversionError::UnsupportedTargetForSource { .. } => {
                ErrorCode::UnsupportedTargetForSource
            }
            ConversionError::UnsupportedCompressionType(_) => {
                ErrorCode::UnsupportedCompressionType
            }
            ConversionError::Technical(_) => ErrorCode::TechnicalError,
        }
    }

    /// Wire code, e.g. `MOS-CNV-006`.
    pub fn code(&self) -> &'static str {
        self.error_code().code()
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
