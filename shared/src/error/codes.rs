//! Unified error codes for the catalog studio
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (models, variants, colours, SKUs, matrix cells)
//! - 9xxx: System / persistence errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 6xxx: Catalog ====================
    /// Model not found
    ModelNotFound = 6001,
    /// Variant not found
    VariantNotFound = 6002,
    /// Colour not found in the pool
    ColourNotFound = 6003,
    /// SKU not found
    SkuNotFound = 6004,
    /// Matrix cell has a request in flight
    CellBusy = 6005,
    /// SKU is not orphaned (its colour still exists in the pool)
    SkuNotOrphaned = 6006,
    /// No sibling SKU with media available to copy from
    NoDonorSibling = 6007,
    /// Bulk toggle target row/column is empty
    EmptyBulkTarget = 6008,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Persistence collaborator rejected the request
    PersistenceRejected = 9002,
    /// Transport failure reaching the persistence collaborator
    TransportError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Catalog
            ErrorCode::ModelNotFound => "Model not found",
            ErrorCode::VariantNotFound => "Variant not found",
            ErrorCode::ColourNotFound => "Colour not found in the pool",
            ErrorCode::SkuNotFound => "SKU not found",
            ErrorCode::CellBusy => "Cell has a request in flight",
            ErrorCode::SkuNotOrphaned => "SKU is not orphaned",
            ErrorCode::NoDonorSibling => "No sibling SKU with media to copy from",
            ErrorCode::EmptyBulkTarget => "Bulk toggle target is empty",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::PersistenceRejected => "Persistence collaborator rejected the request",
            ErrorCode::TransportError => "Transport failure reaching persistence",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Catalog
            6001 => Ok(ErrorCode::ModelNotFound),
            6002 => Ok(ErrorCode::VariantNotFound),
            6003 => Ok(ErrorCode::ColourNotFound),
            6004 => Ok(ErrorCode::SkuNotFound),
            6005 => Ok(ErrorCode::CellBusy),
            6006 => Ok(ErrorCode::SkuNotOrphaned),
            6007 => Ok(ErrorCode::NoDonorSibling),
            6008 => Ok(ErrorCode::EmptyBulkTarget),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::PersistenceRejected),
            9003 => Ok(ErrorCode::TransportError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}
