//! Unified error system for the catalog studio
//!
//! - [`ErrorCode`]: standardized error codes for all error types
//! - [`ErrorCategory`]: classification of errors by domain
//! - [`AppError`]: rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 6xxx: Catalog errors
//! - 9xxx: System / persistence errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::SkuNotFound, "SKU sku_1 not found")
//!     .with_detail("sku_id", "sku_1");
//! assert_eq!(err.code, ErrorCode::SkuNotFound);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
