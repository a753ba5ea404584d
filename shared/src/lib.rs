//! Shared types for the catalog studio
//!
//! Data models and error types used by the matrix engine and any
//! presentation layer sitting on top of it. Pure data + serde, no I/O.

pub mod error;
pub mod models;
pub mod types;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
pub use types::{ItemStatus, ProductType};
