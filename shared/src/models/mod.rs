//! Data models
//!
//! Shared between the matrix engine and any presentation layer.
//! All IDs are `String` (upstream UUID strings).

pub mod colour;
pub mod media;
pub mod model;
pub mod sku;
pub mod variant;

// Re-exports
pub use colour::*;
pub use media::*;
pub use model::*;
pub use sku::*;
pub use variant::*;
