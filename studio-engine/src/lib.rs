//! Variant–Colour SKU matrix reconciliation engine
//!
//! Derives a consistent grid of (variant, colour) cells from independently
//! edited variant and colour pools, toggles SKU existence/status/primary
//! designation per cell or in bulk, resolves the media inheritance chain
//! (SKU → Colour → Variant → Model), keeps ordering positions dense across
//! reorders, and surfaces orphaned SKUs for operator cleanup.
//!
//! Persistence is an external collaborator behind [`CatalogStore`]; the
//! engine mutates its in-memory [`EntityStores`] only after the collaborator
//! confirms. Single-editor, event-driven: every operation suspends only at
//! collaborator calls.

pub mod engine;
pub mod matrix;
pub mod persistence;
pub mod stores;

// Re-exports
pub use engine::{
    BulkAction, BulkOutcome, CellToggle, EngineError, EngineResult, MatrixEngine, MediaEdit,
};
pub use matrix::{
    CellKey, CellState, EffectiveColour, Matrix, MatrixCell, MediaSource, Orientation,
    ResolvedImage,
};
pub use persistence::{CatalogStore, MemoryCatalog, StoreError, StoreResult};
pub use stores::EntityStores;
