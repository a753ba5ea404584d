//! Persistence collaborator boundary
//!
//! The engine owns no wire or file format; all I/O crosses [`CatalogStore`].
//! Brand/model CRUD and the step components live on the far side of this
//! trait. The colour/variant CRUD methods are consumed by those external
//! steps, not by the engine directly — the engine only re-derives its grid
//! after such changes land in the entity stores.

mod memory;

pub use memory::MemoryCatalog;

use async_trait::async_trait;
use shared::models::{
    Colour, ColourCreate, ColourPatch, Sku, SkuCreate, SkuPatch, Variant, VariantCreate,
    VariantPatch,
};
use shared::types::ProductType;
use thiserror::Error;

/// Errors crossing the collaborator boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence collaborator contract
///
/// No timeout or cancellation layer here; a call runs to completion or
/// failure. Two simultaneous editors race at the collaborator
/// (last-write-wins); the engine does not detect that case.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_variants(
        &self,
        model_id: &str,
        product_type: ProductType,
    ) -> StoreResult<Vec<Variant>>;

    async fn list_colours(&self, model_id: &str) -> StoreResult<Vec<Colour>>;

    async fn list_skus_by_model(&self, model_id: &str) -> StoreResult<Vec<Sku>>;

    async fn create_sku(&self, payload: SkuCreate) -> StoreResult<Sku>;

    async fn update_sku(&self, id: &str, patch: SkuPatch) -> StoreResult<Sku>;

    async fn delete_sku(&self, id: &str) -> StoreResult<()>;

    /// Persist the full ordered id list in one call
    async fn reorder_colours(&self, model_id: &str, ordered_ids: &[String]) -> StoreResult<()>;

    async fn reorder_variants(
        &self,
        model_id: &str,
        product_type: ProductType,
        ordered_ids: &[String],
    ) -> StoreResult<()>;

    // ==================== Consumed by step components ====================

    async fn create_colour(&self, payload: ColourCreate) -> StoreResult<Colour>;

    async fn update_colour(&self, id: &str, patch: ColourPatch) -> StoreResult<Colour>;

    /// Does NOT cascade to SKUs; dependent SKUs become orphaned
    async fn delete_colour(&self, id: &str) -> StoreResult<()>;

    async fn create_variant(
        &self,
        product_type: ProductType,
        payload: VariantCreate,
    ) -> StoreResult<Variant>;

    async fn update_variant(
        &self,
        id: &str,
        product_type: ProductType,
        patch: VariantPatch,
    ) -> StoreResult<Variant>;

    async fn delete_variant(&self, id: &str, product_type: ProductType) -> StoreResult<()>;
}
