//! Entity stores
//!
//! In-memory collections for the currently open Model — the source of truth
//! for rendering. Populated from the persistence collaborator; mutated only
//! after the collaborator confirms an operation.

use crate::persistence::{CatalogStore, StoreResult};
use shared::models::{Colour, Model, Sku, Variant};
use shared::types::ProductType;

/// Variant, Colour, and Sku collections for one open Model
#[derive(Debug, Clone)]
pub struct EntityStores {
    pub model: Model,
    pub variants: Vec<Variant>,
    pub colours: Vec<Colour>,
    pub skus: Vec<Sku>,
}

impl EntityStores {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            variants: Vec::new(),
            colours: Vec::new(),
            skus: Vec::new(),
        }
    }

    /// Populate all three collections from the collaborator
    pub async fn load(model: Model, store: &dyn CatalogStore) -> StoreResult<Self> {
        let mut stores = Self::new(model);
        stores.reload(store).await?;
        Ok(stores)
    }

    /// Re-list all three collections; called whenever externally-triggered
    /// pool/variant changes land
    pub async fn reload(&mut self, store: &dyn CatalogStore) -> StoreResult<()> {
        self.variants = store
            .list_variants(&self.model.id, self.model.product_type)
            .await?;
        self.colours = store.list_colours(&self.model.id).await?;
        self.skus = store.list_skus_by_model(&self.model.id).await?;
        Ok(())
    }

    pub fn product_type(&self) -> ProductType {
        self.model.product_type
    }

    // ==================== Lookups ====================

    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    pub fn colour(&self, id: &str) -> Option<&Colour> {
        self.colours.iter().find(|c| c.id == id)
    }

    pub fn sku(&self, id: &str) -> Option<&Sku> {
        self.skus.iter().find(|s| s.id == id)
    }

    /// Cell index: (variantId, colourId) → at most one Sku
    ///
    /// At-most-one holds by construction — the cell toggler never creates a
    /// second Sku for an occupied pair.
    pub fn sku_for_cell(&self, variant_id: &str, colour_id: &str) -> Option<&Sku> {
        self.skus
            .iter()
            .find(|s| s.variant.variant_id == variant_id && s.colour_id.as_deref() == Some(colour_id))
    }

    /// All SKUs in one variant group (same owning-variant reference)
    pub fn skus_for_variant<'a>(&'a self, variant_id: &'a str) -> impl Iterator<Item = &'a Sku> {
        self.skus
            .iter()
            .filter(move |s| s.variant.variant_id == variant_id)
    }

    // ==================== Confirmed mutations ====================

    pub fn insert_sku(&mut self, sku: Sku) {
        self.skus.push(sku);
    }

    pub fn remove_sku(&mut self, id: &str) {
        self.skus.retain(|s| s.id != id);
    }

    /// Swap in the collaborator-confirmed version of a SKU
    pub fn replace_sku(&mut self, updated: Sku) {
        if let Some(slot) = self.skus.iter_mut().find(|s| s.id == updated.id) {
            *slot = updated;
        }
    }
}
