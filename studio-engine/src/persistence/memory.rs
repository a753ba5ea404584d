//! In-memory persistence collaborator
//!
//! Backs the engine tests and demo setups. Mirrors the real backend's
//! observable behavior: dense positions after reorder, no cascade from
//! colour deletion to SKUs, and optional one-shot failure injection for
//! exercising the failure paths.

use super::{CatalogStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use shared::models::{
    Colour, ColourCreate, ColourPatch, MediaGeometry, MediaSet, Sku, SkuCreate, SkuPatch, Variant,
    VariantCreate, VariantPatch,
};
use shared::types::{ItemStatus, ProductType};
use std::collections::HashMap;

#[derive(Default)]
struct Tables {
    variants: HashMap<String, (ProductType, Variant)>,
    colours: HashMap<String, Colour>,
    skus: HashMap<String, Sku>,
    fail_next_create: bool,
    /// Fail the update after skipping this many successful ones
    fail_update_after: Option<usize>,
    fail_next_delete: bool,
}

/// In-memory [`CatalogStore`] implementation
#[derive(Default)]
pub struct MemoryCatalog {
    inner: Mutex<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id(prefix: &str) -> String {
        format!("{}_{}", prefix, uuid::Uuid::new_v4())
    }

    // ==================== Seeding ====================

    pub fn seed_variant(&self, product_type: ProductType, variant: Variant) {
        self.inner
            .lock()
            .variants
            .insert(variant.id.clone(), (product_type, variant));
    }

    pub fn seed_colour(&self, colour: Colour) {
        self.inner.lock().colours.insert(colour.id.clone(), colour);
    }

    pub fn seed_sku(&self, sku: Sku) {
        self.inner.lock().skus.insert(sku.id.clone(), sku);
    }

    // ==================== Failure injection ====================

    /// Make the next create_sku call fail with a rejected error
    pub fn fail_next_create(&self) {
        self.inner.lock().fail_next_create = true;
    }

    /// Make the next update_sku call fail with a rejected error
    pub fn fail_next_update(&self) {
        self.inner.lock().fail_update_after = Some(0);
    }

    /// Let `skip` update_sku calls succeed, then fail the next one
    pub fn fail_update_after(&self, skip: usize) {
        self.inner.lock().fail_update_after = Some(skip);
    }

    /// Make the next delete_sku call fail with a rejected error
    pub fn fail_next_delete(&self) {
        self.inner.lock().fail_next_delete = true;
    }

    // ==================== Inspection ====================

    pub fn sku_count(&self) -> usize {
        self.inner.lock().skus.len()
    }

    pub fn sku(&self, id: &str) -> Option<Sku> {
        self.inner.lock().skus.get(id).cloned()
    }

    pub fn colour(&self, id: &str) -> Option<Colour> {
        self.inner.lock().colours.get(id).cloned()
    }
}

fn take_flag(flag: &mut bool) -> bool {
    std::mem::take(flag)
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_variants(
        &self,
        model_id: &str,
        product_type: ProductType,
    ) -> StoreResult<Vec<Variant>> {
        let tables = self.inner.lock();
        let mut variants: Vec<Variant> = tables
            .variants
            .values()
            .filter(|(kind, v)| *kind == product_type && v.model_id == model_id)
            .map(|(_, v)| v.clone())
            .collect();
        variants.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        Ok(variants)
    }

    async fn list_colours(&self, model_id: &str) -> StoreResult<Vec<Colour>> {
        let tables = self.inner.lock();
        let mut colours: Vec<Colour> = tables
            .colours
            .values()
            .filter(|c| c.model_id == model_id)
            .cloned()
            .collect();
        colours.sort_by(|a, b| {
            let pa = a.position.map_or(i64::MAX, i64::from);
            let pb = b.position.map_or(i64::MAX, i64::from);
            pa.cmp(&pb).then_with(|| a.created_at.cmp(&b.created_at)).then_with(|| a.id.cmp(&b.id))
        });
        Ok(colours)
    }

    async fn list_skus_by_model(&self, model_id: &str) -> StoreResult<Vec<Sku>> {
        let tables = self.inner.lock();
        let mut skus: Vec<Sku> = tables
            .skus
            .values()
            .filter(|s| s.model_id == model_id)
            .cloned()
            .collect();
        skus.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(skus)
    }

    async fn create_sku(&self, payload: SkuCreate) -> StoreResult<Sku> {
        let mut tables = self.inner.lock();
        if take_flag(&mut tables.fail_next_create) {
            return Err(StoreError::Rejected("injected create failure".into()));
        }
        let now = Utc::now();
        let sku = Sku {
            id: Self::mint_id("sku"),
            brand_id: payload.brand_id,
            model_id: payload.model_id,
            variant: payload.variant,
            colour_id: payload.colour_id,
            name: payload.name,
            status: ItemStatus::Draft,
            is_primary: false,
            colour_name: payload.colour_name,
            hex_primary: payload.hex_primary,
            hex_secondary: payload.hex_secondary,
            finish: payload.finish,
            media: MediaSet::default(),
            geometry: MediaGeometry::default(),
            created_at: now,
            updated_at: now,
        };
        tables.skus.insert(sku.id.clone(), sku.clone());
        Ok(sku)
    }

    async fn update_sku(&self, id: &str, patch: SkuPatch) -> StoreResult<Sku> {
        let mut tables = self.inner.lock();
        match tables.fail_update_after {
            Some(0) => {
                tables.fail_update_after = None;
                return Err(StoreError::Rejected("injected update failure".into()));
            }
            Some(n) => tables.fail_update_after = Some(n - 1),
            None => {}
        }
        let sku = tables
            .skus
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("sku {id}")))?;
        if let Some(name) = patch.name {
            sku.name = name;
        }
        if let Some(status) = patch.status {
            sku.status = status;
        }
        if let Some(is_primary) = patch.is_primary {
            sku.is_primary = is_primary;
        }
        if let Some(colour_name) = patch.colour_name {
            sku.colour_name = Some(colour_name);
        }
        if let Some(media) = patch.media {
            sku.media = media;
        }
        if let Some(geometry) = patch.geometry {
            sku.geometry = geometry;
        }
        sku.updated_at = Utc::now();
        Ok(sku.clone())
    }

    async fn delete_sku(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.inner.lock();
        if take_flag(&mut tables.fail_next_delete) {
            return Err(StoreError::Rejected("injected delete failure".into()));
        }
        tables
            .skus
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("sku {id}")))
    }

    async fn reorder_colours(&self, model_id: &str, ordered_ids: &[String]) -> StoreResult<()> {
        let mut tables = self.inner.lock();
        for (idx, id) in ordered_ids.iter().enumerate() {
            let colour = tables
                .colours
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(format!("colour {id}")))?;
            if colour.model_id != model_id {
                return Err(StoreError::Rejected(format!(
                    "colour {id} does not belong to model {model_id}"
                )));
            }
            colour.position = Some(idx as i32);
            colour.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn reorder_variants(
        &self,
        model_id: &str,
        product_type: ProductType,
        ordered_ids: &[String],
    ) -> StoreResult<()> {
        let mut tables = self.inner.lock();
        for (idx, id) in ordered_ids.iter().enumerate() {
            let (kind, variant) = tables
                .variants
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(format!("variant {id}")))?;
            if *kind != product_type || variant.model_id != model_id {
                return Err(StoreError::Rejected(format!(
                    "variant {id} does not belong to model {model_id}"
                )));
            }
            variant.position = idx as i32;
            variant.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn create_colour(&self, payload: ColourCreate) -> StoreResult<Colour> {
        let mut tables = self.inner.lock();
        let now = Utc::now();
        let colour = Colour {
            id: Self::mint_id("col"),
            model_id: payload.model_id,
            name: payload.name,
            position: payload.position,
            hex_primary: payload.hex_primary,
            hex_secondary: payload.hex_secondary,
            finish: payload.finish,
            media: MediaSet::default(),
            media_shared: false,
            created_at: now,
            updated_at: now,
        };
        tables.colours.insert(colour.id.clone(), colour.clone());
        Ok(colour)
    }

    async fn update_colour(&self, id: &str, patch: ColourPatch) -> StoreResult<Colour> {
        let mut tables = self.inner.lock();
        let colour = tables
            .colours
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("colour {id}")))?;
        if let Some(name) = patch.name {
            colour.name = name;
        }
        if let Some(position) = patch.position {
            colour.position = Some(position);
        }
        if let Some(hex) = patch.hex_primary {
            colour.hex_primary = Some(hex);
        }
        if let Some(hex) = patch.hex_secondary {
            colour.hex_secondary = Some(hex);
        }
        if let Some(finish) = patch.finish {
            colour.finish = Some(finish);
        }
        if let Some(media) = patch.media {
            colour.media = media;
        }
        if let Some(shared_flag) = patch.media_shared {
            colour.media_shared = shared_flag;
        }
        colour.updated_at = Utc::now();
        Ok(colour.clone())
    }

    async fn delete_colour(&self, id: &str) -> StoreResult<()> {
        // No cascade: SKUs referencing this colour stay and become orphaned
        self.inner
            .lock()
            .colours
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("colour {id}")))
    }

    async fn create_variant(
        &self,
        product_type: ProductType,
        payload: VariantCreate,
    ) -> StoreResult<Variant> {
        let mut tables = self.inner.lock();
        let now = Utc::now();
        let variant = Variant {
            id: Self::mint_id("var"),
            model_id: payload.model_id,
            name: payload.name,
            status: ItemStatus::Draft,
            position: payload.position.unwrap_or_default(),
            media: MediaSet::default(),
            media_shared: false,
            suitable_for: payload.suitable_for.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        tables
            .variants
            .insert(variant.id.clone(), (product_type, variant.clone()));
        Ok(variant)
    }

    async fn update_variant(
        &self,
        id: &str,
        product_type: ProductType,
        patch: VariantPatch,
    ) -> StoreResult<Variant> {
        let mut tables = self.inner.lock();
        let (kind, variant) = tables
            .variants
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("variant {id}")))?;
        if *kind != product_type {
            return Err(StoreError::NotFound(format!("variant {id}")));
        }
        if let Some(name) = patch.name {
            variant.name = name;
        }
        if let Some(status) = patch.status {
            variant.status = status;
        }
        if let Some(position) = patch.position {
            variant.position = position;
        }
        if let Some(media) = patch.media {
            variant.media = media;
        }
        if let Some(shared_flag) = patch.media_shared {
            variant.media_shared = shared_flag;
        }
        if let Some(suitable_for) = patch.suitable_for {
            variant.suitable_for = suitable_for;
        }
        variant.updated_at = Utc::now();
        Ok(variant.clone())
    }

    async fn delete_variant(&self, id: &str, product_type: ProductType) -> StoreResult<()> {
        let mut tables = self.inner.lock();
        match tables.variants.get(id) {
            Some((kind, _)) if *kind == product_type => {
                tables.variants.remove(id);
                Ok(())
            }
            _ => Err(StoreError::NotFound(format!("variant {id}"))),
        }
    }
}
