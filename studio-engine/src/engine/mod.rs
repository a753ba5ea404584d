//! MatrixEngine - cell, bulk, status/primary, media, and ordering operations
//!
//! Owns the entity stores and the per-cell request state machine, and talks
//! to the persistence collaborator. Optimistic-update discipline: a local
//! mutation is applied only after the collaborator confirms, so a rejected
//! call leaves the stores exactly as they were.
//!
//! # Operation Flow
//!
//! ```text
//! toggle_cell(variant_id, colour_id)
//!     ├─ 1. Busy check (cell state machine: Idle → Pending)
//!     ├─ 2. Cell occupancy lookup (cell index)
//!     ├─ 3. create_sku / delete_sku on the collaborator
//!     ├─ 4. On confirm: insert/remove in the entity stores
//!     ├─ 5. Cell state back to Idle (success or failure)
//!     └─ 6. Return Created/Removed or the failure with its context
//! ```

mod error;
pub use error::*;

#[cfg(test)]
mod tests;

use crate::matrix::{self, CellKey, CellState, Matrix};
use crate::persistence::CatalogStore;
use crate::stores::EntityStores;
use shared::models::{MediaGeometry, MediaSet, Model, Sku, SkuCreate, SkuPatch, VariantRef};
use shared::types::{ItemStatus, ProductType};
use std::collections::HashMap;
use std::sync::Arc;

/// Result of toggling one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellToggle {
    /// A SKU was created for the empty cell
    Created(String),
    /// The cell's SKU was deleted
    Removed(String),
}

/// Direction a bulk toggle resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    /// Fewer occupied cells than total: complete the row/column
    Add,
    /// Every cell occupied: clear the row/column
    Remove,
}

/// Aggregate outcome of a bulk toggle, reported only after every
/// sub-operation settled. Already-applied sub-toggles are not reverted on a
/// later failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    pub action: BulkAction,
    pub applied: usize,
    pub failed: usize,
}

impl BulkOutcome {
    fn new(action: BulkAction) -> Self {
        Self {
            action,
            applied: 0,
            failed: 0,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// One media-manager save: edited lists mapped onto the capped flat slots
#[derive(Debug, Clone, Default)]
pub struct MediaEdit {
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub pdfs: Vec<String>,
    /// Explicit primary; falls back to the first gallery image
    pub primary: Option<String>,
    pub geometry: MediaGeometry,
}

/// The matrix reconciliation engine for one open Model
pub struct MatrixEngine {
    stores: EntityStores,
    store: Arc<dyn CatalogStore>,
    busy: HashMap<CellKey, CellState>,
}

impl std::fmt::Debug for MatrixEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixEngine")
            .field("model_id", &self.stores.model.id)
            .field("variants", &self.stores.variants.len())
            .field("colours", &self.stores.colours.len())
            .field("skus", &self.stores.skus.len())
            .finish()
    }
}

impl MatrixEngine {
    /// Open a Model for editing: load all three collections from the
    /// collaborator
    pub async fn open(store: Arc<dyn CatalogStore>, model: Model) -> EngineResult<Self> {
        let model_id = model.id.clone();
        let stores = EntityStores::load(model, store.as_ref())
            .await
            .map_err(|e| EngineError::persistence("load", format!("catalog for model {model_id}"), e))?;
        tracing::info!(
            model_id = %stores.model.id,
            variants = stores.variants.len(),
            colours = stores.colours.len(),
            skus = stores.skus.len(),
            "matrix engine opened"
        );
        Ok(Self {
            stores,
            store,
            busy: HashMap::new(),
        })
    }

    /// Re-list all collections after externally-triggered pool/variant edits
    pub async fn reload(&mut self) -> EngineResult<()> {
        let model_id = self.stores.model.id.clone();
        self.stores
            .reload(self.store.as_ref())
            .await
            .map_err(|e| EngineError::persistence("load", format!("catalog for model {model_id}"), e))
    }

    pub fn stores(&self) -> &EntityStores {
        &self.stores
    }

    /// Derive the grid for rendering
    pub fn matrix(&self) -> Matrix {
        matrix::build(&self.stores, &self.busy)
    }

    /// Request state of one cell (absent = Idle)
    pub fn cell_state(&self, variant_id: &str, colour_id: &str) -> CellState {
        self.busy
            .get(&CellKey::new(variant_id, colour_id))
            .copied()
            .unwrap_or_default()
    }

    /// Force a cell into Pending (for testing the busy guard)
    #[cfg(test)]
    pub(crate) fn mark_cell_pending(&mut self, variant_id: &str, colour_id: &str) {
        self.busy
            .insert(CellKey::new(variant_id, colour_id), CellState::Pending);
    }

    // ==================== Cell toggler ====================

    /// Create-or-delete toggle for one cell. At most one SKU ever exists per
    /// (variant, colour) pair; a cell with a request in flight rejects the
    /// second toggle.
    pub async fn toggle_cell(&mut self, variant_id: &str, colour_id: &str) -> EngineResult<CellToggle> {
        let key = CellKey::new(variant_id, colour_id);
        if self.busy.get(&key) == Some(&CellState::Pending) {
            return Err(EngineError::CellBusy {
                variant_id: variant_id.to_string(),
                colour_id: colour_id.to_string(),
            });
        }

        let existing = self
            .stores
            .sku_for_cell(variant_id, colour_id)
            .map(|s| s.id.clone());

        self.busy.insert(key.clone(), CellState::Pending);
        let result = match existing {
            Some(sku_id) => self.delete_cell_sku(variant_id, colour_id, &sku_id).await,
            None => self.create_cell_sku(variant_id, colour_id).await,
        };
        self.busy.remove(&key);
        result
    }

    async fn create_cell_sku(&mut self, variant_id: &str, colour_id: &str) -> EngineResult<CellToggle> {
        // Look the colour up among the effective rows so cells stay
        // toggleable in repair mode
        let (rows, _) = matrix::effective_colours(&self.stores);
        let colour = rows
            .into_iter()
            .find(|r| r.colour.id == colour_id)
            .map(|r| r.colour)
            .ok_or_else(|| EngineError::ColourNotFound(colour_id.to_string()))?;
        let variant = self
            .stores
            .variant(variant_id)
            .ok_or_else(|| EngineError::VariantNotFound(variant_id.to_string()))?;

        let product_type = self.stores.product_type();
        let name = match product_type {
            ProductType::Accessory => format!(
                "{} {} for {}",
                self.stores.model.name,
                colour.name,
                variant.compatibility_label()
            ),
            ProductType::Vehicle | ProductType::Service => colour.name.clone(),
        };

        let payload = SkuCreate {
            brand_id: self.stores.model.brand_id.clone(),
            model_id: self.stores.model.id.clone(),
            variant: VariantRef::new(product_type, variant_id),
            colour_id: Some(colour.id.clone()),
            name,
            colour_name: Some(colour.name.clone()),
            hex_primary: colour.hex_primary.clone(),
            hex_secondary: colour.hex_secondary.clone(),
            finish: colour.finish.clone(),
        };

        match self.store.create_sku(payload).await {
            Ok(sku) => {
                tracing::info!(sku_id = %sku.id, variant_id, colour_id, "SKU created");
                let id = sku.id.clone();
                self.stores.insert_sku(sku);
                Ok(CellToggle::Created(id))
            }
            Err(e) => {
                tracing::error!(variant_id, colour_id, error = %e, "SKU create rejected");
                Err(EngineError::persistence(
                    "create",
                    format!("sku for cell ({variant_id}, {colour_id})"),
                    e,
                ))
            }
        }
    }

    async fn delete_cell_sku(
        &mut self,
        variant_id: &str,
        colour_id: &str,
        sku_id: &str,
    ) -> EngineResult<CellToggle> {
        match self.store.delete_sku(sku_id).await {
            Ok(()) => {
                tracing::info!(sku_id, variant_id, colour_id, "SKU deleted");
                self.stores.remove_sku(sku_id);
                Ok(CellToggle::Removed(sku_id.to_string()))
            }
            Err(e) => {
                tracing::error!(sku_id, variant_id, colour_id, error = %e, "SKU delete rejected");
                Err(EngineError::persistence(
                    "delete",
                    format!("sku {sku_id}"),
                    e,
                ))
            }
        }
    }

    // ==================== Bulk toggler ====================

    /// Toggle a whole variant column (or row, for accessories).
    ///
    /// Strictly-fewer-occupied-than-total resolves to Add, so a partially
    /// filled target is completed, never cleared. Cells are toggled
    /// sequentially; a sub-failure is recorded and the loop continues.
    pub async fn toggle_all_for_variant(&mut self, variant_id: &str) -> EngineResult<BulkOutcome> {
        if self.stores.variant(variant_id).is_none() {
            return Err(EngineError::VariantNotFound(variant_id.to_string()));
        }
        let (rows, _) = matrix::effective_colours(&self.stores);
        if rows.is_empty() {
            return Err(EngineError::EmptyBulkTarget);
        }
        let colour_ids: Vec<String> = rows.iter().map(|r| r.colour.id.clone()).collect();

        let occupied = colour_ids
            .iter()
            .filter(|cid| self.stores.sku_for_cell(variant_id, cid).is_some())
            .count();
        let action = if occupied < colour_ids.len() {
            BulkAction::Add
        } else {
            BulkAction::Remove
        };

        let mut outcome = BulkOutcome::new(action);
        for colour_id in &colour_ids {
            self.bulk_step(variant_id, colour_id, action, &mut outcome).await;
        }
        tracing::info!(
            variant_id,
            action = ?action,
            applied = outcome.applied,
            failed = outcome.failed,
            "bulk toggle for variant settled"
        );
        Ok(outcome)
    }

    /// Toggle a whole colour row (or column, for accessories)
    pub async fn toggle_all_for_colour(&mut self, colour_id: &str) -> EngineResult<BulkOutcome> {
        let (rows, _) = matrix::effective_colours(&self.stores);
        if !rows.iter().any(|r| r.colour.id == colour_id) {
            return Err(EngineError::ColourNotFound(colour_id.to_string()));
        }
        if self.stores.variants.is_empty() {
            return Err(EngineError::EmptyBulkTarget);
        }
        let variant_ids: Vec<String> = self.stores.variants.iter().map(|v| v.id.clone()).collect();

        let occupied = variant_ids
            .iter()
            .filter(|vid| self.stores.sku_for_cell(vid, colour_id).is_some())
            .count();
        let action = if occupied < variant_ids.len() {
            BulkAction::Add
        } else {
            BulkAction::Remove
        };

        let mut outcome = BulkOutcome::new(action);
        for variant_id in &variant_ids {
            self.bulk_step(variant_id, colour_id, action, &mut outcome).await;
        }
        tracing::info!(
            colour_id,
            action = ?action,
            applied = outcome.applied,
            failed = outcome.failed,
            "bulk toggle for colour settled"
        );
        Ok(outcome)
    }

    async fn bulk_step(
        &mut self,
        variant_id: &str,
        colour_id: &str,
        action: BulkAction,
        outcome: &mut BulkOutcome,
    ) {
        let is_occupied = self.stores.sku_for_cell(variant_id, colour_id).is_some();
        let needs_toggle = match action {
            BulkAction::Add => !is_occupied,
            BulkAction::Remove => is_occupied,
        };
        if !needs_toggle {
            return;
        }
        match self.toggle_cell(variant_id, colour_id).await {
            Ok(_) => outcome.applied += 1,
            Err(err) => {
                tracing::warn!(variant_id, colour_id, error = %err, "bulk sub-toggle failed");
                outcome.failed += 1;
            }
        }
    }

    // ==================== Status / primary toggler ====================

    /// Flip ACTIVE ⇄ DRAFT and return the new status
    pub async fn toggle_status(&mut self, sku_id: &str) -> EngineResult<ItemStatus> {
        let sku = self
            .stores
            .sku(sku_id)
            .ok_or_else(|| EngineError::SkuNotFound(sku_id.to_string()))?;
        let next = sku.status.toggled();
        let patch = SkuPatch {
            status: Some(next),
            ..Default::default()
        };
        match self.store.update_sku(sku_id, patch).await {
            Ok(updated) => {
                tracing::info!(sku_id, status = %next, "SKU status toggled");
                self.stores.replace_sku(updated);
                Ok(next)
            }
            Err(e) => Err(EngineError::persistence(
                "update",
                format!("sku {sku_id} status"),
                e,
            )),
        }
    }

    /// Set or unset the primary SKU of a variant group.
    ///
    /// An already-primary target is unset with no replacement chosen.
    /// Otherwise the current primary (if any) is unset first, then the
    /// target set — two sequential calls, so a failure between them leaves
    /// the group with zero primaries, never two.
    pub async fn set_primary(&mut self, sku_id: &str) -> EngineResult<bool> {
        let target = self
            .stores
            .sku(sku_id)
            .ok_or_else(|| EngineError::SkuNotFound(sku_id.to_string()))?
            .clone();

        if target.is_primary {
            let updated = self
                .update_primary_flag(sku_id, false)
                .await?;
            self.stores.replace_sku(updated);
            tracing::info!(sku_id, "SKU primary designation removed");
            return Ok(false);
        }

        let prev_primary = self
            .stores
            .skus_for_variant(&target.variant.variant_id)
            .find(|s| s.is_primary && s.id != target.id)
            .map(|s| s.id.clone());
        if let Some(prev_id) = prev_primary {
            let unset = self.update_primary_flag(&prev_id, false).await?;
            self.stores.replace_sku(unset);
        }

        let updated = self.update_primary_flag(sku_id, true).await?;
        self.stores.replace_sku(updated);
        tracing::info!(sku_id, variant_id = %target.variant.variant_id, "SKU set as primary");
        Ok(true)
    }

    async fn update_primary_flag(&mut self, sku_id: &str, is_primary: bool) -> EngineResult<Sku> {
        let patch = SkuPatch {
            is_primary: Some(is_primary),
            ..Default::default()
        };
        self.store
            .update_sku(sku_id, patch)
            .await
            .map_err(|e| EngineError::persistence("update", format!("sku {sku_id} primary flag"), e))
    }

    // ==================== Media ====================

    /// Save a media-manager edit onto a SKU, clamping gallery/video lists to
    /// their column caps; the primary image defaults to the first gallery
    /// image when not explicitly chosen
    pub async fn save_media(&mut self, sku_id: &str, edit: MediaEdit) -> EngineResult<()> {
        if self.stores.sku(sku_id).is_none() {
            return Err(EngineError::SkuNotFound(sku_id.to_string()));
        }

        let mut media = MediaSet {
            primary_image: edit.primary.or_else(|| edit.images.first().cloned()),
            gallery: edit.images,
            videos: edit.videos,
            pdf: edit.pdfs.into_iter().next(),
        };
        media.truncate_to_caps();

        let patch = SkuPatch {
            media: Some(media),
            geometry: Some(edit.geometry),
            ..Default::default()
        };
        match self.store.update_sku(sku_id, patch).await {
            Ok(updated) => {
                tracing::info!(sku_id, "SKU media saved");
                self.stores.replace_sku(updated);
                Ok(())
            }
            Err(e) => Err(EngineError::persistence(
                "update",
                format!("sku {sku_id} media"),
                e,
            )),
        }
    }

    /// Copy gallery and geometry from a sibling SKU (same colour, own
    /// image) onto the target — a one-time duplication, not a live link.
    /// The target's videos and pdf are untouched. Returns the donor's id.
    pub async fn copy_media_from_sibling(&mut self, sku_id: &str) -> EngineResult<String> {
        let target = self
            .stores
            .sku(sku_id)
            .ok_or_else(|| EngineError::SkuNotFound(sku_id.to_string()))?
            .clone();

        let donor = self
            .stores
            .skus
            .iter()
            .find(|s| {
                s.colour_id == target.colour_id
                    && s.id != target.id
                    && s.media.primary_image.is_some()
            })
            .cloned()
            .ok_or_else(|| EngineError::NoDonorSibling(sku_id.to_string()))?;

        let media = MediaSet {
            primary_image: donor.media.primary_image.clone(),
            gallery: donor.media.gallery.clone(),
            videos: target.media.videos.clone(),
            pdf: target.media.pdf.clone(),
        };
        let patch = SkuPatch {
            media: Some(media),
            geometry: Some(donor.geometry.clone()),
            ..Default::default()
        };
        match self.store.update_sku(sku_id, patch).await {
            Ok(updated) => {
                tracing::info!(sku_id, donor_id = %donor.id, "media copied from sibling SKU");
                self.stores.replace_sku(updated);
                Ok(donor.id)
            }
            Err(e) => Err(EngineError::persistence(
                "update",
                format!("sku {sku_id} media"),
                e,
            )),
        }
    }

    // ==================== Position reconciler ====================

    /// Move one colour to a new position (splice, not swap). The target is
    /// clamped into bounds, every position recomputed dense zero-based, and
    /// the full ordered id list persisted in one call before the stores
    /// change. The next derived matrix re-sorts from the new positions.
    pub async fn reposition_colours(
        &mut self,
        current_index: usize,
        target_position: i64,
    ) -> EngineResult<()> {
        let len = self.stores.colours.len();
        if current_index >= len {
            return Err(EngineError::IndexOutOfBounds {
                index: current_index,
                len,
            });
        }
        let target = target_position.clamp(0, len as i64 - 1) as usize;

        let mut order = self.stores.colours.clone();
        let moved = order.remove(current_index);
        order.insert(target, moved);
        let ordered_ids: Vec<String> = order.iter().map(|c| c.id.clone()).collect();

        self.store
            .reorder_colours(&self.stores.model.id, &ordered_ids)
            .await
            .map_err(|e| EngineError::persistence("reorder", "colour pool".to_string(), e))?;

        for (idx, colour) in order.iter_mut().enumerate() {
            colour.position = Some(idx as i32);
        }
        self.stores.colours = order;
        tracing::info!(current_index, target, "colour pool reordered");
        Ok(())
    }

    /// Move one variant to a new position; same splice/clamp/densify
    /// semantics as [`Self::reposition_colours`]
    pub async fn reposition_variants(
        &mut self,
        current_index: usize,
        target_position: i64,
    ) -> EngineResult<()> {
        let len = self.stores.variants.len();
        if current_index >= len {
            return Err(EngineError::IndexOutOfBounds {
                index: current_index,
                len,
            });
        }
        let target = target_position.clamp(0, len as i64 - 1) as usize;

        let mut order = self.stores.variants.clone();
        let moved = order.remove(current_index);
        order.insert(target, moved);
        let ordered_ids: Vec<String> = order.iter().map(|v| v.id.clone()).collect();

        self.store
            .reorder_variants(&self.stores.model.id, self.stores.product_type(), &ordered_ids)
            .await
            .map_err(|e| EngineError::persistence("reorder", "variant list".to_string(), e))?;

        for (idx, variant) in order.iter_mut().enumerate() {
            variant.position = idx as i32;
        }
        self.stores.variants = order;
        tracing::info!(current_index, target, "variant list reordered");
        Ok(())
    }

    // ==================== Orphan reconciler ====================

    /// SKUs whose colour no longer resolves to an effective pool row.
    /// Never auto-deleted — the pool may be mid-edit and the condition
    /// transient.
    pub fn orphaned_skus(&self) -> Vec<&Sku> {
        let (rows, _) = matrix::effective_colours(&self.stores);
        matrix::orphaned_skus(&self.stores, &rows)
    }

    /// Explicit per-item cleanup of an orphaned SKU
    pub async fn delete_orphan(&mut self, sku_id: &str) -> EngineResult<()> {
        if self.stores.sku(sku_id).is_none() {
            return Err(EngineError::SkuNotFound(sku_id.to_string()));
        }
        if !self.orphaned_skus().iter().any(|s| s.id == sku_id) {
            return Err(EngineError::SkuNotOrphaned(sku_id.to_string()));
        }
        self.store
            .delete_sku(sku_id)
            .await
            .map_err(|e| EngineError::persistence("delete", format!("orphaned sku {sku_id}"), e))?;
        self.stores.remove_sku(sku_id);
        tracing::info!(sku_id, "orphaned SKU deleted");
        Ok(())
    }
}
