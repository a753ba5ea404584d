//! Matrix builder and cell index views
//!
//! Pure derivation: the grid is rebuilt from the entity stores on every
//! render, so pool edits and reorders landing in the stores show up
//! immediately.

pub mod media;

pub use media::{MediaSource, ResolvedImage};

use crate::stores::EntityStores;
use media::{resolve_image, sku_swatch};
use serde::Serialize;
use shared::models::{Colour, MediaSet, Sku, Variant};
use shared::types::{ItemStatus, ProductType};
use std::collections::HashMap;

/// One (variant, colour) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CellKey {
    pub variant_id: String,
    pub colour_id: String,
}

impl CellKey {
    pub fn new(variant_id: impl Into<String>, colour_id: impl Into<String>) -> Self {
        Self {
            variant_id: variant_id.into(),
            colour_id: colour_id.into(),
        }
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.variant_id, self.colour_id)
    }
}

/// Per-cell request state machine: Idle → Pending → Idle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Idle,
    Pending,
}

/// Grid orientation — a presentation transposition only; the underlying
/// cell semantics are identical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Rows = Colours, columns = Variants (VEHICLE, SERVICE)
    ColourRows,
    /// Rows = Variants ("suitable-for" targets), columns = sub-variants
    /// (ACCESSORY)
    VariantRows,
}

impl Orientation {
    pub fn for_product_type(product_type: ProductType) -> Self {
        match product_type {
            ProductType::Accessory => Orientation::VariantRows,
            ProductType::Vehicle | ProductType::Service => Orientation::ColourRows,
        }
    }
}

/// A pool row of the matrix; `synthetic` marks entries reconstructed from
/// orphaned SKUs in repair mode
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveColour {
    pub colour: Colour,
    pub synthetic: bool,
}

/// One resolved cell of the grid
#[derive(Debug, Clone, Serialize)]
pub struct MatrixCell {
    pub key: CellKey,
    pub sku_id: Option<String>,
    pub status: Option<ItemStatus>,
    pub is_primary: bool,
    pub image: Option<ResolvedImage>,
    /// Swatch hex: linked Colour's `hex_primary` when the colour still
    /// exists, else the SKU's own denormalized copy
    pub swatch: Option<String>,
    pub busy: bool,
}

impl MatrixCell {
    pub fn occupied(&self) -> bool {
        self.sku_id.is_some()
    }
}

/// The derived grid handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct Matrix {
    pub orientation: Orientation,
    /// True when the colour pool was empty and rows were reconstructed from
    /// SKUs — an explicit repair affordance, not a steady-state path
    pub repair_mode: bool,
    /// Sorted pool rows
    pub colours: Vec<EffectiveColour>,
    /// Ordered variant axis
    pub variants: Vec<Variant>,
    /// `cells[colour_index][variant_index]`, regardless of orientation
    pub cells: Vec<Vec<MatrixCell>>,
    /// SKUs whose colour no longer resolves to a pool row; surfaced for
    /// manual per-item deletion only
    pub orphans: Vec<Sku>,
}

/// Derive the ordered pool rows
///
/// When the pool is empty but SKUs exist, synthetic rows are reconstructed
/// by grouping SKUs on `colour_id` (falling back to the SKU's own id),
/// positioned by discovery order. Returns the sorted rows and whether
/// repair mode is active.
pub fn effective_colours(stores: &EntityStores) -> (Vec<EffectiveColour>, bool) {
    let (mut rows, repair_mode) = if !stores.colours.is_empty() {
        let rows = stores
            .colours
            .iter()
            .map(|c| EffectiveColour {
                colour: c.clone(),
                synthetic: false,
            })
            .collect();
        (rows, false)
    } else if stores.skus.is_empty() {
        (Vec::new(), false)
    } else {
        (reconstruct_from_skus(stores), true)
    };

    // Missing position sorts last; stable sort keeps discovery order among ties
    rows.sort_by_key(|r| r.colour.position.map_or(i64::MAX, i64::from));
    (rows, repair_mode)
}

fn reconstruct_from_skus(stores: &EntityStores) -> Vec<EffectiveColour> {
    let mut seen: Vec<EffectiveColour> = Vec::new();
    for (idx, sku) in stores.skus.iter().enumerate() {
        let cid = sku.colour_id.clone().unwrap_or_else(|| sku.id.clone());
        if seen.iter().any(|r| r.colour.id == cid) {
            continue;
        }
        let name = sku
            .colour_name
            .clone()
            .unwrap_or_else(|| {
                if sku.name.is_empty() {
                    format!("SKU {}", idx + 1)
                } else {
                    sku.name.clone()
                }
            });
        seen.push(EffectiveColour {
            colour: Colour {
                id: cid,
                model_id: stores.model.id.clone(),
                name,
                position: Some(seen.len() as i32),
                hex_primary: sku.hex_primary.clone(),
                hex_secondary: sku.hex_secondary.clone(),
                finish: sku.finish.clone(),
                media: MediaSet::default(),
                media_shared: false,
                created_at: sku.created_at,
                updated_at: sku.updated_at,
            },
            synthetic: true,
        });
    }
    tracing::warn!(
        model_id = %stores.model.id,
        rows = seen.len(),
        "colour pool empty with SKUs present; matrix running in repair mode"
    );
    seen
}

/// Build the full grid from the stores and the per-cell busy states
pub fn build(stores: &EntityStores, busy: &HashMap<CellKey, CellState>) -> Matrix {
    let (colours, repair_mode) = effective_colours(stores);

    let cells = colours
        .iter()
        .map(|row| {
            stores
                .variants
                .iter()
                .map(|variant| {
                    let key = CellKey::new(&variant.id, &row.colour.id);
                    let sku = stores.sku_for_cell(&variant.id, &row.colour.id);
                    MatrixCell {
                        sku_id: sku.map(|s| s.id.clone()),
                        status: sku.map(|s| s.status),
                        is_primary: sku.is_some_and(|s| s.is_primary),
                        image: sku.and_then(|s| resolve_image(stores, s)),
                        swatch: sku.and_then(|s| sku_swatch(stores, s)),
                        busy: busy.get(&key) == Some(&CellState::Pending),
                        key,
                    }
                })
                .collect()
        })
        .collect();

    let orphans = orphaned_skus(stores, &colours)
        .into_iter()
        .cloned()
        .collect();

    Matrix {
        orientation: Orientation::for_product_type(stores.product_type()),
        repair_mode,
        variants: stores.variants.clone(),
        colours,
        cells,
        orphans,
    }
}

/// Orphan predicate over the effective rows: a SKU whose colour_id resolves
/// to no row (a missing colour_id resolves to nothing). In repair mode the
/// synthetic rows adopt the SKUs' colour keys, so nothing is orphaned —
/// the grid stays navigable instead.
pub fn orphaned_skus<'a>(
    stores: &'a EntityStores,
    effective: &[EffectiveColour],
) -> Vec<&'a Sku> {
    stores
        .skus
        .iter()
        .filter(|s| {
            !effective
                .iter()
                .any(|row| s.colour_id.as_deref() == Some(row.colour.id.as_str()))
        })
        .collect()
}
