//! Variant Model

use super::media::MediaSet;
use crate::types::ItemStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Compatibility target for an accessory variant ("suitable for")
///
/// Either a concrete brand/model/variant target or a universal flag.
/// Owned by the variant step components; the matrix engine consumes it
/// for display labeling only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuitableForTarget {
    pub brand_id: Option<String>,
    pub model_id: Option<String>,
    pub variant_id: Option<String>,
    pub is_universal: bool,
}

/// Sellable configuration axis belonging to a Model (e.g. trim level,
/// accessory sub-variant source, service plan)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    /// Model reference (String ID)
    pub model_id: String,
    pub name: String,
    pub status: ItemStatus,
    /// Column/row order in the matrix; dense 0..n-1 after reconcile
    pub position: i32,
    pub media: MediaSet,
    /// Opt-in: SKUs without their own image may display this Variant's image
    pub media_shared: bool,
    /// ACCESSORY only; empty for other product types
    pub suitable_for: Vec<SuitableForTarget>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Variant {
    /// Display label of what this variant fits, used in synthesized
    /// accessory SKU names.
    ///
    /// A universal target labels the variant "Universal". Otherwise the
    /// label derives from a "BRAND › Model" variant name as "Model / BRAND";
    /// names without the separator are used verbatim.
    pub fn compatibility_label(&self) -> String {
        if self.suitable_for.iter().any(|t| t.is_universal) {
            return "Universal".to_string();
        }
        let parts: Vec<&str> = self.name.split('›').map(str::trim).collect();
        if parts.len() >= 2 {
            format!("{} / {}", parts[1..].join(" "), parts[0])
        } else {
            self.name.clone()
        }
    }
}

/// Create variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantCreate {
    pub model_id: String,
    pub name: String,
    pub position: Option<i32>,
    pub suitable_for: Option<Vec<SuitableForTarget>>,
}

/// Update variant payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantPatch {
    pub name: Option<String>,
    pub status: Option<ItemStatus>,
    pub position: Option<i32>,
    pub media: Option<MediaSet>,
    pub media_shared: Option<bool>,
    pub suitable_for: Option<Vec<SuitableForTarget>>,
}
