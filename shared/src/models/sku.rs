//! SKU Model

use super::media::{MediaGeometry, MediaSet};
use crate::types::{ItemStatus, ProductType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owning-variant reference
///
/// Upstream keeps three nullable FK columns (`vehicle_variant_id`,
/// `accessory_variant_id`, `service_variant_id`) with exactly one populated;
/// the tagged form makes that invariant unrepresentable instead of checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantRef {
    pub kind: ProductType,
    pub variant_id: String,
}

impl VariantRef {
    pub fn new(kind: ProductType, variant_id: impl Into<String>) -> Self {
        Self {
            kind,
            variant_id: variant_id.into(),
        }
    }
}

impl std::fmt::Display for VariantRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.kind.variant_fk_column(), self.variant_id)
    }
}

/// Concrete sellable unit: one (Variant, Colour) cell of the matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sku {
    pub id: String,
    pub brand_id: String,
    pub model_id: String,
    pub variant: VariantRef,
    /// May reference a Colour that has since been deleted ("orphaned");
    /// deletion does not cascade.
    pub colour_id: Option<String>,
    pub name: String,
    pub status: ItemStatus,
    /// At most one primary SKU per variant group
    pub is_primary: bool,
    // Colour cache copied at creation (source of truth stays the Colour row)
    pub colour_name: Option<String>,
    pub hex_primary: Option<String>,
    pub hex_secondary: Option<String>,
    pub finish: Option<String>,
    pub media: MediaSet,
    pub geometry: MediaGeometry,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create SKU payload
///
/// Status defaults to DRAFT; media starts empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuCreate {
    pub brand_id: String,
    pub model_id: String,
    pub variant: VariantRef,
    pub colour_id: Option<String>,
    pub name: String,
    pub colour_name: Option<String>,
    pub hex_primary: Option<String>,
    pub hex_secondary: Option<String>,
    pub finish: Option<String>,
}

/// Update SKU payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkuPatch {
    pub name: Option<String>,
    pub status: Option<ItemStatus>,
    pub is_primary: Option<bool>,
    pub colour_name: Option<String>,
    pub media: Option<MediaSet>,
    pub geometry: Option<MediaGeometry>,
}
