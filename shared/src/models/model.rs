//! Model (product aggregate root)

use super::media::MediaSet;
use crate::types::{ItemStatus, ProductType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product aggregate root (Brand → Model → Variant → pool entry → SKU)
///
/// Identity is immutable once SKUs reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    /// Brand reference (String ID)
    pub brand_id: String,
    pub name: String,
    pub product_type: ProductType,
    pub status: ItemStatus,
    pub media: MediaSet,
    /// Opt-in: SKUs without their own image may display this Model's image
    pub media_shared: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
