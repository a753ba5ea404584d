//! Colour Model
//!
//! Generic pool entry: a paint colour for vehicles, a service tier, or an
//! accessory sub-variant, depending on the Model's product type.

use super::media::MediaSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pool entry belonging to a Model, independent of any Variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colour {
    pub id: String,
    /// Model reference (String ID)
    pub model_id: String,
    pub name: String,
    /// Row order in the matrix; dense 0..n-1 after reconcile.
    /// `None` sorts last (synthetic entries from degraded reconstruction
    /// may lack one).
    pub position: Option<i32>,
    /// VEHICLE only
    pub hex_primary: Option<String>,
    pub hex_secondary: Option<String>,
    pub finish: Option<String>,
    pub media: MediaSet,
    /// Opt-in: SKUs without their own image may display this Colour's image
    pub media_shared: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create colour payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColourCreate {
    pub model_id: String,
    pub name: String,
    pub position: Option<i32>,
    pub hex_primary: Option<String>,
    pub hex_secondary: Option<String>,
    pub finish: Option<String>,
}

/// Update colour payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColourPatch {
    pub name: Option<String>,
    pub position: Option<i32>,
    pub hex_primary: Option<String>,
    pub hex_secondary: Option<String>,
    pub finish: Option<String>,
    pub media: Option<MediaSet>,
    pub media_shared: Option<bool>,
}
