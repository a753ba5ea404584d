//! Common enums for the catalog hierarchy

use serde::{Deserialize, Serialize};

/// Product hierarchy kind (Brand → Model → Variant → pool entry → SKU)
///
/// Decides which variant table a Model's variants live in and which
/// foreign-key column a SKU's owning variant occupies upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Vehicle,
    Accessory,
    Service,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Vehicle => "VEHICLE",
            ProductType::Accessory => "ACCESSORY",
            ProductType::Service => "SERVICE",
        }
    }

    /// Upstream column name of the variant FK on the SKU table
    pub fn variant_fk_column(&self) -> &'static str {
        match self {
            ProductType::Vehicle => "vehicle_variant_id",
            ProductType::Accessory => "accessory_variant_id",
            ProductType::Service => "service_variant_id",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Publication status shared by Variants and SKUs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Draft,
    Active,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Draft => "DRAFT",
            ItemStatus::Active => "ACTIVE",
        }
    }

    /// The other status (ACTIVE ⇄ DRAFT)
    pub fn toggled(self) -> Self {
        match self {
            ItemStatus::Draft => ItemStatus::Active,
            ItemStatus::Active => ItemStatus::Draft,
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
