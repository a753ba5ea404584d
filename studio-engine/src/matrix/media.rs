//! Media inheritance resolver
//!
//! Walks SKU → Colour → Variant → Model looking for a displayable image.
//! Inheritance is gated on each entity's opt-in `media_shared` flag, so a
//! photo set at the Model or Variant level serves every SKU below it until
//! a more specific image is supplied.

use crate::stores::EntityStores;
use serde::Serialize;
use shared::models::Sku;

/// Which entity supplied the resolved image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    Sku,
    Colour,
    Variant,
    Model,
}

/// Result of the inheritance walk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedImage {
    pub url: String,
    pub inherited: bool,
    pub source: MediaSource,
}

/// Resolve the display image for a SKU, or `None` when nothing along the
/// chain has an image to share
pub fn resolve_image(stores: &EntityStores, sku: &Sku) -> Option<ResolvedImage> {
    if let Some(url) = &sku.media.primary_image {
        return Some(ResolvedImage {
            url: url.clone(),
            inherited: false,
            source: MediaSource::Sku,
        });
    }

    let linked_colour = sku.colour_id.as_deref().and_then(|id| stores.colour(id));
    if let Some(colour) = linked_colour
        && colour.media_shared
        && let Some(url) = &colour.media.primary_image
    {
        return Some(ResolvedImage {
            url: url.clone(),
            inherited: true,
            source: MediaSource::Colour,
        });
    }

    if let Some(variant) = stores.variant(&sku.variant.variant_id)
        && variant.media_shared
        && let Some(url) = &variant.media.primary_image
    {
        return Some(ResolvedImage {
            url: url.clone(),
            inherited: true,
            source: MediaSource::Variant,
        });
    }

    if stores.model.media_shared
        && let Some(url) = &stores.model.media.primary_image
    {
        return Some(ResolvedImage {
            url: url.clone(),
            inherited: true,
            source: MediaSource::Model,
        });
    }

    None
}

/// Swatch hex for a SKU: the linked Colour's `hex_primary` while the colour
/// exists, else the SKU's own denormalized copy
pub fn sku_swatch(stores: &EntityStores, sku: &Sku) -> Option<String> {
    if let Some(colour_id) = sku.colour_id.as_deref()
        && let Some(colour) = stores.colour(colour_id)
    {
        return colour.hex_primary.clone().or_else(|| sku.hex_primary.clone());
    }
    sku.hex_primary.clone()
}
