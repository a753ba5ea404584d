//! Media Model
//!
//! Upstream stores media as flat columns (`primary_image`, `gallery_img_1..6`,
//! `video_url_1..2`, `pdf_url_1`); here they are capped collections.

use serde::{Deserialize, Serialize};

/// Maximum gallery images per entity
pub const MAX_GALLERY_IMAGES: usize = 6;
/// Maximum videos per entity
pub const MAX_VIDEOS: usize = 2;

/// Media attached to a Model, Variant, Colour, or SKU
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaSet {
    pub primary_image: Option<String>,
    /// Gallery images, at most [`MAX_GALLERY_IMAGES`]
    pub gallery: Vec<String>,
    /// Video URLs, at most [`MAX_VIDEOS`]
    pub videos: Vec<String>,
    pub pdf: Option<String>,
}

impl MediaSet {
    /// Media set holding a single primary image
    pub fn with_primary(url: impl Into<String>) -> Self {
        Self {
            primary_image: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary_image.is_none()
            && self.gallery.is_empty()
            && self.videos.is_empty()
            && self.pdf.is_none()
    }

    /// Clamp collections to their column caps, dropping overflow
    pub fn truncate_to_caps(&mut self) {
        self.gallery.truncate(MAX_GALLERY_IMAGES);
        self.videos.truncate(MAX_VIDEOS);
    }
}

/// Display geometry hints for a SKU image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaGeometry {
    pub zoom_factor: f64,
    pub is_flipped: bool,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for MediaGeometry {
    fn default() -> Self {
        Self {
            zoom_factor: 1.0,
            is_flipped: false,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}
