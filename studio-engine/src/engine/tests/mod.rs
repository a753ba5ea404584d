use super::*;
use crate::persistence::MemoryCatalog;
use chrono::Utc;
use shared::models::{Colour, MediaSet, Model, Sku, SuitableForTarget, Variant};

mod test_bulk;
mod test_orphans;
mod test_toggle;

pub(crate) const MODEL_ID: &str = "model_1";
pub(crate) const BRAND_ID: &str = "brand_1";

/// Run tests with `RUST_LOG=debug` to see the engine's tracing output
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub(crate) fn test_model(product_type: ProductType, name: &str) -> Model {
    let now = Utc::now();
    Model {
        id: MODEL_ID.to_string(),
        brand_id: BRAND_ID.to_string(),
        name: name.to_string(),
        product_type,
        status: ItemStatus::Active,
        media: MediaSet::default(),
        media_shared: false,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn test_variant(id: &str, name: &str, position: i32) -> Variant {
    let now = Utc::now();
    Variant {
        id: id.to_string(),
        model_id: MODEL_ID.to_string(),
        name: name.to_string(),
        status: ItemStatus::Active,
        position,
        media: MediaSet::default(),
        media_shared: false,
        suitable_for: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn test_colour(id: &str, name: &str, position: i32) -> Colour {
    let now = Utc::now();
    Colour {
        id: id.to_string(),
        model_id: MODEL_ID.to_string(),
        name: name.to_string(),
        position: Some(position),
        hex_primary: Some(format!("#{name}")),
        hex_secondary: None,
        finish: Some("Gloss".to_string()),
        media: MediaSet::default(),
        media_shared: false,
        created_at: now,
        updated_at: now,
    }
}

/// SKU seeded directly into the mock (bypassing the cell toggler)
pub(crate) fn test_sku(id: &str, variant_id: &str, colour_id: Option<&str>) -> Sku {
    let now = Utc::now();
    Sku {
        id: id.to_string(),
        brand_id: BRAND_ID.to_string(),
        model_id: MODEL_ID.to_string(),
        variant: VariantRef::new(ProductType::Vehicle, variant_id),
        colour_id: colour_id.map(str::to_string),
        name: format!("{id} name"),
        status: ItemStatus::Draft,
        is_primary: false,
        colour_name: colour_id.map(|c| format!("{c} colour")),
        hex_primary: Some("#ABCDEF".to_string()),
        hex_secondary: None,
        finish: None,
        media: MediaSet::default(),
        geometry: MediaGeometry::default(),
        created_at: now,
        updated_at: now,
    }
}

/// Mock seeded with variants Base(pos 0), Pro(pos 1) and colours
/// Red(pos 0), Blue(pos 1); no SKUs
pub(crate) fn seeded_catalog() -> Arc<MemoryCatalog> {
    let store = MemoryCatalog::new();
    store.seed_variant(ProductType::Vehicle, test_variant("var_base", "Base", 0));
    store.seed_variant(ProductType::Vehicle, test_variant("var_pro", "Pro", 1));
    store.seed_colour(test_colour("col_red", "Red", 0));
    store.seed_colour(test_colour("col_blue", "Blue", 1));
    Arc::new(store)
}

pub(crate) async fn open_vehicle_engine(store: Arc<MemoryCatalog>) -> MatrixEngine {
    init_tracing();
    MatrixEngine::open(store, test_model(ProductType::Vehicle, "Activa"))
        .await
        .expect("engine open")
}

/// Standard fixture: 2×2 vehicle grid, empty
pub(crate) async fn standard_engine() -> (Arc<MemoryCatalog>, MatrixEngine) {
    let store = seeded_catalog();
    let engine = open_vehicle_engine(store.clone()).await;
    (store, engine)
}

/// Accessory fixture: one suitable-for variant and one sub-variant colour
pub(crate) async fn accessory_engine() -> (Arc<MemoryCatalog>, MatrixEngine) {
    init_tracing();
    let store = Arc::new(MemoryCatalog::new());
    let mut variant = test_variant("var_fit", "HONDA › Activa", 0);
    variant.suitable_for = vec![SuitableForTarget {
        brand_id: Some("brand_honda".to_string()),
        model_id: Some("model_activa".to_string()),
        variant_id: None,
        is_universal: false,
    }];
    store.seed_variant(ProductType::Accessory, variant);
    store.seed_colour(test_colour("col_steel", "Stainless Steel", 0));
    let engine = MatrixEngine::open(
        store.clone(),
        test_model(ProductType::Accessory, "Crash Guard"),
    )
    .await
    .expect("engine open");
    (store, engine)
}
