use super::*;

#[tokio::test]
async fn test_toggle_empty_cell_creates_draft_sku() {
    let (store, mut engine) = standard_engine().await;

    let result = engine.toggle_cell("var_base", "col_red").await.unwrap();
    let CellToggle::Created(sku_id) = result else {
        panic!("expected a creation");
    };

    let sku = store.sku(&sku_id).unwrap();
    assert_eq!(sku.status, ItemStatus::Draft);
    assert!(!sku.is_primary);
    assert_eq!(sku.name, "Red");
    assert_eq!(sku.colour_id.as_deref(), Some("col_red"));
    assert_eq!(sku.variant, VariantRef::new(ProductType::Vehicle, "var_base"));
    // Denormalized colour cache copied at creation
    assert_eq!(sku.colour_name.as_deref(), Some("Red"));
    assert_eq!(sku.hex_primary.as_deref(), Some("#Red"));
    assert_eq!(sku.finish.as_deref(), Some("Gloss"));

    assert!(engine.stores().sku_for_cell("var_base", "col_red").is_some());
}

#[tokio::test]
async fn test_toggle_occupied_cell_deletes_sku() {
    let (store, mut engine) = standard_engine().await;

    engine.toggle_cell("var_base", "col_red").await.unwrap();
    assert_eq!(store.sku_count(), 1);

    let result = engine.toggle_cell("var_base", "col_red").await.unwrap();
    assert!(matches!(result, CellToggle::Removed(_)));
    assert_eq!(store.sku_count(), 0);
    assert!(engine.stores().sku_for_cell("var_base", "col_red").is_none());
}

#[tokio::test]
async fn test_double_toggle_round_trips_with_fresh_id() {
    let (_store, mut engine) = standard_engine().await;

    let CellToggle::Created(first_id) = engine.toggle_cell("var_base", "col_red").await.unwrap()
    else {
        panic!("expected creation");
    };
    engine.toggle_cell("var_base", "col_red").await.unwrap();
    assert!(engine.stores().skus.is_empty());

    let CellToggle::Created(second_id) = engine.toggle_cell("var_base", "col_red").await.unwrap()
    else {
        panic!("expected creation");
    };
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_at_most_one_sku_per_cell_after_toggle_sequence() {
    let (_store, mut engine) = standard_engine().await;

    for _ in 0..5 {
        engine.toggle_cell("var_base", "col_red").await.unwrap();
        engine.toggle_cell("var_pro", "col_red").await.unwrap();
    }

    for (variant_id, colour_id) in [("var_base", "col_red"), ("var_pro", "col_red")] {
        let matching = engine
            .stores()
            .skus
            .iter()
            .filter(|s| {
                s.variant.variant_id == variant_id && s.colour_id.as_deref() == Some(colour_id)
            })
            .count();
        assert!(matching <= 1, "cell ({variant_id}, {colour_id}) has {matching} SKUs");
    }
}

#[tokio::test]
async fn test_create_failure_leaves_state_unchanged() {
    let (store, mut engine) = standard_engine().await;
    store.fail_next_create();

    let err = engine.toggle_cell("var_base", "col_red").await.unwrap_err();
    assert!(matches!(err, EngineError::Persistence { op: "create", .. }));

    assert_eq!(store.sku_count(), 0);
    assert!(engine.stores().skus.is_empty());
    // Busy flag cleared even on failure
    assert_eq!(engine.cell_state("var_base", "col_red"), CellState::Idle);
}

#[tokio::test]
async fn test_delete_failure_keeps_sku() {
    let (store, mut engine) = standard_engine().await;
    engine.toggle_cell("var_base", "col_red").await.unwrap();

    store.fail_next_delete();
    let err = engine.toggle_cell("var_base", "col_red").await.unwrap_err();
    assert!(matches!(err, EngineError::Persistence { op: "delete", .. }));

    assert_eq!(store.sku_count(), 1);
    assert!(engine.stores().sku_for_cell("var_base", "col_red").is_some());
    assert_eq!(engine.cell_state("var_base", "col_red"), CellState::Idle);
}

#[tokio::test]
async fn test_busy_cell_rejects_second_toggle() {
    let (store, mut engine) = standard_engine().await;
    engine.mark_cell_pending("var_base", "col_red");

    let err = engine.toggle_cell("var_base", "col_red").await.unwrap_err();
    assert!(matches!(err, EngineError::CellBusy { .. }));
    assert_eq!(store.sku_count(), 0);

    // Other cells are unaffected
    engine.toggle_cell("var_base", "col_blue").await.unwrap();
    assert_eq!(store.sku_count(), 1);
}

#[tokio::test]
async fn test_unknown_colour_and_variant_rejected() {
    let (_store, mut engine) = standard_engine().await;

    let err = engine.toggle_cell("var_base", "col_missing").await.unwrap_err();
    assert!(matches!(err, EngineError::ColourNotFound(_)));

    let err = engine.toggle_cell("var_missing", "col_red").await.unwrap_err();
    assert!(matches!(err, EngineError::VariantNotFound(_)));
}

#[tokio::test]
async fn test_accessory_sku_name_synthesis() {
    let (store, mut engine) = accessory_engine().await;

    let CellToggle::Created(sku_id) = engine.toggle_cell("var_fit", "col_steel").await.unwrap()
    else {
        panic!("expected creation");
    };
    let sku = store.sku(&sku_id).unwrap();
    assert_eq!(sku.name, "Crash Guard Stainless Steel for Activa / HONDA");
}

#[tokio::test]
async fn test_universal_accessory_sku_name() {
    let store = Arc::new(MemoryCatalog::new());
    let mut variant = test_variant("var_uni", "HONDA › Activa", 0);
    variant.suitable_for = vec![SuitableForTarget {
        is_universal: true,
        ..Default::default()
    }];
    store.seed_variant(ProductType::Accessory, variant);
    store.seed_colour(test_colour("col_black", "Black", 0));
    let mut engine = MatrixEngine::open(
        store.clone(),
        test_model(ProductType::Accessory, "Phone Mount"),
    )
    .await
    .unwrap();

    let CellToggle::Created(sku_id) = engine.toggle_cell("var_uni", "col_black").await.unwrap()
    else {
        panic!("expected creation");
    };
    assert_eq!(store.sku(&sku_id).unwrap().name, "Phone Mount Black for Universal");
}
