use super::*;

#[tokio::test]
async fn test_bulk_variant_fills_then_clears() {
    let (store, mut engine) = standard_engine().await;

    // Empty column: strictly fewer occupied than total resolves to Add
    let outcome = engine.toggle_all_for_variant("var_base").await.unwrap();
    assert_eq!(outcome.action, BulkAction::Add);
    assert_eq!(outcome.applied, 2);
    assert!(outcome.succeeded());
    assert_eq!(store.sku_count(), 2);
    assert!(engine.stores().sku_for_cell("var_base", "col_red").is_some());
    assert!(engine.stores().sku_for_cell("var_base", "col_blue").is_some());

    // Full column clears
    let outcome = engine.toggle_all_for_variant("var_base").await.unwrap();
    assert_eq!(outcome.action, BulkAction::Remove);
    assert_eq!(outcome.applied, 2);
    assert_eq!(store.sku_count(), 0);
}

#[tokio::test]
async fn test_partially_filled_target_is_completed_not_cleared() {
    let (store, mut engine) = standard_engine().await;
    engine.toggle_cell("var_base", "col_red").await.unwrap();

    let outcome = engine.toggle_all_for_variant("var_base").await.unwrap();
    assert_eq!(outcome.action, BulkAction::Add);
    // Only the empty cell was touched
    assert_eq!(outcome.applied, 1);
    assert_eq!(store.sku_count(), 2);
}

#[tokio::test]
async fn test_bulk_colour_spans_variants() {
    let (store, mut engine) = standard_engine().await;

    let outcome = engine.toggle_all_for_colour("col_red").await.unwrap();
    assert_eq!(outcome.action, BulkAction::Add);
    assert_eq!(outcome.applied, 2);
    assert!(engine.stores().sku_for_cell("var_base", "col_red").is_some());
    assert!(engine.stores().sku_for_cell("var_pro", "col_red").is_some());

    let outcome = engine.toggle_all_for_colour("col_red").await.unwrap();
    assert_eq!(outcome.action, BulkAction::Remove);
    assert_eq!(store.sku_count(), 0);
}

#[tokio::test]
async fn test_partial_failure_keeps_applied_toggles() {
    let (store, mut engine) = standard_engine().await;
    // First create (Red, discovery order) fails; the loop continues
    store.fail_next_create();

    let outcome = engine.toggle_all_for_variant("var_base").await.unwrap();
    assert_eq!(outcome.action, BulkAction::Add);
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.failed, 1);
    assert!(!outcome.succeeded());

    // The applied sub-toggle is not reverted
    assert_eq!(store.sku_count(), 1);
    assert!(engine.stores().sku_for_cell("var_base", "col_red").is_none());
    assert!(engine.stores().sku_for_cell("var_base", "col_blue").is_some());
}

#[tokio::test]
async fn test_bulk_with_empty_pool_is_rejected() {
    let store = Arc::new(MemoryCatalog::new());
    store.seed_variant(ProductType::Vehicle, test_variant("var_base", "Base", 0));
    let mut engine = open_vehicle_engine(store).await;

    let err = engine.toggle_all_for_variant("var_base").await.unwrap_err();
    assert!(matches!(err, EngineError::EmptyBulkTarget));
}

#[tokio::test]
async fn test_bulk_unknown_targets_rejected() {
    let (_store, mut engine) = standard_engine().await;

    let err = engine.toggle_all_for_variant("var_missing").await.unwrap_err();
    assert!(matches!(err, EngineError::VariantNotFound(_)));

    let err = engine.toggle_all_for_colour("col_missing").await.unwrap_err();
    assert!(matches!(err, EngineError::ColourNotFound(_)));
}
