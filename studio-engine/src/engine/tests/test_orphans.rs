use super::*;

#[tokio::test]
async fn test_colour_deletion_orphans_its_skus() {
    let (store, mut engine) = standard_engine().await;
    let CellToggle::Created(red_sku) = engine.toggle_cell("var_base", "col_red").await.unwrap()
    else {
        panic!("expected creation");
    };
    engine.toggle_cell("var_base", "col_blue").await.unwrap();
    assert!(engine.orphaned_skus().is_empty());

    // Pool editor removes Red; no cascade reaches the SKU
    store.delete_colour("col_red").await.unwrap();
    engine.reload().await.unwrap();

    let orphans = engine.orphaned_skus();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].id, red_sku);

    // The grid reports them too
    let grid = engine.matrix();
    assert_eq!(grid.orphans.len(), 1);
    assert_eq!(grid.orphans[0].id, red_sku);
    assert_eq!(grid.colours.len(), 1);
}

#[tokio::test]
async fn test_delete_orphan_removes_sku() {
    let (store, mut engine) = standard_engine().await;
    let CellToggle::Created(red_sku) = engine.toggle_cell("var_base", "col_red").await.unwrap()
    else {
        panic!("expected creation");
    };
    engine.toggle_cell("var_pro", "col_blue").await.unwrap();
    store.delete_colour("col_red").await.unwrap();
    engine.reload().await.unwrap();

    engine.delete_orphan(&red_sku).await.unwrap();

    assert!(store.sku(&red_sku).is_none());
    assert!(engine.orphaned_skus().is_empty());
    // The healthy SKU survives
    assert_eq!(store.sku_count(), 1);
}

#[tokio::test]
async fn test_delete_orphan_rejects_linked_sku() {
    let (_store, mut engine) = standard_engine().await;
    let CellToggle::Created(sku_id) = engine.toggle_cell("var_base", "col_red").await.unwrap()
    else {
        panic!("expected creation");
    };

    let err = engine.delete_orphan(&sku_id).await.unwrap_err();
    assert!(matches!(err, EngineError::SkuNotOrphaned(_)));
    assert!(engine.stores().sku(&sku_id).is_some());
}

#[tokio::test]
async fn test_delete_orphan_on_missing_sku() {
    let (_store, mut engine) = standard_engine().await;
    let err = engine.delete_orphan("sku_missing").await.unwrap_err();
    assert!(matches!(err, EngineError::SkuNotFound(_)));
}

#[tokio::test]
async fn test_orphan_condition_is_transient() {
    let (store, mut engine) = standard_engine().await;
    engine.toggle_cell("var_base", "col_red").await.unwrap();

    store.delete_colour("col_red").await.unwrap();
    engine.reload().await.unwrap();
    assert_eq!(engine.orphaned_skus().len(), 1);

    // The pool editor puts Red back under the same id
    store.seed_colour(test_colour("col_red", "Red", 0));
    engine.reload().await.unwrap();

    assert!(engine.orphaned_skus().is_empty());
    assert!(engine.matrix().cells[0][0].occupied());
}

#[tokio::test]
async fn test_unlinked_sku_is_orphaned_while_pool_has_rows() {
    let (store, mut engine) = standard_engine().await;
    store.seed_sku(test_sku("sku_loose", "var_base", None));
    engine.reload().await.unwrap();

    let orphans = engine.orphaned_skus();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].id, "sku_loose");
}

#[tokio::test]
async fn test_repair_mode_reports_no_orphans() {
    let store = Arc::new(MemoryCatalog::new());
    store.seed_variant(ProductType::Vehicle, test_variant("var_base", "Base", 0));
    store.seed_sku(test_sku("sku_1", "var_base", Some("col_gone")));
    let engine = open_vehicle_engine(store).await;

    // The synthetic row adopts the SKU's colour key, so nothing dangles
    assert!(engine.matrix().repair_mode);
    assert!(engine.orphaned_skus().is_empty());
}

#[tokio::test]
async fn test_orphan_delete_failure_keeps_sku() {
    let (store, mut engine) = standard_engine().await;
    let CellToggle::Created(red_sku) = engine.toggle_cell("var_base", "col_red").await.unwrap()
    else {
        panic!("expected creation");
    };
    engine.toggle_cell("var_pro", "col_blue").await.unwrap();
    store.delete_colour("col_red").await.unwrap();
    engine.reload().await.unwrap();

    store.fail_next_delete();
    let err = engine.delete_orphan(&red_sku).await.unwrap_err();
    assert!(matches!(err, EngineError::Persistence { op: "delete", .. }));
    assert_eq!(engine.orphaned_skus().len(), 1);
}
