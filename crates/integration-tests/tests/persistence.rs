//! File-backed storage across reopen and reset.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use slooze_admin::db::{Collection, SeedData};
use slooze_admin::state::AppState;
use slooze_integration_tests::{fields, temp_data_dir, test_config};

#[tokio::test]
async fn test_products_survive_reopen() {
    let dir = temp_data_dir("reopen");

    let created = {
        let state = AppState::new(test_config(&dir)).unwrap();
        state
            .catalog()
            .create_product(fields("Chair", "Home", 49.99))
            .await
            .unwrap()
    };

    let state = AppState::new(test_config(&dir)).unwrap();
    let found = state.catalog().get_product(&created.id).await.unwrap();
    assert_eq!(found, vec![created]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_reset_restores_seed_on_disk() {
    let dir = temp_data_dir("reset");
    let state = AppState::new(test_config(&dir)).unwrap();
    let catalog = state.catalog();

    let seeded = catalog.list_products().await.unwrap();
    catalog.delete_product(&seeded[0].id).await.unwrap();
    catalog
        .create_product(fields("Extra", "Misc", 2.5))
        .await
        .unwrap();

    catalog.reset_all().await.unwrap();

    let on_disk = std::fs::read_to_string(dir.join(format!("{}.json", Collection::Products.key())))
        .unwrap();
    assert_eq!(
        on_disk,
        SeedData::default().json_for(Collection::Products).unwrap()
    );
    assert_eq!(catalog.list_products().await.unwrap(), seeded);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_first_reads_on_fresh_dir() {
    for round in 0..10 {
        let dir = temp_data_dir(&format!("first-read-{round}"));
        let state = Arc::new(AppState::new(test_config(&dir)).unwrap());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let state = Arc::clone(&state);
            handles.push(tokio::spawn(async move {
                state.catalog().list_products().await
            }));
        }
        for handle in handles {
            let products = handle.await.unwrap().unwrap();
            assert_eq!(products, SeedData::default().products);
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}

#[tokio::test]
async fn test_rejected_price_never_reaches_disk() {
    let dir = temp_data_dir("finite");
    let state = AppState::new(test_config(&dir)).unwrap();
    let catalog = state.catalog();

    assert!(
        catalog
            .create_product(fields("Bad", "Home", f64::NAN))
            .await
            .is_err()
    );
    assert!(
        catalog
            .create_product(fields("Worse", "Home", f64::INFINITY))
            .await
            .is_err()
    );

    let reopened = AppState::new(test_config(&dir)).unwrap();
    assert_eq!(
        reopened.catalog().list_products().await.unwrap(),
        SeedData::default().products
    );

    let _ = std::fs::remove_dir_all(&dir);
}
