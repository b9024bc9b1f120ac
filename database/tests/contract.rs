//! Store contract run against SQLite
//!
//! The same suite runs against the in-memory store in the mocks crate, so
//! both implementations are held to identical behavior.

use database::SqliteTaskStore;
use mocks::test_store_contract;

#[tokio::test]
async fn test_sqlite_memory_store_contract() {
    let store = SqliteTaskStore::new(":memory:").await.unwrap();
    store.migrate().await.unwrap();

    test_store_contract(&store).await;
}

#[tokio::test]
async fn test_sqlite_file_store_contract() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("contract.sqlite");
    let store = SqliteTaskStore::new(&format!("sqlite://{}", db_path.display()))
        .await
        .unwrap();
    store.migrate().await.unwrap();

    test_store_contract(&store).await;
    store.close().await;
}
