use anyhow::{Context, Result};
use database::SqliteTaskStore;
use std::path::Path;
use std::sync::Arc;
use task_api::TaskServer;
use tracing::info;

use crate::config::Config;

/// Connect the SQLite store described by the configuration and migrate it
pub async fn create_store(config: &Config) -> Result<Arc<SqliteTaskStore>> {
    let database_url = config.database_url();
    info!("Initializing SQLite store at: {}", database_url);

    ensure_database_directory(&database_url)?;

    let store = SqliteTaskStore::connect(&database_url, config.pool_settings())
        .await
        .with_context(|| format!("Failed to connect to database at {database_url}"))?;

    info!("Running database migrations");
    store
        .migrate()
        .await
        .context("Failed to run database migrations")?;

    Ok(Arc::new(store))
}

/// Wrap the store in the HTTP server
pub fn create_server(store: Arc<SqliteTaskStore>) -> TaskServer<SqliteTaskStore> {
    TaskServer::new(store)
}

/// Validate the configuration, open storage and build the server
pub async fn initialize_app(config: &Config) -> Result<TaskServer<SqliteTaskStore>> {
    info!("Initializing application");

    config.validate().context("Invalid configuration")?;

    let store = create_store(config)
        .await
        .context("Failed to create task store")?;

    info!("Application initialized successfully");
    Ok(create_server(store))
}

/// Create the parent directory of a file-backed SQLite URL if it is missing
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    if database_url.contains(":memory:") {
        return Ok(());
    }

    let Some(db_path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }
    Ok(())
}
