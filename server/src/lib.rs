//! Task API Server Library
//!
//! Configuration management, database setup and server initialization for
//! the `tasks-api` binary.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{create_server, create_store, ensure_database_directory, initialize_app};
pub use telemetry::init_telemetry;
