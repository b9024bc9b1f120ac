//! Mock implementations and test utilities for the task service
//!
//! This crate provides testing infrastructure including:
//! - An in-memory `TaskStore` with error injection and call history
//! - Realistic test data generators
//! - Custom assertion helpers
//! - Property-based testing strategies
//! - Contract test helpers shared by every store implementation

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::{InMemoryTaskSession, InMemoryTaskStore};
