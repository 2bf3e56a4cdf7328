//! Database layer
//!
//! Abstraction over the relational store backing the API. Supports:
//! - SQLite (default, for single-binary deployment)
//! - MySQL (for hosted deployments)
//!
//! The driver is selected from configuration; everything above this module
//! works against the `DatabasePool` trait.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool, DatabasePool, DynDatabasePool};
