// Customer API - Core Library
// Exposes all modules for use in the admin CLI, the API server, and tests

pub mod config;
pub mod customer;
pub mod db;
pub mod error;
pub mod service;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use customer::{Customer, CustomerId, CustomerRequest};
pub use db::{load_csv, open_store, setup_database, SqliteStore};
pub use error::{CustomerError, StoreError};
pub use service::CustomerService;
pub use store::{CustomerStore, MemoryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
