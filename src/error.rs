// Error types shared by the stores, the service and the HTTP layer

use thiserror::Error;

use crate::customer::CustomerId;

/// Failure inside a persistence backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Failure of a customer operation
#[derive(Error, Debug)]
pub enum CustomerError {
    #[error("Customer {0} not found")]
    NotFound(CustomerId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type CustomerResult<T> = Result<T, CustomerError>;
