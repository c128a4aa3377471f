//! The module contains the errors the store can throw.
//!
//! The errors are:
//!
//! - [`NotFound`] thrown when a record is missing or soft deleted.
//! - [`InvalidAmount`] thrown when an amount fails validation.
//!
//!  [`NotFound`]: StoreError::NotFound
//!  [`InvalidAmount`]: StoreError::InvalidAmount
use sea_orm::DbErr;
use thiserror::Error;

/// Store custom errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidColor(a), Self::InvalidColor(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
