//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a user or catalog entity does not exist.
//! - [`ExistingFavourite`] thrown when a target is already favourited.
//! - [`MissingFavourite`] thrown when removing a target that is not favourited.
//! - [`InvalidFavourite`] thrown when a stored favourite does not point at
//!   exactly one target.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingFavourite`]: EngineError::ExistingFavourite
//!  [`MissingFavourite`]: EngineError::MissingFavourite
//!  [`InvalidFavourite`]: EngineError::InvalidFavourite
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0} not found")]
    KeyNotFound(String),
    #[error("{0} already in favourites")]
    ExistingFavourite(String),
    #[error("{0} not in favourites")]
    MissingFavourite(String),
    #[error("favourite {0} does not reference exactly one target")]
    InvalidFavourite(i32),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingFavourite(a), Self::ExistingFavourite(b)) => a == b,
            (Self::MissingFavourite(a), Self::MissingFavourite(b)) => a == b,
            (Self::InvalidFavourite(a), Self::InvalidFavourite(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
