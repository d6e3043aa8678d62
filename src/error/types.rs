// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Reading the persisted collection failed at the medium.
    ///
    /// Missing or unparsable payloads never produce this error — the
    /// storage layer degrades those to an empty collection. Only a
    /// failed read of the medium itself surfaces here.
    #[error("Failed to read favorites from storage: {0}")]
    StorageLoad(String),

    /// Writing the collection failed; the caller must assume the
    /// persisted state is unchanged.
    #[error("Failed to write favorites to storage: {0}")]
    StorageWrite(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Serialize for FavoritesError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type FavoritesResult<T> = Result<T, FavoritesError>;
