// src/storage/favorites_store.rs
//
// Durable store for the favorites collection
//
// CRITICAL RULES:
// - One JSON array under one fixed key
// - Missing or corrupt payloads degrade to an empty collection
// - Write failures are NEVER swallowed
// - NO caching, NO business logic

use std::sync::Arc;

use log::warn;

use crate::domain::{validate_collection, FavoriteRecord};
use crate::error::{FavoritesError, FavoritesResult};
use crate::storage::kv::KvMedium;

/// Fixed key holding the serialized favorites collection
pub const FAVORITES_KEY: &str = "user_favorites";

/// Persists one JSON-serialized favorites collection under
/// [`FAVORITES_KEY`].
///
/// Corruption degrades to "no favorites": an unparsable payload, or one
/// violating the unique-id invariant, loads as an empty collection and
/// is logged, never propagated. A failed read of the medium itself does
/// propagate, as does any write failure.
pub struct FavoritesStore {
    medium: Arc<dyn KvMedium>,
}

impl FavoritesStore {
    pub fn new(medium: Arc<dyn KvMedium>) -> Self {
        Self { medium }
    }

    /// Load the persisted collection.
    ///
    /// Returns an empty collection when the key is absent or the
    /// payload is corrupt. Errors only when the medium itself fails to
    /// read.
    pub async fn load(&self) -> FavoritesResult<Vec<FavoriteRecord>> {
        let payload = match self.medium.get(FAVORITES_KEY).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => return Err(FavoritesError::StorageLoad(e.to_string())),
        };

        let records: Vec<FavoriteRecord> = match serde_json::from_str(&payload) {
            Ok(records) => records,
            Err(e) => {
                warn!("Persisted favorites are not valid JSON, starting empty: {e}");
                return Ok(Vec::new());
            }
        };

        if let Err(e) = validate_collection(&records) {
            warn!("Persisted favorites violate collection invariants, starting empty: {e}");
            return Ok(Vec::new());
        }

        Ok(records)
    }

    /// Serialize and write the full collection.
    ///
    /// The caller must not assume the write reached the medium unless
    /// this returns `Ok`.
    pub async fn save(&self, records: &[FavoriteRecord]) -> FavoritesResult<()> {
        let payload = serde_json::to_string(records)
            .map_err(|e| FavoritesError::StorageWrite(e.to_string()))?;

        self.medium
            .set(FAVORITES_KEY, &payload)
            .await
            .map_err(|e| FavoritesError::StorageWrite(e.to_string()))
    }
}
