// src/services/favorites_service.rs
//
// Favorites cache manager - the single arbiter between the in-memory
// projection and the durable store.
//
// CRITICAL RULES:
// - Every store read-modify-write cycle runs under one operation lock
// - The in-memory snapshot changes ONLY after a completed save/load
// - Snapshots are replaced wholesale, never mutated in place
// - The derived id index is updated in the same step as the collection

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::domain::{FavoriteRecord, MovieSummary};
use crate::error::FavoritesResult;
use crate::events::{SnapshotPublisher, SubscriptionId};
use crate::storage::FavoritesStore;

/// The published favorites state.
///
/// Collection and index are behind `Arc` and immutable once published;
/// consumers keep them across renders without copying. The index always
/// equals the set of `movie_id`s in the collection.
#[derive(Debug, Clone)]
pub struct FavoritesSnapshot {
    /// Favorite records, newest first
    pub favorites: Arc<Vec<FavoriteRecord>>,

    /// Derived membership index for O(1) `is_favorite` checks
    pub favorite_ids: Arc<HashSet<u64>>,

    /// True while a load or refresh is reading the store
    pub loading: bool,
}

impl FavoritesSnapshot {
    fn empty() -> Self {
        Self {
            favorites: Arc::new(Vec::new()),
            favorite_ids: Arc::new(HashSet::new()),
            loading: false,
        }
    }

    fn from_records(records: Vec<FavoriteRecord>, loading: bool) -> Self {
        let favorite_ids = records.iter().map(|r| r.movie_id).collect();
        Self {
            favorites: Arc::new(records),
            favorite_ids: Arc::new(favorite_ids),
            loading,
        }
    }
}

/// Shared, observable projection of the favorites store.
///
/// Any number of consumers may read the current snapshot, check
/// membership, and request toggles; this service serializes every
/// mutation against the store so overlapping read-modify-write cycles
/// cannot lose updates.
pub struct FavoritesService {
    store: Arc<FavoritesStore>,
    publisher: SnapshotPublisher<FavoritesSnapshot>,
    current: RwLock<FavoritesSnapshot>,
    // Serializes toggle/refresh cycles against the store
    op_lock: Mutex<()>,
}

impl FavoritesService {
    pub fn new(store: Arc<FavoritesStore>) -> Self {
        Self {
            store,
            publisher: SnapshotPublisher::new(),
            current: RwLock::new(FavoritesSnapshot::empty()),
            op_lock: Mutex::new(()),
        }
    }

    /// Load the persisted collection into memory and publish it.
    ///
    /// Call once, on first consumer activation. A failed store read
    /// publishes an empty collection and returns the error to this
    /// caller only; subscribers never observe the failure.
    pub async fn initialize(&self) -> FavoritesResult<()> {
        let _guard = self.op_lock.lock().await;
        self.set_loading(true);

        match self.store.load().await {
            Ok(records) => {
                self.install(FavoritesSnapshot::from_records(records, false));
                Ok(())
            }
            Err(e) => {
                self.install(FavoritesSnapshot::empty());
                Err(e)
            }
        }
    }

    /// Flip a movie's favorite membership.
    ///
    /// Reads the durable state fresh, removes the record if present or
    /// prepends a new one, and saves the full collection back. Only a
    /// completed save replaces the in-memory snapshot; on any failure
    /// the projection is untouched, so a caller holding an optimistic
    /// UI state must revert it exactly when this returns an error.
    ///
    /// Returns the new membership: `true` if the movie is now a
    /// favorite, `false` if it was removed.
    pub async fn toggle(&self, movie: &MovieSummary) -> FavoritesResult<bool> {
        let _guard = self.op_lock.lock().await;

        let mut records = self.store.load().await?;

        let now_favorite = match records.iter().position(|r| r.movie_id == movie.id) {
            Some(index) => {
                records.remove(index);
                false
            }
            None => {
                records.insert(0, FavoriteRecord::from_summary(movie));
                true
            }
        };

        self.store.save(&records).await?;

        self.install(FavoritesSnapshot::from_records(records, false));
        Ok(now_favorite)
    }

    /// Re-read the store and republish, raising `loading` during the
    /// read. Runs under the operation lock, so it cannot interleave
    /// with a toggle's read-modify-write cycle.
    pub async fn refresh(&self) -> FavoritesResult<()> {
        let _guard = self.op_lock.lock().await;
        self.set_loading(true);

        match self.store.load().await {
            Ok(records) => {
                self.install(FavoritesSnapshot::from_records(records, false));
                Ok(())
            }
            Err(e) => {
                self.set_loading(false);
                Err(e)
            }
        }
    }

    /// O(1) membership check against the last published snapshot.
    /// Never touches the store.
    pub fn is_favorite(&self, movie_id: u64) -> bool {
        self.current.read().unwrap().favorite_ids.contains(&movie_id)
    }

    /// The last published state, for a newly mounted consumer's first
    /// render
    pub fn snapshot(&self) -> FavoritesSnapshot {
        self.current.read().unwrap().clone()
    }

    /// Register a listener invoked on every publish.
    ///
    /// The listener is invoked once immediately with the current
    /// snapshot, so a fresh consumer renders without waiting for the
    /// next state transition. Unsubscribe with the returned token on
    /// teardown.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&FavoritesSnapshot) + Send + Sync + 'static,
    {
        listener(&self.snapshot());
        self.publisher.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.publisher.unsubscribe(id);
    }

    /// Replace the published snapshot and fan it out
    fn install(&self, snapshot: FavoritesSnapshot) {
        {
            let mut current = self.current.write().unwrap();
            *current = snapshot.clone();
        }
        self.publisher.publish(&snapshot);
    }

    /// Republish the current collection with the loading flag changed
    fn set_loading(&self, loading: bool) {
        let snapshot = {
            let current = self.current.read().unwrap();
            FavoritesSnapshot {
                favorites: Arc::clone(&current.favorites),
                favorite_ids: Arc::clone(&current.favorite_ids),
                loading,
            }
        };
        self.install(snapshot);
    }
}
