// src/lib.rs
// Reelmark - persistent favorites engine for a movie browsing app
//
// Architecture:
// - Domain-centric: entities and invariants live in `domain`
// - Storage: an opaque key-value medium under a single fixed key
// - One arbiter: `FavoritesService` owns the in-memory projection and
//   serializes every mutation against the store
// - Observable: consumers subscribe and receive immutable snapshots

pub mod domain;
pub mod error;
pub mod events;
pub mod services;
pub mod storage;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{validate_collection, DomainError, FavoriteRecord, MovieSummary};

// ============================================================================
// PUBLIC API - Storage
// ============================================================================

pub use storage::{
    FavoritesStore, FileKvMedium, KvMedium, MemoryKvMedium, StorageConfig, FAVORITES_KEY,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{FavoritesService, FavoritesSnapshot};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{SnapshotPublisher, SubscriptionId};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{FavoritesError, FavoritesResult};
