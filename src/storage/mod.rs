// src/storage/mod.rs
//
// Storage layer
//
// CRITICAL RULES:
// - Media are dumb string stores; the favorites store owns the schema
// - NO business logic, NO event emission
// - The favorites store is the only module that knows the fixed key

pub mod favorites_store;
pub mod kv;

pub use favorites_store::{FavoritesStore, FAVORITES_KEY};
pub use kv::{FileKvMedium, KvMedium, MemoryKvMedium, StorageConfig};
