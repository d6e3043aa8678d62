// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod favorites_service;


pub use favorites_service::{FavoritesService, FavoritesSnapshot};
