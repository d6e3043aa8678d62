//! Critical Favorite Invariants:
//!
//! 1. A favorite is a snapshot — display fields are never refreshed
//! 2. `movie_id` is unique across the collection
//! 3. The collection is ordered newest-first (new records are prepended)
//! 4. `added_at` is set at creation and never changes
//! 5. Records are replaced wholesale, never edited in place

pub mod entity;
pub mod invariants;

pub use entity::{FavoriteRecord, MovieSummary};
pub use invariants::validate_collection;
