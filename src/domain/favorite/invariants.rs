// src/domain/favorite/invariants.rs

use std::collections::HashSet;

use super::entity::FavoriteRecord;
use crate::domain::{DomainError, DomainResult};

/// Validates favorites collection invariants
///
/// A collection is a newest-first sequence of records keyed by
/// `movie_id`; the id must be unique across the whole sequence.
/// A persisted payload violating this is treated as corrupt by the
/// storage layer.
pub fn validate_collection(records: &[FavoriteRecord]) -> DomainResult<()> {
    let mut seen: HashSet<u64> = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.movie_id) {
            return Err(DomainError::InvariantViolation(format!(
                "Duplicate movie id {} in favorites collection",
                record.movie_id
            )));
        }
    }
    Ok(())
}
