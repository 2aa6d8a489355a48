use crate::errors::{ModelError, Result};
use crate::ops::Store;

use super::invariants;

/// Validate a required char field: non-blank and at most `max_len` characters
///
/// # Errors
/// `InvalidField` naming `field` if the value is empty, whitespace-only, or
/// too long.
pub fn validate_required(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ModelError::InvalidField {
            field: field.to_string(),
            reason: "cannot be empty or whitespace-only".to_string(),
        });
    }
    validate_max_len(field, value, max_len)
}

/// Validate an optional char field: blank is allowed, length is capped
///
/// # Errors
/// `InvalidField` naming `field` if the value exceeds `max_len` characters.
pub fn validate_max_len(field: &str, value: &str, max_len: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ModelError::InvalidField {
            field: field.to_string(),
            reason: format!("length {} exceeds maximum of {}", len, max_len),
        });
    }
    Ok(())
}

/// Validate the whole in-memory social graph
///
/// 1. Every edge endpoint refers to an existing user
/// 2. No ordered pair carries more than one edge
/// 3. No edge points from a user to itself
/// 4. No edge was refreshed before it was created
///
/// # Errors
/// Returns the first violation found.
pub fn validate_graph(store: &Store) -> Result<()> {
    if let Some((relation_id, user_id)) = invariants::find_dangling_relations(store).first() {
        return Err(ModelError::IntegrityViolation {
            table: "relations".to_string(),
            detail: format!("relation {} refers to missing user {}", relation_id, user_id),
        });
    }

    if let Some((from, to)) = invariants::find_duplicate_pairs(store).first() {
        return Err(ModelError::IntegrityViolation {
            table: "relations".to_string(),
            detail: format!("more than one relation from {} to {}", from, to),
        });
    }

    if let Some(user_id) = invariants::find_self_relations(store).first() {
        return Err(ModelError::SelfRelation { user_id: *user_id });
    }

    if let Some(relation_id) = invariants::find_time_travellers(store).first() {
        return Err(ModelError::IntegrityViolation {
            table: "relations".to_string(),
            detail: format!("relation {} updated before it was created", relation_id),
        });
    }

    Ok(())
}
