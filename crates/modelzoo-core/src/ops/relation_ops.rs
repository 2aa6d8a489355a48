//! Follow/block edge manager
//!
//! Written once against `RelationLedger`; the in-memory `Store` and the
//! SQLite ledger in `modelzoo-store` both run these same functions.
//!
//! Behaviour for an ordered pair (actor, target):
//!
//! | existing edge | `follow`                 | `block`                        |
//! |---------------|--------------------------|--------------------------------|
//! | none          | insert follow, created   | insert block                   |
//! | follow        | unchanged, not created   | retype to block, refresh time  |
//! | block         | unchanged, not created   | unchanged                      |
//!
//! `follow` never converts a block back into a follow.

use chrono::{DateTime, Utc};

use super::ledger::{Direction, RelationLedger};
use crate::errors::{ModelError, Result};
use crate::model::{Relation, RelationType, TwitterUser};

fn check_pair<L: RelationLedger + ?Sized>(ledger: &L, actor_id: i64, target_id: i64) -> Result<()> {
    if actor_id == target_id {
        return Err(ModelError::SelfRelation { user_id: actor_id });
    }
    ledger.get_user(actor_id)?;
    ledger.get_user(target_id)?;
    Ok(())
}

/// Follow `target_id` as `actor_id`, stamping new edges with the current time
///
/// Returns the edge and whether it was created by this call.
///
/// # Errors
/// `SelfRelation`, `UserNotFound`, or any ledger failure (including a fatal
/// `IntegrityViolation` if the pair's uniqueness is broken underneath us).
pub fn follow<L: RelationLedger + ?Sized>(
    ledger: &mut L,
    actor_id: i64,
    target_id: i64,
) -> Result<(Relation, bool)> {
    follow_at(ledger, actor_id, target_id, Utc::now())
}

/// `follow` with an explicit timestamp
///
/// # Errors
/// See [`follow`].
pub fn follow_at<L: RelationLedger + ?Sized>(
    ledger: &mut L,
    actor_id: i64,
    target_id: i64,
    at: DateTime<Utc>,
) -> Result<(Relation, bool)> {
    check_pair(&*ledger, actor_id, target_id)?;

    if let Some(existing) = ledger.find_relation(actor_id, target_id)? {
        tracing::debug!(
            relation_id = existing.id,
            relation_type = existing.relation_type.code(),
            "follow: edge already present"
        );
        return Ok((existing, false));
    }

    let relation = ledger.insert_relation(actor_id, target_id, RelationType::Follow, at)?;
    tracing::debug!(relation_id = relation.id, "follow: edge created");
    Ok((relation, true))
}

/// Block `target_id` as `actor_id`, stamping changes with the current time
///
/// # Errors
/// `SelfRelation`, `UserNotFound`, or any ledger failure.
pub fn block<L: RelationLedger + ?Sized>(
    ledger: &mut L,
    actor_id: i64,
    target_id: i64,
) -> Result<Relation> {
    block_at(ledger, actor_id, target_id, Utc::now())
}

/// `block` with an explicit timestamp
///
/// # Errors
/// See [`block`].
pub fn block_at<L: RelationLedger + ?Sized>(
    ledger: &mut L,
    actor_id: i64,
    target_id: i64,
    at: DateTime<Utc>,
) -> Result<Relation> {
    check_pair(&*ledger, actor_id, target_id)?;

    match ledger.find_relation(actor_id, target_id)? {
        None => {
            let relation = ledger.insert_relation(actor_id, target_id, RelationType::Block, at)?;
            tracing::debug!(relation_id = relation.id, "block: edge created");
            Ok(relation)
        }
        Some(existing) if existing.is_follow() => {
            let relation = ledger.retype_relation(existing.id, RelationType::Block, at)?;
            tracing::debug!(relation_id = relation.id, "block: follow converted");
            Ok(relation)
        }
        Some(existing) => Ok(existing),
    }
}

/// Users following `user_id`
///
/// # Errors
/// `UserNotFound` or a ledger failure.
pub fn followers<L: RelationLedger + ?Sized>(ledger: &L, user_id: i64) -> Result<Vec<TwitterUser>> {
    ledger.get_user(user_id)?;
    ledger.related_users(user_id, Direction::Inbound, Some(RelationType::Follow))
}

/// Users `user_id` follows
///
/// # Errors
/// `UserNotFound` or a ledger failure.
pub fn following<L: RelationLedger + ?Sized>(ledger: &L, user_id: i64) -> Result<Vec<TwitterUser>> {
    ledger.get_user(user_id)?;
    ledger.related_users(user_id, Direction::Outbound, Some(RelationType::Follow))
}

/// Users `user_id` has blocked
///
/// # Errors
/// `UserNotFound` or a ledger failure.
pub fn block_list<L: RelationLedger + ?Sized>(ledger: &L, user_id: i64) -> Result<Vec<TwitterUser>> {
    ledger.get_user(user_id)?;
    ledger.related_users(user_id, Direction::Outbound, Some(RelationType::Block))
}

/// Every user `user_id` has an outbound edge to, of either type
///
/// # Errors
/// `UserNotFound` or a ledger failure.
pub fn relation_users<L: RelationLedger + ?Sized>(
    ledger: &L,
    user_id: i64,
) -> Result<Vec<TwitterUser>> {
    ledger.get_user(user_id)?;
    ledger.related_users(user_id, Direction::Outbound, None)
}
