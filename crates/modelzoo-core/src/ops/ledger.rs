use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::model::{Relation, RelationType, TwitterUser};

/// Which end of an edge a view is anchored on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Edges leaving the user (`from_user_id = user`)
    Outbound,
    /// Edges arriving at the user (`to_user_id = user`)
    Inbound,
}

/// Storage backend the follow/block operations run against
///
/// Implementations own the (from_user_id, to_user_id) uniqueness constraint:
/// `insert_relation` must fail with `IntegrityViolation` if the pair already
/// has an edge, and with `UserNotFound` if either endpoint is missing.
///
/// Transactions are the caller's concern. A ledger bound to an open
/// transaction just issues its reads and writes inside it.
pub trait RelationLedger {
    /// Look up a user
    ///
    /// # Errors
    /// `UserNotFound` if there is no such user.
    fn get_user(&self, user_id: i64) -> Result<TwitterUser>;

    /// Edge for the ordered pair, if any
    ///
    /// # Errors
    /// Backend failures only; a miss is `Ok(None)`.
    fn find_relation(&self, from_user_id: i64, to_user_id: i64) -> Result<Option<Relation>>;

    /// Insert a new edge with `created_at = updated_at = at`
    ///
    /// # Errors
    /// `IntegrityViolation` on a duplicate pair, `UserNotFound` on a missing endpoint.
    fn insert_relation(
        &mut self,
        from_user_id: i64,
        to_user_id: i64,
        relation_type: RelationType,
        at: DateTime<Utc>,
    ) -> Result<Relation>;

    /// Change an existing edge's type in place, refreshing `updated_at`
    ///
    /// # Errors
    /// `NotFound` if the edge does not exist.
    fn retype_relation(
        &mut self,
        relation_id: i64,
        relation_type: RelationType,
        at: DateTime<Utc>,
    ) -> Result<Relation>;

    /// Users on the far end of `user_id`'s edges, optionally filtered by
    /// type, ordered by edge creation
    ///
    /// # Errors
    /// Backend failures only.
    fn related_users(
        &self,
        user_id: i64,
        direction: Direction,
        relation_type: Option<RelationType>,
    ) -> Result<Vec<TwitterUser>>;
}
