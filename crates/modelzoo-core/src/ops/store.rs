use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use super::ledger::{Direction, RelationLedger};
use crate::errors::{ModelError, Result};
use crate::model::{Relation, RelationType, TwitterUser};

/// In-memory social graph
///
/// Mirrors the `twitter_users` / `relations` tables: integer ids assigned in
/// insertion order, a unique index on (from_user_id, to_user_id) and
/// cascading deletes from users to their edges.
/// Not thread-safe; designed for single-threaded use and tests.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) users: BTreeMap<i64, TwitterUser>,
    pub(crate) relations: BTreeMap<i64, Relation>,
    /// Unique index: ordered pair -> relation id
    pair_index: HashMap<(i64, i64), i64>,
    last_user_id: i64,
    last_relation_id: i64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user with the next free id
    ///
    /// # Errors
    /// `InvalidField` if the name is blank or longer than 50 characters.
    pub fn create_user(&mut self, name: &str) -> Result<TwitterUser> {
        TwitterUser::validate_name(name)?;

        self.last_user_id += 1;
        let user = TwitterUser::new(self.last_user_id, name);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Delete a user and every edge touching it
    ///
    /// # Errors
    /// `UserNotFound` if there is no such user.
    pub fn delete_user(&mut self, user_id: i64) -> Result<TwitterUser> {
        let user = self
            .users
            .remove(&user_id)
            .ok_or(ModelError::UserNotFound { user_id })?;

        let doomed: Vec<i64> = self
            .relations
            .values()
            .filter(|r| r.from_user_id == user_id || r.to_user_id == user_id)
            .map(|r| r.id)
            .collect();
        for relation_id in doomed {
            if let Some(relation) = self.relations.remove(&relation_id) {
                self.pair_index.remove(&relation.pair());
            }
        }

        Ok(user)
    }

    /// List all users in id order
    pub fn list_users(&self) -> Vec<&TwitterUser> {
        self.users.values().collect()
    }

    /// List all relations in id order
    pub fn list_relations(&self) -> Vec<&Relation> {
        self.relations.values().collect()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    fn require_user(&self, user_id: i64) -> Result<&TwitterUser> {
        self.users
            .get(&user_id)
            .ok_or(ModelError::UserNotFound { user_id })
    }
}

impl RelationLedger for Store {
    fn get_user(&self, user_id: i64) -> Result<TwitterUser> {
        self.require_user(user_id).cloned()
    }

    fn find_relation(&self, from_user_id: i64, to_user_id: i64) -> Result<Option<Relation>> {
        Ok(self
            .pair_index
            .get(&(from_user_id, to_user_id))
            .and_then(|id| self.relations.get(id))
            .cloned())
    }

    fn insert_relation(
        &mut self,
        from_user_id: i64,
        to_user_id: i64,
        relation_type: RelationType,
        at: DateTime<Utc>,
    ) -> Result<Relation> {
        self.require_user(from_user_id)?;
        self.require_user(to_user_id)?;

        if self.pair_index.contains_key(&(from_user_id, to_user_id)) {
            return Err(ModelError::IntegrityViolation {
                table: "relations".to_string(),
                detail: format!(
                    "UNIQUE constraint failed: relations.from_user_id, relations.to_user_id ({}, {})",
                    from_user_id, to_user_id
                ),
            });
        }

        self.last_relation_id += 1;
        let relation = Relation::new(
            self.last_relation_id,
            from_user_id,
            to_user_id,
            relation_type,
            at,
        );
        self.pair_index.insert(relation.pair(), relation.id);
        self.relations.insert(relation.id, relation.clone());
        Ok(relation)
    }

    fn retype_relation(
        &mut self,
        relation_id: i64,
        relation_type: RelationType,
        at: DateTime<Utc>,
    ) -> Result<Relation> {
        let relation =
            self.relations
                .get_mut(&relation_id)
                .ok_or_else(|| ModelError::NotFound {
                    model: "Relation".to_string(),
                    id: relation_id,
                })?;
        relation.retype(relation_type, at);
        Ok(relation.clone())
    }

    fn related_users(
        &self,
        user_id: i64,
        direction: Direction,
        relation_type: Option<RelationType>,
    ) -> Result<Vec<TwitterUser>> {
        let mut edges: Vec<&Relation> = self
            .relations
            .values()
            .filter(|r| match direction {
                Direction::Outbound => r.from_user_id == user_id,
                Direction::Inbound => r.to_user_id == user_id,
            })
            .filter(|r| relation_type.map_or(true, |t| r.relation_type == t))
            .collect();
        edges.sort_by_key(|r| (r.created_at, r.id));

        edges
            .into_iter()
            .map(|r| match direction {
                Direction::Outbound => self.get_user(r.to_user_id),
                Direction::Inbound => self.get_user(r.from_user_id),
            })
            .collect()
    }
}
