//! Social graph persistence: twitter users, typed relations, and the SQLite
//! `RelationLedger`

#![allow(clippy::result_large_err)]

use chrono::{DateTime, Utc};
use modelzoo_core::errors::{ModelError, Result as ModelResult};
use modelzoo_core::model::{Relation, RelationType, TwitterUser};
use modelzoo_core::ops::{Direction, RelationLedger};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};

use super::sqlite_repo::{millis_at, to_millis, truncate_millis, SqliteRepo};
use crate::errors::{from_rusqlite, to_model_error, Result};

const RELATION_COLUMNS: &str =
    "id, from_user_id, to_user_id, relation_type, created_at, updated_at";

fn map_user(row: &Row<'_>) -> rusqlite::Result<TwitterUser> {
    Ok(TwitterUser::new(row.get(0)?, row.get::<_, String>(1)?))
}

fn map_relation(row: &Row<'_>) -> rusqlite::Result<Relation> {
    let code: String = row.get(3)?;
    let relation_type = RelationType::from_code(&code)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Relation {
        id: row.get(0)?,
        from_user_id: row.get(1)?,
        to_user_id: row.get(2)?,
        relation_type,
        created_at: millis_at(row, 4)?,
        updated_at: millis_at(row, 5)?,
    })
}

impl SqliteRepo {
    pub fn create_twitter_user(conn: &Connection, name: &str) -> Result<TwitterUser> {
        TwitterUser::validate_name(name)?;

        conn.execute("INSERT INTO twitter_users (name) VALUES (?1)", [name])
            .map_err(from_rusqlite)?;
        let user = TwitterUser::new(conn.last_insert_rowid(), name);

        tracing::debug!(user_id = user.id, "created twitter user");
        Ok(user)
    }

    pub fn get_twitter_user(conn: &Connection, id: i64) -> Result<TwitterUser> {
        Ok(SqliteLedger::new(conn).get_user(id)?)
    }

    /// Oldest user with this exact name
    pub fn find_twitter_user_by_name(conn: &Connection, name: &str) -> Result<Option<TwitterUser>> {
        conn.query_row(
            "SELECT id, name FROM twitter_users WHERE name = ?1 ORDER BY id LIMIT 1",
            [name],
            map_user,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn list_twitter_users(conn: &Connection) -> Result<Vec<TwitterUser>> {
        let mut stmt = conn
            .prepare("SELECT id, name FROM twitter_users ORDER BY id")
            .map_err(from_rusqlite)?;
        let users = stmt
            .query_map([], map_user)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(users)
    }

    /// Delete a user; every edge touching it is removed by cascade
    pub fn delete_twitter_user(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM twitter_users WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        if deleted == 0 {
            return Err(ModelError::UserNotFound { user_id: id }.into());
        }
        Ok(())
    }

    /// Insert an edge without follow/block semantics
    ///
    /// A second edge for the same ordered pair fails with
    /// `ERR_INTEGRITY_VIOLATION`.
    pub fn insert_relation(
        conn: &Connection,
        from_user_id: i64,
        to_user_id: i64,
        relation_type: RelationType,
        at: DateTime<Utc>,
    ) -> Result<Relation> {
        Ok(SqliteLedger::new(conn).insert_relation(from_user_id, to_user_id, relation_type, at)?)
    }

    /// All edges in id order
    pub fn list_relations(conn: &Connection) -> Result<Vec<Relation>> {
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM relations ORDER BY id", RELATION_COLUMNS))
            .map_err(from_rusqlite)?;
        let relations = stmt
            .query_map([], map_relation)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(relations)
    }
}

/// `RelationLedger` over a SQLite connection
///
/// Bind it to a `Transaction` (which derefs to `Connection`) to make a
/// read-then-write sequence such as `block` atomic. The pair uniqueness is
/// the table's own UNIQUE constraint.
pub struct SqliteLedger<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteLedger<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn fetch_relation(&self, relation_id: i64) -> ModelResult<Option<Relation>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM relations WHERE id = ?1", RELATION_COLUMNS),
                [relation_id],
                map_relation,
            )
            .optional()
            .map_err(|e| to_model_error(e, "relations"))
    }
}

impl RelationLedger for SqliteLedger<'_> {
    fn get_user(&self, user_id: i64) -> ModelResult<TwitterUser> {
        self.conn
            .query_row(
                "SELECT id, name FROM twitter_users WHERE id = ?1",
                [user_id],
                map_user,
            )
            .optional()
            .map_err(|e| to_model_error(e, "twitter_users"))?
            .ok_or(ModelError::UserNotFound { user_id })
    }

    fn find_relation(&self, from_user_id: i64, to_user_id: i64) -> ModelResult<Option<Relation>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM relations WHERE from_user_id = ?1 AND to_user_id = ?2",
                    RELATION_COLUMNS
                ),
                [from_user_id, to_user_id],
                map_relation,
            )
            .optional()
            .map_err(|e| to_model_error(e, "relations"))
    }

    fn insert_relation(
        &mut self,
        from_user_id: i64,
        to_user_id: i64,
        relation_type: RelationType,
        at: DateTime<Utc>,
    ) -> ModelResult<Relation> {
        self.get_user(from_user_id)?;
        self.get_user(to_user_id)?;

        let at = truncate_millis(at);
        self.conn
            .execute(
                "INSERT INTO relations (from_user_id, to_user_id, relation_type, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                rusqlite::params![from_user_id, to_user_id, relation_type.code(), to_millis(at)],
            )
            .map_err(|e| to_model_error(e, "relations"))?;

        Ok(Relation::new(
            self.conn.last_insert_rowid(),
            from_user_id,
            to_user_id,
            relation_type,
            at,
        ))
    }

    fn retype_relation(
        &mut self,
        relation_id: i64,
        relation_type: RelationType,
        at: DateTime<Utc>,
    ) -> ModelResult<Relation> {
        // updated_at never moves behind created_at, even with a skewed clock
        let updated = self
            .conn
            .execute(
                "UPDATE relations SET relation_type = ?1, updated_at = MAX(?2, created_at)
                 WHERE id = ?3",
                rusqlite::params![relation_type.code(), to_millis(at), relation_id],
            )
            .map_err(|e| to_model_error(e, "relations"))?;

        let not_found = || ModelError::NotFound {
            model: "Relation".to_string(),
            id: relation_id,
        };
        if updated == 0 {
            return Err(not_found());
        }
        self.fetch_relation(relation_id)?.ok_or_else(not_found)
    }

    fn related_users(
        &self,
        user_id: i64,
        direction: Direction,
        relation_type: Option<RelationType>,
    ) -> ModelResult<Vec<TwitterUser>> {
        let (anchor, far_end) = match direction {
            Direction::Outbound => ("from_user_id", "to_user_id"),
            Direction::Inbound => ("to_user_id", "from_user_id"),
        };
        let sql = format!(
            "SELECT u.id, u.name FROM relations r
             JOIN twitter_users u ON u.id = r.{far_end}
             WHERE r.{anchor} = ?1 AND (?2 IS NULL OR r.relation_type = ?2)
             ORDER BY r.created_at, r.id",
        );

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| to_model_error(e, "relations"))?;
        let users = stmt
            .query_map(
                rusqlite::params![user_id, relation_type.map(|t| t.code())],
                map_user,
            )
            .map_err(|e| to_model_error(e, "relations"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| to_model_error(e, "relations"))?;
        Ok(users)
    }
}
