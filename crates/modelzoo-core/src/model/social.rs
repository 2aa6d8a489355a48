//! Self-referential many-to-many through an explicit junction entity
//!
//! A `TwitterUser` relates to other users through `Relation` rows. The edge
//! is directed and typed:
//!
//! - `followers(A)`: users with a follow edge pointing at A
//! - `following(A)`: users A has a follow edge to
//! - `block_list(A)`: users A has a block edge to
//!
//! If A follows B, A is a follower of B and B is a followee of A. The
//! relation is not symmetrical: A following B says nothing about B → A.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Result};
use crate::rules::validate_required;

pub const TWITTER_USER_NAME_MAX: usize = 50;

/// Node of the social graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterUser {
    pub id: i64,
    pub name: String,
}

impl TwitterUser {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// # Errors
    /// `InvalidField` if the name is blank or longer than 50 characters.
    pub fn validate_name(name: &str) -> Result<()> {
        validate_required("twitter_user.name", name, TWITTER_USER_NAME_MAX)
    }
}

impl fmt::Display for TwitterUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Edge type; persisted as a one-character code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Follow,
    Block,
}

impl RelationType {
    /// Declared choices as (stored code, label)
    pub const CHOICES: [(&'static str, &'static str); 2] = [("f", "Follow"), ("b", "Block")];

    /// One-character code stored in the `relation_type` column
    pub fn code(&self) -> &'static str {
        match self {
            RelationType::Follow => "f",
            RelationType::Block => "b",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RelationType::Follow => "Follow",
            RelationType::Block => "Block",
        }
    }

    /// Decode a stored column value
    ///
    /// # Errors
    /// `InvalidRelationType` for anything other than `f` or `b`.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "f" => Ok(RelationType::Follow),
            "b" => Ok(RelationType::Block),
            other => Err(ModelError::InvalidRelationType {
                code: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationType::Follow => f.write_str("follow"),
            RelationType::Block => f.write_str("block"),
        }
    }
}

/// Accepts the stored code or the lowercase name (`f`/`follow`, `b`/`block`)
impl FromStr for RelationType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "follow" => Ok(RelationType::Follow),
            "block" => Ok(RelationType::Block),
            code => RelationType::from_code(code),
        }
    }
}

/// Directed, typed edge between two users
///
/// At most one Relation exists per ordered (from_user_id, to_user_id) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub relation_type: RelationType,
    /// Set once when the edge is inserted
    pub created_at: DateTime<Utc>,
    /// Refreshed when the edge changes type
    pub updated_at: DateTime<Utc>,
}

impl Relation {
    pub fn new(
        id: i64,
        from_user_id: i64,
        to_user_id: i64,
        relation_type: RelationType,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            from_user_id,
            to_user_id,
            relation_type,
            created_at: at,
            updated_at: at,
        }
    }

    /// The ordered pair this edge is unique on
    pub fn pair(&self) -> (i64, i64) {
        (self.from_user_id, self.to_user_id)
    }

    pub fn is_follow(&self) -> bool {
        self.relation_type == RelationType::Follow
    }

    pub fn is_block(&self) -> bool {
        self.relation_type == RelationType::Block
    }

    /// Change the edge type and refresh `updated_at`
    ///
    /// `updated_at` never moves before `created_at`, even if `at` does.
    pub fn retype(&mut self, relation_type: RelationType, at: DateTime<Utc>) {
        self.relation_type = relation_type;
        self.updated_at = at.max(self.created_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_relation_type_codes_match_choices() {
        for (code, label) in RelationType::CHOICES {
            let kind = RelationType::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
            assert_eq!(kind.label(), label);
        }
    }

    #[test]
    fn test_relation_type_rejects_unknown_code() {
        let err = RelationType::from_code("x").unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidRelationType {
                code: "x".to_string()
            }
        );
    }

    #[test]
    fn test_relation_type_parses_names_and_codes() {
        assert_eq!("follow".parse::<RelationType>().unwrap(), RelationType::Follow);
        assert_eq!("Block".parse::<RelationType>().unwrap(), RelationType::Block);
        assert_eq!("f".parse::<RelationType>().unwrap(), RelationType::Follow);
        assert!("mute".parse::<RelationType>().is_err());
    }

    #[test]
    fn test_relation_serializes_type_as_lowercase_name() {
        let relation = Relation::new(1, 1, 2, RelationType::Block, Utc::now());
        let json = serde_json::to_value(&relation).unwrap();
        assert_eq!(json["relation_type"], "block");
    }

    #[test]
    fn test_retype_never_moves_before_creation() {
        let created = Utc::now();
        let mut relation = Relation::new(1, 1, 2, RelationType::Follow, created);

        relation.retype(RelationType::Block, created - Duration::seconds(10));

        assert!(relation.is_block());
        assert_eq!(relation.updated_at, created);
    }

    #[test]
    fn test_twitter_user_display_is_name() {
        let user = TwitterUser::new(3, "alice");
        assert_eq!(user.to_string(), "alice");
        assert!(TwitterUser::validate_name(&"x".repeat(51)).is_err());
    }
}
