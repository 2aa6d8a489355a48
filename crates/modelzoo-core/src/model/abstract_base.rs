//! Abstract base inheritance
//!
//! An abstract base owns no table. Its fields are copied into every concrete
//! child table, so `students` carries `name` and `age` itself and each post
//! type has its own `author_id`/`created_at` columns.
//!
//! In Rust the base is a plain struct embedded by value in each child, and
//! the shared behaviour lives on a trait (`Post`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Result};
use crate::rules::{validate_max_len, validate_required};

pub const COMMON_INFO_NAME_MAX: usize = 100;
pub const STUDENT_HOME_GROUP_MAX: usize = 5;
pub const RELATED_USER_NAME_MAX: usize = 50;
pub const PHOTO_URL_MAX: usize = 100;

/// Abstract base: shared personal info, ordered by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonInfo {
    /// Indexed in every child table
    pub name: String,
    pub age: u32,
}

impl CommonInfo {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// # Errors
    /// `InvalidField` if the name is blank or longer than 100 characters.
    pub fn validate(&self) -> Result<()> {
        validate_required("common_info.name", &self.name, COMMON_INFO_NAME_MAX)
    }
}

/// Concrete child of `CommonInfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    #[serde(flatten)]
    pub info: CommonInfo,
    pub home_group: String,
}

impl Student {
    /// Display name used in admin-style listings
    pub const VERBOSE_NAME: &'static str = "학생";
    pub const VERBOSE_NAME_PLURAL: &'static str = "학생 목록";

    pub fn new(id: i64, info: CommonInfo, home_group: impl Into<String>) -> Self {
        Self {
            id,
            info,
            home_group: home_group.into(),
        }
    }

    /// # Errors
    /// `InvalidField` for a bad inherited name or a home group over 5 characters.
    pub fn validate(&self) -> Result<()> {
        self.info.validate()?;
        validate_required("student.home_group", &self.home_group, STUDENT_HOME_GROUP_MAX)
    }
}

/// Author referenced by every post type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedUser {
    pub id: i64,
    pub name: String,
}

impl RelatedUser {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// # Errors
    /// `InvalidField` if the name is blank or longer than 50 characters.
    pub fn validate_name(name: &str) -> Result<()> {
        validate_required("related_user.name", name, RELATED_USER_NAME_MAX)
    }
}

impl fmt::Display for RelatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Abstract base for posts: author plus insertion time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostBase {
    /// FK to `RelatedUser`, cascades on delete
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl PostBase {
    pub fn new(author_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            author_id,
            created_at,
        }
    }
}

/// Behaviour shared by every concrete post type
pub trait Post {
    /// Table backing this concrete post type
    const TABLE: &'static str;

    fn id(&self) -> i64;

    fn base(&self) -> &PostBase;

    fn author_id(&self) -> i64 {
        self.base().author_id
    }

    /// `Post: (Author: <name>)`
    ///
    /// # Errors
    /// `IntegrityViolation` if `author` is not this post's author.
    fn label(&self, author: &RelatedUser) -> Result<String> {
        if author.id != self.author_id() {
            return Err(ModelError::IntegrityViolation {
                table: Self::TABLE.to_string(),
                detail: format!(
                    "post {} belongs to author {}, not {}",
                    self.id(),
                    self.author_id(),
                    author.id
                ),
            });
        }
        Ok(format!("Post: (Author: {})", author.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPost {
    pub id: i64,
    #[serde(flatten)]
    pub base: PostBase,
    /// May be blank
    pub photo_url: String,
}

impl PhotoPost {
    /// # Errors
    /// `InvalidField` if the URL is longer than 100 characters.
    pub fn validate_photo_url(photo_url: &str) -> Result<()> {
        validate_max_len("photo_post.photo_url", photo_url, PHOTO_URL_MAX)
    }
}

impl Post for PhotoPost {
    const TABLE: &'static str = "photo_posts";

    fn id(&self) -> i64 {
        self.id
    }

    fn base(&self) -> &PostBase {
        &self.base
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPost {
    pub id: i64,
    #[serde(flatten)]
    pub base: PostBase,
    /// Unbounded, may be blank
    pub text: String,
}

impl Post for TextPost {
    const TABLE: &'static str = "text_posts";

    fn id(&self) -> i64 {
        self.id
    }

    fn base(&self) -> &PostBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_inherits_common_info_validation() {
        let student = Student::new(1, CommonInfo::new("", 12), "A1");
        assert!(student.validate().is_err());

        let student = Student::new(1, CommonInfo::new("Kim", 12), "TOOLONG");
        assert!(student.validate().is_err());

        let student = Student::new(1, CommonInfo::new("Kim", 12), "A1");
        assert!(student.validate().is_ok());
    }

    #[test]
    fn test_post_label_uses_author_name() {
        let author = RelatedUser::new(7, "lhy");
        let post = TextPost {
            id: 1,
            base: PostBase::new(7, Utc::now()),
            text: String::new(),
        };

        assert_eq!(post.label(&author).unwrap(), "Post: (Author: lhy)");
    }

    #[test]
    fn test_post_label_rejects_wrong_author() {
        let other = RelatedUser::new(8, "someone");
        let post = PhotoPost {
            id: 1,
            base: PostBase::new(7, Utc::now()),
            photo_url: String::new(),
        };

        assert!(post.label(&other).is_err());
    }

    #[test]
    fn test_student_serializes_flat() {
        let student = Student::new(1, CommonInfo::new("Lee", 15), "B2");
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["name"], "Lee");
        assert_eq!(json["home_group"], "B2");
    }
}
