//! One-to-many and self-referential foreign keys
//!
//! - `Car.manufacturer_id` → `Manufacturer` (cascade). Reverse accessor: the
//!   cars of a manufacturer.
//! - `FcUser.instructor_id` → `FcUser` (nullable, set null on delete).
//!   Reverse accessor: `students`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Result};
use crate::rules::validate_required;

pub const MANUFACTURER_NAME_MAX: usize = 50;
pub const CAR_NAME_MAX: usize = 50;
pub const FC_USER_NAME_MAX: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
}

impl Manufacturer {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// # Errors
    /// `InvalidField` if the name is blank or longer than 50 characters.
    pub fn validate_name(name: &str) -> Result<()> {
        validate_required("manufacturer.name", name, MANUFACTURER_NAME_MAX)
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub manufacturer_id: i64,
    pub name: String,
}

impl Car {
    pub fn new(id: i64, manufacturer_id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            manufacturer_id,
            name: name.into(),
        }
    }

    /// # Errors
    /// `InvalidField` if the name is blank or longer than 50 characters.
    pub fn validate_name(name: &str) -> Result<()> {
        validate_required("car.name", name, CAR_NAME_MAX)
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcUser {
    pub id: i64,
    pub name: String,
    pub instructor_id: Option<i64>,
}

impl FcUser {
    pub fn new(id: i64, name: impl Into<String>, instructor_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            instructor_id,
        }
    }

    pub fn has_instructor(&self) -> bool {
        self.instructor_id.is_some()
    }

    /// # Errors
    /// `InvalidField` if the name is blank or longer than 30 characters.
    pub fn validate_name(name: &str) -> Result<()> {
        validate_required("fc_user.name", name, FC_USER_NAME_MAX)
    }

    /// Reject a user being its own instructor
    ///
    /// # Errors
    /// `InvalidField` when `instructor_id == user_id`.
    pub fn validate_instructor(user_id: i64, instructor_id: Option<i64>) -> Result<()> {
        if instructor_id == Some(user_id) {
            return Err(ModelError::InvalidField {
                field: "fc_user.instructor".to_string(),
                reason: format!("user {} cannot be their own instructor", user_id),
            });
        }
        Ok(())
    }
}

impl fmt::Display for FcUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fc_user_instructor_is_optional() {
        let student = FcUser::new(2, "student", Some(1));
        let instructor = FcUser::new(1, "instructor", None);

        assert!(student.has_instructor());
        assert!(!instructor.has_instructor());
    }

    #[test]
    fn test_self_instruction_rejected() {
        assert!(FcUser::validate_instructor(3, Some(3)).is_err());
        assert!(FcUser::validate_instructor(3, Some(1)).is_ok());
        assert!(FcUser::validate_instructor(3, None).is_ok());
    }

    #[test]
    fn test_name_limits() {
        assert!(FcUser::validate_name(&"a".repeat(30)).is_ok());
        assert!(FcUser::validate_name(&"a".repeat(31)).is_err());
        assert!(Manufacturer::validate_name("").is_err());
        assert!(Car::validate_name("Avante").is_ok());
    }
}
