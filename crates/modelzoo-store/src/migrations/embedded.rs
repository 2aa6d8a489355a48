//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time using include_str!

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Get all embedded migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_abstract_base",
            sql: include_str!("../../migrations/001_abstract_base.sql"),
        },
        Migration {
            id: "002_inheritance",
            sql: include_str!("../../migrations/002_inheritance.sql"),
        },
        Migration {
            id: "003_foreignkey",
            sql: include_str!("../../migrations/003_foreignkey.sql"),
        },
        Migration {
            id: "004_social",
            sql: include_str!("../../migrations/004_social.sql"),
        },
    ]
}
