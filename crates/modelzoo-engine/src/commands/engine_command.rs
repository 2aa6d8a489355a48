//! Engine-level commands: one enum covering everything the CLI can ask for.

#![allow(clippy::result_large_err)]

use std::path::PathBuf;

use modelzoo_core::model::{Relation, TwitterUser};
use modelzoo_store::errors::Result;
use rusqlite::Connection;

use crate::commands::social::{self, FollowOutcome, SocialView};

/// Engine-level commands that require I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Apply pending schema migrations.
    Migrate,
    UserCreate {
        name: String,
    },
    UserList,
    Follow {
        actor_id: i64,
        target_id: i64,
    },
    Block {
        actor_id: i64,
        target_id: i64,
    },
    /// Read a derived user list (followers, following, block list, ...).
    View {
        view: SocialView,
        user_id: i64,
    },
    /// Import a YAML fixture file.
    FixtureImport {
        path: PathBuf,
    },
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommandResult {
    /// Ids of every applied migration.
    Migrated(Vec<String>),
    User(TwitterUser),
    Users(Vec<TwitterUser>),
    Followed(FollowOutcome),
    Blocked(Relation),
    /// Digest of the imported fixture.
    FixtureImported(String),
}

/// Apply an engine command.
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &mut Connection,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Migrate => {
            crate::commands::schema::migrate(conn).map(EngineCommandResult::Migrated)
        }
        EngineCommand::UserCreate { name } => {
            social::user_create(&name, conn).map(EngineCommandResult::User)
        }
        EngineCommand::UserList => social::user_list(conn).map(EngineCommandResult::Users),
        EngineCommand::Follow {
            actor_id,
            target_id,
        } => social::follow(actor_id, target_id, conn).map(EngineCommandResult::Followed),
        EngineCommand::Block {
            actor_id,
            target_id,
        } => social::block(actor_id, target_id, conn).map(EngineCommandResult::Blocked),
        EngineCommand::View { view, user_id } => {
            social::view(view, user_id, conn).map(EngineCommandResult::Users)
        }
        EngineCommand::FixtureImport { path } => {
            crate::commands::fixture::fixture_import(&path, conn)
                .map(EngineCommandResult::FixtureImported)
        }
    }
}
