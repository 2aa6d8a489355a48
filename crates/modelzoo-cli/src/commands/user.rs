//! Twitter user commands
//!
//! Usage: modelzoo-cli user create <NAME> | modelzoo-cli user list

use std::path::Path;

use clap::{Args, Subcommand};
use modelzoo_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

use super::db::open_store;
use super::social::print_users;

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a twitter user
    Create {
        /// Display name (at most 50 characters)
        name: String,
    },
    /// List every twitter user
    List,
}

/// Execute user command
pub fn execute(args: UserArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_store(db)?;

    let cmd = match args.command {
        UserCommand::Create { name } => EngineCommand::UserCreate { name },
        UserCommand::List => EngineCommand::UserList,
    };

    match apply_engine_command(cmd, &mut conn)? {
        EngineCommandResult::User(user) => {
            println!("Created user {}: {}", user.id, user.name);
        }
        EngineCommandResult::Users(users) => print_users(&users),
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    }

    Ok(())
}
