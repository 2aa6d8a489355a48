//! Follow/block commands and the derived user lists
//!
//! Usage:
//!   modelzoo-cli follow <ACTOR_ID> <TARGET_ID>
//!   modelzoo-cli block <ACTOR_ID> <TARGET_ID>
//!   modelzoo-cli followers|following|blocks <USER_ID>

use std::path::Path;

use clap::Args;
use modelzoo_core::model::TwitterUser;
use modelzoo_engine::commands::social::SocialView;
use modelzoo_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

use super::db::open_store;

#[derive(Debug, Args)]
pub struct PairArgs {
    /// Acting user id
    pub actor_id: i64,

    /// Target user id
    pub target_id: i64,
}

#[derive(Debug, Args)]
pub struct UserIdArgs {
    pub user_id: i64,
}

/// One `<id>\t<name>` line per user
pub fn print_users(users: &[TwitterUser]) {
    for user in users {
        println!("{}\t{}", user.id, user.name);
    }
}

/// Execute follow
pub fn execute_follow(args: PairArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_store(db)?;

    let cmd = EngineCommand::Follow {
        actor_id: args.actor_id,
        target_id: args.target_id,
    };
    match apply_engine_command(cmd, &mut conn)? {
        EngineCommandResult::Followed(outcome) if outcome.created => {
            println!(
                "Following: {} -> {} (relation {})",
                args.actor_id, args.target_id, outcome.relation.id
            );
        }
        EngineCommandResult::Followed(outcome) => {
            println!(
                "Unchanged: existing {} relation {}",
                outcome.relation.relation_type, outcome.relation.id
            );
        }
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    }

    Ok(())
}

/// Execute block
pub fn execute_block(args: PairArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_store(db)?;

    let cmd = EngineCommand::Block {
        actor_id: args.actor_id,
        target_id: args.target_id,
    };
    match apply_engine_command(cmd, &mut conn)? {
        EngineCommandResult::Blocked(relation) => {
            println!(
                "Blocked: {} -> {} (relation {})",
                args.actor_id, args.target_id, relation.id
            );
        }
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    }

    Ok(())
}

/// Execute followers / following / blocks
pub fn execute_view(
    view: SocialView,
    args: UserIdArgs,
    db: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_store(db)?;

    let cmd = EngineCommand::View {
        view,
        user_id: args.user_id,
    };
    match apply_engine_command(cmd, &mut conn)? {
        EngineCommandResult::Users(users) => print_users(&users),
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    }

    Ok(())
}
