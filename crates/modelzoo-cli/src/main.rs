//! modelzoo CLI
//!
//! Command-line interface for the model zoo store

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use modelzoo_core::logging_facility::{init, Profile};
use modelzoo_engine::commands::social::SocialView;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "modelzoo-cli")]
#[command(about = "modelzoo - relational model examples and a follow/block graph", long_about = None)]
struct Cli {
    /// SQLite database path; parent directories are created on demand
    #[arg(long, global = true, default_value = ".modelzoo/store.db")]
    db: PathBuf,

    /// Emit JSON logs (production profile)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Twitter user operations
    User(commands::user::UserArgs),
    /// Follow a user
    Follow(commands::social::PairArgs),
    /// Block a user (converts an existing follow)
    Block(commands::social::PairArgs),
    /// List a user's followers
    Followers(commands::social::UserIdArgs),
    /// List the users a user follows
    Following(commands::social::UserIdArgs),
    /// List the users a user has blocked
    Blocks(commands::social::UserIdArgs),
    /// Fixture operations
    Fixture(commands::fixture::FixtureArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Migrate => commands::db::execute_migrate(&cli.db),
        Commands::User(args) => commands::user::execute(args, &cli.db),
        Commands::Follow(args) => commands::social::execute_follow(args, &cli.db),
        Commands::Block(args) => commands::social::execute_block(args, &cli.db),
        Commands::Followers(args) => {
            commands::social::execute_view(SocialView::Followers, args, &cli.db)
        }
        Commands::Following(args) => {
            commands::social::execute_view(SocialView::Following, args, &cli.db)
        }
        Commands::Blocks(args) => {
            commands::social::execute_view(SocialView::BlockList, args, &cli.db)
        }
        Commands::Fixture(args) => commands::fixture::execute(args, &cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
