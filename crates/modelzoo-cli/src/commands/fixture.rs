//! Fixture import command
//!
//! Usage: modelzoo-cli fixture import <PATH>

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use modelzoo_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

use super::db::open_store;

#[derive(Debug, Args)]
pub struct FixtureArgs {
    #[command(subcommand)]
    pub command: FixtureCommand,
}

#[derive(Debug, Subcommand)]
pub enum FixtureCommand {
    /// Import a fixture file or a directory of them
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to a fixture YAML file or directory
    pub path: PathBuf,
}

/// Execute fixture command
pub fn execute(args: FixtureArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        FixtureCommand::Import(import_args) => execute_import(import_args, db),
    }
}

fn execute_import(args: ImportArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_store(db)?;

    let files = if args.path.is_dir() {
        // Sorted for deterministic import order
        let mut files: Vec<PathBuf> = std::fs::read_dir(&args.path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    } else {
        vec![args.path]
    };

    for path in files {
        println!("Importing {}...", path.display());
        match apply_engine_command(EngineCommand::FixtureImport { path }, &mut conn)? {
            EngineCommandResult::FixtureImported(digest) => {
                println!("✓ Imported (digest: {})", digest);
            }
            other => return Err(format!("unexpected engine result: {:?}", other).into()),
        }
    }

    Ok(())
}
