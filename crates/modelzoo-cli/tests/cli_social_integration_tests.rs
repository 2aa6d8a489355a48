//! CLI integration tests
//!
//! Drive the built binary against a temporary database and check both its
//! output and the rows it leaves behind.

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(temp_dir: &TempDir, db_path: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_modelzoo-cli");
    Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "off")
        .arg("--db")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn run_ok(temp_dir: &TempDir, db_path: &Path, args: &[&str]) -> String {
    let output = run(temp_dir, db_path, args);
    assert!(
        output.status.success(),
        "CLI {:?} should succeed. Stderr: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("data").join("store.db")
}

#[test]
fn test_migrate_creates_database() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let stdout = run_ok(&temp_dir, &db, &["migrate"]);

    assert!(stdout.contains("004_social"));
    assert!(db.exists(), "database file should be created with its parent dir");
}

#[test]
fn test_follow_then_block_via_cli() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    assert!(run_ok(&temp_dir, &db, &["user", "create", "kim"]).contains("Created user 1: kim"));
    run_ok(&temp_dir, &db, &["user", "create", "lee"]);

    let followed = run_ok(&temp_dir, &db, &["follow", "1", "2"]);
    assert!(followed.contains("Following: 1 -> 2"));

    let again = run_ok(&temp_dir, &db, &["follow", "1", "2"]);
    assert!(again.contains("Unchanged: existing follow"));

    let followers = run_ok(&temp_dir, &db, &["followers", "2"]);
    assert_eq!(followers.trim(), "1\tkim");

    run_ok(&temp_dir, &db, &["block", "1", "2"]);
    assert_eq!(run_ok(&temp_dir, &db, &["following", "1"]).trim(), "");
    assert_eq!(run_ok(&temp_dir, &db, &["blocks", "1"]).trim(), "2\tlee");

    let conn = Connection::open(&db).unwrap();
    let (count, kind): (i64, String) = conn
        .query_row(
            "SELECT COUNT(*), MAX(relation_type) FROM relations",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(kind, "b");
}

#[test]
fn test_follow_after_block_is_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    run_ok(&temp_dir, &db, &["user", "create", "kim"]);
    run_ok(&temp_dir, &db, &["user", "create", "lee"]);

    run_ok(&temp_dir, &db, &["block", "1", "2"]);
    let stdout = run_ok(&temp_dir, &db, &["follow", "1", "2"]);

    assert!(stdout.contains("Unchanged: existing block"));
}

#[test]
fn test_errors_exit_nonzero_with_code() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    run_ok(&temp_dir, &db, &["user", "create", "kim"]);

    let missing = run(&temp_dir, &db, &["follow", "1", "9"]);
    assert!(!missing.status.success());
    let stderr = String::from_utf8_lossy(&missing.stderr);
    assert!(stderr.contains("Error: [ERR_NOT_FOUND]"), "stderr: {}", stderr);

    let own = run(&temp_dir, &db, &["block", "1", "1"]);
    assert!(!own.status.success());
    assert!(String::from_utf8_lossy(&own.stderr).contains("ERR_SELF_RELATION"));
}

#[test]
fn test_fixture_import_and_user_list() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let fixture = temp_dir.path().join("graph.yaml");
    fs::write(
        &fixture,
        "schema_version: 0\ntwitter_users: [kim, lee]\nrelations:\n  - { from: lee, to: kim, type: follow }\n",
    )
    .unwrap();

    let stdout = run_ok(
        &temp_dir,
        &db,
        &["fixture", "import", fixture.to_str().unwrap()],
    );
    assert!(stdout.contains("✓ Imported (digest: "));

    let users = run_ok(&temp_dir, &db, &["user", "list"]);
    assert_eq!(users.lines().collect::<Vec<_>>(), vec!["1\tkim", "2\tlee"]);
    assert_eq!(run_ok(&temp_dir, &db, &["followers", "1"]).trim(), "2\tlee");
}

#[test]
fn test_log_json_flag_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    run_ok(&temp_dir, &db, &["--log-json", "user", "list"]);
}
