mod common;

use std::path::PathBuf;

use common::setup_db;
use modelzoo_core::model::RelationType;
use modelzoo_core::ops::{block_list, followers, following};
use modelzoo_store::fixture::{import_fixture, import_fixture_str};
use modelzoo_store::{SqliteLedger, SqliteRepo};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn user_id(conn: &rusqlite::Connection, name: &str) -> i64 {
    SqliteRepo::find_twitter_user_by_name(conn, name)
        .unwrap()
        .unwrap()
        .id
}

#[test]
fn test_import_replays_relations_through_manager() {
    let mut conn = setup_db();
    import_fixture(&fixture_path("social.yaml"), &mut conn).unwrap();

    let (kim, lee, park) = (
        user_id(&conn, "kim"),
        user_id(&conn, "lee"),
        user_id(&conn, "park"),
    );
    let ledger = SqliteLedger::new(&conn);

    let lee_followers: Vec<i64> = followers(&ledger, lee).unwrap().iter().map(|u| u.id).collect();
    assert_eq!(lee_followers, vec![kim, park]);

    // follow then block converted the kim -> park edge
    assert!(following(&ledger, kim).unwrap().iter().all(|u| u.id != park));
    assert_eq!(block_list(&ledger, kim).unwrap()[0].id, park);

    // block then follow left lee -> kim blocked
    assert_eq!(block_list(&ledger, lee).unwrap()[0].id, kim);
    assert!(following(&ledger, lee).unwrap().is_empty());

    let relations = SqliteRepo::list_relations(&conn).unwrap();
    assert_eq!(relations.len(), 4);
    assert_eq!(
        relations
            .iter()
            .filter(|r| r.relation_type == RelationType::Block)
            .count(),
        2
    );
}

#[test]
fn test_import_resolves_foreign_keys_by_name() {
    let mut conn = setup_db();
    import_fixture(&fixture_path("social.yaml"), &mut conn).unwrap();

    let hyundai = SqliteRepo::find_manufacturer_by_name(&conn, "Hyundai")
        .unwrap()
        .unwrap();
    assert_eq!(SqliteRepo::cars_of(&conn, hyundai.id).unwrap().len(), 2);

    // instructor declared after the student
    let coach = SqliteRepo::find_fc_user_by_name(&conn, "coach")
        .unwrap()
        .unwrap();
    let pupils = SqliteRepo::students_of(&conn, coach.id).unwrap();
    assert_eq!(pupils.len(), 1);
    assert_eq!(pupils[0].name, "pupil");
}

#[test]
fn test_reimport_is_idempotent_with_stable_digest() {
    let mut conn = setup_db();
    let first = import_fixture(&fixture_path("social.yaml"), &mut conn).unwrap();
    let relations_before = SqliteRepo::list_relations(&conn).unwrap();

    let second = import_fixture(&fixture_path("social.yaml"), &mut conn).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
    assert_eq!(SqliteRepo::list_relations(&conn).unwrap(), relations_before);
    assert_eq!(SqliteRepo::count_rows(&conn, "twitter_users").unwrap(), 3);
    assert_eq!(SqliteRepo::count_rows(&conn, "cars").unwrap(), 3);
}

#[test]
fn test_undeclared_reference_rejected_before_writing() {
    let mut conn = setup_db();
    let err = import_fixture(&fixture_path("bad_reference.yaml"), &mut conn).unwrap_err();

    assert_eq!(err.code(), "ERR_INVALID_INPUT");
    assert!(err.message().contains("ghost"));
    assert_eq!(SqliteRepo::count_rows(&conn, "twitter_users").unwrap(), 0);
}

#[test]
fn test_unsupported_schema_version() {
    let mut conn = setup_db();
    let err = import_fixture_str("schema_version: 1\n", &mut conn).unwrap_err();
    assert!(err.message().contains("schema_version"));
}

#[test]
fn test_duplicate_twitter_names_rejected() {
    let mut conn = setup_db();
    let err = import_fixture_str("schema_version: 0\ntwitter_users: [kim, kim]\n", &mut conn)
        .unwrap_err();
    assert!(err.message().contains("Duplicate"));
}

#[test]
fn test_invalid_name_rolls_back_whole_import() {
    let mut conn = setup_db();
    let long_name = "x".repeat(51);
    let yaml = format!(
        "schema_version: 0\nmanufacturers:\n  - name: Kia\ntwitter_users: [ok, {}]\n",
        long_name
    );

    let err = import_fixture_str(&yaml, &mut conn).unwrap_err();

    assert_eq!(err.code(), "ERR_INVALID_FIELD");
    assert_eq!(SqliteRepo::count_rows(&conn, "manufacturers").unwrap(), 0);
    assert_eq!(SqliteRepo::count_rows(&conn, "twitter_users").unwrap(), 0);
}
