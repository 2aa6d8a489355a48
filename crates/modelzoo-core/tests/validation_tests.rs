mod common;

use chrono::{Duration, Utc};
use common::store_with_users;
use modelzoo_core::model::{Car, CommonInfo, FcUser, Person, Place, Student};
use modelzoo_core::ops::relation_ops::{block, follow};
use modelzoo_core::rules::validation;
use modelzoo_core::{ModelError, RelationLedger, RelationType, Store};

// ===== FIELD VALIDATION =====

#[test]
fn test_every_name_field_rejects_blank() {
    assert!(Car::validate_name("  ").is_err());
    assert!(FcUser::validate_name("").is_err());
    assert!(Person::new(0, "", "Kim").validate().is_err());
    assert!(Place::new(0, "", "addr").validate().is_err());
    assert!(Student::new(0, CommonInfo::new("\t", 10), "A").validate().is_err());
}

#[test]
fn test_common_info_name_limit_is_100() {
    let ok = CommonInfo::new("n".repeat(100), 20);
    let too_long = CommonInfo::new("n".repeat(101), 20);

    assert!(ok.validate().is_ok());
    match too_long.validate().unwrap_err() {
        ModelError::InvalidField { field, reason } => {
            assert_eq!(field, "common_info.name");
            assert!(reason.contains("101"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// ===== GRAPH VALIDATION =====

#[test]
fn test_validate_graph_succeeds_on_empty_store() {
    assert!(validation::validate_graph(&Store::new()).is_ok());
}

#[test]
fn test_validate_graph_succeeds_after_mixed_operations() {
    let (mut store, ids) = store_with_users(&["a", "b", "c"]);
    follow(&mut store, ids[0], ids[1]).unwrap();
    follow(&mut store, ids[1], ids[0]).unwrap();
    block(&mut store, ids[0], ids[1]).unwrap();
    block(&mut store, ids[2], ids[0]).unwrap();

    assert!(validation::validate_graph(&store).is_ok());
}

#[test]
fn test_validate_graph_after_cascade_delete() {
    let (mut store, ids) = store_with_users(&["a", "b"]);
    follow(&mut store, ids[0], ids[1]).unwrap();
    store.delete_user(ids[1]).unwrap();

    assert!(validation::validate_graph(&store).is_ok());
    assert_eq!(store.relation_count(), 0);
}

#[test]
fn test_raw_insert_keeps_timestamps_consistent() {
    let (mut store, ids) = store_with_users(&["a", "b"]);
    let created = Utc::now();
    let relation = store
        .insert_relation(ids[0], ids[1], RelationType::Follow, created)
        .unwrap();
    store
        .retype_relation(relation.id, RelationType::Block, created - Duration::days(1))
        .unwrap();

    assert!(validation::validate_graph(&store).is_ok());
}
