mod common;

use common::{create_users, setup_db};
use modelzoo_core::errors::ExErrorKind;
use modelzoo_core::model::RelationType;
use modelzoo_engine::commands::social::{self, SocialView};
use modelzoo_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

fn ids(result: EngineCommandResult) -> Vec<i64> {
    match result {
        EngineCommandResult::Users(users) => users.iter().map(|u| u.id).collect(),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_follow_command_reports_creation_once() {
    let mut conn = setup_db();
    let u = create_users(&mut conn, &["a", "b"]);

    let first = social::follow(u[0], u[1], &mut conn).unwrap();
    let second = social::follow(u[0], u[1], &mut conn).unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.relation, second.relation);
}

#[test]
fn test_block_command_converts_follow() {
    let mut conn = setup_db();
    let u = create_users(&mut conn, &["a", "b"]);

    let followed = social::follow(u[0], u[1], &mut conn).unwrap();
    let blocked = social::block(u[0], u[1], &mut conn).unwrap();

    assert_eq!(blocked.id, followed.relation.id);
    assert_eq!(blocked.relation_type, RelationType::Block);
    assert!(blocked.updated_at >= followed.relation.created_at);
    assert!(social::following(u[0], &conn).unwrap().is_empty());
    assert_eq!(social::block_list(u[0], &conn).unwrap()[0].id, u[1]);
}

#[test]
fn test_views_through_engine_command() {
    let mut conn = setup_db();
    let u = create_users(&mut conn, &["a", "b", "c"]);
    for (actor, target) in [(u[0], u[2]), (u[1], u[2])] {
        apply_engine_command(
            EngineCommand::Follow {
                actor_id: actor,
                target_id: target,
            },
            &mut conn,
        )
        .unwrap();
    }
    apply_engine_command(
        EngineCommand::Block {
            actor_id: u[0],
            target_id: u[1],
        },
        &mut conn,
    )
    .unwrap();

    let read = |view, user_id, conn: &mut rusqlite::Connection| {
        ids(apply_engine_command(EngineCommand::View { view, user_id }, conn).unwrap())
    };

    assert_eq!(read(SocialView::Followers, u[2], &mut conn), vec![u[0], u[1]]);
    assert_eq!(read(SocialView::Following, u[0], &mut conn), vec![u[2]]);
    assert_eq!(read(SocialView::BlockList, u[0], &mut conn), vec![u[1]]);
    assert_eq!(
        read(SocialView::RelationUsers, u[0], &mut conn),
        vec![u[2], u[1]]
    );
}

#[test]
fn test_errors_carry_op_and_request_id() {
    let mut conn = setup_db();
    let u = create_users(&mut conn, &["a"]);

    let err = social::follow(u[0], 99, &mut conn).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("follow"));
    assert_eq!(err.entity_id(), Some("99"));
    assert!(err.request_id().is_some());
}

#[test]
fn test_self_block_rejected_without_writing() {
    let mut conn = setup_db();
    let u = create_users(&mut conn, &["a"]);

    let err = social::block(u[0], u[0], &mut conn).unwrap_err();

    assert_eq!(err.code(), "ERR_SELF_RELATION");
    assert_eq!(
        modelzoo_store::SqliteRepo::count_rows(&conn, "relations").unwrap(),
        0
    );
}

#[test]
fn test_user_create_validates_name() {
    let mut conn = setup_db();
    let err = apply_engine_command(
        EngineCommand::UserCreate {
            name: "n".repeat(51),
        },
        &mut conn,
    )
    .unwrap_err();

    assert_eq!(err.code(), "ERR_INVALID_FIELD");
    assert_eq!(err.op(), Some("user_create"));
}

#[test]
fn test_view_of_missing_user() {
    let conn = setup_db();
    let err = social::followers(5, &conn).unwrap_err();
    assert_eq!(err.code(), "ERR_NOT_FOUND");
    assert_eq!(err.op(), Some("followers"));
}

#[test]
fn test_user_list_in_creation_order() {
    let mut conn = setup_db();
    let u = create_users(&mut conn, &["zed", "amy"]);

    let listed = ids(apply_engine_command(EngineCommand::UserList, &mut conn).unwrap());

    assert_eq!(listed, u);
}
