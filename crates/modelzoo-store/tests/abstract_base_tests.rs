mod common;

use chrono::{Duration, Utc};
use common::{names, setup_db};
use modelzoo_core::model::CommonInfo;
use modelzoo_store::SqliteRepo;

#[test]
fn test_students_listed_by_inherited_name_ordering() {
    let conn = setup_db();
    SqliteRepo::create_student(&conn, CommonInfo::new("Park", 14), "C3").unwrap();
    SqliteRepo::create_student(&conn, CommonInfo::new("Choi", 15), "A1").unwrap();
    SqliteRepo::create_student(&conn, CommonInfo::new("Kim", 13), "B2").unwrap();

    let students = SqliteRepo::list_students(&conn).unwrap();

    assert_eq!(
        names(&students, |s| s.info.name.as_str()),
        vec!["Choi", "Kim", "Park"]
    );
}

#[test]
fn test_student_round_trips_inherited_fields() {
    let conn = setup_db();
    let created =
        SqliteRepo::create_student(&conn, CommonInfo::new("Lee", 16), "D4").unwrap();

    let loaded = SqliteRepo::get_student(&conn, created.id).unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.info.age, 16);
}

#[test]
fn test_student_home_group_limit() {
    let conn = setup_db();
    let err = SqliteRepo::create_student(&conn, CommonInfo::new("Lee", 16), "ABCDEF")
        .unwrap_err();

    assert_eq!(err.code(), "ERR_INVALID_FIELD");
    assert_eq!(SqliteRepo::count_rows(&conn, "students").unwrap(), 0);
}

#[test]
fn test_posts_have_independent_tables_per_child() {
    let conn = setup_db();
    let author = SqliteRepo::create_related_user(&conn, "lhy").unwrap();
    let t0 = Utc::now();

    SqliteRepo::create_photo_post(&conn, author.id, "http://img/1.png", t0).unwrap();
    SqliteRepo::create_text_post(&conn, author.id, "hello", t0).unwrap();
    SqliteRepo::create_text_post(&conn, author.id, "again", t0 + Duration::seconds(1))
        .unwrap();

    assert_eq!(SqliteRepo::photo_posts_by(&conn, author.id).unwrap().len(), 1);
    let texts = SqliteRepo::text_posts_by(&conn, author.id).unwrap();
    assert_eq!(names(&texts, |p| p.text.as_str()), vec!["hello", "again"]);
}

#[test]
fn test_post_label_names_the_author() {
    let conn = setup_db();
    let author = SqliteRepo::create_related_user(&conn, "lhy").unwrap();
    let post = SqliteRepo::create_photo_post(&conn, author.id, "", Utc::now()).unwrap();

    assert_eq!(
        SqliteRepo::post_label(&conn, &post).unwrap(),
        "Post: (Author: lhy)"
    );
}

#[test]
fn test_post_requires_existing_author() {
    let conn = setup_db();
    let err = SqliteRepo::create_text_post(&conn, 42, "orphan", Utc::now()).unwrap_err();

    assert_eq!(err.code(), "ERR_NOT_FOUND");
}

#[test]
fn test_deleting_author_cascades_to_posts() {
    let conn = setup_db();
    let author = SqliteRepo::create_related_user(&conn, "lhy").unwrap();
    let other = SqliteRepo::create_related_user(&conn, "other").unwrap();
    SqliteRepo::create_photo_post(&conn, author.id, "", Utc::now()).unwrap();
    SqliteRepo::create_text_post(&conn, author.id, "bye", Utc::now()).unwrap();
    SqliteRepo::create_text_post(&conn, other.id, "stays", Utc::now()).unwrap();

    SqliteRepo::delete_related_user(&conn, author.id).unwrap();

    assert_eq!(SqliteRepo::count_rows(&conn, "photo_posts").unwrap(), 0);
    assert_eq!(SqliteRepo::count_rows(&conn, "text_posts").unwrap(), 1);
}
