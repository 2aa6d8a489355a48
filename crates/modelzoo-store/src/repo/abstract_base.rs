//! Abstract base models: students, related users and the two post tables
//!
//! The abstract bases have no tables; their columns are written into each
//! concrete table directly.

#![allow(clippy::result_large_err)]

use chrono::{DateTime, Utc};
use modelzoo_core::model::{
    CommonInfo, PhotoPost, Post, PostBase, RelatedUser, Student, TextPost,
};
use rusqlite::{Connection, OptionalExtension, Row};

use super::sqlite_repo::{millis_at, not_found, to_millis, truncate_millis, SqliteRepo};
use crate::errors::{from_rusqlite, Result};

fn map_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student::new(
        row.get(0)?,
        CommonInfo::new(row.get::<_, String>(1)?, row.get(2)?),
        row.get::<_, String>(3)?,
    ))
}

fn map_photo_post(row: &Row<'_>) -> rusqlite::Result<PhotoPost> {
    Ok(PhotoPost {
        id: row.get(0)?,
        base: PostBase::new(row.get(1)?, millis_at(row, 2)?),
        photo_url: row.get(3)?,
    })
}

fn map_text_post(row: &Row<'_>) -> rusqlite::Result<TextPost> {
    Ok(TextPost {
        id: row.get(0)?,
        base: PostBase::new(row.get(1)?, millis_at(row, 2)?),
        text: row.get(3)?,
    })
}

impl SqliteRepo {
    /// Insert a student; `info` is the inherited `CommonInfo` part
    pub fn create_student(
        conn: &Connection,
        info: CommonInfo,
        home_group: &str,
    ) -> Result<Student> {
        let mut student = Student::new(0, info, home_group);
        student.validate()?;

        conn.execute(
            "INSERT INTO students (name, age, home_group) VALUES (?1, ?2, ?3)",
            rusqlite::params![student.info.name, student.info.age, student.home_group],
        )
        .map_err(from_rusqlite)?;
        student.id = conn.last_insert_rowid();

        tracing::debug!(student_id = student.id, "created student");
        Ok(student)
    }

    pub fn get_student(conn: &Connection, id: i64) -> Result<Student> {
        conn.query_row(
            "SELECT id, name, age, home_group FROM students WHERE id = ?1",
            [id],
            map_student,
        )
        .optional()
        .map_err(from_rusqlite)?
        .ok_or_else(|| not_found("Student", id))
    }

    /// All students in the inherited default ordering (by name)
    pub fn list_students(conn: &Connection) -> Result<Vec<Student>> {
        let mut stmt = conn
            .prepare("SELECT id, name, age, home_group FROM students ORDER BY name, id")
            .map_err(from_rusqlite)?;
        let students = stmt
            .query_map([], map_student)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(students)
    }

    pub fn create_related_user(conn: &Connection, name: &str) -> Result<RelatedUser> {
        RelatedUser::validate_name(name)?;

        conn.execute("INSERT INTO related_users (name) VALUES (?1)", [name])
            .map_err(from_rusqlite)?;
        Ok(RelatedUser::new(conn.last_insert_rowid(), name))
    }

    pub fn get_related_user(conn: &Connection, id: i64) -> Result<RelatedUser> {
        conn.query_row(
            "SELECT id, name FROM related_users WHERE id = ?1",
            [id],
            |row| Ok(RelatedUser::new(row.get(0)?, row.get::<_, String>(1)?)),
        )
        .optional()
        .map_err(from_rusqlite)?
        .ok_or_else(|| not_found("RelatedUser", id))
    }

    /// Delete an author; their photo and text posts go with them
    pub fn delete_related_user(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM related_users WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        if deleted == 0 {
            return Err(not_found("RelatedUser", id));
        }
        Ok(())
    }

    pub fn create_photo_post(
        conn: &Connection,
        author_id: i64,
        photo_url: &str,
        at: DateTime<Utc>,
    ) -> Result<PhotoPost> {
        PhotoPost::validate_photo_url(photo_url)?;
        Self::get_related_user(conn, author_id)?;

        let created_at = truncate_millis(at);
        conn.execute(
            "INSERT INTO photo_posts (author_id, created_at, photo_url) VALUES (?1, ?2, ?3)",
            rusqlite::params![author_id, to_millis(created_at), photo_url],
        )
        .map_err(from_rusqlite)?;

        Ok(PhotoPost {
            id: conn.last_insert_rowid(),
            base: PostBase::new(author_id, created_at),
            photo_url: photo_url.to_string(),
        })
    }

    pub fn create_text_post(
        conn: &Connection,
        author_id: i64,
        text: &str,
        at: DateTime<Utc>,
    ) -> Result<TextPost> {
        Self::get_related_user(conn, author_id)?;

        let created_at = truncate_millis(at);
        conn.execute(
            "INSERT INTO text_posts (author_id, created_at, text) VALUES (?1, ?2, ?3)",
            rusqlite::params![author_id, to_millis(created_at), text],
        )
        .map_err(from_rusqlite)?;

        Ok(TextPost {
            id: conn.last_insert_rowid(),
            base: PostBase::new(author_id, created_at),
            text: text.to_string(),
        })
    }

    /// Reverse accessor: photo posts of an author, oldest first
    pub fn photo_posts_by(conn: &Connection, author_id: i64) -> Result<Vec<PhotoPost>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, author_id, created_at, photo_url FROM photo_posts
                 WHERE author_id = ?1 ORDER BY created_at, id",
            )
            .map_err(from_rusqlite)?;
        let posts = stmt
            .query_map([author_id], map_photo_post)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(posts)
    }

    /// Reverse accessor: text posts of an author, oldest first
    pub fn text_posts_by(conn: &Connection, author_id: i64) -> Result<Vec<TextPost>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, author_id, created_at, text FROM text_posts
                 WHERE author_id = ?1 ORDER BY created_at, id",
            )
            .map_err(from_rusqlite)?;
        let posts = stmt
            .query_map([author_id], map_text_post)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(posts)
    }

    /// `Post: (Author: <name>)` for any concrete post type
    pub fn post_label<P: Post>(conn: &Connection, post: &P) -> Result<String> {
        let author = Self::get_related_user(conn, post.author_id())?;
        Ok(post.label(&author)?)
    }
}
