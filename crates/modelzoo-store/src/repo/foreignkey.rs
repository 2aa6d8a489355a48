//! Foreign-key models: manufacturers/cars (cascade) and the self-referential
//! fc_users instructor link (set null)

#![allow(clippy::result_large_err)]

use modelzoo_core::model::{Car, FcUser, Manufacturer};
use rusqlite::{Connection, OptionalExtension, Row};

use super::sqlite_repo::{not_found, SqliteRepo};
use crate::errors::{from_rusqlite, Result};

fn map_manufacturer(row: &Row<'_>) -> rusqlite::Result<Manufacturer> {
    Ok(Manufacturer::new(row.get(0)?, row.get::<_, String>(1)?))
}

fn map_car(row: &Row<'_>) -> rusqlite::Result<Car> {
    Ok(Car::new(row.get(0)?, row.get(1)?, row.get::<_, String>(2)?))
}

fn map_fc_user(row: &Row<'_>) -> rusqlite::Result<FcUser> {
    Ok(FcUser::new(row.get(0)?, row.get::<_, String>(1)?, row.get(2)?))
}

impl SqliteRepo {
    pub fn create_manufacturer(conn: &Connection, name: &str) -> Result<Manufacturer> {
        Manufacturer::validate_name(name)?;

        conn.execute("INSERT INTO manufacturers (name) VALUES (?1)", [name])
            .map_err(from_rusqlite)?;
        Ok(Manufacturer::new(conn.last_insert_rowid(), name))
    }

    pub fn get_manufacturer(conn: &Connection, id: i64) -> Result<Manufacturer> {
        conn.query_row(
            "SELECT id, name FROM manufacturers WHERE id = ?1",
            [id],
            map_manufacturer,
        )
        .optional()
        .map_err(from_rusqlite)?
        .ok_or_else(|| not_found("Manufacturer", id))
    }

    /// Oldest manufacturer with this exact name
    pub fn find_manufacturer_by_name(conn: &Connection, name: &str) -> Result<Option<Manufacturer>> {
        conn.query_row(
            "SELECT id, name FROM manufacturers WHERE name = ?1 ORDER BY id LIMIT 1",
            [name],
            map_manufacturer,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn list_manufacturers(conn: &Connection) -> Result<Vec<Manufacturer>> {
        let mut stmt = conn
            .prepare("SELECT id, name FROM manufacturers ORDER BY id")
            .map_err(from_rusqlite)?;
        let manufacturers = stmt
            .query_map([], map_manufacturer)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(manufacturers)
    }

    /// Delete a manufacturer and, by cascade, all of its cars
    pub fn delete_manufacturer(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM manufacturers WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        if deleted == 0 {
            return Err(not_found("Manufacturer", id));
        }
        tracing::debug!(manufacturer_id = id, "deleted manufacturer");
        Ok(())
    }

    pub fn create_car(conn: &Connection, manufacturer_id: i64, name: &str) -> Result<Car> {
        Car::validate_name(name)?;
        Self::get_manufacturer(conn, manufacturer_id)?;

        conn.execute(
            "INSERT INTO cars (manufacturer_id, name) VALUES (?1, ?2)",
            rusqlite::params![manufacturer_id, name],
        )
        .map_err(from_rusqlite)?;
        Ok(Car::new(conn.last_insert_rowid(), manufacturer_id, name))
    }

    pub fn find_car_by_name(
        conn: &Connection,
        manufacturer_id: i64,
        name: &str,
    ) -> Result<Option<Car>> {
        conn.query_row(
            "SELECT id, manufacturer_id, name FROM cars
             WHERE manufacturer_id = ?1 AND name = ?2 ORDER BY id LIMIT 1",
            rusqlite::params![manufacturer_id, name],
            map_car,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Reverse accessor: cars of a manufacturer in id order
    pub fn cars_of(conn: &Connection, manufacturer_id: i64) -> Result<Vec<Car>> {
        let mut stmt = conn
            .prepare("SELECT id, manufacturer_id, name FROM cars WHERE manufacturer_id = ?1 ORDER BY id")
            .map_err(from_rusqlite)?;
        let cars = stmt
            .query_map([manufacturer_id], map_car)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(cars)
    }

    pub fn create_fc_user(
        conn: &Connection,
        name: &str,
        instructor_id: Option<i64>,
    ) -> Result<FcUser> {
        FcUser::validate_name(name)?;
        if let Some(instructor_id) = instructor_id {
            Self::get_fc_user(conn, instructor_id)?;
        }

        conn.execute(
            "INSERT INTO fc_users (name, instructor_id) VALUES (?1, ?2)",
            rusqlite::params![name, instructor_id],
        )
        .map_err(from_rusqlite)?;
        Ok(FcUser::new(conn.last_insert_rowid(), name, instructor_id))
    }

    pub fn get_fc_user(conn: &Connection, id: i64) -> Result<FcUser> {
        conn.query_row(
            "SELECT id, name, instructor_id FROM fc_users WHERE id = ?1",
            [id],
            map_fc_user,
        )
        .optional()
        .map_err(from_rusqlite)?
        .ok_or_else(|| not_found("FcUser", id))
    }

    pub fn find_fc_user_by_name(conn: &Connection, name: &str) -> Result<Option<FcUser>> {
        conn.query_row(
            "SELECT id, name, instructor_id FROM fc_users WHERE name = ?1 ORDER BY id LIMIT 1",
            [name],
            map_fc_user,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn list_fc_users(conn: &Connection) -> Result<Vec<FcUser>> {
        let mut stmt = conn
            .prepare("SELECT id, name, instructor_id FROM fc_users ORDER BY id")
            .map_err(from_rusqlite)?;
        let users = stmt
            .query_map([], map_fc_user)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(users)
    }

    /// Assign or clear a user's instructor
    ///
    /// A user cannot instruct themselves.
    pub fn set_instructor(
        conn: &Connection,
        user_id: i64,
        instructor_id: Option<i64>,
    ) -> Result<FcUser> {
        FcUser::validate_instructor(user_id, instructor_id)?;
        let mut user = Self::get_fc_user(conn, user_id)?;
        if let Some(instructor_id) = instructor_id {
            Self::get_fc_user(conn, instructor_id)?;
        }

        conn.execute(
            "UPDATE fc_users SET instructor_id = ?1 WHERE id = ?2",
            rusqlite::params![instructor_id, user_id],
        )
        .map_err(from_rusqlite)?;
        user.instructor_id = instructor_id;
        Ok(user)
    }

    /// Reverse accessor: users whose instructor is `instructor_id`
    pub fn students_of(conn: &Connection, instructor_id: i64) -> Result<Vec<FcUser>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, name, instructor_id FROM fc_users
                 WHERE instructor_id = ?1 ORDER BY id",
            )
            .map_err(from_rusqlite)?;
        let users = stmt
            .query_map([instructor_id], map_fc_user)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(users)
    }

    /// Delete a user; their students are left without an instructor
    pub fn delete_fc_user(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM fc_users WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        if deleted == 0 {
            return Err(not_found("FcUser", id));
        }
        Ok(())
    }
}
