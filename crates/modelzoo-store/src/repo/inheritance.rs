//! Multi-table inheritance (places/restaurants) and the OrderedPerson proxy

#![allow(clippy::result_large_err)]

use modelzoo_core::model::{OrderedPerson, Person, Place, Restaurant};
use rusqlite::{Connection, OptionalExtension, Row};

use super::sqlite_repo::{not_found, SqliteRepo};
use crate::errors::{from_rusqlite, Result};

const RESTAURANT_SELECT: &str =
    "SELECT p.id, p.name, p.address, r.serves_hot_dogs, r.serves_pizza
     FROM restaurants r JOIN places p ON p.id = r.place_id";

fn map_place(row: &Row<'_>) -> rusqlite::Result<Place> {
    Ok(Place::new(
        row.get(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
    ))
}

fn map_restaurant(row: &Row<'_>) -> rusqlite::Result<Restaurant> {
    Ok(Restaurant::new(map_place(row)?, row.get(3)?, row.get(4)?))
}

fn map_person(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person::new(
        row.get(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
    ))
}

impl SqliteRepo {
    pub fn create_place(conn: &Connection, name: &str, address: &str) -> Result<Place> {
        let mut place = Place::new(0, name, address);
        place.validate()?;

        conn.execute(
            "INSERT INTO places (name, address) VALUES (?1, ?2)",
            rusqlite::params![place.name, place.address],
        )
        .map_err(from_rusqlite)?;
        place.id = conn.last_insert_rowid();
        Ok(place)
    }

    pub fn get_place(conn: &Connection, id: i64) -> Result<Place> {
        conn.query_row(
            "SELECT id, name, address FROM places WHERE id = ?1",
            [id],
            map_place,
        )
        .optional()
        .map_err(from_rusqlite)?
        .ok_or_else(|| not_found("Place", id))
    }

    /// Every place, restaurants included, in id order
    pub fn list_places(conn: &Connection) -> Result<Vec<Place>> {
        let mut stmt = conn
            .prepare("SELECT id, name, address FROM places ORDER BY id")
            .map_err(from_rusqlite)?;
        let places = stmt
            .query_map([], map_place)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(places)
    }

    /// Insert the parent place row and the restaurant row atomically
    pub fn create_restaurant(
        conn: &mut Connection,
        name: &str,
        address: &str,
        serves_hot_dogs: bool,
        serves_pizza: bool,
    ) -> Result<Restaurant> {
        let tx = conn.transaction().map_err(from_rusqlite)?;

        let place = Self::create_place(&tx, name, address)?;
        tx.execute(
            "INSERT INTO restaurants (place_id, serves_hot_dogs, serves_pizza) VALUES (?1, ?2, ?3)",
            rusqlite::params![place.id, serves_hot_dogs, serves_pizza],
        )
        .map_err(from_rusqlite)?;

        tx.commit().map_err(from_rusqlite)?;
        tracing::debug!(place_id = place.id, "created restaurant");

        Ok(Restaurant::new(place, serves_hot_dogs, serves_pizza))
    }

    /// Narrow a place to its restaurant child, if it has one
    ///
    /// `Ok(None)` for a plain place; `NotFound` if the place itself is missing.
    pub fn restaurant_from_place(conn: &Connection, place_id: i64) -> Result<Option<Restaurant>> {
        let restaurant = conn
            .query_row(
                &format!("{} WHERE r.place_id = ?1", RESTAURANT_SELECT),
                [place_id],
                map_restaurant,
            )
            .optional()
            .map_err(from_rusqlite)?;

        if restaurant.is_none() && !Self::exists(conn, "places", place_id)? {
            return Err(not_found("Place", place_id));
        }
        Ok(restaurant)
    }

    pub fn list_restaurants(conn: &Connection) -> Result<Vec<Restaurant>> {
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY p.id", RESTAURANT_SELECT))
            .map_err(from_rusqlite)?;
        let restaurants = stmt
            .query_map([], map_restaurant)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(restaurants)
    }

    /// Delete a place; a restaurant extending it goes with it
    pub fn delete_place(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn
            .execute("DELETE FROM places WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        if deleted == 0 {
            return Err(not_found("Place", id));
        }
        Ok(())
    }

    pub fn create_person(conn: &Connection, first_name: &str, last_name: &str) -> Result<Person> {
        let mut person = Person::new(0, first_name, last_name);
        person.validate()?;

        conn.execute(
            "INSERT INTO persons (first_name, last_name) VALUES (?1, ?2)",
            rusqlite::params![person.first_name, person.last_name],
        )
        .map_err(from_rusqlite)?;
        person.id = conn.last_insert_rowid();
        Ok(person)
    }

    /// Create through the proxy; the row lands in `persons` like any other
    pub fn create_ordered_person(
        conn: &Connection,
        first_name: &str,
        last_name: &str,
    ) -> Result<OrderedPerson> {
        Self::create_person(conn, first_name, last_name).map(OrderedPerson::from)
    }

    /// Persons in insertion order; the concrete model declares no ordering
    pub fn list_persons(conn: &Connection) -> Result<Vec<Person>> {
        let mut stmt = conn
            .prepare("SELECT id, first_name, last_name FROM persons ORDER BY id")
            .map_err(from_rusqlite)?;
        let persons = stmt
            .query_map([], map_person)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(persons)
    }

    /// The same `persons` rows through the proxy, ordered by last then
    /// first name
    pub fn list_ordered_persons(conn: &Connection) -> Result<Vec<OrderedPerson>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, first_name, last_name FROM persons
                 ORDER BY last_name, first_name, id",
            )
            .map_err(from_rusqlite)?;
        let persons = stmt
            .query_map([], |row| map_person(row).map(OrderedPerson::from))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(persons)
    }
}
