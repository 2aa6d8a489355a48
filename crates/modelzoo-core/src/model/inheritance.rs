//! Multi-table inheritance and proxy models
//!
//! Multi-table: `Place` and `Restaurant` both have tables. A restaurant row
//! holds only its own columns and shares its primary key with the place row
//! it extends.
//!
//! Proxy: `OrderedPerson` has no table of its own. It reads and writes the
//! `persons` table and changes only behaviour (default ordering, display).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::rules::validate_required;

pub const PLACE_NAME_MAX: usize = 50;
pub const PLACE_ADDRESS_MAX: usize = 80;
pub const PERSON_NAME_MAX: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub address: String,
}

impl Place {
    pub fn new(id: i64, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
        }
    }

    /// # Errors
    /// `InvalidField` for a blank or over-long name or address.
    pub fn validate(&self) -> Result<()> {
        validate_required("place.name", &self.name, PLACE_NAME_MAX)?;
        validate_required("place.address", &self.address, PLACE_ADDRESS_MAX)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} the place", self.name)
    }
}

/// Child of `Place`; `place.id` is also the restaurant's primary key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub place: Place,
    pub serves_hot_dogs: bool,
    pub serves_pizza: bool,
}

impl Restaurant {
    pub fn new(place: Place, serves_hot_dogs: bool, serves_pizza: bool) -> Self {
        Self {
            place,
            serves_hot_dogs,
            serves_pizza,
        }
    }

    pub fn id(&self) -> i64 {
        self.place.id
    }

    /// View of the parent row
    pub fn as_place(&self) -> &Place {
        &self.place
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} the restaurant", self.place.name)
    }
}

/// Concrete model with its own table, unordered by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// # Errors
    /// `InvalidField` for a blank or over-long first or last name.
    pub fn validate(&self) -> Result<()> {
        validate_required("person.first_name", &self.first_name, PERSON_NAME_MAX)?;
        validate_required("person.last_name", &self.last_name, PERSON_NAME_MAX)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Proxy over `Person`: same row, ordered by last name then first name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedPerson(pub Person);

impl OrderedPerson {
    pub fn person(&self) -> &Person {
        &self.0
    }

    pub fn into_person(self) -> Person {
        self.0
    }

    /// `Last, First`
    pub fn sort_name(&self) -> String {
        format!("{}, {}", self.0.last_name, self.0.first_name)
    }
}

impl From<Person> for OrderedPerson {
    fn from(person: Person) -> Self {
        OrderedPerson(person)
    }
}

impl Ord for OrderedPerson {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .last_name
            .cmp(&other.0.last_name)
            .then_with(|| self.0.first_name.cmp(&other.0.first_name))
            .then_with(|| self.0.id.cmp(&other.0.id))
    }
}

impl PartialOrd for OrderedPerson {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OrderedPerson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sort_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_person_sorts_by_last_then_first() {
        let mut people: Vec<OrderedPerson> = vec![
            Person::new(1, "Yuna", "Kim").into(),
            Person::new(2, "Alan", "Turing").into(),
            Person::new(3, "Ada", "Kim").into(),
        ];
        people.sort();

        let names: Vec<String> = people.iter().map(|p| p.sort_name()).collect();
        assert_eq!(names, vec!["Kim, Ada", "Kim, Yuna", "Turing, Alan"]);
    }

    #[test]
    fn test_restaurant_shares_place_id() {
        let restaurant = Restaurant::new(Place::new(4, "Bob's", "1 Main St"), true, false);
        assert_eq!(restaurant.id(), 4);
        assert_eq!(restaurant.as_place().to_string(), "Bob's the place");
        assert_eq!(restaurant.to_string(), "Bob's the restaurant");
    }

    #[test]
    fn test_place_requires_address() {
        assert!(Place::new(0, "Nowhere", " ").validate().is_err());
    }
}
