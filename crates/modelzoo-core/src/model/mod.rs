//! Model definitions, one module per relational-modeling pattern

pub mod abstract_base;
pub mod foreignkey;
pub mod inheritance;
pub mod social;

pub use abstract_base::{CommonInfo, PhotoPost, Post, PostBase, RelatedUser, Student, TextPost};
pub use foreignkey::{Car, FcUser, Manufacturer};
pub use inheritance::{OrderedPerson, Person, Place, Restaurant};
pub use social::{Relation, RelationType, TwitterUser};
