pub mod db;
pub mod fixture;
pub mod social;
pub mod user;
