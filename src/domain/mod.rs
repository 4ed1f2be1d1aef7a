//! Domain entities and value objects for the user directory.

pub mod types;
pub mod user;
