//! Storage models and configuration structures.

pub mod config;
pub mod user;
