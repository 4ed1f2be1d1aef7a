//! Data passed from services to the page renderer.

use serde::Serialize;

pub mod pages;
pub mod users;

/// Flash message prepared for display, `level` being a CSS alert class.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub level: &'static str,
}
