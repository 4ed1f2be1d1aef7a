//! Props for the static pages.

use crate::dto::pages::{HomePageData, SettingsPageData};
use crate::models::config::ServerConfig;

/// Greeting and framework list shown on the home page.
pub fn load_home_page(config: &ServerConfig) -> HomePageData {
    HomePageData {
        name: config.app_name.clone(),
        frameworks: config.frameworks.clone(),
    }
}

pub fn load_settings_page(config: &ServerConfig) -> SettingsPageData {
    SettingsPageData {
        app_name: config.app_name.clone(),
    }
}
