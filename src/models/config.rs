//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Seconds a connection waits on a locked SQLite database.
    #[serde(default = "default_busy_timeout")]
    pub database_busy_timeout: u64,
    pub templates_dir: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    pub secret: String,
    /// Version string of the front-end bundle, compared against the
    /// `X-Inertia-Version` header of client-side navigations.
    #[serde(default)]
    pub asset_version: String,
    pub app_name: String,
    #[serde(default)]
    pub frameworks: Vec<String>,
    /// Emails allowed to create users according to the user policy.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

fn default_busy_timeout() -> u64 {
    30
}

fn default_assets_dir() -> String {
    "./assets".to_string()
}
