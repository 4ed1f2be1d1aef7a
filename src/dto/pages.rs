use serde::Serialize;

/// Props of the `Home` page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HomePageData {
    pub name: String,
    pub frameworks: Vec<String>,
}

/// Props of the `Settings` page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SettingsPageData {
    pub app_name: String,
}
