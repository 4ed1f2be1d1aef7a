use serde::{Deserialize, Serialize};

use crate::domain::user::UserSummary;
use crate::dto::Alert;
use crate::forms::FieldErrors;
use crate::forms::users::OldUserInput;
use crate::pagination::Paginated;
use crate::services::policy::UserAbilities;

/// Query parameters accepted by the users listing.
///
/// `page` stays a string so that junk values fall back to the first page
/// instead of rejecting the request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UsersQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<String>,
}

impl UsersQuery {
    pub fn new(search: Option<&str>, page: Option<usize>) -> Self {
        Self {
            search: search.map(str::to_string),
            page: page.map(|page| page.to_string()),
        }
    }

    /// Trimmed search term, `None` when absent or blank.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
    }

    /// Positive page number, defaulting to `1`.
    pub fn page_number(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse::<usize>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }
}

/// Active filters echoed back so the search box and pagination links keep
/// them.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct UserFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Listing result for the users index page.
#[derive(Debug, Serialize)]
pub struct UsersPageData {
    pub users: Paginated<UserSummary>,
    pub filters: UserFilters,
}

/// Props of the `Users/Index` page.
#[derive(Debug, Serialize)]
pub struct UsersIndexProps {
    pub users: Paginated<UserSummary>,
    pub filters: UserFilters,
    pub can: UserAbilities,
    pub alerts: Vec<Alert>,
}

/// Props of the `Users/Create` page.
#[derive(Debug, Default, Serialize)]
pub struct CreateUserProps {
    pub errors: FieldErrors,
    pub old: OldUserInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_defaults_to_first_page() {
        assert_eq!(UsersQuery::default().page_number(), 1);
        assert_eq!(UsersQuery::new(None, Some(0)).page_number(), 1);
        let junk = UsersQuery {
            search: None,
            page: Some("abc".to_string()),
        };
        assert_eq!(junk.page_number(), 1);
        assert_eq!(UsersQuery::new(None, Some(4)).page_number(), 4);
    }

    #[test]
    fn blank_search_is_no_filter() {
        assert_eq!(UsersQuery::new(Some("   "), None).search_term(), None);
        assert_eq!(
            UsersQuery::new(Some("  ann "), None).search_term().as_deref(),
            Some("ann")
        );
    }

    #[test]
    fn empty_filters_serialize_to_nothing() {
        let filters = UserFilters::default();
        assert_eq!(serde_json::to_value(&filters).unwrap(), serde_json::json!({}));
    }
}
