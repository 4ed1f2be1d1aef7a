use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod user;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows to skip; page `0` is treated as the first page.
    /// `None` when the offset does not fit in a SQL integer, which can only
    /// mean a page past the end.
    pub fn offset(&self) -> Option<i64> {
        (self.page.max(1) - 1)
            .checked_mul(self.per_page)
            .and_then(|offset| i64::try_from(offset).ok())
    }
}

/// Filters applied when listing users. Results are always ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    /// Case-insensitive substring matched against the user name.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    /// Returns the total number of matching users and the requested slice.
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

/// Diesel-backed repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_offset_starts_at_zero() {
        assert_eq!(Pagination { page: 1, per_page: 10 }.offset(), Some(0));
        assert_eq!(Pagination { page: 3, per_page: 10 }.offset(), Some(20));
        assert_eq!(Pagination { page: 0, per_page: 10 }.offset(), Some(0));
    }

    #[test]
    fn pagination_offset_out_of_sql_range_is_none() {
        let wraps_i64 = Pagination {
            page: 1_000_000_000_000_000_000,
            per_page: 10,
        };
        let overflows_usize = Pagination {
            page: usize::MAX,
            per_page: 10,
        };
        assert_eq!(wraps_i64.offset(), None);
        assert_eq!(overflows_usize.offset(), None);
    }

    #[test]
    fn list_query_builder() {
        let query = UserListQuery::new().search("ann").paginate(2, 10);
        assert_eq!(query.search.as_deref(), Some("ann"));
        assert_eq!(query.pagination, Some(Pagination { page: 2, per_page: 10 }));
    }
}
