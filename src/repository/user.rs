//! Repository implementation for users.

use diesel::prelude::*;

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserListQuery, UserReader, UserWriter};

/// Escape character used in `LIKE` patterns built from user input.
const LIKE_ESCAPE: char = '\\';

/// Builds a `%term%` pattern where `%`, `_` and the escape character itself
/// match literally.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::id.eq(id.get()))
            .select(DbUser::as_select())
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user
            .map(|user| User::try_from(user).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let pattern = query
            .search
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(like_pattern);

        let mut count_query = users::table.into_boxed();
        let mut items_query = users::table.into_boxed();

        // SQLite's LIKE is case-insensitive for ASCII.
        if let Some(pattern) = &pattern {
            count_query =
                count_query.filter(users::name.like(pattern.clone()).escape(LIKE_ESCAPE));
            items_query =
                items_query.filter(users::name.like(pattern.clone()).escape(LIKE_ESCAPE));
        }

        let total: i64 = count_query.count().get_result(&mut conn)?;

        let total = usize::try_from(total).unwrap_or_default();

        items_query = items_query.order(users::id.asc());
        if let Some(pagination) = &query.pagination {
            let (Some(offset), Ok(limit)) =
                (pagination.offset(), i64::try_from(pagination.per_page))
            else {
                return Ok((total, Vec::new()));
            };
            items_query = items_query.offset(offset).limit(limit);
        }

        let users = items_query
            .select(DbUser::as_select())
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(|user| User::try_from(user).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<User>>>()?;

        Ok((total, users))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let db_new_user: DbNewUser = new_user.into();

        let db_user = diesel::insert_into(users::table)
            .values(&db_new_user)
            .returning(DbUser::as_returning())
            .get_result::<DbUser>(&mut conn)?;

        Ok(User::try_from(db_user)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("ann"), "%ann%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
