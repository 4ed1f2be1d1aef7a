//! Services behind the users listing and creation routes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;

use crate::domain::types::{HashedPassword, UserId};
use crate::domain::user::{NewUser, User, UserSummary};
use crate::dto::users::{UserFilters, UsersPageData, UsersQuery};
use crate::forms::users::{CreateUserForm, CreateUserPayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{UserListQuery, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Path the listing links point at.
pub const USERS_PATH: &str = "/users";

/// Loads one page of users, optionally filtered by a name substring.
///
/// Pages past the end yield an empty item list. Every pagination link in
/// the result carries the active search term.
pub fn list_users<R>(repo: &R, query: &UsersQuery) -> ServiceResult<UsersPageData>
where
    R: UserReader + ?Sized,
{
    let page = query.page_number();
    let search = query.search_term();

    let mut list_query = UserListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = &search {
        list_query = list_query.search(term.clone());
    }

    let (total, users) = repo.list_users(list_query).map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;

    let filters = UserFilters { search };
    let users = Paginated::new(users, page, total, DEFAULT_ITEMS_PER_PAGE)
        .map(UserSummary::from)
        .with_links(USERS_PATH, &filters)
        .map_err(|err| ServiceError::Internal(format!("failed to build page links: {err}")))?;

    Ok(UsersPageData { users, filters })
}

/// Validates the form, hashes the password and persists the user.
///
/// Email uniqueness is not checked.
pub fn create_user<R>(repo: &R, form: CreateUserForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let payload = CreateUserPayload::try_from(form)?;

    let password = hash_password(&payload.password)?;
    let new_user = NewUser::new(payload.name, payload.email, password);

    let user = repo.create_user(&new_user).map_err(|err| {
        log::error!("Failed to create user: {err}");
        err
    })?;

    log::info!("Created user {}", user.id);

    Ok(user)
}

/// Resolves the user behind a session identity. Unknown or malformed
/// identifiers are treated as anonymous.
pub fn load_actor<R>(repo: &R, actor_id: Option<&str>) -> ServiceResult<Option<User>>
where
    R: UserReader + ?Sized,
{
    let Some(raw) = actor_id else {
        return Ok(None);
    };

    let Some(id) = raw.parse::<i32>().ok().and_then(|id| UserId::new(id).ok()) else {
        log::warn!("Ignoring malformed identity {raw:?}");
        return Ok(None);
    };

    Ok(repo.get_user_by_id(id)?)
}

/// Hashes `plain` with Argon2id and a random salt.
pub fn hash_password(plain: &str) -> ServiceResult<HashedPassword> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|err| ServiceError::Internal(format!("failed to hash password: {err}")))?
        .to_string();
    Ok(HashedPassword::new(hash)?)
}
