use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{HashedPassword, UserEmail, UserId, UserName};

/// A stored user. The password hash stays in storage and is never loaded
/// into this type.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: UserEmail,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to persist a new user.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: UserName,
    pub email: UserEmail,
    pub password: HashedPassword,
}

impl NewUser {
    #[must_use]
    pub fn new(name: UserName, email: UserEmail, password: HashedPassword) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Listing projection of a [`User`]: only `id` and `name` leave the service.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: UserName,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}
