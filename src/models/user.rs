//! Diesel models representing stored users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, UserEmail, UserId, UserName};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`]. Timestamps are filled in by the database.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(user.id)?,
            name: UserName::new(user.name)?,
            email: UserEmail::new(user.email)?,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            password: user.password.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::HashedPassword;

    #[test]
    fn from_domain_new_user() {
        let domain = DomainNewUser::new(
            UserName::new("Ann").expect("valid name"),
            UserEmail::new("ann@example.com").expect("valid email"),
            HashedPassword::new("$argon2id$hash").expect("valid hash"),
        );
        let new: NewUser = (&domain).into();
        assert_eq!(new.name, "Ann");
        assert_eq!(new.email, "ann@example.com");
        assert_eq!(new.password, "$argon2id$hash");
    }

    #[test]
    fn user_into_domain_drops_password() {
        let now = Utc::now().naive_utc();
        let db = User {
            id: 5,
            name: "Bob".into(),
            email: "Bob@Example.com".into(),
            password: "$argon2id$hash".into(),
            created_at: now,
            updated_at: now,
        };
        let domain = DomainUser::try_from(db).expect("valid user");
        assert_eq!(domain.id.get(), 5);
        assert_eq!(domain.name.as_str(), "Bob");
        assert_eq!(domain.email.as_str(), "bob@example.com");
        assert_eq!(domain.created_at, now);
    }

    #[test]
    fn user_with_invalid_id_is_rejected() {
        let now = Utc::now().naive_utc();
        let db = User {
            id: 0,
            name: "Bob".into(),
            email: "bob@example.com".into(),
            password: "x".into(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            DomainUser::try_from(db),
            Err(TypeConstraintError::NonPositiveId)
        );
    }
}
