//! Authorization rules for user management.
//!
//! Nothing in the HTTP surface enforces these checks yet; they feed the
//! `can` flags shown to the front-end.

use serde::Serialize;

use crate::domain::types::UserEmail;
use crate::domain::user::User;

/// Allow-list based policy.
///
/// * create: the actor's email is in the configured admin list.
/// * edit: the actor edits their own record, or is an admin.
#[derive(Debug, Clone, Default)]
pub struct UserPolicy {
    admin_emails: Vec<UserEmail>,
}

impl UserPolicy {
    /// Builds the policy, skipping (and logging) entries that are not valid
    /// email addresses.
    pub fn new<I, S>(admin_emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let admin_emails = admin_emails
            .into_iter()
            .filter_map(|email| match UserEmail::new(email.as_ref()) {
                Ok(email) => Some(email),
                Err(err) => {
                    log::warn!("Ignoring admin email {:?}: {err}", email.as_ref());
                    None
                }
            })
            .collect();
        Self { admin_emails }
    }

    fn is_admin(&self, actor: &User) -> bool {
        self.admin_emails.contains(&actor.email)
    }

    pub fn can_create(&self, actor: &User) -> bool {
        self.is_admin(actor)
    }

    pub fn can_edit(&self, actor: &User, target: &User) -> bool {
        actor.id == target.id || self.is_admin(actor)
    }

    /// Flags for the optional current actor; anonymous visitors get nothing.
    pub fn abilities(&self, actor: Option<&User>) -> UserAbilities {
        UserAbilities {
            create_user: actor.is_some_and(|actor| self.can_create(actor)),
        }
    }
}

/// Permissions exposed to the listing page.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct UserAbilities {
    pub create_user: bool,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{UserId, UserName};

    fn user(id: i32, email: &str) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: UserId::new(id).expect("valid id"),
            name: UserName::new("Someone").expect("valid name"),
            email: UserEmail::new(email).expect("valid email"),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn only_admins_can_create() {
        let policy = UserPolicy::new(["Admin@Example.com", "not an email"]);
        assert!(policy.can_create(&user(1, "admin@example.com")));
        assert!(!policy.can_create(&user(2, "guest@example.com")));
    }

    #[test]
    fn edit_is_deterministic() {
        let policy = UserPolicy::new(["admin@example.com"]);
        let admin = user(1, "admin@example.com");
        let ann = user(2, "ann@example.com");
        let bob = user(3, "bob@example.com");

        for _ in 0..10 {
            assert!(policy.can_edit(&ann, &ann));
            assert!(policy.can_edit(&admin, &ann));
            assert!(!policy.can_edit(&bob, &ann));
        }
    }

    #[test]
    fn anonymous_actor_has_no_abilities() {
        let policy = UserPolicy::new(["admin@example.com"]);
        assert_eq!(policy.abilities(None), UserAbilities::default());
        assert!(
            policy
                .abilities(Some(&user(1, "admin@example.com")))
                .create_user
        );
    }
}
