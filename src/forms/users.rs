use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{UserEmail, UserName};
use crate::forms::{FieldErrors, FormError};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data submitted to create a user.
pub struct CreateUserForm {
    #[serde(default)]
    #[validate(length(min = 1, code = "required"))]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, code = "required"),
        email(code = "invalid_format")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, code = "required"))]
    pub password: String,
}

impl CreateUserForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Values echoed back to the form after a failed submission. The
    /// password is never echoed.
    pub fn old_input(&self) -> OldUserInput {
        OldUserInput {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Previously submitted values used to pre-fill the create form.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct OldUserInput {
    pub name: String,
    pub email: String,
}

/// Validated input for user creation. The password is still plain text
/// here; hashing happens in the service.
pub struct CreateUserPayload {
    pub name: UserName,
    pub email: UserEmail,
    pub password: String,
}

impl TryFrom<CreateUserForm> for CreateUserPayload {
    type Error = FormError;

    fn try_from(form: CreateUserForm) -> Result<Self, Self::Error> {
        let form = CreateUserForm {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password,
        };
        form.validate()?;

        let mut errors = FieldErrors::new();
        let name = UserName::new(form.name)
            .map_err(|_| errors.add("name", "required"))
            .ok();
        let email = UserEmail::new(form.email)
            .map_err(|_| errors.add("email", "invalid_format"))
            .ok();

        match (name, email) {
            (Some(name), Some(email)) => Ok(Self {
                name,
                email,
                password: form.password,
            }),
            _ => Err(FormError::Validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors(form: CreateUserForm) -> FieldErrors {
        match CreateUserPayload::try_from(form) {
            Err(FormError::Validation(errors)) => errors,
            Ok(_) => panic!("expected validation errors"),
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_normalized() {
        let form = CreateUserForm::new("  Ann  ", " Ann@Example.com ", " secret ");
        let payload = CreateUserPayload::try_from(form).expect("valid form");
        assert_eq!(payload.name.as_str(), "Ann");
        assert_eq!(payload.email.as_str(), "ann@example.com");
        assert_eq!(payload.password, " secret ");
    }

    #[test]
    fn empty_name_is_required() {
        let errors = field_errors(CreateUserForm::new("", "a@b.com", "x"));
        assert_eq!(errors.get("name"), Some("required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn blank_name_is_required() {
        let errors = field_errors(CreateUserForm::new("   ", "a@b.com", "x"));
        assert_eq!(errors.get("name"), Some("required"));
    }

    #[test]
    fn empty_email_reports_required_only() {
        let errors = field_errors(CreateUserForm::new("Ann", "", "x"));
        assert_eq!(errors.get("email"), Some("required"));
    }

    #[test]
    fn malformed_email_is_invalid_format() {
        let errors = field_errors(CreateUserForm::new("Ann", "not-an-email", "x"));
        assert_eq!(errors.get("email"), Some("invalid_format"));
    }

    #[test]
    fn every_failing_field_is_reported() {
        let errors = field_errors(CreateUserForm::default());
        assert_eq!(errors.get("name"), Some("required"));
        assert_eq!(errors.get("email"), Some("required"));
        assert_eq!(errors.get("password"), Some("required"));
    }

    #[test]
    fn old_input_omits_password() {
        let form = CreateUserForm::new("Ann", "ann@example.com", "secret");
        let old = serde_json::to_value(form.old_input()).expect("serializable");
        assert_eq!(
            old,
            serde_json::json!({"name": "Ann", "email": "ann@example.com"})
        );
    }
}
