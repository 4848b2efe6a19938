use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::types::YesNo;
use crate::domain::user::{NewUser, UpdateUser};
use crate::forms::{checkbox, optional_text};

const PASSWORD_MESSAGE: &str = "Password must be at least 6 characters";

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Create/edit form for a user. On edit a blank password keeps the current one.
pub struct UserForm {
    #[validate(email(message = "A valid email address is required"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "optional_text")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "Role is required"))]
    pub user_role: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub active: bool,
    #[serde(default)]
    pub lookup_values: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub batch_name: Option<String>,
}

impl UserForm {
    pub fn normalized(mut self) -> Self {
        self.user_name = self.user_name.trim().to_lowercase();
        self.name = self.name.trim().to_string();
        self.user_role = self.user_role.trim().to_string();
        self.lookup_values = self.lookup_values.trim().to_string();
        self
    }

    /// Like [`Validate::validate`] but also requires a password.
    pub fn validate_for_create(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if self.password.is_none() {
            errors.add(
                "password",
                ValidationError::new("required").with_message(PASSWORD_MESSAGE.into()),
            );
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Converts into a create payload; `None` when no password was given.
    pub fn into_new_user(self) -> Option<NewUser> {
        let password = self.password?;
        Some(NewUser {
            user_name: self.user_name,
            name: self.name,
            password,
            user_role: self.user_role,
            active: YesNo::from(self.active),
            lookup_values: self.lookup_values,
            department: self.department,
            batch_name: self.batch_name,
        })
    }
}

impl From<UserForm> for UpdateUser {
    fn from(form: UserForm) -> Self {
        Self {
            user_name: Some(form.user_name),
            name: Some(form.name),
            password: form.password,
            user_role: Some(form.user_role),
            active: Some(YesNo::from(form.active)),
            lookup_values: Some(form.lookup_values),
            department: form.department,
            batch_name: form.batch_name,
        }
    }
}
