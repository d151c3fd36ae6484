// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

/// Represents the 'users' collection.
/// The document id is the username chosen at registration.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    /// Synthesized from the first and last name at registration.
    pub email: String,

    pub first_name: String,
    pub last_name: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    /// Cumulative quiz score, never negative.
    pub score: i64,
}

impl User {
    /// Full name shown on the welcome page.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// DTO for the registration form.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(custom(function = not_blank))]
    pub first_name: String,
    #[validate(custom(function = not_blank))]
    pub last_name: String,
    #[validate(custom(function = not_blank))]
    pub username: String,
    #[validate(custom(function = not_blank))]
    pub password: String,
    #[validate(custom(function = not_blank))]
    pub repeat_password: String,
}

impl RegisterRequest {
    /// Checks the form before anything touches the store.
    pub fn check(&self) -> Result<(), AppError> {
        if self.validate().is_err() {
            return Err(AppError::Validation("Please fill in all fields".to_string()));
        }
        if self.password != self.repeat_password {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
        Ok(())
    }
}

/// DTO for user login. Missing fields deserialize as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterRequest {
        RegisterRequest {
            first_name: "Ayu".to_string(),
            last_name: "Lestari".to_string(),
            username: "ayu".to_string(),
            password: "rahasia".to_string(),
            repeat_password: "rahasia".to_string(),
        }
    }

    #[test]
    fn test_complete_form_passes() {
        assert!(form().check().is_ok());
    }

    #[test]
    fn test_blank_field_is_rejected() {
        let mut req = form();
        req.username = "   ".to_string();

        match req.check() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Please fill in all fields"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_password_mismatch_is_rejected() {
        let mut req = form();
        req.repeat_password = "lain".to_string();

        match req.check() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Passwords do not match"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
