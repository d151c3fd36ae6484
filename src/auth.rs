// src/auth.rs

//! Registration and login against the user collection.

use crate::{
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, User},
    store::DocumentStore,
    utils::{
        hash::{hash_password, verify_password},
        html::clean_text,
    },
};

/// Result of a login attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    Authenticated(User),
    /// Unknown username or wrong password.
    Rejected,
    /// Nothing was entered yet.
    Pending,
}

/// Checks the submitted credentials.
pub async fn login(store: &dyn DocumentStore, form: &LoginRequest) -> Result<LoginOutcome, AppError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Ok(LoginOutcome::Pending);
    }

    let Some(user) = store.get_user(username).await? else {
        tracing::info!("Login for unknown user '{}'", username);
        return Ok(LoginOutcome::Rejected);
    };

    if !verify_password(&form.password, &user.password) {
        tracing::info!("Wrong password for '{}'", username);
        return Ok(LoginOutcome::Rejected);
    }

    Ok(LoginOutcome::Authenticated(user))
}

/// Validates the form and writes the new user document.
/// An existing user with the same username is overwritten.
pub async fn register(
    store: &dyn DocumentStore,
    form: &RegisterRequest,
    email_domain: &str,
) -> Result<User, AppError> {
    form.check()?;

    let password = hash_password(&form.password)?;
    let user = new_user(form, email_domain, password);

    store.create_user(&user).await?;
    tracing::info!("Registered user '{}'", user.id);

    Ok(user)
}

/// Builds the user document for a checked form.
///
/// The stored first name is the first word of the input and the last name
/// its last word; the email joins both full names, lowercased and without
/// whitespace.
fn new_user(form: &RegisterRequest, email_domain: &str, password_hash: String) -> User {
    let compact = |s: &str| -> String {
        s.split_whitespace().collect::<String>().to_lowercase()
    };
    let email = format!(
        "{}{}@{}",
        compact(&form.first_name),
        compact(&form.last_name),
        email_domain
    );

    let first_name = form.first_name.split_whitespace().next().unwrap_or_default();
    let last_name = form.last_name.split_whitespace().last().unwrap_or_default();

    User {
        id: form.username.trim().to_string(),
        email,
        first_name: clean_text(first_name),
        last_name: clean_text(last_name),
        password: password_hash,
        score: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn form(password: &str, repeat: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: "Putu Ayu".to_string(),
            last_name: "Dewi Lestari".to_string(),
            username: " ayu ".to_string(),
            password: password.to_string(),
            repeat_password: repeat.to_string(),
        }
    }

    #[test]
    fn test_new_user_fields() {
        let user = new_user(&form("pw", "pw"), "kuispemula.com", "hash".to_string());

        assert_eq!(user.id, "ayu");
        assert_eq!(user.email, "putuayudewilestari@kuispemula.com");
        assert_eq!(user.first_name, "Putu");
        assert_eq!(user.last_name, "Lestari");
        assert_eq!(user.score, 0);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        register(&store, &form("rahasia", "rahasia"), "kuispemula.com")
            .await
            .unwrap();

        let stored = store.get_user("ayu").await.unwrap().unwrap();
        assert_ne!(stored.password, "rahasia");

        let ok = LoginRequest {
            username: "ayu".to_string(),
            password: "rahasia".to_string(),
        };
        assert!(matches!(
            login(&store, &ok).await.unwrap(),
            LoginOutcome::Authenticated(user) if user.id == "ayu"
        ));

        let wrong = LoginRequest {
            username: "ayu".to_string(),
            password: "salah".to_string(),
        };
        assert!(matches!(login(&store, &wrong).await.unwrap(), LoginOutcome::Rejected));
    }

    #[tokio::test]
    async fn test_mismatched_passwords_write_nothing() {
        let store = MemoryStore::new();
        let result = register(&store, &form("rahasia", "lain"), "kuispemula.com").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.load_all_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validation_runs_before_store_call() {
        let store = MemoryStore::new();
        store.set_offline(true);

        let result = register(&store, &form("a", "b"), "kuispemula.com").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_states() {
        let store = MemoryStore::new();

        let empty = LoginRequest::default();
        assert!(matches!(login(&store, &empty).await.unwrap(), LoginOutcome::Pending));

        let unknown = LoginRequest {
            username: "nobody".to_string(),
            password: "x".to_string(),
        };
        assert!(matches!(login(&store, &unknown).await.unwrap(), LoginOutcome::Rejected));
    }
}
