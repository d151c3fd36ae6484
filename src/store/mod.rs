// src/store/mod.rs

//! Data access layer.
//!
//! Every call is a single independent round trip: no caching, no batching,
//! no retries and no transaction spanning two calls.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{cookie::CookieConfig, question::Question, user::User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Shared handle to the configured store.
pub type Store = Arc<dyn DocumentStore>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns `None` when the cookie document does not exist.
    async fn load_cookie_config(&self) -> Result<Option<CookieConfig>, AppError>;

    async fn save_cookie_config(&self, config: &CookieConfig) -> Result<(), AppError>;

    /// All users, in document id order.
    async fn load_all_users(&self) -> Result<Vec<User>, AppError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Writes the user document, replacing any existing one with the same id.
    async fn create_user(&self, user: &User) -> Result<(), AppError>;

    /// Adds `delta` to the user's score.
    /// Fails with `AppError::NotFound` when the user does not exist.
    async fn increment_user_score(&self, id: &str, delta: i64) -> Result<(), AppError>;

    async fn load_all_questions(&self) -> Result<Vec<Question>, AppError>;

    /// Writes the question document, replacing any existing one with the same text.
    async fn save_question(&self, question: &Question) -> Result<(), AppError>;
}
