// src/store/memory.rs

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::{
    error::AppError,
    models::{cookie::CookieConfig, question::Question, user::User},
};

#[derive(Default)]
struct Collections {
    cookie: Option<CookieConfig>,
    users: BTreeMap<String, User>,
    questions: BTreeMap<String, Question>,
}

/// In-process document store used by tests and local runs without Postgres.
/// Collections are ordered by document id, like the Postgres store.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails as an unreachable database would.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::ExternalService("document store unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load_cookie_config(&self) -> Result<Option<CookieConfig>, AppError> {
        self.ensure_online()?;
        Ok(self.collections.read().await.cookie.clone())
    }

    async fn save_cookie_config(&self, config: &CookieConfig) -> Result<(), AppError> {
        self.ensure_online()?;
        self.collections.write().await.cookie = Some(config.clone());
        Ok(())
    }

    async fn load_all_users(&self) -> Result<Vec<User>, AppError> {
        self.ensure_online()?;
        Ok(self.collections.read().await.users.values().cloned().collect())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        self.ensure_online()?;
        Ok(self.collections.read().await.users.get(id).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        self.ensure_online()?;
        self.collections
            .write()
            .await
            .users
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn increment_user_score(&self, id: &str, delta: i64) -> Result<(), AppError> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        let user = collections
            .users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("User data not found".to_string()))?;
        user.score += delta;
        Ok(())
    }

    async fn load_all_questions(&self) -> Result<Vec<Question>, AppError> {
        self.ensure_online()?;
        Ok(self.collections.read().await.questions.values().cloned().collect())
    }

    async fn save_question(&self, question: &Question) -> Result<(), AppError> {
        self.ensure_online()?;
        self.collections
            .write()
            .await
            .questions
            .insert(question.id.clone(), question.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, score: i64) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@kuispemula.com", id),
            first_name: id.to_string(),
            last_name: "Test".to_string(),
            password: "hash".to_string(),
            score,
        }
    }

    #[tokio::test]
    async fn test_create_user_overwrites_existing_document() {
        let store = MemoryStore::new();
        store.create_user(&user("budi", 40)).await.unwrap();
        store.create_user(&user("budi", 0)).await.unwrap();

        let users = store.load_all_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].score, 0);
    }

    #[tokio::test]
    async fn test_increment_is_additive() {
        let store = MemoryStore::new();
        store.create_user(&user("sari", 30)).await.unwrap();
        store.increment_user_score("sari", 20).await.unwrap();

        let sari = store.get_user("sari").await.unwrap().unwrap();
        assert_eq!(sari.score, 50);
    }

    #[tokio::test]
    async fn test_increment_unknown_user_is_not_found() {
        let store = MemoryStore::new();
        let result = store.increment_user_score("ghost", 10).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert!(matches!(
            store.load_all_questions().await,
            Err(AppError::ExternalService(_))
        ));
        assert!(matches!(
            store.load_cookie_config().await,
            Err(AppError::ExternalService(_))
        ));
    }
}
