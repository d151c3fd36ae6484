// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

use super::DocumentStore;
use crate::{
    config::COOKIE_CONFIG_ID,
    error::AppError,
    models::{cookie::CookieConfig, question::Question, user::User},
};

/// Postgres-backed document store.
/// Each collection is a table keyed by the document id.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn load_cookie_config(&self) -> Result<Option<CookieConfig>, AppError> {
        let config = sqlx::query_as::<_, CookieConfig>(
            "SELECT name, key, expiry_days FROM cookies WHERE id = $1",
        )
        .bind(COOKIE_CONFIG_ID)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load cookie configuration: {:?}", e);
            AppError::from(e)
        })?;

        Ok(config)
    }

    async fn save_cookie_config(&self, config: &CookieConfig) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO cookies (id, name, key, expiry_days)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                key = EXCLUDED.key,
                expiry_days = EXCLUDED.expiry_days
            "#,
        )
        .bind(COOKIE_CONFIG_ID)
        .bind(&config.name)
        .bind(&config.key)
        .bind(config.expiry_days)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_all_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password, score
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load users: {:?}", e);
            AppError::from(e)
        })?;

        Ok(users)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password, score
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        // Same id overwrites the whole document, score included.
        sqlx::query(
            r#"
            INSERT INTO users (id, email, first_name, last_name, password, score)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                password = EXCLUDED.password,
                score = EXCLUDED.score
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password)
        .bind(user.score)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write user {}: {:?}", user.id, e);
            AppError::from(e)
        })?;

        Ok(())
    }

    async fn increment_user_score(&self, id: &str, delta: i64) -> Result<(), AppError> {
        // Single statement, so concurrent sessions of one user cannot lose updates.
        let result = sqlx::query("UPDATE users SET score = score + $2 WHERE id = $1")
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update score for {}: {:?}", id, e);
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User data not found".to_string()));
        }

        Ok(())
    }

    async fn load_all_questions(&self) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, code, options, answer FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load questions: {:?}", e);
            AppError::from(e)
        })?;

        Ok(questions)
    }

    async fn save_question(&self, question: &Question) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO questions (id, code, options, answer)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                code = EXCLUDED.code,
                options = EXCLUDED.options,
                answer = EXCLUDED.answer
            "#,
        )
        .bind(&question.id)
        .bind(&question.code)
        .bind(&question.options)
        .bind(&question.answer)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
