// src/config.rs

use std::env;

/// Number of questions sampled for one quiz session.
pub const QUIZ_QUESTION_COUNT: usize = 10;

/// Points awarded for each correct answer.
pub const POINTS_PER_CORRECT_ANSWER: u32 = 10;

/// Number of entries shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

/// Document id of the cookie configuration in the `cookies` collection.
pub const COOKIE_CONFIG_ID: &str = "default_cookie";

pub const DEFAULT_EMAIL_DOMAIN: &str = "kuispemula.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub port: u16,

    /// Domain used when synthesizing a user's email at registration.
    pub email_domain: String,

    /// Optional JSON file of questions upserted at startup.
    pub questions_file: Option<String>,

    /// Seed values for the cookie document, used only when none exists yet.
    pub cookie_name: String,
    pub cookie_key: Option<String>,
    pub cookie_expiry_days: i64,
}

impl Config {
    /// Reads the process environment. `.env` must already be loaded.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let email_domain = env::var("EMAIL_DOMAIN")
            .unwrap_or_else(|_| DEFAULT_EMAIL_DOMAIN.to_string());

        let cookie_expiry_days = env::var("COOKIE_EXPIRY_DAYS")
            .ok()
            .and_then(|d| d.parse().ok())
            .unwrap_or(30);

        Self {
            database_url,
            rust_log,
            port,
            email_domain,
            questions_file: env::var("QUESTIONS_FILE").ok(),
            cookie_name: env::var("COOKIE_NAME").unwrap_or_else(|_| "kuis_pemula".to_string()),
            cookie_key: env::var("COOKIE_KEY").ok(),
            cookie_expiry_days,
        }
    }
}
