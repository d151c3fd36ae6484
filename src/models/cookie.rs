// src/models/cookie.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the `cookies/default_cookie` document.
/// Consumed only by the session layer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Name of the session cookie.
    pub name: String,

    /// Secret used to sign session tokens.
    #[serde(skip_serializing)]
    pub key: String,

    /// Lifetime of an issued session, in days.
    pub expiry_days: i64,
}

impl CookieConfig {
    /// Session lifetime in seconds. Saturates instead of overflowing.
    pub fn max_age_seconds(&self) -> i64 {
        self.expiry_days.max(0).saturating_mul(24 * 60 * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(expiry_days: i64) -> CookieConfig {
        CookieConfig {
            name: "kuis".to_string(),
            key: "key".to_string(),
            expiry_days,
        }
    }

    #[test]
    fn test_max_age_seconds() {
        assert_eq!(cookie(30).max_age_seconds(), 2_592_000);
        assert_eq!(cookie(-5).max_age_seconds(), 0);
        assert_eq!(cookie(i64::MAX).max_age_seconds(), i64::MAX);
    }
}
