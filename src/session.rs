// src/session.rs

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{page::Page, quiz::QuizSession, utils::jwt::Claims};

/// Everything one logged-in browser session keeps between requests.
#[derive(Debug)]
pub struct SessionContext {
    pub page: Page,
    pub quiz: Option<QuizSession>,
    /// Unix timestamp after which the session token is no longer accepted.
    expires_at: usize,
}

impl SessionContext {
    fn new(claims: &Claims) -> Self {
        Self {
            page: Page::Auth,
            quiz: None,
            expires_at: claims.exp,
        }
    }
}

fn now() -> usize {
    chrono::Utc::now().timestamp().max(0) as usize
}

/// Session contexts keyed by the session id carried in the session token.
///
/// The lock is only ever held inside `with`, whose closure is synchronous,
/// so no store call runs while it is held.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<String, SessionContext>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` on the context of `claims`' session, creating it on first use.
    /// A valid token that outlived a server restart gets a fresh context.
    ///
    /// Contexts of other sessions whose token has expired are dropped first.
    pub async fn with<T>(&self, claims: &Claims, f: impl FnOnce(&mut SessionContext) -> T) -> T {
        let mut sessions = self.inner.lock().await;

        let now = now();
        let before = sessions.len();
        sessions.retain(|sid, ctx| *sid == claims.sid || ctx.expires_at > now);
        if sessions.len() < before {
            tracing::debug!("Evicted {} expired sessions", before - sessions.len());
        }

        let ctx = sessions
            .entry(claims.sid.clone())
            .or_insert_with(|| SessionContext::new(claims));
        f(ctx)
    }

    pub async fn close(&self, sid: &str) {
        if self.inner.lock().await.remove(sid).is_some() {
            tracing::debug!("Closed session {}", sid);
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}
