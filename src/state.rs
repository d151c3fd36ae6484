use axum::extract::FromRef;

use crate::{config::Config, models::cookie::CookieConfig, session::SessionRegistry, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub sessions: SessionRegistry,
    pub cookie: CookieConfig,
    pub config: Config,
}

impl FromRef<AppState> for Store {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for SessionRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for CookieConfig {
    fn from_ref(state: &AppState) -> Self {
        state.cookie.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
