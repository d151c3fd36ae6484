// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, leaderboard, page, quiz},
    state::AppState,
    utils::jwt::{identify_session, require_session},
};

/// Assembles the main application router.
///
/// * `/api/auth` and `/api/page` accept anonymous visitors and tag each
///   request with a `Viewer`.
/// * `/api/quiz` requires a valid session.
/// * Global middleware: Trace, CORS.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/status", get(auth::status))
        .layer(middleware::from_fn_with_state(state.clone(), identify_session));

    let page_routes = Router::new()
        .route("/", get(page::current))
        .route("/navigate", post(page::navigate))
        .layer(middleware::from_fn_with_state(state.clone(), identify_session));

    let quiz_routes = Router::new()
        .route("/", get(quiz::show))
        .route("/answer", post(quiz::answer))
        .route("/next", post(quiz::next))
        .route("/restart", post(quiz::restart))
        .layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/page", page_routes)
        .nest("/api/quiz", quiz_routes)
        .route("/api/leaderboard", get(leaderboard::show))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
