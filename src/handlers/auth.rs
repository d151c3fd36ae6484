// src/handlers/auth.rs

use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};

use crate::{
    auth::{self, LoginOutcome},
    config::Config,
    error::AppError,
    models::{
        cookie::CookieConfig,
        user::{LoginRequest, RegisterRequest},
    },
    session::SessionRegistry,
    store::Store,
    utils::jwt::{Viewer, expired_cookie, session_cookie, sign_session},
    view::{AuthStatus, Notice, View},
};

/// Registers a new user.
///
/// Blank fields and mismatched passwords are rejected before the store is touched.
/// Returns 201 Created and the register page with a success notice.
pub async fn register(
    State(store): State<Store>,
    State(config): State<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth::register(store.as_ref(), &payload, &config.email_domain).await?;

    Ok((
        StatusCode::CREATED,
        Json(View::Register {
            notice: Some(Notice::success("Registration successful! You can now log in.")),
        }),
    ))
}

/// Logs a user in.
///
/// On success sets the session cookie and returns the welcome page.
/// Wrong credentials give 401 with a `rejected` login form; an empty form
/// gives a `pending` one.
pub async fn login(
    State(store): State<Store>,
    State(cookie): State<CookieConfig>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    match auth::login(store.as_ref(), &payload).await? {
        LoginOutcome::Authenticated(user) => {
            let name = user.display_name();
            let (token, claims) = sign_session(&user.id, &name, &cookie)?;
            tracing::info!("User '{}' logged in (session {})", user.id, claims.sid);

            Ok((
                [(SET_COOKIE, session_cookie(&cookie, &token))],
                Json(View::home(&name)),
            )
                .into_response())
        }
        LoginOutcome::Rejected => Ok((
            StatusCode::UNAUTHORIZED,
            Json(View::login_form(
                AuthStatus::Rejected,
                Some(Notice::error("Invalid username or password")),
            )),
        )
            .into_response()),
        LoginOutcome::Pending => Ok(Json(View::login_form(
            AuthStatus::Pending,
            Some(Notice::warning("Please enter your username and password")),
        ))
        .into_response()),
    }
}

/// Ends the session: drops its context and expires the cookie.
pub async fn logout(
    State(sessions): State<SessionRegistry>,
    State(cookie): State<CookieConfig>,
    Extension(viewer): Extension<Viewer>,
) -> impl IntoResponse {
    if let Some(claims) = viewer.claims() {
        sessions.close(&claims.sid).await;
        tracing::info!("User '{}' logged out", claims.sub);
    }

    (
        [(SET_COOKIE, expired_cookie(&cookie))],
        Json(View::login_form(AuthStatus::Pending, None)),
    )
}

/// Reports whether the request carries a valid session.
pub async fn status(Extension(viewer): Extension<Viewer>) -> Json<View> {
    match viewer {
        Viewer::Session(claims) => Json(View::home(&claims.name)),
        Viewer::Anonymous => Json(View::login_form(AuthStatus::Pending, None)),
    }
}
