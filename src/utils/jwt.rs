// src/utils/jwt.rs

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::cookie::CookieConfig};

/// Session token claims.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - the username, which is also the user document id.
    pub sub: String,
    /// Session id, fresh for every login.
    pub sid: String,
    /// Display name for the welcome page.
    pub name: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Who is making the request, as seen by `identify_session`.
#[derive(Debug, Clone)]
pub enum Viewer {
    Anonymous,
    Session(Claims),
}

impl Viewer {
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Session(claims) => Some(claims),
        }
    }
}

/// Signs a new session token for `username`, valid for `cookie.expiry_days`.
///
/// An expiry too far out to represent is a `ConfigMissing` error.
pub fn sign_session(username: &str, name: &str, cookie: &CookieConfig) -> Result<(String, Claims), AppError> {
    let expiration = chrono::Duration::try_seconds(cookie.max_age_seconds())
        .and_then(|lifetime| chrono::Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| {
            AppError::ConfigMissing(format!(
                "Cookie expiry of {} days is out of range",
                cookie.expiry_days
            ))
        })?;

    let claims = Claims {
        sub: username.to_owned(),
        sid: uuid::Uuid::new_v4().to_string(),
        name: name.to_owned(),
        exp: expiration.timestamp().max(0) as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cookie.key.as_bytes()),
    )
    .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok((token, claims))
}

/// Verifies and decodes a session token.
pub fn verify_session(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid session".to_string()))?;

    Ok(token_data.claims)
}

/// `Set-Cookie` value carrying a freshly signed token.
pub fn session_cookie(cookie: &CookieConfig, token: &str) -> String {
    format!(
        "{}={}; HttpOnly; Max-Age={}; Path=/; SameSite=Lax",
        cookie.name,
        token,
        cookie.max_age_seconds()
    )
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn expired_cookie(cookie: &CookieConfig) -> String {
    format!("{}=; HttpOnly; Max-Age=0; Path=/; SameSite=Lax", cookie.name)
}

/// Reads the token from the session cookie, falling back to a Bearer header.
fn token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Resolves the session of a request, if it carries a valid token.
pub fn claims_from_headers(headers: &HeaderMap, cookie: &CookieConfig) -> Option<Claims> {
    let token = token_from_headers(headers, &cookie.name)?;
    verify_session(&token, &cookie.key).ok()
}

/// Axum Middleware: Authentication.
///
/// Injects `Claims` into the request extensions for handlers to use.
/// Requests without a valid session get 401 Unauthorized.
pub async fn require_session(
    State(cookie): State<CookieConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    match claims_from_headers(req.headers(), &cookie) {
        Some(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Axum Middleware: optional authentication.
///
/// Always lets the request through, tagging it with a `Viewer`.
pub async fn identify_session(
    State(cookie): State<CookieConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let viewer = match claims_from_headers(req.headers(), &cookie) {
        Some(claims) => Viewer::Session(claims),
        None => Viewer::Anonymous,
    };
    req.extensions_mut().insert(viewer);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn cookie() -> CookieConfig {
        CookieConfig {
            name: "kuis".to_string(),
            key: "test_key".to_string(),
            expiry_days: 1,
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let (token, claims) = sign_session("ayu", "Ayu Lestari", &cookie()).unwrap();
        let decoded = verify_session(&token, "test_key").unwrap();

        assert_eq!(decoded.sub, "ayu");
        assert_eq!(decoded.sid, claims.sid);
        assert_eq!(decoded.name, "Ayu Lestari");
    }

    #[test]
    fn test_each_login_gets_new_session_id() {
        let (_, first) = sign_session("ayu", "Ayu", &cookie()).unwrap();
        let (_, second) = sign_session("ayu", "Ayu", &cookie()).unwrap();
        assert_ne!(first.sid, second.sid);
    }

    #[test]
    fn test_oversized_expiry_is_rejected() {
        let cookie = CookieConfig {
            expiry_days: 1_000_000_000_000,
            ..cookie()
        };
        assert!(matches!(
            sign_session("ayu", "Ayu", &cookie),
            Err(AppError::ConfigMissing(_))
        ));
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let (token, _) = sign_session("ayu", "Ayu", &cookie()).unwrap();
        assert!(matches!(
            verify_session(&token, "other_key"),
            Err(AppError::AuthError(_))
        ));
    }

    #[test]
    fn test_claims_from_cookie_header() {
        let (token, _) = sign_session("ayu", "Ayu", &cookie()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; kuis={}", token)).unwrap(),
        );

        let claims = claims_from_headers(&headers, &cookie()).unwrap();
        assert_eq!(claims.sub, "ayu");
    }

    #[test]
    fn test_claims_from_bearer_header() {
        let (token, _) = sign_session("ayu", "Ayu", &cookie()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        assert!(claims_from_headers(&headers, &cookie()).is_some());
        assert!(claims_from_headers(&HeaderMap::new(), &cookie()).is_none());
    }

    #[test]
    fn test_cookie_strings() {
        assert_eq!(
            session_cookie(&cookie(), "abc"),
            "kuis=abc; HttpOnly; Max-Age=86400; Path=/; SameSite=Lax"
        );
        assert!(expired_cookie(&cookie()).starts_with("kuis=; HttpOnly; Max-Age=0"));
    }
}
