// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Session cookie middleware.
//!
//! Every API request is bound to a [`ClientSession`]. The session id travels
//! in an HS256-signed JWT cookie; a missing or invalid cookie starts a new
//! session and sets a fresh cookie on the response.

use crate::error::AppError;
use crate::session::ClientSession;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SESSION_COOKIE: &str = "automeet_session";

/// Session cookie lifetime (30 days).
const SESSION_TTL_SECS: usize = 30 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Client session id
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Attach the caller's [`ClientSession`] to the request extensions.
pub async fn attach_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| verify_session_token(cookie.value(), &state.config.session_signing_key));

    let (session_id, new_cookie) = match existing {
        Some(id) => (id, None),
        None => {
            let issued = state
                .sessions
                .new_session_id()
                .and_then(|id| {
                    create_session_token(&id, &state.config.session_signing_key)
                        .map(|token| (id, token))
                });
            match issued {
                Ok((id, token)) => (id, Some(session_cookie(token))),
                Err(e) => return AppError::Internal(e).into_response(),
            }
        }
    };

    let session = state.sessions.get_or_create(&session_id);
    request.extensions_mut().insert(session);

    let response = next.run(request).await;
    match new_cookie {
        Some(cookie) => (jar.add(cookie), response).into_response(),
        None => response,
    }
}

/// Middleware that requires a signed-in user in the current session.
pub async fn require_auth(
    Extension(session): Extension<Arc<ClientSession>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !session.auth.with_state(|s| s.is_authenticated()) {
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Sign a session id.
pub fn create_session_token(session_id: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: session_id.to_string(),
        iat: now,
        exp: now + SESSION_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Session id from a valid token; `None` if the signature or expiry fails.
pub fn verify_session_token(token: &str, signing_key: &[u8]) -> Option<String> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => Some(data.claims.sub),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session cookie");
            None
        }
    }
}
