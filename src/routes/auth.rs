// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Sign-in, sign-up, sign-out and session lookup.

use crate::db::SignUpResponse;
use crate::error::{AppError, Result};
use crate::i18n::t;
use crate::models::{AuthUser, Notice, Profile, Session, UserRole};
use crate::services::auth::{AuthFailure, AuthFlow, LoginForm, RegisterForm};
use crate::session::ClientSession;
use crate::stores::AuthAction;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", get(current_session))
}

/// Auth state as seen by the front-end.
#[derive(Serialize)]
pub struct AuthResponse {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub user: Option<AuthUser>,
    pub profile: Option<Profile>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl AuthResponse {
    fn from_session(session: &ClientSession, notice: Option<Notice>) -> Self {
        session.auth.with_state(|s| Self {
            is_authenticated: s.is_authenticated(),
            is_loading: s.is_loading,
            user: s.user.clone(),
            profile: s.profile.clone(),
            role: s.role,
            notice,
        })
    }
}

/// Turn a backend rejection into the user-facing failure category.
fn auth_error(flow: AuthFlow, err: AppError, session: &ClientSession) -> AppError {
    match err {
        AppError::Backend(message) => AppError::Auth(AuthFailure::from_backend_message(
            flow,
            &message,
            session.language.language(),
        )),
        other => other,
    }
}

/// Install a fresh backend session: user, role, then the profile row.
async fn establish(state: &AppState, session: &ClientSession, backend: Session) {
    let role = UserRole::from_claim(backend.user.app_metadata.role.as_deref());
    let user_id = backend.user.id.clone();
    let token = backend.access_token.clone();

    session.auth.dispatch(AuthAction::SessionChanged(Some(backend)));
    session.auth.dispatch(AuthAction::SetRole(role));

    match state.db.fetch_profile(&user_id, Some(&token)).await {
        Ok(profile) => session.auth.dispatch(AuthAction::SetProfile(profile)),
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Error fetching profile");
        }
    }
}

async fn login(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Arc<ClientSession>>,
    Json(form): Json<LoginForm>,
) -> Result<Json<AuthResponse>> {
    form.validate()?;

    let backend = state
        .db
        .sign_in_with_password(form.email.trim(), &form.password)
        .await
        .map_err(|e| auth_error(AuthFlow::Login, e, &session))?;

    tracing::info!(user_id = %backend.user.id, "User signed in");
    establish(&state, &session, backend).await;

    let language = session.language.language();
    let notice = Notice::info(
        t(language, "auth.loginSuccess.title"),
        t(language, "auth.loginSuccess.description"),
    );
    Ok(Json(AuthResponse::from_session(&session, Some(notice))))
}

async fn register(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Arc<ClientSession>>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    form.validate()?;

    let signed_up = state
        .db
        .sign_up(
            form.email.trim(),
            &form.password,
            &state.config.frontend_url,
            form.full_name.trim(),
        )
        .await
        .map_err(|e| auth_error(AuthFlow::Register, e, &session))?;

    match signed_up {
        SignUpResponse::Session(backend) => {
            tracing::info!(user_id = %backend.user.id, "User registered and signed in");
            establish(&state, &session, backend).await;
        }
        SignUpResponse::User(user) => {
            tracing::info!(user_id = %user.id, "User registered, confirmation pending");
        }
    }

    let language = session.language.language();
    let notice = Notice::info(
        t(language, "auth.registerSuccess.title"),
        t(language, "auth.registerSuccess.description"),
    );
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::from_session(&session, Some(notice))),
    ))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Arc<ClientSession>>,
) -> StatusCode {
    let token = session
        .auth
        .with_state(|s| s.access_token().map(str::to_string));

    if let Some(token) = token {
        match state.db.sign_out(&token).await {
            Ok(()) | Err(AppError::NotConfigured(_)) => {}
            Err(e) => tracing::warn!(error = %e, "Backend sign-out failed, clearing locally"),
        }
    }

    session.auth.dispatch(AuthAction::Logout);
    tracing::info!(session_id = %session.id, "User signed out");
    StatusCode::NO_CONTENT
}

/// Current auth state. A stored access token is re-validated against the
/// backend; a rejected token signs the session out.
async fn current_session(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Arc<ClientSession>>,
) -> Json<AuthResponse> {
    let token = session
        .auth
        .with_state(|s| s.access_token().map(str::to_string));

    if let Some(token) = token {
        match state.db.get_user(&token).await {
            Ok(user) => session.auth.dispatch(AuthAction::SetUser(Some(user))),
            Err(e) if e.is_token_error() => {
                tracing::info!(session_id = %session.id, "Backend session expired");
                session.auth.dispatch(AuthAction::Logout);
            }
            Err(AppError::NotConfigured(_)) => {}
            Err(e) => tracing::warn!(error = %e, "Session lookup failed"),
        }
    }
    session.auth.dispatch(AuthAction::SetLoading(false));

    Json(AuthResponse::from_session(&session, None))
}
