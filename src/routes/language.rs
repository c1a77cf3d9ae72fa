// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Language switcher.

use crate::session::ClientSession;
use crate::stores::{LanguageAction, LanguageState};
use crate::AppState;
use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/language", get(current).put(set_language))
        .route("/api/language/toggle", post(toggle))
}

async fn current(Extension(session): Extension<Arc<ClientSession>>) -> Json<LanguageState> {
    Json(session.language.snapshot())
}

async fn set_language(
    Extension(session): Extension<Arc<ClientSession>>,
    Json(body): Json<LanguageState>,
) -> Json<LanguageState> {
    session
        .language
        .dispatch(LanguageAction::Set(body.language));
    Json(session.language.snapshot())
}

async fn toggle(Extension(session): Extension<Arc<ClientSession>>) -> Json<LanguageState> {
    session.language.dispatch(LanguageAction::Toggle);
    Json(session.language.snapshot())
}
