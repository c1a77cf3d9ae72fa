// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Profile page: profile editor, profile lookup and the vehicle list.

use crate::error::{AppError, Result};
use crate::i18n::t;
use crate::models::{Notice, ProfileField, Vehicle, VehicleForm};
use crate::profile::{ProfileSnapshot, SaveOutcome};
use crate::services::catalog::{self, UserEvent};
use crate::session::ClientSession;
use crate::time_utils::millis_id;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile).patch(edit_profile))
        .route("/api/profile/save", post(save_profile))
        .route("/api/profile/reset", post(reset_profile))
        .route(
            "/api/profile/vehicles",
            get(list_vehicles).post(add_vehicle),
        )
        .route(
            "/api/profile/vehicles/{id}",
            put(update_vehicle).delete(delete_vehicle),
        )
        .route("/api/profile/{id}", get(load_profile))
}

#[derive(Serialize)]
pub struct ProfilePage {
    #[serde(flatten)]
    pub view: ProfileSnapshot,
    pub display_name: String,
    pub initials: String,
    pub vehicles: Vec<Vehicle>,
    pub events: Vec<UserEvent>,
}

async fn profile_page(session: &ClientSession) -> ProfilePage {
    let view = session.profile.lock().await.snapshot();
    let (display_name, initials) = view
        .profile
        .as_ref()
        .map(|p| (p.display_name(), p.initials()))
        .unwrap_or_else(|| ("Utilisateur".to_string(), "U".to_string()));
    let vehicles = session.vehicles.read().await.clone();

    ProfilePage {
        view,
        display_name,
        initials,
        vehicles,
        events: catalog::user_events(),
    }
}

async fn get_profile(Extension(session): Extension<Arc<ClientSession>>) -> Json<ProfilePage> {
    Json(profile_page(&session).await)
}

/// Apply local edits; nothing is persisted until save.
async fn edit_profile(
    Extension(session): Extension<Arc<ClientSession>>,
    Json(edits): Json<Vec<ProfileField>>,
) -> Json<ProfileSnapshot> {
    let mut view = session.profile.lock().await;
    for field in edits {
        view.set_field(field);
    }
    Json(view.snapshot())
}

async fn reset_profile(
    Extension(session): Extension<Arc<ClientSession>>,
) -> Json<ProfileSnapshot> {
    let mut view = session.profile.lock().await;
    view.reset();
    Json(view.snapshot())
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub outcome: SaveOutcome,
    pub view: ProfileSnapshot,
    pub notice: Notice,
}

async fn save_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Arc<ClientSession>>,
) -> Result<Json<SaveResponse>> {
    let mut view = session.profile.lock().await;
    let outcome = view.save(&state.db).await?;

    let language = session.language.language();
    let notice = Notice::info(t(language, "profile.saved"), String::new());
    Ok(Json(SaveResponse {
        outcome,
        view: view.snapshot(),
        notice,
    }))
}

#[derive(Serialize)]
pub struct LoadResponse {
    /// `false` when a newer load replaced this one before it finished.
    pub applied: bool,
    pub view: ProfileSnapshot,
}

/// Load another profile by id. The view lock is released while the fetch is
/// in flight; only the most recent load is applied.
async fn load_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Arc<ClientSession>>,
    Path(id): Path<String>,
) -> Json<LoadResponse> {
    let (ticket, token) = {
        let mut view = session.profile.lock().await;
        (view.begin_load(), view.access_token())
    };

    let result = state.db.fetch_profile(&id, token.as_deref()).await;

    let mut view = session.profile.lock().await;
    let applied = view.finish_load(ticket, &id, result);
    Json(LoadResponse {
        applied,
        view: view.snapshot(),
    })
}

async fn list_vehicles(Extension(session): Extension<Arc<ClientSession>>) -> Json<Vec<Vehicle>> {
    Json(session.vehicles.read().await.clone())
}

fn build_vehicle(form: VehicleForm, id: String) -> Result<Vehicle> {
    form.validate()?;
    form.into_vehicle(id)
        .ok_or_else(|| AppError::BadRequest("Année invalide".to_string()))
}

async fn add_vehicle(
    Extension(session): Extension<Arc<ClientSession>>,
    Json(form): Json<VehicleForm>,
) -> Result<(StatusCode, Json<Vehicle>)> {
    let vehicle = build_vehicle(form, millis_id(chrono::Utc::now()))?;
    session.vehicles.write().await.push(vehicle.clone());
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    Extension(session): Extension<Arc<ClientSession>>,
    Path(id): Path<String>,
    Json(form): Json<VehicleForm>,
) -> Result<Json<Vehicle>> {
    let vehicle = build_vehicle(form, id.clone())?;
    let mut vehicles = session.vehicles.write().await;
    let slot = vehicles
        .iter_mut()
        .find(|v| v.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {}", id)))?;
    *slot = vehicle.clone();
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    Extension(session): Extension<Arc<ClientSession>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let mut vehicles = session.vehicles.write().await;
    let before = vehicles.len();
    vehicles.retain(|v| v.id != id);
    if vehicles.len() == before {
        return Err(AppError::NotFound(format!("Vehicle {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
