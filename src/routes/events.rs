// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Event listing, creation, editing and the events map.

use crate::error::{AppError, Result};
use crate::i18n::{t, Language};
use crate::models::{CarEvent, CategoryFilter, EventCategory, EventPatch, NewEventForm, Notice};
use crate::services::map::{self, MapMarker};
use crate::session::ClientSession;
use crate::stores::EventsAction;
use crate::time_utils::{format_utc_rfc3339, millis_id};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Default map canvas size.
const MAP_WIDTH: f64 = 800.0;
const MAP_HEIGHT: f64 = 600.0;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/featured", get(featured_events))
        .route("/api/events/map", get(events_map))
        .route(
            "/api/events/{id}",
            get(get_event).patch(update_event).delete(delete_event),
        )
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct EventsQuery {
    /// Changes the session's selected category when present.
    pub category: Option<CategoryFilter>,
    pub q: String,
}

#[derive(Serialize)]
pub struct CategoryOption {
    pub value: CategoryFilter,
    pub label: String,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub events: Vec<CarEvent>,
    pub selected_category: CategoryFilter,
    pub categories: Vec<CategoryOption>,
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

fn category_options(language: Language) -> Vec<CategoryOption> {
    std::iter::once(CategoryFilter::All)
        .chain(EventCategory::ALL.iter().copied().map(CategoryFilter::Only))
        .map(|value| CategoryOption {
            value,
            label: t(language, &format!("events.categories.{}", value.as_str())),
        })
        .collect()
}

async fn list_events(
    Extension(session): Extension<Arc<ClientSession>>,
    Query(query): Query<EventsQuery>,
) -> Json<EventsResponse> {
    if let Some(category) = query.category {
        session.events.dispatch(EventsAction::SelectCategory(category));
    }

    let language = session.language.language();
    let (events, selected_category, is_loading) = session.events.with_state(|s| {
        (s.filtered(&query.q), s.selected_category, s.is_loading)
    });
    let empty_message = events.is_empty().then(|| t(language, "events.noEvents"));

    Json(EventsResponse {
        events,
        selected_category,
        categories: category_options(language),
        is_loading,
        empty_message,
    })
}

async fn featured_events(Extension(session): Extension<Arc<ClientSession>>) -> Json<Vec<CarEvent>> {
    Json(session.events.with_state(|s| s.featured_events.clone()))
}

async fn get_event(
    Extension(session): Extension<Arc<ClientSession>>,
    Path(id): Path<String>,
) -> Result<Json<CarEvent>> {
    session
        .events
        .with_state(|s| s.find(&id).cloned())
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Event {}", id)))
}

#[derive(Serialize)]
pub struct CreatedEvent {
    pub event: CarEvent,
    pub notice: Notice,
}

async fn create_event(
    Extension(session): Extension<Arc<ClientSession>>,
    Json(form): Json<NewEventForm>,
) -> Result<(StatusCode, Json<CreatedEvent>)> {
    form.validate()?;

    let now = chrono::Utc::now();
    let organizer = session.auth.with_state(|s| {
        s.user.as_ref().map(|user| {
            let name = s
                .profile
                .as_ref()
                .map(|p| p.display_name())
                .or_else(|| user.user_metadata.full_name.clone())
                .or_else(|| user.email.clone())
                .unwrap_or_else(|| "Utilisateur".to_string());
            (user.id.clone(), name)
        })
    });

    let event = form.into_event(millis_id(now), organizer, format_utc_rfc3339(now));
    tracing::info!(event_id = %event.id, category = %event.category, "Event created");
    session.events.dispatch(EventsAction::AddEvent(event.clone()));

    let language = session.language.language();
    let notice = Notice::info(t(language, "createEvent"), t(language, "events.created"));
    Ok((StatusCode::CREATED, Json(CreatedEvent { event, notice })))
}

/// Admins may edit anything; users only their own events. Events created
/// anonymously in this session belong to it.
fn ensure_can_modify(session: &ClientSession, id: &str) -> Result<()> {
    let organizer_id = session
        .events
        .with_state(|s| s.find(id).map(|e| e.organizer_id.clone()))
        .ok_or_else(|| AppError::NotFound(format!("Event {}", id)))?;

    let allowed = session.auth.with_state(|s| {
        s.is_admin()
            || organizer_id == "local"
            || s.user.as_ref().is_some_and(|u| u.id == organizer_id)
    });

    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only the organizer or an administrator can change this event".to_string(),
        ))
    }
}

async fn update_event(
    Extension(session): Extension<Arc<ClientSession>>,
    Path(id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<CarEvent>> {
    ensure_can_modify(&session, &id)?;

    session.events.dispatch(EventsAction::UpdateEvent {
        id: id.clone(),
        patch,
    });

    session
        .events
        .with_state(|s| s.find(&id).cloned())
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Event {}", id)))
}

async fn delete_event(
    Extension(session): Extension<Arc<ClientSession>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    ensure_can_modify(&session, &id)?;
    session.events.dispatch(EventsAction::DeleteEvent(id.clone()));
    tracing::info!(event_id = %id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MapQuery {
    pub width: f64,
    pub height: f64,
}

impl Default for MapQuery {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
        }
    }
}

#[derive(Serialize)]
pub struct MapResponse {
    pub markers: Vec<MapMarker>,
    /// Events left off the map (not geocoded or outside France).
    pub skipped: Vec<String>,
}

/// Geocode every event (sequentially, the geocoder is rate limited) and
/// project it onto the map canvas.
async fn events_map(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Arc<ClientSession>>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapResponse>> {
    if !(query.width > 0.0 && query.height > 0.0) {
        return Err(AppError::BadRequest(
            "Map width and height must be positive".to_string(),
        ));
    }

    let events = session.events.with_state(|s| s.events.clone());
    let geocoder = &state.geocoder;
    let (width, height) = (query.width, query.height);

    let placed: Vec<(String, Option<MapMarker>)> = stream::iter(events)
        .then(|event| async move {
            let marker = geocoder
                .geocode(map::geocoding_query(&event))
                .await
                .and_then(|coords| MapMarker::for_event(&event, coords, width, height));
            (event.id, marker)
        })
        .collect()
        .await;

    let mut markers = Vec::new();
    let mut skipped = Vec::new();
    for (id, marker) in placed {
        match marker {
            Some(marker) => markers.push(marker),
            None => skipped.push(id),
        }
    }
    tracing::debug!(
        markers = markers.len(),
        skipped = skipped.len(),
        "Events map built"
    );

    Ok(Json(MapResponse { markers, skipped }))
}
