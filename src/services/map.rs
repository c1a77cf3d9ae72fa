// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Map markers: linear lon/lat projection over metropolitan France and
//! Corsica. The projection is approximate and only meant for UI display.

use crate::models::{CarEvent, EventCategory};
use crate::services::geocode::Coordinates;
use geo::{coord, Rect};
use serde::Serialize;

/// Bounding box: lon -5.5..9.5, lat 41.0..51.5.
pub fn france_bounds() -> Rect<f64> {
    Rect::new(coord! { x: -5.5, y: 41.0 }, coord! { x: 9.5, y: 51.5 })
}

pub fn category_color(category: EventCategory) -> &'static str {
    match category {
        EventCategory::Meeting => "#06b6d4",
        EventCategory::Race => "#ef4444",
        EventCategory::Salon => "#f59e0b",
        EventCategory::Rally => "#10b981",
        EventCategory::Auction => "#8b5cf6",
    }
}

/// Canvas position of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Project coordinates onto a `width` x `height` canvas (y grows downward).
/// Points outside the bounding box are `None`.
pub fn project(coords: Coordinates, width: f64, height: f64) -> Option<Point> {
    let bounds = france_bounds();
    let (min, max) = (bounds.min(), bounds.max());
    if coords.lon < min.x || coords.lon > max.x || coords.lat < min.y || coords.lat > max.y {
        return None;
    }
    Some(Point {
        x: (coords.lon - min.x) / bounds.width() * width,
        y: (max.y - coords.lat) / bounds.height() * height,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub event_id: String,
    pub title: String,
    pub category: EventCategory,
    pub color: &'static str,
    pub coords: Coordinates,
    pub position: Point,
}

impl MapMarker {
    pub fn for_event(event: &CarEvent, coords: Coordinates, width: f64, height: f64) -> Option<Self> {
        let position = project(coords, width, height)?;
        Some(Self {
            event_id: event.id.clone(),
            title: event.title.clone(),
            category: event.category,
            color: category_color(event.category),
            coords,
            position,
        })
    }
}

/// Address used for geocoding an event: street address, else location.
pub fn geocoding_query(event: &CarEvent) -> &str {
    if event.address.trim().is_empty() {
        &event.location
    } else {
        &event.address
    }
}
