// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Business logic services.

pub mod auth;
pub mod catalog;
pub mod geocode;
pub mod map;

pub use auth::{AuthFailure, AuthFlow, LoginForm, RegisterForm};
pub use geocode::{Coordinates, GeocodeService};
pub use map::MapMarker;
