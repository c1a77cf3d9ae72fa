// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Data models for the application.

pub mod blog;
pub mod event;
pub mod notice;
pub mod profile;
pub mod session;
pub mod vehicle;

pub use blog::{BlogCategory, BlogPost};
pub use event::{CarEvent, CategoryFilter, EventCategory, EventPatch, NewEventForm};
pub use notice::{Notice, NoticeVariant};
pub use profile::{Profile, ProfileField, UserRole};
pub use session::{AuthUser, Session};
pub use vehicle::{Vehicle, VehicleForm};
