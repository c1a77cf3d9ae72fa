// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Middleware modules (session binding, security headers).

pub mod auth;
pub mod security;

pub use auth::{attach_session, require_auth};
