// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! AutoMeet: automotive events community.
//!
//! This crate holds the client state layer (stores, profile view, backend
//! client, geocoding) and serves it as a JSON API, one endpoint group per
//! page of the front-end.

pub mod config;
pub mod db;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod profile;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
pub mod stores;
pub mod time_utils;

use config::Config;
use db::SupabaseDb;
use services::GeocodeService;
use session::SessionRegistry;
use storage::{LocalStorage, StorageError};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SupabaseDb,
    pub geocoder: GeocodeService,
    pub storage: LocalStorage,
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Wire up storage, backend and geocoder from configuration.
    pub fn from_config(config: Config) -> Result<Self, StorageError> {
        let storage = match &config.storage_path {
            Some(path) => LocalStorage::open(path)?,
            None => LocalStorage::in_memory(),
        };
        let db = SupabaseDb::new(
            config.supabase_url.as_deref(),
            config.supabase_anon_key.as_deref(),
        );
        let geocoder = GeocodeService::new(
            &config.geocoder_url,
            &config.geocoder_user_agent,
            storage.clone(),
        );
        let sessions = SessionRegistry::new(storage.clone());

        Ok(Self {
            config,
            db,
            geocoder,
            storage,
            sessions,
        })
    }
}
