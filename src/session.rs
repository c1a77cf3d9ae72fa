// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Per-browser client state.
//!
//! Every browser gets a [`ClientSession`] holding its own stores, profile
//! view and vehicle list. Sessions are keyed by a random id carried in a
//! signed cookie and live in the [`SessionRegistry`].
//!
//! Idle sessions are evicted from memory. Role and language are persisted,
//! so a returning cookie restores them; the in-memory event list, vehicles
//! and profile edits start over.

use crate::models::Vehicle;
use crate::profile::ProfileView;
use crate::services::catalog;
use crate::storage::LocalStorage;
use crate::stores::{AuthStore, EventsState, EventsStore, LanguageStore};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

pub struct ClientSession {
    pub id: String,
    pub auth: AuthStore,
    pub events: EventsStore,
    pub language: LanguageStore,
    pub profile: Mutex<ProfileView>,
    pub vehicles: RwLock<Vec<Vehicle>>,
    /// Unix millis of the last request bound to this session.
    last_seen: AtomicI64,
}

impl ClientSession {
    /// Fresh stores for `id`; role and language are restored from storage.
    pub fn new(id: &str, storage: &LocalStorage) -> Self {
        let scoped = storage.scoped(id);
        let auth = AuthStore::persisted(scoped.clone());
        let events = EventsStore::new(EventsState::seeded(catalog::seed_events()));
        let language = LanguageStore::persisted(scoped);
        let profile = ProfileView::new(auth.clone(), None);

        Self {
            id: id.to_string(),
            auth,
            events,
            language,
            profile: Mutex::new(profile),
            vehicles: RwLock::new(catalog::seed_vehicles()),
            last_seen: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }

    pub fn touch(&self, now: DateTime<Utc>) {
        self.last_seen
            .fetch_max(now.timestamp_millis(), Ordering::Relaxed);
    }

    pub fn last_seen_millis(&self) -> i64 {
        self.last_seen.load(Ordering::Relaxed)
    }
}

#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<String, Arc<ClientSession>>>,
    storage: LocalStorage,
    rng: SystemRandom,
}

impl SessionRegistry {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            storage,
            rng: SystemRandom::new(),
        }
    }

    /// Random 128-bit session id, hex encoded.
    pub fn new_session_id(&self) -> anyhow::Result<String> {
        let mut bytes = [0u8; 16];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| anyhow::anyhow!("Failed to generate session id"))?;
        Ok(hex::encode(bytes))
    }

    /// Session for `id`, created (and restored from storage) on first use.
    /// Marks the session as seen now.
    pub fn get_or_create(&self, id: &str) -> Arc<ClientSession> {
        let session = match self.sessions.get(id) {
            Some(existing) => Arc::clone(existing.value()),
            None => {
                let entry = self.sessions.entry(id.to_string()).or_insert_with(|| {
                    tracing::debug!(session_id = id, "Client session created");
                    Arc::new(ClientSession::new(id, &self.storage))
                });
                Arc::clone(entry.value())
            }
        };
        session.touch(Utc::now());
        session
    }

    /// Drop sessions not seen for longer than `max_idle` before `now`.
    /// Returns how many were removed.
    pub fn reap_idle(&self, max_idle: Duration, now: DateTime<Utc>) -> usize {
        let max_idle_ms = i64::try_from(max_idle.as_millis()).unwrap_or(i64::MAX);
        let cutoff = now.timestamp_millis().saturating_sub(max_idle_ms);
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.last_seen_millis() >= cutoff);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = self.sessions.len(),
                "Evicted idle client sessions"
            );
        }
        removed
    }

    /// Background task running [`Self::reap_idle`] every `every`.
    pub fn spawn_reaper(&self, every: Duration, max_idle: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                registry.reap_idle(max_idle, Utc::now());
            }
        })
    }

    pub fn get(&self, id: &str) -> Option<Arc<ClientSession>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::models::UserRole;
    use crate::stores::{AuthAction, LanguageAction};

    #[test]
    fn test_session_ids_are_unique_hex() {
        let registry = SessionRegistry::new(LocalStorage::in_memory());
        let a = registry.new_session_id().unwrap();
        let b = registry.new_session_id().unwrap();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_or_create_is_stable() {
        let registry = SessionRegistry::new(LocalStorage::in_memory());
        let first = registry.get_or_create("abc");
        let again = registry.get_or_create("abc");
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(registry.len(), 1);
        assert_eq!(first.events.snapshot().events.len(), 6);
    }

    #[test]
    fn test_persisted_state_survives_a_new_registry() {
        let storage = LocalStorage::in_memory();
        {
            let registry = SessionRegistry::new(storage.clone());
            let session = registry.get_or_create("abc");
            session.auth.dispatch(AuthAction::SetRole(UserRole::Admin));
            session.language.dispatch(LanguageAction::Set(Language::En));
        }

        let restored = SessionRegistry::new(storage).get_or_create("abc");
        assert_eq!(restored.auth.snapshot().role, UserRole::Admin);
        assert_eq!(restored.language.language(), Language::En);
    }

    #[test]
    fn test_idle_sessions_are_reaped() {
        let registry = SessionRegistry::new(LocalStorage::in_memory());
        let stale = registry.get_or_create("stale");
        let fresh = registry.get_or_create("fresh");

        let now = Utc::now();
        stale.touch(now - chrono::Duration::hours(2));
        fresh.touch(now);
        // touch never moves backwards
        assert!(stale.last_seen_millis() > (now - chrono::Duration::hours(1)).timestamp_millis());

        let later = now + chrono::Duration::minutes(90);
        let removed = registry.reap_idle(Duration::from_secs(3600), later);
        assert_eq!(removed, 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_recently_seen_sessions_survive_reaping() {
        let storage = LocalStorage::in_memory();
        let registry = SessionRegistry::new(storage);
        let now = Utc::now();
        registry.get_or_create("a");
        let b = registry.get_or_create("b");
        b.touch(now + chrono::Duration::minutes(50));

        let removed = registry.reap_idle(
            Duration::from_secs(1800),
            now + chrono::Duration::minutes(60),
        );
        assert_eq!(removed, 1);
        assert!(registry.get("a").is_none());
        assert!(registry.get("b").is_some());
    }

    #[tokio::test]
    async fn test_reaper_task_evicts_in_background() {
        let registry = SessionRegistry::new(LocalStorage::in_memory());
        registry.get_or_create("gone");

        let handle = registry.spawn_reaper(Duration::from_millis(10), Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(registry.is_empty());
    }

    #[test]
    fn test_sessions_do_not_share_events() {
        let registry = SessionRegistry::new(LocalStorage::in_memory());
        let a = registry.get_or_create("a");
        let b = registry.get_or_create("b");
        a.events
            .dispatch(crate::stores::EventsAction::DeleteEvent("1".into()));
        assert_eq!(a.events.snapshot().events.len(), 5);
        assert_eq!(b.events.snapshot().events.len(), 6);
    }
}
