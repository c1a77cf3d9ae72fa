// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Authentication store: session, user, canonical profile and role.

use super::{Reducer, Store};
use crate::models::{AuthUser, Profile, Session, UserRole};
use crate::storage::ScopedStorage;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Storage key for the persisted subset.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

pub type AuthStore = Store<AuthState>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    #[serde(skip)]
    pub session: Option<Session>,
    pub profile: Option<Profile>,
    pub role: UserRole,
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            session: None,
            profile: None,
            role: UserRole::User,
            is_loading: true,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    SetUser(Option<AuthUser>),
    SetSession(Option<Session>),
    SetProfile(Option<Profile>),
    SetRole(UserRole),
    SetLoading(bool),
    /// Auth-state-change notification: session and user move together.
    SessionChanged(Option<Session>),
    Logout,
}

impl Reducer for AuthState {
    type Action = AuthAction;

    fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::SetUser(user) => self.user = user,
            AuthAction::SetSession(session) => self.session = session,
            AuthAction::SetProfile(profile) => self.profile = profile,
            AuthAction::SetRole(role) => self.role = role,
            AuthAction::SetLoading(loading) => self.is_loading = loading,
            AuthAction::SessionChanged(session) => {
                self.user = session.as_ref().map(|s| s.user.clone());
                self.session = session;
                self.is_loading = false;
            }
            AuthAction::Logout => {
                self.user = None;
                self.session = None;
                self.profile = None;
                self.role = UserRole::User;
            }
        }
    }
}

/// The only part of the auth state that survives a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub role: UserRole,
}

impl AuthStore {
    /// Auth store that restores and persists the role in `storage`.
    pub fn persisted(storage: ScopedStorage) -> Self {
        let restored: PersistedAuth = storage.get(AUTH_STORAGE_KEY).unwrap_or_default();
        let initial = AuthState {
            role: restored.role,
            ..AuthState::default()
        };

        let last = Mutex::new(restored);
        Store::new(initial).with_effect(move |state: &AuthState| {
            let next = PersistedAuth { role: state.role };
            let Ok(mut previous) = last.lock() else {
                return;
            };
            if *previous != next {
                storage.set(AUTH_STORAGE_KEY, &next);
                *previous = next;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{AppMetadata, UserMetadata};
    use crate::storage::LocalStorage;

    fn session(id: &str) -> Session {
        Session {
            access_token: "token".into(),
            refresh_token: "refresh".into(),
            token_type: "bearer".into(),
            expires_in: 3600,
            user: AuthUser {
                id: id.into(),
                email: Some("jean@example.com".into()),
                user_metadata: UserMetadata::default(),
                app_metadata: AppMetadata::default(),
            },
        }
    }

    #[test]
    fn test_session_changed_sets_user() {
        let store = AuthStore::default();
        assert!(!store.snapshot().is_authenticated());
        assert!(store.snapshot().is_loading);

        store.dispatch(AuthAction::SessionChanged(Some(session("u1"))));

        let state = store.snapshot();
        assert!(state.is_authenticated());
        assert!(!state.is_loading);
        assert_eq!(state.access_token(), Some("token"));
    }

    #[test]
    fn test_logout_clears_identity_and_role() {
        let store = AuthStore::default();
        store.dispatch(AuthAction::SessionChanged(Some(session("u1"))));
        store.dispatch(AuthAction::SetRole(UserRole::Admin));
        store.dispatch(AuthAction::SetProfile(Some(Profile::placeholder("u1"))));

        store.dispatch(AuthAction::Logout);

        let state = store.snapshot();
        assert!(!state.is_authenticated());
        assert!(state.session.is_none());
        assert!(state.profile.is_none());
        assert_eq!(state.role, UserRole::User);
    }

    #[test]
    fn test_only_role_is_persisted() {
        let storage = LocalStorage::in_memory();
        let store = AuthStore::persisted(storage.scoped("s1"));
        store.dispatch(AuthAction::SessionChanged(Some(session("u1"))));
        store.dispatch(AuthAction::SetRole(UserRole::Admin));

        let restored = AuthStore::persisted(storage.scoped("s1")).snapshot();
        assert_eq!(restored.role, UserRole::Admin);
        assert!(!restored.is_authenticated());

        let raw: serde_json::Value = storage.get("s1:auth-storage").unwrap();
        assert_eq!(raw, serde_json::json!({"role": "admin"}));
    }
}
