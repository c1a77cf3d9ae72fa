// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Editable profile view backing the profile page.
//!
//! The view holds a working copy (the "viewed" profile) derived either from
//! an explicit profile or from the auth store's canonical profile. Edits stay
//! local until [`ProfileView::save`]. Loads by id are fenced: every load takes
//! a ticket and only the most recent ticket may apply its result.

use crate::db::SupabaseDb;
use crate::error::AppError;
use crate::models::{Profile, ProfileField, UserRole};
use crate::stores::{AuthAction, AuthState, AuthStore};
use serde::Serialize;
use tokio::sync::watch;

/// Why a save did not go through.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("no profile to save")]
    NothingToSave,

    #[error("only administrators can edit another user's profile")]
    Forbidden,

    #[error("saving another user's profile needs the database backend")]
    Unsupported,

    #[error("profile save failed: {0}")]
    Backend(AppError),
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NothingToSave => AppError::BadRequest(err.to_string()),
            ProfileError::Forbidden => AppError::Forbidden(err.to_string()),
            ProfileError::Unsupported => AppError::NotConfigured(err.to_string()),
            ProfileError::Backend(inner) => inner,
        }
    }
}

/// Where a successful save landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", content = "profile", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// Own profile, written into the auth store.
    Store,
    /// Another user's profile, upserted; carries the stored row.
    Backend(Profile),
}

/// Fencing token for [`ProfileView::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Serializable view state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSnapshot {
    pub profile: Option<Profile>,
    pub is_dirty: bool,
    pub is_loading: bool,
}

pub struct ProfileView {
    store: AuthStore,
    updates: watch::Receiver<AuthState>,
    follows_store: bool,
    canonical_seen: Option<Profile>,
    viewed: Option<Profile>,
    is_loading: bool,
    latest_load: u64,
}

impl ProfileView {
    /// With `initial`, the view shows that profile and ignores later store
    /// changes. Without it, the view mirrors the store's profile.
    pub fn new(store: AuthStore, initial: Option<Profile>) -> Self {
        let mut updates = store.subscribe();
        let canonical = updates.borrow_and_update().profile.clone();
        let follows_store = initial.is_none();
        let viewed = initial.or_else(|| canonical.clone());

        Self {
            store,
            updates,
            follows_store,
            canonical_seen: canonical,
            viewed,
            is_loading: false,
            latest_load: 0,
        }
    }

    /// Pull in a changed store profile when following the store.
    pub fn sync(&mut self) {
        if !self.updates.has_changed().unwrap_or(false) {
            return;
        }
        let canonical = self.updates.borrow_and_update().profile.clone();
        if canonical == self.canonical_seen {
            return;
        }
        if self.follows_store {
            self.viewed = canonical.clone();
        }
        self.canonical_seen = canonical;
    }

    pub fn viewed_profile(&mut self) -> Option<&Profile> {
        self.sync();
        self.viewed.as_ref()
    }

    /// Whether the working copy differs from the store's profile.
    pub fn is_dirty(&mut self) -> bool {
        self.sync();
        self.viewed != self.canonical()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn snapshot(&mut self) -> ProfileSnapshot {
        let is_dirty = self.is_dirty();
        ProfileSnapshot {
            profile: self.viewed.clone(),
            is_dirty,
            is_loading: self.is_loading,
        }
    }

    /// Replace one attribute of the working copy, starting from an empty
    /// profile when nothing is viewed yet.
    pub fn set_field(&mut self, field: ProfileField) {
        self.sync();
        self.viewed.get_or_insert_with(Profile::default).apply(field);
    }

    /// Discard local edits.
    pub fn reset(&mut self) {
        self.sync();
        self.viewed = self.canonical();
    }

    /// Persist the working copy.
    ///
    /// The signed-in user's own profile goes straight into the auth store.
    /// Anyone else's profile is upserted through the backend, which requires
    /// the admin role.
    pub async fn save(&mut self, db: &SupabaseDb) -> Result<SaveOutcome, ProfileError> {
        self.sync();
        let Some(profile) = self.viewed.clone() else {
            return Err(ProfileError::NothingToSave);
        };

        let (own_id, role, token) = self.store.with_state(|s| {
            (
                s.profile.as_ref().map(|p| p.id.clone()),
                s.role,
                s.access_token().map(str::to_string),
            )
        });

        if own_id.as_deref() == Some(profile.id.as_str()) {
            self.store.dispatch(AuthAction::SetProfile(Some(profile)));
            self.sync();
            return Ok(SaveOutcome::Store);
        }

        if role != UserRole::Admin {
            tracing::warn!(profile_id = %profile.id, "Non-admin tried to save another profile");
            return Err(ProfileError::Forbidden);
        }
        if !db.is_configured() {
            return Err(ProfileError::Unsupported);
        }

        self.is_loading = true;
        let result = db.upsert_profile(&profile, token.as_deref()).await;
        self.is_loading = false;

        match result {
            Ok(row) => {
                tracing::info!(profile_id = %row.id, "Profile saved");
                self.viewed = Some(row.clone());
                Ok(SaveOutcome::Backend(row))
            }
            Err(AppError::NotConfigured(_)) => Err(ProfileError::Unsupported),
            Err(e) => {
                tracing::error!(profile_id = %profile.id, error = %e, "Profile save failed");
                Err(ProfileError::Backend(e))
            }
        }
    }

    /// Start a load; the returned ticket supersedes all earlier ones.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.sync();
        self.latest_load += 1;
        self.is_loading = true;
        LoadTicket(self.latest_load)
    }

    /// Apply a load result. Returns `false` (and changes nothing) when a
    /// newer load has started since `ticket` was issued.
    ///
    /// A missing row or any fetch error shows the placeholder profile.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        id: &str,
        result: Result<Option<Profile>, AppError>,
    ) -> bool {
        if ticket.0 != self.latest_load {
            tracing::debug!(profile_id = id, "Discarding stale profile load");
            return false;
        }
        self.sync();

        let profile = match result {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::debug!(profile_id = id, "No profile row, using placeholder");
                Profile::placeholder(id)
            }
            Err(AppError::NotConfigured(_)) => Profile::placeholder(id),
            Err(e) => {
                tracing::error!(profile_id = id, error = %e, "Error loading profile");
                Profile::placeholder(id)
            }
        };

        self.viewed = Some(profile);
        self.is_loading = false;
        true
    }

    /// Access token of the signed-in user, for backend reads.
    pub fn access_token(&self) -> Option<String> {
        self.store
            .with_state(|s| s.access_token().map(str::to_string))
    }

    /// Load a profile by id and show it.
    pub async fn load_by_id(&mut self, id: &str, db: &SupabaseDb) {
        let ticket = self.begin_load();
        let token = self.access_token();
        let result = db.fetch_profile(id, token.as_deref()).await;
        self.finish_load(ticket, id, result);
    }

    fn canonical(&self) -> Option<Profile> {
        self.store.with_state(|s| s.profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jean() -> Profile {
        Profile {
            id: "u1".into(),
            email: "jean@example.com".into(),
            full_name: Some("Jean Dupont".into()),
            ..Default::default()
        }
    }

    fn signed_in_store() -> AuthStore {
        let store = AuthStore::default();
        store.dispatch(AuthAction::SetProfile(Some(jean())));
        store
    }

    #[test]
    fn test_follows_store_by_default() {
        let store = signed_in_store();
        let mut view = ProfileView::new(store.clone(), None);
        assert_eq!(view.viewed_profile(), Some(&jean()));
        assert!(!view.is_dirty());

        let mut renamed = jean();
        renamed.full_name = Some("Jean D.".into());
        store.dispatch(AuthAction::SetProfile(Some(renamed.clone())));
        assert_eq!(view.viewed_profile(), Some(&renamed));
    }

    #[test]
    fn test_explicit_profile_ignores_store() {
        let store = signed_in_store();
        let other = Profile::placeholder("u2");
        let mut view = ProfileView::new(store.clone(), Some(other.clone()));
        assert!(view.is_dirty());

        store.dispatch(AuthAction::SetProfile(None));
        assert_eq!(view.viewed_profile(), Some(&other));
    }

    #[test]
    fn test_unrelated_store_change_keeps_edits() {
        let store = signed_in_store();
        let mut view = ProfileView::new(store.clone(), None);
        view.set_field(ProfileField::FullName(Some("Edited".into())));

        store.dispatch(AuthAction::SetLoading(false));
        assert_eq!(
            view.viewed_profile().and_then(|p| p.full_name.as_deref()),
            Some("Edited")
        );
    }

    #[test]
    fn test_edits_then_reset_match_store() {
        let mut view = ProfileView::new(signed_in_store(), None);
        view.set_field(ProfileField::Email("x@y.z".into()));
        view.set_field(ProfileField::AvatarUrl(Some("https://a/b.png".into())));
        assert!(view.is_dirty());

        view.reset();
        assert!(!view.is_dirty());
        assert_eq!(view.viewed_profile(), Some(&jean()));
    }

    #[test]
    fn test_dirty_tracks_serialized_difference() {
        let mut view = ProfileView::new(signed_in_store(), None);
        let edits = [
            ProfileField::FullName(Some("Jean Dupont".into())),
            ProfileField::FirstName(Some("Jean".into())),
            ProfileField::FirstName(None),
            ProfileField::Email("other@example.com".into()),
            ProfileField::Email("jean@example.com".into()),
        ];
        let canonical = serde_json::to_string(&jean()).unwrap();
        for edit in edits {
            view.set_field(edit);
            let viewed = serde_json::to_string(view.viewed_profile().unwrap()).unwrap();
            assert_eq!(view.is_dirty(), viewed != canonical);
        }
    }

    #[test]
    fn test_set_field_without_profile_creates_one() {
        let mut view = ProfileView::new(AuthStore::default(), None);
        assert!(view.viewed_profile().is_none());
        view.set_field(ProfileField::FullName(Some("Nouveau".into())));
        let profile = view.viewed_profile().unwrap();
        assert_eq!(profile.id, "");
        assert_eq!(profile.full_name.as_deref(), Some("Nouveau"));
    }

    #[tokio::test]
    async fn test_save_own_profile_updates_store() {
        let store = signed_in_store();
        let mut view = ProfileView::new(store.clone(), None);
        view.set_field(ProfileField::FullName(Some("Jean-Pierre".into())));

        let outcome = view.save(&SupabaseDb::new_unconfigured()).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Store);
        assert_eq!(store.snapshot().profile, view.viewed_profile().cloned());
        assert!(!view.is_dirty());
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_save_nothing() {
        let mut view = ProfileView::new(AuthStore::default(), None);
        let err = view.save(&SupabaseDb::new_unconfigured()).await.unwrap_err();
        assert!(matches!(err, ProfileError::NothingToSave));
    }

    #[tokio::test]
    async fn test_save_other_profile_requires_admin() {
        let store = signed_in_store();
        let mut view = ProfileView::new(store.clone(), Some(Profile::placeholder("u2")));

        let err = view.save(&SupabaseDb::new_unconfigured()).await.unwrap_err();
        assert!(matches!(err, ProfileError::Forbidden));

        store.dispatch(AuthAction::SetRole(UserRole::Admin));
        let err = view.save(&SupabaseDb::new_unconfigured()).await.unwrap_err();
        assert!(matches!(err, ProfileError::Unsupported));
        assert!(!view.is_loading());
        assert_eq!(store.snapshot().profile, Some(jean()));
    }

    #[tokio::test]
    async fn test_load_without_backend_shows_placeholder() {
        let mut view = ProfileView::new(AuthStore::default(), None);
        view.load_by_id("42", &SupabaseDb::new_unconfigured()).await;

        let value = serde_json::to_value(view.viewed_profile().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "42",
                "email": "",
                "full_name": "Utilisateur 42",
                "avatar_url": null
            })
        );
        assert!(!view.is_loading());
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut view = ProfileView::new(AuthStore::default(), None);
        let first = view.begin_load();
        let second = view.begin_load();

        let newer = Profile::placeholder("b");
        assert!(view.finish_load(second, "b", Ok(Some(newer.clone()))));
        assert!(!view.is_loading());

        assert!(!view.finish_load(first, "a", Ok(Some(Profile::placeholder("a")))));
        assert_eq!(view.viewed_profile(), Some(&newer));
    }

    #[test]
    fn test_stale_completion_keeps_loading_flag() {
        let mut view = ProfileView::new(AuthStore::default(), None);
        let first = view.begin_load();
        let _second = view.begin_load();

        assert!(!view.finish_load(first, "a", Err(AppError::Backend("boom".into()))));
        assert!(view.is_loading());
        assert!(view.viewed_profile().is_none());
    }

    #[test]
    fn test_loaded_profile_survives_earlier_store_change() {
        let store = AuthStore::default();
        let mut view = ProfileView::new(store.clone(), None);
        let ticket = view.begin_load();
        store.dispatch(AuthAction::SetProfile(Some(jean())));

        let other = Profile::placeholder("u2");
        view.finish_load(ticket, "u2", Ok(Some(other.clone())));
        assert_eq!(view.viewed_profile(), Some(&other));
        assert!(view.is_dirty());
    }

    #[test]
    fn test_backend_error_degrades_to_placeholder() {
        let mut view = ProfileView::new(AuthStore::default(), None);
        let ticket = view.begin_load();
        view.finish_load(ticket, "7", Err(AppError::Backend("HTTP 500".into())));
        assert_eq!(view.viewed_profile(), Some(&Profile::placeholder("7")));
    }
}
