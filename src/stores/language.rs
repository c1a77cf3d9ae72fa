// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Language store: active UI language, persisted per session.

use super::{Reducer, Store};
use crate::i18n::Language;
use crate::storage::ScopedStorage;
use serde::{Deserialize, Serialize};

pub const LANGUAGE_STORAGE_KEY: &str = "language-storage";

pub type LanguageStore = Store<LanguageState>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageState {
    pub language: Language,
}

#[derive(Debug, Clone, Copy)]
pub enum LanguageAction {
    Set(Language),
    Toggle,
}

impl Reducer for LanguageState {
    type Action = LanguageAction;

    fn reduce(&mut self, action: LanguageAction) {
        self.language = match action {
            LanguageAction::Set(language) => language,
            LanguageAction::Toggle => self.language.toggled(),
        };
    }
}

impl LanguageStore {
    /// Restore the saved language (French by default) and persist changes.
    pub fn persisted(storage: ScopedStorage) -> Self {
        let initial: LanguageState = storage.get(LANGUAGE_STORAGE_KEY).unwrap_or_default();

        Store::new(initial).with_effect(move |state: &LanguageState| {
            tracing::debug!(language = state.language.code(), "UI language changed");
            storage.set(LANGUAGE_STORAGE_KEY, state);
        })
    }

    pub fn language(&self) -> Language {
        self.with_state(|s| s.language)
    }
}
