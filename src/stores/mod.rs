// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Observable client state stores.
//!
//! Each store owns one state value behind a `watch` channel. State only
//! changes through [`Store::dispatch`], which runs the state's reducer and
//! then its registered effects (persistence, logging) on the new snapshot.

pub mod auth;
pub mod events;
pub mod language;

pub use auth::{AuthAction, AuthState, AuthStore};
pub use events::{EventsAction, EventsState, EventsStore};
pub use language::{LanguageAction, LanguageState, LanguageStore};

use std::sync::Arc;
use tokio::sync::watch;

/// State with typed mutation entry points.
pub trait Reducer: Clone + Send + Sync + 'static {
    type Action;

    fn reduce(&mut self, action: Self::Action);
}

type Effect<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Cheaply cloneable handle; clones share the same state.
pub struct Store<S: Reducer> {
    sender: Arc<watch::Sender<S>>,
    effects: Arc<Vec<Effect<S>>>,
}

impl<S: Reducer> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
            effects: Arc::clone(&self.effects),
        }
    }
}

impl<S: Reducer> Store<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
            effects: Arc::new(Vec::new()),
        }
    }

    /// Register a side effect run after every dispatch. Must be called
    /// before the store is shared; effects must not dispatch.
    pub fn with_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.effects).push(Arc::new(effect));
        self
    }

    /// Apply an action and notify subscribers.
    pub fn dispatch(&self, action: S::Action) {
        self.sender.send_modify(|state| state.reduce(action));
        if self.effects.is_empty() {
            return;
        }
        let state = self.snapshot();
        for effect in self.effects.iter() {
            effect(&state);
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Read the state without cloning it.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        f(&self.sender.borrow())
    }

    /// Receiver notified on every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }
}

impl<S: Reducer + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
