// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Events store: ordered in-memory event list plus page filter state.

use super::{Reducer, Store};
use crate::models::{CarEvent, CategoryFilter, EventPatch};
use serde::Serialize;

pub type EventsStore = Store<EventsState>;

/// Insertion order is display order. Ids are not checked for uniqueness.
/// After any add, update or delete, `featured_events` is rebuilt from the
/// events flagged `is_featured`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventsState {
    pub events: Vec<CarEvent>,
    pub featured_events: Vec<CarEvent>,
    pub selected_category: CategoryFilter,
    pub is_loading: bool,
}

#[derive(Debug, Clone)]
pub enum EventsAction {
    SetEvents(Vec<CarEvent>),
    SetFeaturedEvents(Vec<CarEvent>),
    SelectCategory(CategoryFilter),
    SetLoading(bool),
    AddEvent(CarEvent),
    UpdateEvent { id: String, patch: EventPatch },
    DeleteEvent(String),
}

impl Reducer for EventsState {
    type Action = EventsAction;

    fn reduce(&mut self, action: EventsAction) {
        match action {
            EventsAction::SetEvents(events) => self.events = events,
            EventsAction::SetFeaturedEvents(events) => self.featured_events = events,
            EventsAction::SelectCategory(category) => self.selected_category = category,
            EventsAction::SetLoading(loading) => self.is_loading = loading,
            EventsAction::AddEvent(event) => {
                self.events.push(event);
                self.refresh_featured();
            }
            EventsAction::UpdateEvent { id, patch } => {
                for event in self.events.iter_mut().filter(|e| e.id == id) {
                    patch.apply_to(event);
                }
                self.refresh_featured();
            }
            EventsAction::DeleteEvent(id) => {
                self.events.retain(|e| e.id != id);
                self.refresh_featured();
            }
        }
    }
}

impl EventsState {
    /// Seeded state: the given catalog with its featured subset.
    pub fn seeded(events: Vec<CarEvent>) -> Self {
        let mut state = Self {
            events,
            ..Self::default()
        };
        state.refresh_featured();
        state
    }

    fn refresh_featured(&mut self) {
        self.featured_events = self.events.iter().filter(|e| e.is_featured).cloned().collect();
    }

    pub fn find(&self, id: &str) -> Option<&CarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events in the selected category whose title or location contains
    /// `search`, case-insensitively.
    pub fn filtered(&self, search: &str) -> Vec<CarEvent> {
        let needle = search.trim().to_lowercase();
        self.events
            .iter()
            .filter(|e| self.selected_category.matches(e.category))
            .filter(|e| {
                needle.is_empty()
                    || e.title.to_lowercase().contains(&needle)
                    || e.location.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}
