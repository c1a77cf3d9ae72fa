// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Car event model and its create/update payloads.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Kind of automotive event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    #[default]
    Meeting,
    Race,
    Salon,
    Rally,
    Auction,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        EventCategory::Meeting,
        EventCategory::Race,
        EventCategory::Salon,
        EventCategory::Rally,
        EventCategory::Auction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "meeting",
            EventCategory::Race => "race",
            EventCategory::Salon => "salon",
            EventCategory::Rally => "rally",
            EventCategory::Auction => "auction",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category filter on the events page; `all` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(EventCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: EventCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        EventCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .map(CategoryFilter::Only)
            .ok_or_else(|| format!("unknown event category: {}", s))
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

/// An event listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CarEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Start date (YYYY-MM-DD)
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// City/venue shown on cards
    pub location: String,
    /// Street address, used for geocoding
    pub address: String,
    pub image_url: String,
    pub category: EventCategory,
    pub organizer_id: String,
    pub organizer_name: String,
    pub current_participants: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub created_at: String,
}

/// Partial update merged into an existing event; absent fields are untouched.
/// The optional event fields (`end_date`, `max_participants`, `price`) are
/// cleared by an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<String>>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<EventCategory>,
    pub organizer_id: Option<String>,
    pub organizer_name: Option<String>,
    pub current_participants: Option<u32>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<Option<u32>>,
    pub is_featured: Option<bool>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<f64>>,
    pub created_at: Option<String>,
}

/// A present key (even `null`) is `Some`; a missing key falls back to the
/// field default, `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl EventPatch {
    /// Merge the set fields into `event`.
    pub fn apply_to(&self, event: &mut CarEvent) {
        fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        merge(&mut event.title, &self.title);
        merge(&mut event.description, &self.description);
        merge(&mut event.date, &self.date);
        merge(&mut event.location, &self.location);
        merge(&mut event.address, &self.address);
        merge(&mut event.image_url, &self.image_url);
        merge(&mut event.category, &self.category);
        merge(&mut event.organizer_id, &self.organizer_id);
        merge(&mut event.organizer_name, &self.organizer_name);
        merge(&mut event.current_participants, &self.current_participants);
        merge(&mut event.is_featured, &self.is_featured);
        merge(&mut event.created_at, &self.created_at);
        merge(&mut event.end_date, &self.end_date);
        merge(&mut event.max_participants, &self.max_participants);
        merge(&mut event.price, &self.price);
    }
}

/// Body of the create-event form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewEventForm {
    #[validate(custom(function = "required"))]
    pub title: String,
    pub description: String,
    #[validate(custom(function = "required"))]
    pub date: String,
    pub end_date: Option<String>,
    #[validate(custom(function = "required"))]
    pub location: String,
    pub address: String,
    pub image_url: String,
    pub category: EventCategory,
    pub max_participants: Option<u32>,
    pub price: Option<f64>,
    pub is_featured: bool,
}

impl NewEventForm {
    /// Build the stored event. Organizer defaults to the anonymous local user.
    pub fn into_event(
        self,
        id: String,
        organizer: Option<(String, String)>,
        created_at: String,
    ) -> CarEvent {
        let (organizer_id, organizer_name) =
            organizer.unwrap_or_else(|| ("local".to_string(), "Vous".to_string()));
        CarEvent {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            date: self.date,
            end_date: self.end_date.filter(|d| !d.is_empty()),
            location: self.location.trim().to_string(),
            address: self.address,
            image_url: self.image_url,
            category: self.category,
            organizer_id,
            organizer_name,
            current_participants: 0,
            max_participants: self.max_participants,
            is_featured: self.is_featured,
            price: self.price,
            created_at,
        }
    }
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message("Veuillez remplir les champs obligatoires.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_wire_format() {
        let all: CategoryFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all, CategoryFilter::All);

        let race: CategoryFilter = serde_json::from_str("\"race\"").unwrap();
        assert_eq!(race, CategoryFilter::Only(EventCategory::Race));

        assert_eq!(serde_json::to_string(&CategoryFilter::All).unwrap(), "\"all\"");
        assert!(serde_json::from_str::<CategoryFilter>("\"drift\"").is_err());
    }

    #[test]
    fn test_new_event_requires_title_date_location() {
        let form = NewEventForm {
            title: "Track day".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("location"));
        assert!(!fields.contains_key("title"));
    }

    #[test]
    fn test_new_event_defaults_to_local_organizer() {
        let form = NewEventForm {
            title: " Cars & Coffee ".into(),
            date: "2024-05-01".into(),
            location: "Lyon".into(),
            ..Default::default()
        };
        let event = form.into_event("1".into(), None, "2024-01-01T00:00:00Z".into());
        assert_eq!(event.title, "Cars & Coffee");
        assert_eq!(event.organizer_id, "local");
        assert_eq!(event.organizer_name, "Vous");
        assert_eq!(event.category, EventCategory::Meeting);
        assert_eq!(event.current_participants, 0);
    }

    #[test]
    fn test_blank_title_and_location_are_rejected() {
        let form = NewEventForm {
            title: "   ".into(),
            date: "2024-05-01".into(),
            location: "\t".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("location"));
        assert!(!fields.contains_key("date"));
    }

    #[test]
    fn test_patch_null_clears_optional_fields() {
        let mut event = NewEventForm {
            title: "Vente".into(),
            date: "2024-04-20".into(),
            end_date: Some("2024-04-21".into()),
            location: "Lyon".into(),
            max_participants: Some(200),
            price: Some(25.0),
            ..Default::default()
        }
        .into_event("5".into(), None, "2024-01-01T00:00:00Z".into());

        let untouched: EventPatch = serde_json::from_str(r#"{"title":"Vente 2"}"#).unwrap();
        untouched.apply_to(&mut event);
        assert_eq!(event.title, "Vente 2");
        assert_eq!(event.price, Some(25.0));
        assert_eq!(event.end_date.as_deref(), Some("2024-04-21"));

        let cleared: EventPatch =
            serde_json::from_str(r#"{"price":null,"end_date":null,"max_participants":null}"#)
                .unwrap();
        cleared.apply_to(&mut event);
        assert_eq!(event.price, None);
        assert_eq!(event.end_date, None);
        assert_eq!(event.max_participants, None);
        assert_eq!(event.title, "Vente 2");

        let set: EventPatch = serde_json::from_str(r#"{"max_participants":50}"#).unwrap();
        set.apply_to(&mut event);
        assert_eq!(event.max_participants, Some(50));
    }
}
