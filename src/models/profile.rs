// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Profile row as stored in the `profiles` table.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One profile per user. `first_name`/`last_name` are only sent when set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// Stand-in shown when no backend record is available for `id`.
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            email: String::new(),
            full_name: Some(format!("Utilisateur {}", id)),
            first_name: None,
            last_name: None,
            avatar_url: None,
        }
    }

    /// Name shown in headers: full name, else first + last, else "Utilisateur".
    pub fn display_name(&self) -> String {
        if let Some(name) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            "Utilisateur".to_string()
        } else {
            joined
        }
    }

    /// Avatar fallback letters, e.g. "Jean Dupont" -> "JD".
    pub fn initials(&self) -> String {
        let initials: String = self
            .full_name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    /// Replace a single attribute.
    pub fn apply(&mut self, field: ProfileField) {
        match field {
            ProfileField::Email(v) => self.email = v,
            ProfileField::FullName(v) => self.full_name = v,
            ProfileField::FirstName(v) => self.first_name = v,
            ProfileField::LastName(v) => self.last_name = v,
            ProfileField::AvatarUrl(v) => self.avatar_url = v,
        }
    }
}

/// A single-attribute edit, `{"field": "full_name", "value": "..."}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProfileField {
    Email(String),
    FullName(Option<String>),
    FirstName(Option<String>),
    LastName(Option<String>),
    AvatarUrl(Option<String>),
}

/// Role of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Parse the role claim from backend app metadata; unknown values are `User`.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(role) if role.eq_ignore_ascii_case("admin") => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_serialization() {
        let value = serde_json::to_value(Profile::placeholder("42")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "42",
                "email": "",
                "full_name": "Utilisateur 42",
                "avatar_url": null
            })
        );
    }

    #[test]
    fn test_display_name_falls_back_to_parts() {
        let profile = Profile {
            id: "1".into(),
            first_name: Some("Jean".into()),
            last_name: Some("Dupont".into()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "Jean Dupont");
        assert_eq!(Profile::default().display_name(), "Utilisateur");
    }

    #[test]
    fn test_initials() {
        let profile = Profile {
            full_name: Some("jean pierre dupont".into()),
            ..Default::default()
        };
        assert_eq!(profile.initials(), "JPD");
        assert_eq!(Profile::default().initials(), "U");
    }

    #[test]
    fn test_field_wire_format() {
        let field: ProfileField =
            serde_json::from_str(r#"{"field":"avatar_url","value":null}"#).unwrap();
        assert_eq!(field, ProfileField::AvatarUrl(None));
    }

    #[test]
    fn test_role_from_claim() {
        assert_eq!(UserRole::from_claim(Some("ADMIN")), UserRole::Admin);
        assert_eq!(UserRole::from_claim(Some("editor")), UserRole::User);
        assert_eq!(UserRole::from_claim(None), UserRole::User);
    }
}
