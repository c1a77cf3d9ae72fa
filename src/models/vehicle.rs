// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Vehicles listed on a profile (session-local only).

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Add/edit vehicle form. `year` arrives as typed text.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VehicleForm {
    #[validate(custom(function = "not_blank"))]
    pub brand: String,
    #[validate(custom(function = "not_blank"))]
    pub model: String,
    #[validate(custom(function = "numeric_year"))]
    pub year: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"))]
    pub kind: String,
}

impl VehicleForm {
    /// Build a vehicle; call after `validate()`.
    pub fn into_vehicle(self, id: String) -> Option<Vehicle> {
        let year = self.year.trim().parse().ok()?;
        Some(Vehicle {
            id,
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year,
            kind: self.kind.trim().to_string(),
        })
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Champ obligatoire".into()));
    }
    Ok(())
}

fn numeric_year(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    value
        .trim()
        .parse::<u16>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("year").with_message("Année invalide".into()))
}
