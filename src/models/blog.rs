// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Blog post model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Blog section; `All` only appears as a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum BlogCategory {
    #[default]
    All,
    News,
    Reviews,
    Technology,
    Motorsport,
}

/// A blog article summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: String,
    pub category: BlogCategory,
    pub author_name: String,
    pub created_at: String,
    pub slug: String,
}

impl BlogPost {
    /// Category filter plus case-insensitive search over title and excerpt.
    pub fn matches(&self, category: BlogCategory, search: &str) -> bool {
        let category_ok = category == BlogCategory::All || self.category == category;
        let needle = search.to_lowercase();
        category_ok
            && (self.title.to_lowercase().contains(&needle)
                || self.excerpt.to_lowercase().contains(&needle))
    }
}
