// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Home, blog and dashboard pages.

use crate::i18n::{t, Language};
use crate::models::{BlogCategory, BlogPost, CarEvent, UserRole};
use crate::services::catalog::{
    self, AdAnalytics, AdPosition, AdSlot, QuickAction, StatCard, UserEvent,
};
use crate::session::ClientSession;
use crate::AppState;
use axum::{extract::Query, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Posts shown on the home page.
const HOME_POST_COUNT: usize = 3;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/home", get(home))
        .route("/api/blog", get(blog))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard", get(dashboard))
}

#[derive(Serialize)]
pub struct HomeResponse {
    pub language: Language,
    pub featured_events: Vec<CarEvent>,
    pub latest_posts: Vec<BlogPost>,
    pub stats: Vec<StatCard>,
    pub ad: AdSlot,
}

async fn home(Extension(session): Extension<Arc<ClientSession>>) -> Json<HomeResponse> {
    let featured_events = session.events.with_state(|s| s.featured_events.clone());
    let latest_posts = catalog::blog_posts()
        .into_iter()
        .take(HOME_POST_COUNT)
        .collect();

    Json(HomeResponse {
        language: session.language.language(),
        featured_events,
        latest_posts,
        stats: catalog::home_stats(),
        ad: catalog::ad_slot(AdPosition::Header),
    })
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct BlogQuery {
    pub category: BlogCategory,
    pub q: String,
}

#[derive(Serialize)]
pub struct CategoryOption<C> {
    pub value: C,
    pub label: String,
}

#[derive(Serialize)]
pub struct BlogResponse {
    pub posts: Vec<BlogPost>,
    pub selected_category: BlogCategory,
    pub categories: Vec<CategoryOption<BlogCategory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub ad: AdSlot,
}

const BLOG_CATEGORIES: [(BlogCategory, &str); 5] = [
    (BlogCategory::All, "blog.categories.all"),
    (BlogCategory::News, "blog.categories.news"),
    (BlogCategory::Reviews, "blog.categories.reviews"),
    (BlogCategory::Technology, "blog.categories.technology"),
    (BlogCategory::Motorsport, "blog.categories.motorsport"),
];

async fn blog(
    Extension(session): Extension<Arc<ClientSession>>,
    Query(query): Query<BlogQuery>,
) -> Json<BlogResponse> {
    let language = session.language.language();
    let posts: Vec<BlogPost> = catalog::blog_posts()
        .into_iter()
        .filter(|post| post.matches(query.category, query.q.trim()))
        .collect();

    let empty_message = posts.is_empty().then(|| t(language, "blog.noPosts"));
    let categories = BLOG_CATEGORIES
        .iter()
        .map(|(value, key)| CategoryOption {
            value: *value,
            label: t(language, key),
        })
        .collect();

    Json(BlogResponse {
        posts,
        selected_category: query.category,
        categories,
        empty_message,
        ad: catalog::ad_slot(AdPosition::Sidebar),
    })
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub welcome: String,
    pub role: UserRole,
    pub role_label: String,
    pub stats: Vec<StatCard>,
    pub quick_actions: Vec<QuickAction>,
    pub recent_events: Vec<UserEvent>,
    /// Advertising figures, admins only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_analytics: Option<AdAnalytics>,
}

async fn dashboard(
    Extension(session): Extension<Arc<ClientSession>>,
) -> Json<DashboardResponse> {
    let language = session.language.language();
    let (name, role) = session.auth.with_state(|s| {
        let name = match (&s.profile, &s.user) {
            (Some(profile), _) => profile.display_name(),
            (None, Some(user)) => user
                .user_metadata
                .full_name
                .clone()
                .or_else(|| user.email.clone())
                .unwrap_or_else(|| "Utilisateur".to_string()),
            (None, None) => "Utilisateur".to_string(),
        };
        (name, s.role)
    });

    let role_label = match role {
        UserRole::Admin => t(language, "role.admin"),
        UserRole::User => t(language, "role.user"),
    };

    Json(DashboardResponse {
        welcome: format!("{}, {}", t(language, "dashboard.welcome"), name),
        role,
        role_label,
        stats: catalog::dashboard_stats(),
        quick_actions: catalog::quick_actions(),
        recent_events: catalog::user_events(),
        ad_analytics: (role == UserRole::Admin).then(catalog::ad_analytics),
    })
}
