// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Client for the hosted auth/database service (Supabase REST API).
//!
//! Provides typed operations for:
//! - Auth (password sign-in, sign-up, user lookup, sign-out)
//! - Profiles (fetch by id, upsert)

use crate::db::tables;
use crate::error::AppError;
use crate::models::{AuthUser, Profile, Session};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Backend handle. `client` is `None` when no URL/key is configured, in
/// which case every operation returns [`AppError::NotConfigured`].
#[derive(Clone)]
pub struct SupabaseDb {
    client: Option<SupabaseClient>,
}

#[derive(Clone)]
struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// Result of a sign-up: a live session when email confirmation is off,
/// otherwise only the pending user.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpData<'a>,
}

#[derive(Serialize)]
struct SignUpData<'a> {
    full_name: &'a str,
}

/// Error body shapes used by the auth and REST endpoints.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

impl SupabaseDb {
    /// Create a backend handle; unconfigured when either setting is absent.
    pub fn new(base_url: Option<&str>, anon_key: Option<&str>) -> Self {
        match (base_url, anon_key) {
            (Some(url), Some(key)) => {
                tracing::info!(url = url, "Auth/database backend configured");
                Self {
                    client: Some(SupabaseClient {
                        http: reqwest::Client::new(),
                        base_url: url.trim_end_matches('/').to_string(),
                        anon_key: key.to_string(),
                    }),
                }
            }
            _ => {
                tracing::warn!("Auth/database backend not configured, running on mock data");
                Self::new_unconfigured()
            }
        }
    }

    /// Handle with no backend (offline mode).
    pub fn new_unconfigured() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn get_client(&self) -> Result<&SupabaseClient, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured(AppError::BACKEND_NOT_CONFIGURED.to_string()))
    }

    // ─── Auth Operations ─────────────────────────────────────────

    /// Exchange email/password for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/auth/v1/token", client.base_url);

        let response = client
            .http
            .post(&url)
            .query(&[("grant_type", "password")])
            .header("apikey", &client.anon_key)
            .json(&PasswordCredentials { email, password })
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        check_response_json(response).await
    }

    /// Register a user; `redirect_to` is where the confirmation email lands.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
        full_name: &str,
    ) -> Result<SignUpResponse, AppError> {
        let client = self.get_client()?;
        let url = format!(
            "{}/auth/v1/signup?redirect_to={}",
            client.base_url,
            urlencoding::encode(redirect_to)
        );

        let response = client
            .http
            .post(&url)
            .header("apikey", &client.anon_key)
            .json(&SignUpBody {
                email,
                password,
                data: SignUpData { full_name },
            })
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        check_response_json(response).await
    }

    /// Look up the user behind an access token (session validation).
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/auth/v1/user", client.base_url);

        let response = client
            .http
            .get(&url)
            .header("apikey", &client.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::InvalidToken);
        }
        check_response_json(response).await
    }

    /// Revoke the session server-side.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let client = self.get_client()?;
        let url = format!("{}/auth/v1/logout", client.base_url);

        let response = client
            .http
            .post(&url)
            .header("apikey", &client.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        check_response(response).await
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile row by user id.
    pub async fn fetch_profile(
        &self,
        id: &str,
        access_token: Option<&str>,
    ) -> Result<Option<Profile>, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/rest/v1/{}", client.base_url, tables::PROFILES);

        let response = client
            .authorized(client.http.get(&url), access_token)
            .query(&[("id", format!("eq.{}", id)), ("select", "*".to_string())])
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        let rows: Vec<Profile> = check_response_json(response).await?;
        Ok(rows.into_iter().next())
    }

    /// Create or update a profile row, returning the stored row.
    pub async fn upsert_profile(
        &self,
        profile: &Profile,
        access_token: Option<&str>,
    ) -> Result<Profile, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/rest/v1/{}", client.base_url, tables::PROFILES);

        let response = client
            .authorized(client.http.post(&url), access_token)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&[profile])
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        let rows: Vec<Profile> = check_response_json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Backend("upsert returned no row".to_string()))
    }
}

impl SupabaseClient {
    /// Attach the API key and the caller's token (or the anon key).
    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
        access_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token.unwrap_or(&self.anon_key))
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), AppError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(error_from_response(response).await)
}

/// Check response and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| AppError::Backend(format!("Invalid response body: {}", e)))
}

async fn error_from_response(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body));
    AppError::Backend(message)
}
