// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Sign-in / sign-up forms and backend failure categorization.

use crate::i18n::{t, Language};
use crate::models::Notice;
use axum::http::StatusCode;
use serde::Deserialize;
use std::fmt;
use validator::Validate;

/// Backend message for a wrong email/password pair.
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid login credentials";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(email(message = "Email invalide"))]
    pub email: String,
    #[validate(length(
        min = 6,
        message = "Le mot de passe doit contenir au moins 6 caractères"
    ))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(email(message = "Email invalide"))]
    pub email: String,
    #[validate(length(
        min = 6,
        message = "Le mot de passe doit contenir au moins 6 caractères"
    ))]
    pub password: String,
    #[validate(must_match(
        other = "password",
        message = "Les mots de passe ne correspondent pas"
    ))]
    pub confirm_password: String,
    #[validate(length(min = 2, message = "Le nom doit contenir au moins 2 caractères"))]
    pub full_name: String,
}

/// Which flow failed; picks the notice wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Register,
}

/// User-facing authentication failure categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    InvalidCredentials,
    EmailTaken,
    Other {
        flow: AuthFlow,
        message: String,
        language: Language,
    },
}

impl AuthFailure {
    /// Categorize a backend error message.
    pub fn from_backend_message(flow: AuthFlow, message: &str, language: Language) -> Self {
        if flow == AuthFlow::Login && message == INVALID_CREDENTIALS_MESSAGE {
            return AuthFailure::InvalidCredentials;
        }
        if flow == AuthFlow::Register && message.contains("already registered") {
            return AuthFailure::EmailTaken;
        }
        AuthFailure::Other {
            flow,
            message: message.to_string(),
            language,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthFailure::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthFailure::EmailTaken => StatusCode::CONFLICT,
            AuthFailure::Other { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials => "invalid_credentials",
            AuthFailure::EmailTaken => "email_taken",
            AuthFailure::Other { .. } => "auth_failed",
        }
    }

    /// Destructive notice shown to the user. Category notices are French,
    /// matching the default UI language.
    pub fn notice(&self) -> Notice {
        match self {
            AuthFailure::InvalidCredentials => Notice::destructive(
                t(Language::Fr, "auth.loginError.title"),
                t(Language::Fr, "auth.invalidCredentials"),
            ),
            AuthFailure::EmailTaken => Notice::destructive(
                t(Language::Fr, "auth.emailTaken.title"),
                t(Language::Fr, "auth.emailTaken.description"),
            ),
            AuthFailure::Other {
                flow,
                message,
                language,
            } => {
                let title = match flow {
                    AuthFlow::Login => "auth.loginError.title",
                    AuthFlow::Register => "auth.registerError.title",
                };
                Notice::destructive(t(*language, title), message.clone())
            }
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::InvalidCredentials => f.write_str("invalid credentials"),
            AuthFailure::EmailTaken => f.write_str("email already registered"),
            AuthFailure::Other { message, .. } => f.write_str(message),
        }
    }
}
