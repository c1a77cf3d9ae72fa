// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! UI languages and the small label catalog used by API responses.
//!
//! Full page copy lives in the front-end bundle; the server only needs the
//! labels it emits itself (category names, role badges, notices).

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Fr => Language::En,
            Language::En => Language::Fr,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

/// (key, French, English)
const CATALOG: &[(&str, &str, &str)] = &[
    ("events.categories.all", "Tous", "All"),
    ("events.categories.meeting", "Rassemblement", "Meeting"),
    ("events.categories.race", "Course", "Race"),
    ("events.categories.salon", "Salon", "Show"),
    ("events.categories.rally", "Rallye", "Rally"),
    ("events.categories.auction", "Vente aux enchères", "Auction"),
    ("blog.categories.all", "Tous", "All"),
    ("blog.categories.news", "Actualités", "News"),
    ("blog.categories.reviews", "Essais", "Reviews"),
    ("blog.categories.technology", "Technologie", "Technology"),
    ("blog.categories.motorsport", "Sport automobile", "Motorsport"),
    ("role.admin", "Administrateur", "Administrator"),
    ("role.user", "Membre", "Member"),
    ("auth.loginSuccess.title", "Connexion réussie", "Signed in"),
    ("auth.loginSuccess.description", "Bienvenue sur AutoMeet !", "Welcome to AutoMeet!"),
    ("auth.loginError.title", "Erreur de connexion", "Sign-in error"),
    (
        "auth.invalidCredentials",
        "Email ou mot de passe incorrect",
        "Incorrect email or password",
    ),
    ("auth.registerSuccess.title", "Inscription réussie", "Registration complete"),
    (
        "auth.registerSuccess.description",
        "Votre compte a été créé avec succès !",
        "Your account has been created!",
    ),
    ("auth.registerError.title", "Erreur d'inscription", "Registration error"),
    ("auth.emailTaken.title", "Email déjà utilisé", "Email already in use"),
    (
        "auth.emailTaken.description",
        "Un compte existe déjà avec cet email. Essayez de vous connecter.",
        "An account already exists with this email. Try signing in.",
    ),
    ("createEvent", "Créer un événement", "Create an event"),
    ("events.created", "Événement créé.", "Event created."),
    ("events.noEvents", "Aucun événement trouvé", "No events found"),
    ("blog.noPosts", "Aucun article trouvé", "No articles found"),
    ("dashboard.welcome", "Bienvenue", "Welcome"),
    ("profile.saved", "Profil enregistré", "Profile saved"),
];

/// Look up a label; unknown keys return the key itself.
pub fn t(language: Language, key: &str) -> String {
    CATALOG
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, fr, en)| match language {
            Language::Fr => *fr,
            Language::En => *en,
        })
        .unwrap_or(key)
        .to_string()
}
