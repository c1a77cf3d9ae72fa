// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Static showcase content served until the backend owns these tables.

use crate::models::{BlogCategory, BlogPost, CarEvent, EventCategory, Vehicle};
use serde::Serialize;

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    title: &str,
    description: &str,
    date: &str,
    location: &str,
    address: &str,
    image: &str,
    category: EventCategory,
    organizer_name: &str,
    current_participants: u32,
    max_participants: Option<u32>,
    is_featured: bool,
    created_at: &str,
) -> CarEvent {
    CarEvent {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        end_date: None,
        location: location.to_string(),
        address: address.to_string(),
        image_url: format!("https://images.unsplash.com/{}?w=800&auto=format", image),
        category,
        organizer_id: id.to_string(),
        organizer_name: organizer_name.to_string(),
        current_participants,
        max_participants,
        is_featured,
        price: None,
        created_at: created_at.to_string(),
    }
}

/// Events every new session starts with.
pub fn seed_events() -> Vec<CarEvent> {
    vec![
        event(
            "1",
            "Rassemblement Supercars Paris",
            "Le plus grand rassemblement de supercars en Île-de-France. Venez admirer Ferrari, Lamborghini, Porsche et bien plus encore.",
            "2024-03-15",
            "Paris, France",
            "Esplanade du Trocadéro",
            "photo-1544636331-e26879cd4d9b",
            EventCategory::Meeting,
            "Cars & Coffee Paris",
            245,
            Some(500),
            true,
            "2024-01-01",
        ),
        event(
            "2",
            "Circuit Track Day - Le Mans",
            "Journée circuit exclusive sur le mythique circuit des 24h du Mans. Pilotez votre voiture sur la piste.",
            "2024-03-22",
            "Le Mans, France",
            "Circuit des 24 Heures",
            "photo-1558618666-fcd25c85cd64",
            EventCategory::Race,
            "ACO Events",
            89,
            Some(100),
            true,
            "2024-01-05",
        ),
        event(
            "3",
            "Salon Auto Monaco",
            "Le salon automobile de prestige de la Côte d'Azur. Découvrez les dernières nouveautés du monde automobile.",
            "2024-04-05",
            "Monaco",
            "Grimaldi Forum",
            "photo-1603584173870-7f23fdae1b7a",
            EventCategory::Salon,
            "Monaco Auto Events",
            1250,
            None,
            false,
            "2024-01-10",
        ),
        event(
            "4",
            "Rallye des Alpes",
            "Rallye historique à travers les routes des Alpes françaises.",
            "2024-04-12",
            "Annecy, France",
            "Départ Place de l'Hôtel de Ville",
            "photo-1568605117036-5fe5e7bab0b7",
            EventCategory::Rally,
            "Alpine Rally Club",
            65,
            None,
            false,
            "2024-01-15",
        ),
        event(
            "5",
            "Vente aux Enchères - Classics",
            "Vente aux enchères de voitures de collection et classiques.",
            "2024-04-20",
            "Lyon, France",
            "Hôtel des Ventes de Lyon",
            "photo-1489824904134-891ab64532f1",
            EventCategory::Auction,
            "Classic Cars Auctions",
            180,
            None,
            false,
            "2024-01-20",
        ),
        event(
            "6",
            "Cars & Coffee Bordeaux",
            "Rassemblement mensuel de passionnés d'automobiles à Bordeaux.",
            "2024-03-30",
            "Bordeaux, France",
            "Quais de Bordeaux",
            "photo-1552519507-da3b142c6e3d",
            EventCategory::Meeting,
            "Cars & Coffee Bordeaux",
            120,
            None,
            false,
            "2024-01-25",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    title: &str,
    excerpt: &str,
    image: &str,
    category: BlogCategory,
    author_name: &str,
    created_at: &str,
    slug: &str,
) -> BlogPost {
    BlogPost {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: String::new(),
        image_url: format!("https://images.unsplash.com/{}?w=800&auto=format", image),
        category,
        author_name: author_name.to_string(),
        created_at: created_at.to_string(),
        slug: slug.to_string(),
    }
}

pub fn blog_posts() -> Vec<BlogPost> {
    vec![
        post(
            "1",
            "La nouvelle Ferrari 296 GTB dévoilée au Salon de Genève",
            "Ferrari présente sa dernière création hybride rechargeable, combinant un V6 turbo avec un moteur électrique.",
            "photo-1592198084033-aade902d1aae",
            BlogCategory::News,
            "Jean Dupont",
            "2024-02-28",
            "ferrari-296-gtb-geneve",
        ),
        post(
            "2",
            "Essai: Porsche 911 GT3 RS - La perfection sur circuit",
            "Nous avons pu tester la nouvelle 911 GT3 RS sur le circuit de Spa-Francorchamps.",
            "photo-1614162692292-7ac56d7f373e",
            BlogCategory::Reviews,
            "Marie Martin",
            "2024-02-25",
            "essai-porsche-911-gt3-rs",
        ),
        post(
            "3",
            "Les batteries solides: l'avenir de la mobilité électrique",
            "Les constructeurs automobiles investissent massivement dans la technologie des batteries solides.",
            "photo-1593941707882-a5bba14938c7",
            BlogCategory::Technology,
            "Pierre Bernard",
            "2024-02-22",
            "batteries-solides-avenir",
        ),
        post(
            "4",
            "F1 2024: Les forces en présence",
            "Analyse complète des écuries et pilotes pour la nouvelle saison de Formule 1.",
            "photo-1541348263662-e068662d82af",
            BlogCategory::Motorsport,
            "Sophie Leblanc",
            "2024-02-20",
            "f1-2024-analyse",
        ),
        post(
            "5",
            "BMW M3 Touring: Le break sportif ultime",
            "Essai complet de la première M3 break de l'histoire de BMW.",
            "photo-1555215695-3004980ad54e",
            BlogCategory::Reviews,
            "Thomas Mercier",
            "2024-02-18",
            "bmw-m3-touring-essai",
        ),
        post(
            "6",
            "Législation Euro 7: Ce qui va changer",
            "Les nouvelles normes européennes d'émissions et leur impact sur l'industrie.",
            "photo-1449965408869-eaa3f722e40d",
            BlogCategory::News,
            "Julie Moreau",
            "2024-02-15",
            "euro-7-legislation",
        ),
    ]
}

/// Vehicles a new profile page starts with.
pub fn seed_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: "1".to_string(),
            brand: "Porsche".to_string(),
            model: "911 GT3".to_string(),
            year: 2023,
            kind: "Sportive".to_string(),
        },
        Vehicle {
            id: "2".to_string(),
            brand: "BMW".to_string(),
            model: "M3 Competition".to_string(),
            year: 2022,
            kind: "Berline sportive".to_string(),
        },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub key: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub href: &'static str,
}

/// An event on the signed-in user's timeline.
#[derive(Debug, Clone, Serialize)]
pub struct UserEvent {
    pub id: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub role: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdAnalytics {
    pub impressions: &'static str,
    pub clicks: &'static str,
    pub ctr: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdPosition {
    Header,
    Sidebar,
    Footer,
    Inline,
}

/// Placeholder advertising slot.
#[derive(Debug, Clone, Serialize)]
pub struct AdSlot {
    pub id: &'static str,
    pub position: AdPosition,
    pub image_url: Option<&'static str>,
    pub text: &'static str,
    pub link: &'static str,
}

pub fn ad_slot(position: AdPosition) -> AdSlot {
    let (id, text) = match position {
        AdPosition::Header => ("header-1", "Espace publicitaire disponible - 728x90"),
        AdPosition::Sidebar => ("sidebar-1", "Espace publicitaire - 300x250"),
        AdPosition::Footer => ("footer-1", "Publicité partenaire"),
        AdPosition::Inline => ("inline-1", "Annonce sponsorisée"),
    };
    AdSlot {
        id,
        position,
        image_url: None,
        text,
        link: "#",
    }
}

pub fn home_stats() -> Vec<StatCard> {
    vec![
        StatCard { key: "events", value: "250+", change: "Événements" },
        StatCard { key: "members", value: "15K+", change: "Membres" },
        StatCard { key: "cities", value: "50+", change: "Villes" },
        StatCard { key: "satisfaction", value: "98%", change: "Satisfaction" },
    ]
}

pub fn dashboard_stats() -> Vec<StatCard> {
    vec![
        StatCard { key: "totalEvents", value: "12", change: "+2 ce mois" },
        StatCard { key: "upcomingEvents", value: "5", change: "+3 à venir" },
        StatCard { key: "totalUsers", value: "1,234", change: "+125 ce mois" },
        StatCard { key: "totalViews", value: "8,456", change: "+15%" },
    ]
}

pub fn quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction { label: "Créer un événement", href: "/events/create" },
        QuickAction { label: "Nouvel article", href: "/blog/create" },
        QuickAction { label: "Gérer les pubs", href: "/dashboard/ads" },
        QuickAction { label: "Statistiques", href: "/dashboard/analytics" },
    ]
}

pub fn user_events() -> Vec<UserEvent> {
    vec![
        UserEvent {
            id: "1",
            title: "Cars & Coffee Paris",
            date: "15 Mars 2024",
            role: "Participant",
            status: "active",
        },
        UserEvent {
            id: "2",
            title: "Track Day Le Mans",
            date: "22 Mars 2024",
            role: "Organisateur",
            status: "upcoming",
        },
    ]
}

pub fn ad_analytics() -> AdAnalytics {
    AdAnalytics {
        impressions: "12.5K",
        clicks: "456",
        ctr: "3.6%",
    }
}
