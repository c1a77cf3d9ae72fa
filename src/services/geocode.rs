// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Address geocoding through Nominatim with a persisted result cache.
//!
//! Lookups never fail: anything that goes wrong yields `None` and the caller
//! skips the item. Successful lookups are cached forever under a single
//! storage key.

use crate::storage::LocalStorage;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Storage key holding the whole address → coordinates map.
pub const GEOCODE_CACHE_KEY: &str = "geocode_cache_v1";

/// Pause after each network lookup, to stay gentle on the public API.
const POLITENESS_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Nominatim returns coordinates as strings.
#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

#[derive(Clone)]
pub struct GeocodeService {
    http: reqwest::Client,
    search_url: String,
    user_agent: String,
    cache: Arc<DashMap<String, Coordinates>>,
    storage: LocalStorage,
    politeness_delay: Duration,
}

impl GeocodeService {
    /// Create the service, warming the cache from storage.
    pub fn new(search_url: &str, user_agent: &str, storage: LocalStorage) -> Self {
        let cache = DashMap::new();
        let persisted: BTreeMap<String, Coordinates> =
            storage.get(GEOCODE_CACHE_KEY).unwrap_or_default();
        for (address, coords) in persisted {
            cache.insert(address, coords);
        }

        Self {
            http: reqwest::Client::new(),
            search_url: search_url.to_string(),
            user_agent: user_agent.to_string(),
            cache: Arc::new(cache),
            storage,
            politeness_delay: POLITENESS_DELAY,
        }
    }

    /// Override the post-request pause (tests use zero).
    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    pub fn cached(&self, address: &str) -> Option<Coordinates> {
        self.cache.get(address).map(|entry| *entry.value())
    }

    /// Resolve an address (in France) to coordinates.
    pub async fn geocode(&self, address: &str) -> Option<Coordinates> {
        if address.trim().is_empty() {
            return None;
        }
        if let Some(coords) = self.cached(address) {
            return Some(coords);
        }

        let coords = match self.search(address).await {
            Ok(found) => found?,
            Err(e) => {
                tracing::error!(address, error = %e, "Geocoding error");
                return None;
            }
        };

        self.cache.insert(address.to_string(), coords);
        self.persist();

        tokio::time::sleep(self.politeness_delay).await;

        Some(coords)
    }

    async fn search(&self, address: &str) -> Result<Option<Coordinates>, reqwest::Error> {
        let query = format!("{}, France", address);
        let response = self
            .http
            .get(&self.search_url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query.as_str())])
            .header(reqwest::header::ACCEPT_LANGUAGE, "fr")
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(address, status = %response.status(), "Geocoder rejected lookup");
            return Ok(None);
        }

        let hits: Vec<SearchHit> = response.json().await?;
        let Some(first) = hits.into_iter().next() else {
            tracing::debug!(address, "No geocoding result");
            return Ok(None);
        };

        match (first.lat.parse(), first.lon.parse()) {
            (Ok(lat), Ok(lon)) => Ok(Some(Coordinates { lat, lon })),
            _ => {
                tracing::warn!(address, "Geocoder returned non-numeric coordinates");
                Ok(None)
            }
        }
    }

    fn persist(&self) {
        let snapshot: BTreeMap<String, Coordinates> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        self.storage.set(GEOCODE_CACHE_KEY, &snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(storage: LocalStorage) -> GeocodeService {
        // Unroutable endpoint: any network attempt fails fast and yields None.
        GeocodeService::new("http://127.0.0.1:9/search", "test-agent", storage)
            .with_politeness_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_empty_address_is_none() {
        assert_eq!(service(LocalStorage::in_memory()).geocode("  ").await, None);
    }

    #[tokio::test]
    async fn test_cache_is_warmed_from_storage() {
        let storage = LocalStorage::in_memory();
        let mut map = BTreeMap::new();
        map.insert(
            "Grimaldi Forum".to_string(),
            Coordinates {
                lat: 43.74,
                lon: 7.43,
            },
        );
        storage.set(GEOCODE_CACHE_KEY, &map);

        let coords = service(storage).geocode("Grimaldi Forum").await;
        assert_eq!(
            coords,
            Some(Coordinates {
                lat: 43.74,
                lon: 7.43
            })
        );
    }

    #[tokio::test]
    async fn test_network_failure_is_none_and_not_cached() {
        let svc = service(LocalStorage::in_memory());
        assert_eq!(svc.geocode("Quais de Bordeaux").await, None);
        assert_eq!(svc.cached("Quais de Bordeaux"), None);
    }
}
