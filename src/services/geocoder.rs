// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reverse-geocoding adapter for resolving a track's starting address.
//!
//! Best-effort by contract: a single attempt per call, and every failure
//! path degrades to a placeholder string instead of an error. Displaying a
//! track must never block on the geocoder being down.

use serde::Deserialize;
use std::time::Duration;

/// Placeholder returned whenever an address cannot be resolved.
pub const ADDRESS_NOT_FOUND: &str = "Adresse introuvable";

const UNKNOWN_ROAD: &str = "Rue inconnue";
const UNKNOWN_CITY: &str = "Ville inconnue";

/// Timeout for the single reverse-geocoding attempt.
const GEOCODE_TIMEOUT: Duration = Duration::from_secs(30);

/// Reverse-geocoding client (Nominatim API).
#[derive(Clone)]
pub struct GeocoderClient {
    http: Option<reqwest::Client>,
    base_url: String,
}

impl GeocoderClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Some(reqwest::Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a mock geocoder for testing (offline mode).
    ///
    /// Every lookup resolves to the not-found placeholder.
    pub fn new_mock() -> Self {
        Self {
            http: None,
            base_url: String::new(),
        }
    }

    /// Resolve a human-readable address for a coordinate pair.
    ///
    /// Never fails: network errors, timeouts, and responses without an
    /// address all come back as [`ADDRESS_NOT_FOUND`].
    pub async fn resolve_address(&self, latitude: f64, longitude: f64) -> String {
        let Some(http) = &self.http else {
            return ADDRESS_NOT_FOUND.to_string();
        };

        match self.fetch(http, latitude, longitude).await {
            Ok(response) => match response.address {
                Some(address) => format_address(&address),
                None => {
                    tracing::debug!(latitude, longitude, "Geocoder returned no address");
                    ADDRESS_NOT_FOUND.to_string()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, latitude, longitude, "Reverse geocoding failed");
                ADDRESS_NOT_FOUND.to_string()
            }
        }
    }

    async fn fetch(
        &self,
        http: &reqwest::Client,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseResponse, reqwest::Error> {
        let url = format!("{}/reverse", self.base_url);

        http.get(&url)
            .timeout(GEOCODE_TIMEOUT)
            // Nominatim usage policy requires an identifying User-Agent
            .header(
                reqwest::header::USER_AGENT,
                concat!("canitrail/", env!("CARGO_PKG_VERSION")),
            )
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// Reverse-geocoding response body.
#[derive(Debug, Clone, Deserialize)]
struct ReverseResponse {
    address: Option<AddressComponents>,
}

/// Address sub-fields; all optional, composed with fallbacks.
#[derive(Debug, Clone, Default, Deserialize)]
struct AddressComponents {
    house_number: Option<String>,
    road: Option<String>,
    postcode: Option<String>,
    village: Option<String>,
    town: Option<String>,
    city: Option<String>,
}

/// Compose `"{house_number} {road}, {postcode} {city}"` with best-effort
/// fallbacks for missing sub-fields.
fn format_address(address: &AddressComponents) -> String {
    let road = address.road.as_deref().unwrap_or(UNKNOWN_ROAD);
    let street = match address.house_number.as_deref() {
        Some(number) => format!("{} {}", number, road),
        None => road.to_string(),
    };

    let city = address
        .city
        .as_deref()
        .or(address.town.as_deref())
        .or(address.village.as_deref())
        .unwrap_or(UNKNOWN_CITY);
    let locality = match address.postcode.as_deref() {
        Some(postcode) => format!("{} {}", postcode, city),
        None => city.to_string(),
    };

    format!("{}, {}", street, locality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_full_address() {
        let address = AddressComponents {
            house_number: Some("12".to_string()),
            road: Some("Rue des Acacias".to_string()),
            postcode: Some("44000".to_string()),
            city: Some("Nantes".to_string()),
            ..Default::default()
        };
        assert_eq!(format_address(&address), "12 Rue des Acacias, 44000 Nantes");
    }

    #[test]
    fn test_format_without_house_number() {
        let address = AddressComponents {
            road: Some("Chemin du Halage".to_string()),
            postcode: Some("44300".to_string()),
            town: Some("Carquefou".to_string()),
            ..Default::default()
        };
        assert_eq!(
            format_address(&address),
            "Chemin du Halage, 44300 Carquefou"
        );
    }

    #[test]
    fn test_format_prefers_city_over_village() {
        let address = AddressComponents {
            road: Some("Route forestière".to_string()),
            city: Some("Nantes".to_string()),
            village: Some("Le Bourg".to_string()),
            ..Default::default()
        };
        assert_eq!(format_address(&address), "Route forestière, Nantes");
    }

    #[test]
    fn test_format_empty_address_uses_fallbacks() {
        assert_eq!(
            format_address(&AddressComponents::default()),
            "Rue inconnue, Ville inconnue"
        );
    }

    #[tokio::test]
    async fn test_mock_geocoder_resolves_to_placeholder() {
        let geocoder = GeocoderClient::new_mock();
        let address = geocoder.resolve_address(48.0, 2.0).await;
        assert_eq!(address, ADDRESS_NOT_FOUND);
    }
}
