// src/enricher.rs
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::GeocodingConfig;
use crate::errors::EnrichmentError;
use crate::models::{EnrichedAddress, MatchStatus, NormalizedAddress};
use crate::normalizer::tables::canonical_country;

/// Lookup seam for the geocoding collaborator, so tests can substitute a
/// canned implementation.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `base` carries the normalized fields to merge into; `query` is the
    /// best textual form available (formatted string, else raw candidate).
    async fn enrich(
        &self,
        base: &NormalizedAddress,
        query: &str,
    ) -> Result<EnrichedAddress, EnrichmentError>;
}

/// Google Maps Geocoding API client. One outbound call per invocation, no
/// caching; a fixed inter-request delay is the rate-limit policy.
pub struct MapsGeocoder {
    client: reqwest::Client,
    config: GeocodingConfig,
}

impl MapsGeocoder {
    pub fn new(config: GeocodingConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl Geocoder for MapsGeocoder {
    async fn enrich(
        &self,
        base: &NormalizedAddress,
        query: &str,
    ) -> Result<EnrichedAddress, EnrichmentError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(EnrichmentError::InvalidKey)?;

        tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        debug!("Geocoding: {}", query);

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("address", query), ("key", key)])
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let payload: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        merge_payload(base, payload)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    short_name: String,
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Maps the provider payload onto the address. Provider fields override
/// normalized ones where present; `formatted` is always rebuilt locally,
/// never copied from the provider.
fn merge_payload(
    base: &NormalizedAddress,
    payload: GeocodeResponse,
) -> Result<EnrichedAddress, EnrichmentError> {
    match payload.status.as_str() {
        "OK" => {
            let match_status = if payload.results.len() > 1 {
                MatchStatus::Ambiguous
            } else {
                MatchStatus::Matched
            };
            let top = payload
                .results
                .first()
                .ok_or_else(|| EnrichmentError::Provider("OK with no results".to_string()))?;

            let mut address = base.clone();
            let mut street_number = None;
            let mut route = None;

            for component in &top.address_components {
                let has = |t: &str| component.types.iter().any(|ty| ty == t);
                if has("street_number") {
                    street_number = Some(component.long_name.clone());
                } else if has("route") {
                    route = Some(component.long_name.clone());
                } else if has("locality") || has("postal_town") {
                    address.city = component.long_name.clone();
                } else if has("administrative_area_level_1") {
                    address.region = component.short_name.clone();
                } else if has("postal_code") {
                    address.postal_code = component.long_name.clone();
                } else if has("country") {
                    address.country = canonical_country(&component.long_name)
                        .map(str::to_string)
                        .unwrap_or_else(|| component.long_name.to_uppercase());
                }
            }

            match (street_number, route) {
                (Some(number), Some(route)) => address.street = format!("{} {}", number, route),
                (None, Some(route)) => address.street = route,
                _ => {}
            }
            address.rebuild_formatted();

            Ok(EnrichedAddress {
                latitude: top.geometry.as_ref().map(|g| g.location.lat),
                longitude: top.geometry.as_ref().map(|g| g.location.lng),
                address,
                match_status,
            })
        }
        "ZERO_RESULTS" => {
            let mut address = base.clone();
            address.rebuild_formatted();
            Ok(EnrichedAddress {
                address,
                latitude: None,
                longitude: None,
                match_status: MatchStatus::NotFound,
            })
        }
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(EnrichmentError::QuotaExceeded),
        "REQUEST_DENIED" => Err(EnrichmentError::InvalidKey),
        other => {
            let detail = payload
                .error_message
                .map(|m| format!("{}: {}", other, m))
                .unwrap_or_else(|| other.to_string());
            Err(EnrichmentError::Provider(detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::normalizer::AddressNormalizer;

    fn base() -> NormalizedAddress {
        AddressNormalizer::new().normalize("123 Main St, Springfield, IL 62704")
    }

    fn parse(json: &str) -> GeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    const MATCHED: &str = r#"{
        "status": "OK",
        "results": [{
            "address_components": [
                {"long_name": "123", "short_name": "123", "types": ["street_number"]},
                {"long_name": "Main Street", "short_name": "Main St", "types": ["route"]},
                {"long_name": "Springfield", "short_name": "Springfield", "types": ["locality", "political"]},
                {"long_name": "Illinois", "short_name": "IL", "types": ["administrative_area_level_1", "political"]},
                {"long_name": "United States", "short_name": "US", "types": ["country", "political"]},
                {"long_name": "62704", "short_name": "62704", "types": ["postal_code"]}
            ],
            "geometry": {"location": {"lat": 39.7817, "lng": -89.6501}}
        }]
    }"#;

    #[test]
    fn test_matched_result_merges_components() {
        let enriched = merge_payload(&base(), parse(MATCHED)).unwrap();

        assert_eq!(enriched.match_status, MatchStatus::Matched);
        assert_eq!(enriched.address.street, "123 Main Street");
        assert_eq!(enriched.address.city, "Springfield");
        assert_eq!(enriched.address.region, "IL");
        assert_eq!(enriched.address.postal_code, "62704");
        assert_eq!(enriched.address.country, "UNITED STATES OF AMERICA");
        assert_eq!(enriched.latitude, Some(39.7817));
        assert_eq!(enriched.longitude, Some(-89.6501));
        // Rebuilt from the merged fields, not copied from the provider.
        assert_eq!(
            enriched.address.formatted,
            "123 Main Street, Springfield, IL, 62704, UNITED STATES OF AMERICA"
        );
    }

    #[test]
    fn test_multiple_results_are_ambiguous() {
        let two_results = MATCHED.replacen(
            r#""results": ["#,
            r#""results": [{"address_components": [], "geometry": null},"#,
            1,
        );
        let enriched = merge_payload(&base(), parse(&two_results)).unwrap();
        assert_eq!(enriched.match_status, MatchStatus::Ambiguous);
    }

    #[test]
    fn test_zero_results_is_not_found_not_error() {
        let payload = parse(r#"{"status": "ZERO_RESULTS", "results": []}"#);
        let enriched = merge_payload(&base(), payload).unwrap();

        assert_eq!(enriched.match_status, MatchStatus::NotFound);
        assert!(enriched.latitude.is_none());
        assert!(enriched.longitude.is_none());
        // Normalized fields survive untouched.
        assert_eq!(enriched.address.street, "123 Main Street");
    }

    #[test]
    fn test_quota_and_key_failures() {
        let payload = parse(r#"{"status": "OVER_QUERY_LIMIT", "results": []}"#);
        assert!(matches!(
            merge_payload(&base(), payload),
            Err(EnrichmentError::QuotaExceeded)
        ));

        let payload = parse(r#"{"status": "REQUEST_DENIED", "results": []}"#);
        assert!(matches!(
            merge_payload(&base(), payload),
            Err(EnrichmentError::InvalidKey)
        ));
    }

    #[test]
    fn test_unknown_status_is_provider_error() {
        let payload =
            parse(r#"{"status": "UNKNOWN_ERROR", "results": [], "error_message": "backend"}"#);
        match merge_payload(&base(), payload) {
            Err(EnrichmentError::Provider(detail)) => {
                assert!(detail.contains("UNKNOWN_ERROR"));
                assert!(detail.contains("backend"));
            }
            other => panic!("expected provider error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_fast() {
        // No api_key configured: the call must fail before any network use.
        let geocoder = MapsGeocoder::new(Config::default().geocoding);
        let err = geocoder.enrich(&base(), "123 Main Street").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::InvalidKey));
    }
}
