//! Device position lookup

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::state::Coordinates;
use crate::status::{GEOLOCATION_FAILED_MESSAGE, GEOLOCATION_UNSUPPORTED_MESSAGE};

/// Free IP geolocation endpoint; answers `{status, message?, lat, lon}`
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("location lookup failed: {0}")]
    Lookup(String),
}

impl GeoError {
    pub fn user_message(&self) -> &'static str {
        match self {
            GeoError::Unsupported => GEOLOCATION_UNSUPPORTED_MESSAGE,
            GeoError::Lookup(_) => GEOLOCATION_FAILED_MESSAGE,
        }
    }
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Whether this host can produce a position at all
    fn is_supported(&self) -> bool {
        true
    }

    async fn locate(&self) -> Result<Coordinates, GeoError>;
}

/// Host without a position source
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn locate(&self) -> Result<Coordinates, GeoError> {
        Err(GeoError::Unsupported)
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(alias = "latitude")]
    lat: Option<f64>,
    #[serde(alias = "longitude")]
    lon: Option<f64>,
}

/// Approximate position from the public IP address
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    http: reqwest::Client,
    url: String,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GeoError::Lookup(e.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeoError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeoError::Lookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeoError::Lookup(format!(
                "lookup returned status {}",
                response.status()
            )));
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| GeoError::Lookup(e.to_string()))?;

        coordinates_from(body)
    }
}

fn coordinates_from(body: IpLookupResponse) -> Result<Coordinates, GeoError> {
    if body.status.as_deref() == Some("fail") {
        let reason = body.message.unwrap_or_else(|| "unknown reason".to_string());
        return Err(GeoError::Lookup(reason));
    }
    match (body.lat, body.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
        _ => Err(GeoError::Lookup("response has no coordinates".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Result<Coordinates, GeoError> {
        coordinates_from(serde_json::from_value(json).unwrap())
    }

    #[test]
    fn test_accepts_both_field_spellings() {
        let a = parse(serde_json::json!({"status": "success", "lat": 23.03, "lon": 72.58}))
            .unwrap();
        let b = parse(serde_json::json!({"latitude": 23.03, "longitude": 72.58})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_failed_lookup() {
        let err = parse(serde_json::json!({"status": "fail", "message": "private range"}))
            .unwrap_err();
        assert!(matches!(err, GeoError::Lookup(ref m) if m == "private range"));
        assert_eq!(err.user_message(), GEOLOCATION_FAILED_MESSAGE);
    }

    #[test]
    fn test_missing_coordinates() {
        assert!(parse(serde_json::json!({"status": "success"})).is_err());
    }

    #[tokio::test]
    async fn test_no_geolocation_is_unsupported() {
        let geo = NoGeolocation;
        assert!(!geo.is_supported());
        let err = geo.locate().await.unwrap_err();
        assert_eq!(err.user_message(), GEOLOCATION_UNSUPPORTED_MESSAGE);
    }
}
