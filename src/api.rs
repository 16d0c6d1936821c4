//! Backend weather API client

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::state::{CurrentWeather, Forecast, Hourly, Tab, WeatherPayload};

/// Fetch error type
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The backend answered with an `error` field
    #[error("{0}")]
    Api(String),
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("weather response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Text for the error card. Backend messages are shown as-is; transport
    /// and parse details stay in the log.
    pub fn user_message(&self, tab: Tab) -> String {
        match self {
            FetchError::Api(message) => message.clone(),
            FetchError::Request(_) | FetchError::Parse(_) => generic_message(tab).to_string(),
        }
    }
}

pub fn generic_message(tab: Tab) -> &'static str {
    match tab {
        Tab::Current => "Unable to fetch weather data. Please try again.",
        Tab::Forecast => "Unable to fetch forecast data. Please try again.",
        Tab::Hourly => "Unable to fetch hourly forecast data. Please try again.",
    }
}

/// `GET /api/health`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: Option<String>,
    pub version: Option<String>,
}

/// Client for the dashboard's backend
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    /// Client without a request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, base_url))
    }

    fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for one view kind, with the location percent-encoded
    pub fn endpoint_url(&self, tab: Tab, location: &str) -> String {
        format!(
            "{}/api/weather/{}?location={}",
            self.base_url,
            tab.endpoint(),
            urlencoding::encode(location)
        )
    }

    pub async fn current(&self, location: &str) -> Result<CurrentWeather, FetchError> {
        self.get_json(&self.endpoint_url(Tab::Current, location))
            .await
    }

    pub async fn forecast(&self, location: &str) -> Result<Forecast, FetchError> {
        self.get_json(&self.endpoint_url(Tab::Forecast, location))
            .await
    }

    pub async fn hourly(&self, location: &str) -> Result<Hourly, FetchError> {
        self.get_json(&self.endpoint_url(Tab::Hourly, location))
            .await
    }

    /// Fetch the payload for whichever tab is active
    pub async fn fetch(&self, tab: Tab, location: &str) -> Result<WeatherPayload, FetchError> {
        match tab {
            Tab::Current => self.current(location).await.map(WeatherPayload::Current),
            Tab::Forecast => self.forecast(location).await.map(WeatherPayload::Forecast),
            Tab::Hourly => self.hourly(location).await.map(WeatherPayload::Hourly),
        }
    }

    /// Current weather for an explicit coordinate pair
    pub async fn by_coordinates(&self, lat: f64, lon: f64) -> Result<CurrentWeather, FetchError> {
        let url = format!(
            "{}/api/weather/coordinates?lat={}&lon={}",
            self.base_url, lat, lon
        );
        self.get_json(&url).await
    }

    pub async fn health(&self) -> Result<Health, FetchError> {
        self.get_json(&format!("{}/api/health", self.base_url))
            .await
    }

    /// GET, parse JSON, and surface a top-level `error` field whatever the
    /// HTTP status was.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;

        if let Some(message) = api_error(&value) {
            tracing::debug!(url, %status, error = %message, "backend reported an error");
            return Err(FetchError::Api(message));
        }

        Ok(serde_json::from_value(value)?)
    }
}

/// A present, non-empty `error` field
fn api_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
