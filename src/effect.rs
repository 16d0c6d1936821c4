//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure; the runtime hands each effect to a task. The task
//! bodies live here so they can be exercised without a terminal.

use crate::action::Action;
use crate::api::WeatherClient;
use crate::geolocation::Geolocator;
use crate::state::Tab;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the data for `tab` at `location`, stamped with generation `request`
    FetchWeather {
        request: u64,
        tab: Tab,
        location: String,
    },
    /// Ask the host for the device position
    LocateDevice { request: u64 },
}

/// Run one fetch and turn the outcome into the action that reports it
pub async fn fetch_weather(
    client: &WeatherClient,
    request: u64,
    tab: Tab,
    location: &str,
) -> Action {
    match client.fetch(tab, location).await {
        Ok(payload) => Action::WeatherDidLoad { request, payload },
        Err(e) => {
            tracing::error!(request, ?tab, location, error = %e, "weather fetch failed");
            Action::WeatherDidError {
                request,
                message: e.user_message(tab),
            }
        }
    }
}

/// Resolve the device position and turn the outcome into an action
pub async fn locate_device(geolocator: &dyn Geolocator, request: u64) -> Action {
    match geolocator.locate().await {
        Ok(coords) => {
            tracing::info!(request, lat = coords.lat, lon = coords.lon, "device located");
            Action::LocateDidResolve { request, coords }
        }
        Err(e) => {
            tracing::warn!(request, error = %e, "geolocation failed");
            Action::LocateDidError {
                request,
                message: e.user_message().to_string(),
            }
        }
    }
}
