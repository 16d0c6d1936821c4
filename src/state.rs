//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::dom::{TabBar, ViewContainer};

/// One of the three mutually exclusive view modes
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Current,
    Forecast,
    Hourly,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Current, Tab::Forecast, Tab::Hourly];

    /// Text shown on the tab trigger
    pub fn label(self) -> &'static str {
        match self {
            Tab::Current => "Current Weather",
            Tab::Forecast => "5-Day Forecast",
            Tab::Hourly => "Hourly Forecast",
        }
    }

    /// Path segment under `/api/weather/`
    pub fn endpoint(self) -> &'static str {
        match self {
            Tab::Current => "current",
            Tab::Forecast => "forecast",
            Tab::Hourly => "hourly",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Current => 0,
            Tab::Forecast => 1,
            Tab::Hourly => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A latitude/longitude pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Location query string for a coordinate pair, e.g. `23.03,72.58`
    pub fn to_query(self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

// ============================================================================
// Payloads returned by the backend
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Place {
    pub name: String,
    pub country: String,
    pub coordinates: Option<Coordinates>,
}

/// A single point-in-time weather reading
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_deg: f64,
    pub pressure: f64,
    /// Kilometres
    #[serde(default)]
    pub visibility: f64,
    pub sunrise: String,
    pub sunset: String,
    pub icon: String,
    pub description: String,
    /// Main condition group, e.g. "Clouds"
    pub weather: Option<String>,
    pub uv_index: Option<f64>,
}

/// `GET /api/weather/current`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentWeather {
    pub location: Place,
    pub current: Snapshot,
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastDay {
    pub day: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub icon: String,
    pub description: String,
    pub date: Option<String>,
    /// Mean temperature over the day
    pub temp: Option<f64>,
    pub weather: Option<String>,
    pub dt: Option<i64>,
    /// Slot the day's reading was taken from, e.g. "12:00"
    pub time: Option<String>,
}

/// `GET /api/weather/forecast`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Forecast {
    pub city: String,
    pub country: String,
    pub list: Vec<ForecastDay>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HourlySlot {
    pub time: String,
    pub temp: f64,
    pub icon: String,
    pub description: String,
    pub dt: Option<i64>,
    pub weather: Option<String>,
}

/// `GET /api/weather/hourly`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Hourly {
    pub city: String,
    pub country: String,
    pub hourly: Vec<HourlySlot>,
}

/// Exactly one of the three data shapes, tagged by the tab it belongs to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum WeatherPayload {
    Current(CurrentWeather),
    Forecast(Forecast),
    Hourly(Hourly),
}

impl WeatherPayload {
    pub fn tab(&self) -> Tab {
        match self {
            WeatherPayload::Current(_) => Tab::Current,
            WeatherPayload::Forecast(_) => Tab::Forecast,
            WeatherPayload::Hourly(_) => Tab::Hourly,
        }
    }

    /// "City, CC" as shown in titles
    pub fn place_name(&self) -> String {
        match self {
            WeatherPayload::Current(data) => {
                format!("{}, {}", data.location.name, data.location.country)
            }
            WeatherPayload::Forecast(data) => format!("{}, {}", data.city, data.country),
            WeatherPayload::Hourly(data) => format!("{}, {}", data.city, data.country),
        }
    }

    /// Temperature used to tint the header, if the payload has a single reading
    pub fn headline_temp(&self) -> Option<f64> {
        match self {
            WeatherPayload::Current(data) => Some(data.current.temp),
            WeatherPayload::Forecast(data) => data.list.first().map(|day| day.temp_max),
            WeatherPayload::Hourly(data) => data.hourly.first().map(|slot| slot.temp),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Spinner timing while a request is in flight.
pub const LOADING_ANIM_TICK_MS: u64 = 80;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Session (visible in debug) ---
    /// Current search location; `None` until the first search or geolocation
    #[debug(section = "Session", label = "Location", debug_fmt)]
    pub location: Option<String>,

    #[debug(section = "Session", label = "Tab", debug_fmt)]
    pub active_tab: Tab,

    /// View lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "View", label = "Data", debug_fmt)]
    pub weather: DataResource<WeatherPayload>,

    /// Generation of the most recent request; older results are dropped
    #[debug(section = "View", label = "Request")]
    pub request_id: u64,

    #[debug(section = "Host", label = "Geolocation")]
    pub geolocation_supported: bool,

    // --- Bound views (skipped) ---
    #[debug(skip)]
    pub tabs: TabBar,

    #[debug(skip)]
    pub container: ViewContainer,

    #[debug(skip)]
    pub tick_count: u32,

    // --- Search input (skipped) ---
    #[debug(skip)]
    pub search_mode: bool,

    #[debug(skip)]
    pub search_query: String,
}

impl AppState {
    pub fn new(geolocation_supported: bool) -> Self {
        Self {
            location: None,
            active_tab: Tab::default(),
            weather: DataResource::Empty,
            request_id: 0,
            geolocation_supported,
            tabs: TabBar::default(),
            container: ViewContainer::default(),
            tick_count: 0,
            search_mode: false,
            search_query: String::new(),
        }
    }

    /// Start on a tab other than the default
    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.active_tab = tab;
        self.tabs.activate(tab);
        self
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(true)
    }
}
