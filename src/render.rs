//! Payload → markup.
//!
//! Every function here is pure: the same payload always yields the same
//! string, and the string is meant to replace the view container wholesale.
//! Numbers are formatted here; the templates escape all text.

use serde::Serialize;
use tera::Context;

use crate::state::{CurrentWeather, Forecast, Hourly, WeatherPayload};
use crate::templates::{self, TemplateError};

/// Glyph used for any icon code missing from the table
pub const DEFAULT_ICON: &str = "\u{1f324}\u{fe0f}";

/// Map an OpenWeatherMap icon code to a display glyph
pub fn weather_icon(code: &str) -> &'static str {
    match code {
        "01d" => "\u{2600}\u{fe0f}",
        "01n" => "\u{1f319}",
        "02d" => "\u{26c5}",
        "02n" | "03d" | "03n" | "04d" | "04n" => "\u{2601}\u{fe0f}",
        "09d" | "09n" | "10n" => "\u{1f327}\u{fe0f}",
        "10d" => "\u{1f326}\u{fe0f}",
        "11d" | "11n" => "\u{26c8}\u{fe0f}",
        "13d" | "13n" => "\u{2744}\u{fe0f}",
        "50d" | "50n" => "\u{1f32b}\u{fe0f}",
        _ => DEFAULT_ICON,
    }
}

/// Render whichever view the payload belongs to
pub fn render(payload: &WeatherPayload) -> Result<String, TemplateError> {
    match payload {
        WeatherPayload::Current(data) => render_current(data),
        WeatherPayload::Forecast(data) => render_forecast(data),
        WeatherPayload::Hourly(data) => render_hourly(data),
    }
}

pub fn render_current(data: &CurrentWeather) -> Result<String, TemplateError> {
    let current = &data.current;
    let groups = [
        DetailGroup {
            class: "weather-details",
            items: vec![
                Detail::new("Feels Like", format!("{}°C", current.feels_like)),
                Detail::new("Humidity", format!("{}%", current.humidity)),
                Detail::new("Wind Speed", format!("{} m/s", current.wind_speed)),
                Detail::new("Pressure", format!("{} hPa", current.pressure)),
            ],
        },
        DetailGroup {
            class: "additional-details",
            items: vec![
                Detail::new("Min Temp", format!("{}°C", current.temp_min)),
                Detail::new("Max Temp", format!("{}°C", current.temp_max)),
                Detail::new("Visibility", format!("{} km", current.visibility)),
                Detail::new("Sunrise", current.sunrise.clone()),
                Detail::new("Sunset", current.sunset.clone()),
                Detail::new("Wind Direction", format!("{}°", current.wind_deg)),
            ],
        },
    ];

    let mut ctx = Context::new();
    ctx.insert("icon", weather_icon(&current.icon));
    ctx.insert("temp", &current.temp.to_string());
    ctx.insert("description", &current.description);
    ctx.insert("name", &data.location.name);
    ctx.insert("country", &data.location.country);
    ctx.insert("groups", &groups);
    templates::render(templates::CURRENT, &ctx)
}

pub fn render_forecast(data: &Forecast) -> Result<String, TemplateError> {
    let tiles: Vec<Tile<'_>> = data
        .list
        .iter()
        .map(|day| Tile {
            label: &day.day,
            icon: weather_icon(&day.icon),
            high: format!("{}°", day.temp_max),
            low: Some(format!("{}°", day.temp_min)),
            description: &day.description,
        })
        .collect();
    render_grid("5-Day Forecast", &data.city, &data.country, &tiles)
}

pub fn render_hourly(data: &Hourly) -> Result<String, TemplateError> {
    let tiles: Vec<Tile<'_>> = data
        .hourly
        .iter()
        .map(|slot| Tile {
            label: &slot.time,
            icon: weather_icon(&slot.icon),
            high: format!("{}°C", slot.temp),
            low: None,
            description: &slot.description,
        })
        .collect();
    render_grid("24-Hour Forecast", &data.city, &data.country, &tiles)
}

// ============================================================================
// Template contexts
// ============================================================================

#[derive(Serialize)]
struct Detail {
    label: &'static str,
    value: String,
}

impl Detail {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

#[derive(Serialize)]
struct DetailGroup {
    class: &'static str,
    items: Vec<Detail>,
}

/// One forecast/hourly tile, numbers already formatted
#[derive(Serialize)]
struct Tile<'a> {
    label: &'a str,
    icon: &'static str,
    high: String,
    low: Option<String>,
    description: &'a str,
}

fn render_grid(
    heading: &str,
    city: &str,
    country: &str,
    tiles: &[Tile<'_>],
) -> Result<String, TemplateError> {
    let mut ctx = Context::new();
    ctx.insert("heading", heading);
    ctx.insert("city", city);
    ctx.insert("country", country);
    ctx.insert("tiles", tiles);
    templates::render(templates::GRID, &ctx)
}
