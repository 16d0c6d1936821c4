//! Loading and error placeholders for the view container

use tera::Context;

use crate::templates::{self, TemplateError};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a location";
pub const GEOLOCATION_UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported on this device.";
pub const GEOLOCATION_FAILED_MESSAGE: &str =
    "Unable to get your location. Please enter a city name.";

pub fn loading_card() -> Result<String, TemplateError> {
    templates::render(templates::LOADING, &Context::new())
}

/// The message is always shown as literal text
pub fn error_card(message: &str) -> Result<String, TemplateError> {
    let mut ctx = Context::new();
    ctx.insert("icon", ERROR_ICON);
    ctx.insert("message", message);
    templates::render(templates::ERROR, &ctx)
}
