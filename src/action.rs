//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Coordinates, Tab, WeatherPayload};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: reload the active tab for the current location
    WeatherFetch,

    /// Result: payload for request `request`
    WeatherDidLoad {
        request: u64,
        payload: WeatherPayload,
    },

    /// Result: request `request` failed; `message` is user-facing
    WeatherDidError { request: u64, message: String },

    // ===== Search category =====
    /// Focus the search input
    SearchOpen,

    /// Leave the search input without searching
    SearchClose,

    /// Search input text changed
    SearchQueryChange(String),

    /// Search for the given query, or for the input text when `None`
    SearchSubmit(Option<String>),

    // ===== Locate category =====
    /// Intent: search by the device's position
    LocateDevice,

    /// Result: position resolved for request `request`
    LocateDidResolve { request: u64, coords: Coordinates },

    /// Result: position lookup failed; `message` is user-facing
    LocateDidError { request: u64, message: String },

    // ===== Tab category =====
    /// Make `Tab` the active view
    TabSwitch(Tab),

    TabNext,

    TabPrev,

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement etc.)
    Render,

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
