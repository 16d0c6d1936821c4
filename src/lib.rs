//! Weather dashboard - tui-dispatch host for an HTML weather view
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod dom;
pub mod effect;
pub mod geolocation;
pub mod logging;
pub mod page;
pub mod reducer;
pub mod render;
pub mod state;
pub mod status;
pub mod templates;
