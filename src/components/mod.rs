pub mod dashboard;
pub mod location_header;
pub mod search_overlay;
pub mod tab_strip;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use dashboard::{Dashboard, DashboardProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use tab_strip::{TabStrip, TabStripProps};
pub use weather_panel::{SPINNER, WeatherPanel, WeatherPanelProps};
