use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    /// Place name, e.g. "Ahmedabad, IN"
    pub title: &'a str,
    /// What was searched for (city name or "lat,lon")
    pub query: Option<&'a str>,
    pub temperature: Option<f64>,
}

/// Overhead inside the header area: 1 spacer + 1 query line.
pub const HEADER_OVERHEAD: u16 = 2;

fn gradient_colors(temp: Option<f64>) -> (ArtColor, ArtColor) {
    match temp {
        Some(t) if t < 0.0 => (
            ArtColor::rgb(150, 200, 255), // Ice blue
            ArtColor::rgb(200, 230, 255), // Light ice
        ),
        Some(t) if t < 15.0 => (
            ArtColor::rgb(100, 180, 255), // Cool blue
            ArtColor::rgb(150, 220, 200), // Teal
        ),
        Some(t) if t < 25.0 => (
            ArtColor::rgb(100, 200, 150), // Green
            ArtColor::rgb(255, 220, 100), // Yellow
        ),
        Some(t) if t < 35.0 => (
            ArtColor::rgb(255, 180, 80), // Orange
            ArtColor::rgb(255, 120, 80), // Deep orange
        ),
        Some(_) => (
            ArtColor::rgb(255, 100, 80), // Red-orange
            ArtColor::rgb(255, 60, 60),  // Hot red
        ),
        None => (
            ArtColor::rgb(180, 180, 180), // Gray (no data)
            ArtColor::rgb(220, 220, 220),
        ),
    }
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet place name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Query
        ])
        .split(area);

        let (start, end) = gradient_colors(props.temperature);
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(Fill::Linear(LinearGradient::horizontal(start, end)));
        frame.render_widget(ArtBox::new(&renderer, props.title), chunks[0]);

        if let Some(query) = props.query {
            let query_line = Line::from(vec![Span::styled(
                format!("searched: {query}"),
                Style::default().fg(Color::DarkGray),
            )])
            .centered();
            frame.render_widget(Paragraph::new(query_line), chunks[2]);
        }
    }
}
