use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use tui_dispatch::DataResource;

use super::location_header::HEADER_OVERHEAD;
use super::{Component, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::render::weather_icon;
use crate::state::{AppState, CurrentWeather, Forecast, Hourly, WeatherPayload};
use crate::status::ERROR_ICON;

pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Terminal preview of whatever the view container currently holds
pub struct WeatherPanel;

pub struct WeatherPanelProps<'a> {
    pub state: &'a AppState,
}

/// FIGlet height tiers: terminus(6), miniwi(4), plain(1).
fn header_cap(area_height: u16, body_rows: u16) -> u16 {
    [6, 4, 1]
        .into_iter()
        .map(|font| font + HEADER_OVERHEAD)
        .find(|cap| cap + body_rows + 1 <= area_height)
        .unwrap_or(1 + HEADER_OVERHEAD)
}

// ============================================================================
// Component
// ============================================================================

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        match PanelView::from_state(state) {
            PanelView::Error(error) => render_error(frame, area, error),
            PanelView::Ready(payload) => render_ready(frame, area, state, payload),
            PanelView::Loading => {
                let spinner = SPINNER[state.tick_count as usize % SPINNER.len()];
                render_placeholder(
                    frame,
                    area,
                    state,
                    Line::from(vec![
                        Span::styled(spinner, Style::default().fg(Color::Cyan)),
                        Span::styled(
                            " Loading weather data...",
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                );
            }
            PanelView::Empty => render_placeholder(
                frame,
                area,
                state,
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                    Span::styled("/", Style::default().fg(Color::Cyan).bold()),
                    Span::styled(
                        " to search for a location",
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            ),
        }
    }
}

fn render_ready(frame: &mut Frame, area: Rect, state: &AppState, payload: &WeatherPayload) {
    let body = payload_lines(payload);
    let body_rows = body.len() as u16;
    let chunks = Layout::vertical([
        Constraint::Max(header_cap(area.height, body_rows)),
        Constraint::Length(1),
        Constraint::Min(body_rows.min(area.height)),
    ])
    .flex(Flex::Center)
    .split(area);

    let title = payload.place_name();
    let mut header = LocationHeader;
    header.render(
        frame,
        chunks[0],
        LocationHeaderProps {
            title: &title,
            query: state.location.as_deref(),
            temperature: payload.headline_temp(),
        },
    );

    let body: Vec<Line<'static>> = body.into_iter().map(|line| line.centered()).collect();
    frame.render_widget(Paragraph::new(body), chunks[2]);
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &AppState, message: Line<'static>) {
    let chunks = Layout::vertical([
        Constraint::Max(header_cap(area.height, 1)),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .split(area);

    if let Some(location) = state.location.as_deref() {
        let mut header = LocationHeader;
        header.render(
            frame,
            chunks[0],
            LocationHeaderProps {
                title: location,
                query: None,
                temperature: None,
            },
        );
    }
    frame.render_widget(Paragraph::new(message.centered()), chunks[2]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // blank
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("/", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to search or ", Style::default().fg(Color::DarkGray)),
                Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[5],
    );
}

// ============================================================================
// Helpers
// ============================================================================

enum PanelView<'a> {
    Error(&'a str),
    Ready(&'a WeatherPayload),
    Loading,
    Empty,
}

impl<'a> PanelView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.weather {
            DataResource::Failed(error) => PanelView::Error(error),
            DataResource::Loaded(payload) => PanelView::Ready(payload),
            DataResource::Loading => PanelView::Loading,
            DataResource::Empty => PanelView::Empty,
        }
    }
}

fn payload_lines(payload: &WeatherPayload) -> Vec<Line<'static>> {
    match payload {
        WeatherPayload::Current(data) => current_lines(data),
        WeatherPayload::Forecast(data) => forecast_lines(data),
        WeatherPayload::Hourly(data) => hourly_lines(data),
    }
}

fn dim(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::Gray))
}

fn current_lines(data: &CurrentWeather) -> Vec<Line<'static>> {
    let c = &data.current;
    vec![
        Line::from(vec![
            Span::raw(format!("{}  ", weather_icon(&c.icon))),
            Span::raw(format!("{}°C", c.temp)).bold(),
            dim(format!("  {}", c.description)),
        ]),
        Line::default(),
        Line::from(dim(format!(
            "Feels like {}°C · Humidity {}% · Wind {} m/s ({}°)",
            c.feels_like, c.humidity, c.wind_speed, c.wind_deg
        ))),
        Line::from(dim(format!(
            "Min {}°C · Max {}°C · Pressure {} hPa · Visibility {} km",
            c.temp_min, c.temp_max, c.pressure, c.visibility
        ))),
        Line::from(dim(format!("Sunrise {} · Sunset {}", c.sunrise, c.sunset))),
    ]
}

fn forecast_lines(data: &Forecast) -> Vec<Line<'static>> {
    data.list
        .iter()
        .map(|day| {
            Line::from(vec![
                Span::raw(format!("{:<10} {} ", day.day, weather_icon(&day.icon))),
                Span::raw(format!("{}°", day.temp_max)).bold(),
                dim(format!(" / {}°  {}", day.temp_min, day.description)),
            ])
        })
        .collect()
}

fn hourly_lines(data: &Hourly) -> Vec<Line<'static>> {
    data.hourly
        .iter()
        .map(|slot| {
            Line::from(vec![
                Span::raw(format!("{:<6} {} ", slot.time, weather_icon(&slot.icon))),
                Span::raw(format!("{}°C", slot.temp)).bold(),
                dim(format!("  {}", slot.description)),
            ])
        })
        .collect()
}
