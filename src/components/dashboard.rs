use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, TabStrip, TabStripProps, WeatherPanel, WeatherPanelProps};
use crate::action::Action;
use crate::state::{AppState, Tab};

/// Props for Dashboard - read-only view of state
pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Tab strip, weather panel and key hints
#[derive(Default)]
pub struct Dashboard;

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') | KeyCode::Char('s') => Some(Action::SearchOpen),
                KeyCode::Char('g') => Some(Action::LocateDevice),
                KeyCode::Char('1') => Some(Action::TabSwitch(Tab::Current)),
                KeyCode::Char('2') => Some(Action::TabSwitch(Tab::Forecast)),
                KeyCode::Char('3') => Some(Action::TabSwitch(Tab::Hourly)),
                KeyCode::Tab | KeyCode::Right => Some(Action::TabNext),
                KeyCode::BackTab | KeyCode::Left => Some(Action::TabPrev),
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherFetch),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Tabs
            Constraint::Min(1),    // View
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut tabs = TabStrip;
        tabs.render(
            frame,
            chunks[0],
            TabStripProps {
                tabs: &props.state.tabs,
            },
        );

        let mut panel = WeatherPanel;
        panel.render(frame, chunks[1], WeatherPanelProps { state: props.state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("g", "locate"),
                    StatusBarHint::new("1-3", "tabs"),
                    StatusBarHint::new("r", "reload"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn actions_for(keys: &str, is_focused: bool) -> Vec<Action> {
        let mut component = Dashboard;
        let state = AppState::default();
        keys.split_whitespace()
            .flat_map(|k| {
                let props = DashboardProps {
                    state: &state,
                    is_focused,
                };
                component
                    .handle_event(&EventKind::Key(key(k)), props)
                    .into_iter()
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn test_number_keys_switch_tabs() {
        let actions = actions_for("1 2 3", true);
        actions.assert_count(3);
        assert_eq!(
            actions,
            vec![
                Action::TabSwitch(Tab::Current),
                Action::TabSwitch(Tab::Forecast),
                Action::TabSwitch(Tab::Hourly),
            ]
        );
    }

    #[test]
    fn test_search_and_locate_keys() {
        let actions = actions_for("s g", true);
        assert_eq!(actions, vec![Action::SearchOpen, Action::LocateDevice]);
    }

    #[test]
    fn test_handle_event_quit() {
        actions_for("q", true).assert_first(Action::Quit);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        actions_for("r g 1", false).assert_empty();
    }

    #[test]
    fn test_render_shows_tabs_and_hints() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = Dashboard;
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            let props = DashboardProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Current Weather"));
        assert!(output.contains("Hourly Forecast"));
        assert!(output.contains("search"));
        assert!(output.contains("to search for a location"));
    }
}
