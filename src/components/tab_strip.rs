use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Tabs,
};

use super::Component;
use crate::action::Action;
use crate::dom::TabBar;
use crate::state::Tab;

/// Terminal rendition of the tab triggers
pub struct TabStrip;

pub struct TabStripProps<'a> {
    pub tabs: &'a TabBar,
}

impl Component<Action> for TabStrip {
    type Props<'a> = TabStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let titles: Vec<String> = Tab::ALL
            .iter()
            .map(|tab| format!("{} {}", tab.index() + 1, tab.label()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(props.tabs.active().index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .divider(" | ");
        frame.render_widget(tabs, area);
    }
}
