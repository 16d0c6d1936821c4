//! Page elements the controller writes into.
//!
//! These hold the results of the pure renderers; they never build markup for
//! weather data themselves.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::Tab;

/// The element that shows exactly one view at a time
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ViewContainer {
    markup: String,
}

impl ViewContainer {
    /// Replace the whole content. There is no partial patching.
    pub fn replace(&mut self, markup: String) {
        self.markup = markup;
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

/// The tab triggers and their active indicator.
///
/// Only the active tab is stored, so exactly one trigger is marked active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TabBar {
    active: Tab,
}

impl TabBar {
    pub fn activate(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// Every trigger in display order with its active flag
    pub fn triggers(&self) -> impl Iterator<Item = (Tab, bool)> + '_ {
        Tab::ALL.into_iter().map(|tab| (tab, self.is_active(tab)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_replace_discards_previous() {
        let mut container = ViewContainer::default();
        assert!(container.is_empty());
        container.replace("<p>one</p>".into());
        container.replace("<p>two</p>".into());
        assert_eq!(container.markup(), "<p>two</p>");
    }

    #[test]
    fn test_exactly_one_trigger_active() {
        let mut tabs = TabBar::default();
        for tab in Tab::ALL {
            tabs.activate(tab);
            let active: Vec<_> = tabs.triggers().filter(|(_, on)| *on).collect();
            assert_eq!(active, vec![(tab, true)]);
        }
    }
}
