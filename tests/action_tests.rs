//! Action and state tests using EffectStore and TestHarness
//!
//! Dispatch actions through the real reducer and check state, effects and
//! the markup left in the view container.

use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};
use weather_dash::{
    action::Action,
    components::{Component, Dashboard, DashboardProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Coordinates, CurrentWeather, Place, Snapshot, Tab, WeatherPayload},
    status::{EMPTY_QUERY_MESSAGE, GEOLOCATION_UNSUPPORTED_MESSAGE},
};

fn ahmedabad() -> WeatherPayload {
    WeatherPayload::Current(CurrentWeather {
        location: Place {
            name: "Ahmedabad".into(),
            country: "IN".into(),
            coordinates: None,
        },
        current: Snapshot {
            temp: 21.5,
            icon: "01d".into(),
            description: "clear sky".into(),
            ..Default::default()
        },
        timestamp: None,
    })
}

#[test]
fn test_search_submit_fetches_active_tab() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::SearchSubmit(Some("Ahmedabad".into())));
    assert!(result.changed, "State should change");
    assert!(store.state().weather.is_loading());
    assert_eq!(
        result.effects,
        vec![Effect::FetchWeather {
            request: 1,
            tab: Tab::Current,
            location: "Ahmedabad".into(),
        }]
    );
}

#[test]
fn test_search_submit_uses_input_text_when_none() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchOpen);
    store.dispatch(Action::SearchQueryChange("  Pune ".into()));
    let result = store.dispatch(Action::SearchSubmit(None));

    assert!(!store.state().search_mode);
    assert_eq!(store.state().location.as_deref(), Some("Pune"));
    assert!(matches!(
        &result.effects[..],
        [Effect::FetchWeather { location, .. }] if location == "Pune"
    ));
}

#[test]
fn test_blank_search_shows_error_without_fetch() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::SearchSubmit(Some("   ".into())));
    assert!(result.effects.is_empty());
    assert_eq!(store.state().weather.error(), Some(EMPTY_QUERY_MESSAGE));
    assert!(store.state().container.markup().contains(EMPTY_QUERY_MESSAGE));
    assert_eq!(store.state().location, None);
}

#[test]
fn test_load_renders_into_container() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchSubmit(Some("Ahmedabad".into())));
    store.dispatch(Action::WeatherDidLoad {
        request: 1,
        payload: ahmedabad(),
    });

    assert!(store.state().weather.is_loaded());
    let markup = store.state().container.markup();
    assert!(markup.contains("Ahmedabad, IN"));
    assert!(markup.contains("21.5°C"));
    assert!(markup.contains("clear sky"));
}

#[test]
fn test_tab_switch_refetches_with_location() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::SearchSubmit(Some("Ahmedabad".into())));

    let result = store.dispatch(Action::TabSwitch(Tab::Hourly));
    assert!(store.state().tabs.is_active(Tab::Hourly));
    assert_eq!(
        result.effects,
        vec![Effect::FetchWeather {
            request: 2,
            tab: Tab::Hourly,
            location: "Ahmedabad".into(),
        }]
    );
}

#[test]
fn test_tab_switch_without_location_only_marks_tab() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::TabNext);
    assert!(result.changed);
    assert!(result.effects.is_empty());
    assert_eq!(store.state().active_tab, Tab::Forecast);
    assert!(store.state().weather.is_empty());
}

#[test]
fn test_locate_unsupported_shows_error() {
    let mut store = EffectStore::new(AppState::new(false), reducer);

    let result = store.dispatch(Action::LocateDevice);
    assert!(result.effects.is_empty());
    assert_eq!(
        store.state().weather.error(),
        Some(GEOLOCATION_UNSUPPORTED_MESSAGE)
    );
}

#[test]
fn test_locate_resolve_searches_coordinates() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::LocateDevice);
    assert_eq!(result.effects, vec![Effect::LocateDevice { request: 1 }]);
    assert!(store.state().weather.is_loading());

    let result = store.dispatch(Action::LocateDidResolve {
        request: 1,
        coords: Coordinates {
            lat: 23.0225,
            lon: 72.5714,
        },
    });
    assert_eq!(store.state().location.as_deref(), Some("23.0225,72.5714"));
    assert!(matches!(
        &result.effects[..],
        [Effect::FetchWeather { request: 2, location, .. }] if location == "23.0225,72.5714"
    ));
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = Dashboard;

    let actions = harness.send_keys::<NumericComponentId, _, _>("2", |state, event| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::TabSwitch(Tab::Forecast));
}

#[test]
fn test_emitted_actions() {
    let mut harness = TestHarness::<AppState, Action>::default();

    harness.emit(Action::WeatherFetch);
    harness.emit(Action::TabSwitch(Tab::Hourly));

    let emitted = harness.drain_emitted();
    assert_emitted!(emitted, Action::WeatherFetch);
    assert_emitted!(emitted, Action::TabSwitch(Tab::Hourly));
    assert_not_emitted!(emitted, Action::Quit);
}

#[test]
fn test_action_categories() {
    assert_eq!(Action::WeatherFetch.category(), Some("weather"));
    assert_eq!(
        Action::WeatherDidError {
            request: 1,
            message: "x".into()
        }
        .category(),
        Some("weather_did")
    );
    assert_eq!(Action::SearchOpen.category(), Some("search"));
    assert_eq!(Action::TabNext.category(), Some("tab"));
    assert_eq!(Action::Quit.category(), None);

    assert!(Action::TabPrev.is_tab());
    assert!(Action::SearchClose.is_search());
}
