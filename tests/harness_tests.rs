//! Controller flows driven through EffectStoreTestHarness
//!
//! Async completions are simulated with `complete_action`, so these cover
//! ordering between requests without a network.

use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;
use weather_dash::{
    action::Action,
    components::{Component, Dashboard, DashboardProps, WeatherPanel, WeatherPanelProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Forecast, ForecastDay, Hourly, HourlySlot, Tab, WeatherPayload},
};

fn forecast() -> WeatherPayload {
    WeatherPayload::Forecast(Forecast {
        city: "Ahmedabad".into(),
        country: "IN".into(),
        list: ["Mon", "Tue", "Wed", "Thu", "Fri"]
            .iter()
            .map(|day| ForecastDay {
                day: (*day).into(),
                temp_min: 18.0,
                temp_max: 31.0,
                icon: "02d".into(),
                description: "few clouds".into(),
                ..Default::default()
            })
            .collect(),
    })
}

fn hourly() -> WeatherPayload {
    WeatherPayload::Hourly(Hourly {
        city: "Ahmedabad".into(),
        country: "IN".into(),
        hourly: vec![HourlySlot {
            time: "09:00".into(),
            temp: 24.0,
            icon: "01d".into(),
            description: "clear sky".into(),
            ..Default::default()
        }],
    })
}

/// State right after searching `location`: request 1 is in flight
fn searched(location: &str) -> AppState {
    let mut state = AppState::default();
    reducer(&mut state, Action::SearchSubmit(Some(location.into())));
    state
}

#[test]
fn test_search_then_load_flow() {
    let state = AppState::default().with_tab(Tab::Forecast);
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::SearchSubmit(Some("Ahmedabad".into())));
    harness.assert_state(|s| s.weather.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::FetchWeather { tab: Tab::Forecast, .. })
    });

    harness.complete_action(Action::WeatherDidLoad {
        request: 1,
        payload: forecast(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.weather.is_loaded());
    harness.assert_state(|s| s.container.markup().matches("forecast-item").count() == 5);
}

#[test]
fn test_superseded_result_is_dropped() {
    let mut harness = EffectStoreTestHarness::new(searched("Ahmedabad"), reducer);

    // Switching tabs starts request 2 while request 1 is still out
    harness.dispatch_collect(Action::TabSwitch(Tab::Hourly));
    harness.drain_effects();

    harness.complete_action(Action::WeatherDidLoad {
        request: 1,
        payload: forecast(),
    });
    harness.complete_action(Action::WeatherDidLoad {
        request: 2,
        payload: hourly(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 2);
    assert_eq!(changed, 1, "Only the latest request should change state");

    harness.assert_state(|s| matches!(s.weather.data(), Some(WeatherPayload::Hourly(_))));
    harness.assert_state(|s| s.container.markup().contains("24-Hour Forecast"));
}

#[test]
fn test_late_result_after_newer_error_is_dropped() {
    let mut harness = EffectStoreTestHarness::new(searched("Atlantis"), reducer);
    harness.dispatch_collect(Action::SearchSubmit(Some("Ahmedabad".into())));

    harness.complete_action(Action::WeatherDidError {
        request: 2,
        message: "city not found".into(),
    });
    harness.complete_action(Action::WeatherDidLoad {
        request: 1,
        payload: forecast(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.weather.error() == Some("city not found"));
    harness.assert_state(|s| s.container.markup().contains("city not found"));
}

#[test]
fn test_refresh_reuses_location_and_tab() {
    let mut harness = EffectStoreTestHarness::new(searched("Ahmedabad"), reducer);
    harness.dispatch_collect(Action::TabSwitch(Tab::Forecast));
    harness.drain_effects();

    harness.dispatch_collect(Action::WeatherFetch);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| {
        matches!(
            e,
            Effect::FetchWeather { request: 3, tab: Tab::Forecast, location }
                if location == "Ahmedabad"
        )
    });
}

#[test]
fn test_refresh_without_location_is_noop() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let results = harness.dispatch_all([Action::WeatherFetch, Action::Tick]);
    assert_eq!(results, vec![false, false]);
    harness.drain_effects().effects_count(0);
}

#[test]
fn test_keyboard_tab_switch() {
    let mut harness = EffectStoreTestHarness::new(searched("Ahmedabad"), reducer);
    let mut component = Dashboard;

    let actions = harness.send_keys::<NumericComponentId, _, _>("3", |state, event| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_first(Action::TabSwitch(Tab::Hourly));

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.active_tab == Tab::Hourly);
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::FetchWeather { tab: Tab::Hourly, .. }));
}

#[test]
fn test_render_loading_state() {
    let mut harness = EffectStoreTestHarness::new(searched("Ahmedabad"), reducer);
    let mut component = WeatherPanel;

    let output = harness.render_plain(80, 24, |frame, area, state| {
        component.render(frame, area, WeatherPanelProps { state });
    });

    assert!(
        output.contains("Loading weather data..."),
        "Loading line should be visible:\n{}",
        output
    );
}

#[test]
fn test_render_error_state() {
    let mut harness = EffectStoreTestHarness::new(searched("Atlantis"), reducer);
    harness.complete_action(Action::WeatherDidError {
        request: 1,
        message: "city not found".into(),
    });
    harness.process_emitted();
    let mut component = WeatherPanel;

    let output = harness.render_plain(80, 24, |frame, area, state| {
        component.render(frame, area, WeatherPanelProps { state });
    });

    assert!(output.contains("Error"));
    assert!(output.contains("city not found"));
    assert!(output.contains("to retry"));
}
