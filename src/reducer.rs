//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::api::generic_message;
use crate::effect::Effect;
use crate::render;
use crate::state::{AppState, Tab};
use crate::status::{self, EMPTY_QUERY_MESSAGE, GEOLOCATION_UNSUPPORTED_MESSAGE};
use crate::templates::TemplateError;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherFetch => match state.location.clone() {
            Some(location) => begin_fetch(state, location),
            None => DispatchResult::unchanged(),
        },

        Action::WeatherDidLoad { request, payload } => {
            if is_stale(state, request) {
                return DispatchResult::unchanged();
            }
            match render::render(&payload) {
                Ok(markup) => {
                    state.container.replace(markup);
                    state.weather = DataResource::Loaded(payload);
                }
                Err(e) => {
                    tracing::error!(error = %e, tab = ?payload.tab(), "failed to render view");
                    show_error(state, generic_message(payload.tab()).to_string());
                }
            }
            DispatchResult::changed()
        }

        Action::WeatherDidError { request, message } => {
            if is_stale(state, request) {
                return DispatchResult::unchanged();
            }
            show_error(state, message);
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => {
            let query = query.unwrap_or_else(|| state.search_query.clone());
            let query = query.trim();
            if query.is_empty() {
                supersede(state);
                show_error(state, EMPTY_QUERY_MESSAGE.to_string());
                return DispatchResult::changed();
            }
            let location = query.to_string();
            state.search_mode = false;
            state.location = Some(location.clone());
            begin_fetch(state, location)
        }

        // ===== Locate actions =====
        Action::LocateDevice => {
            let request = supersede(state);
            if !state.geolocation_supported {
                show_error(state, GEOLOCATION_UNSUPPORTED_MESSAGE.to_string());
                return DispatchResult::changed();
            }
            show_loading(state);
            DispatchResult::changed_with(Effect::LocateDevice { request })
        }

        Action::LocateDidResolve { request, coords } => {
            if is_stale(state, request) {
                return DispatchResult::unchanged();
            }
            let location = coords.to_query();
            state.location = Some(location.clone());
            begin_fetch(state, location)
        }

        Action::LocateDidError { request, message } => {
            if is_stale(state, request) {
                return DispatchResult::unchanged();
            }
            show_error(state, message);
            DispatchResult::changed()
        }

        // ===== Tab actions =====
        Action::TabSwitch(tab) => switch_tab(state, tab),
        Action::TabNext => {
            let tab = state.active_tab.next();
            switch_tab(state, tab)
        }
        Action::TabPrev => {
            let tab = state.active_tab.prev();
            switch_tab(state, tab)
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.weather.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn switch_tab(state: &mut AppState, tab: Tab) -> DispatchResult<Effect> {
    state.active_tab = tab;
    state.tabs.activate(tab);
    match state.location.clone() {
        Some(location) => begin_fetch(state, location),
        None => DispatchResult::changed(),
    }
}

/// Show the loading card and emit a fetch stamped with a fresh generation
fn begin_fetch(state: &mut AppState, location: String) -> DispatchResult<Effect> {
    let request = supersede(state);
    show_loading(state);
    DispatchResult::changed_with(Effect::FetchWeather {
        request,
        tab: state.active_tab,
        location,
    })
}

/// Start a new generation; results for older ones will be dropped
fn supersede(state: &mut AppState) -> u64 {
    state.request_id = state.request_id.wrapping_add(1);
    state.request_id
}

fn is_stale(state: &AppState, request: u64) -> bool {
    let stale = request != state.request_id;
    if stale {
        tracing::debug!(
            request,
            current = state.request_id,
            "dropping superseded result"
        );
    }
    stale
}

fn show_loading(state: &mut AppState) {
    state.weather = DataResource::Loading;
    state.tick_count = 0;
    replace_view(state, status::loading_card());
}

fn show_error(state: &mut AppState, message: String) {
    replace_view(state, status::error_card(&message));
    state.weather = DataResource::Failed(message);
}

/// A card that fails to render leaves the container empty
fn replace_view(state: &mut AppState, card: Result<String, TemplateError>) {
    match card {
        Ok(markup) => state.container.replace(markup),
        Err(e) => {
            tracing::error!(error = %e, "failed to render status card");
            state.container.replace(String::new());
        }
    }
}
