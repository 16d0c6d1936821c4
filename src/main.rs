//! Weather dashboard - terminal controller that publishes an HTML page

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_dash::action::Action;
use weather_dash::api::WeatherClient;
use weather_dash::components::{
    Component, Dashboard, DashboardProps, SearchOverlay, SearchOverlayProps,
};
use weather_dash::effect::{self, Effect};
use weather_dash::geolocation::{
    DEFAULT_GEOLOCATION_URL, Geolocator, IpGeolocator, NoGeolocation,
};
use weather_dash::logging;
use weather_dash::page::HtmlSink;
use weather_dash::reducer::reducer;
use weather_dash::state::{AppState, LOADING_ANIM_TICK_MS, Tab};

/// Weather dashboard
#[derive(Parser, Debug)]
#[command(name = "weather-dash")]
#[command(about = "Search a location, switch views, and publish the dashboard as HTML")]
struct Args {
    /// Location searched on start-up (city name or "lat,lon")
    #[arg(long, short, default_value = "Ahmedabad")]
    location: String,

    /// View to open on
    #[arg(long, short, value_enum, default_value_t = Tab::Current)]
    tab: Tab,

    /// Base URL of the weather backend
    #[arg(long, env = "WEATHER_DASH_API_URL", default_value = "http://localhost:5600")]
    api_url: String,

    /// Write the dashboard page to this file whenever it changes
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Reload the active view every N seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: Option<u64>,

    /// Abandon a request after N seconds (default: wait indefinitely)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Behave as a host without a position source
    #[arg(long)]
    no_geolocation: bool,

    /// IP geolocation endpoint used by "locate"
    #[arg(long, env = "WEATHER_DASH_GEOLOCATION_URL", default_value = DEFAULT_GEOLOCATION_URL)]
    geolocation_url: String,

    /// Append logs to this file (filter with RUST_LOG)
    #[arg(long, env = "WEATHER_DASH_LOG")]
    log_file: Option<PathBuf>,

    /// Fetch once, print the view markup to stdout, and exit
    #[arg(long)]
    print: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DashComponentId {
    Dashboard,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DashContext {
    Main,
    Search,
}

impl EventRoutingState<DashComponentId, DashContext> for AppState {
    fn focused(&self) -> Option<DashComponentId> {
        if self.search_mode {
            Some(DashComponentId::Search)
        } else {
            Some(DashComponentId::Dashboard)
        }
    }

    fn modal(&self) -> Option<DashComponentId> {
        if self.search_mode {
            Some(DashComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DashComponentId) -> DashContext {
        match id {
            DashComponentId::Dashboard => DashContext::Main,
            DashComponentId::Search => DashContext::Search,
        }
    }

    fn default_context(&self) -> DashContext {
        DashContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        location,
        tab,
        api_url,
        output,
        refresh_interval,
        timeout_secs,
        no_geolocation,
        geolocation_url,
        log_file,
        print,
        debug: debug_args,
    } = Args::parse();

    if print {
        logging::init_stderr();
    } else if let Some(path) = &log_file {
        logging::init_file(path)?;
    }

    let client = match timeout_secs {
        Some(secs) => WeatherClient::with_timeout(&api_url, Duration::from_secs(secs))
            .map_err(io::Error::other)?,
        None => WeatherClient::new(&api_url),
    };

    if print {
        return print_once(&client, location, tab, output).await;
    }

    let geolocator: Arc<dyn Geolocator> = if no_geolocation {
        Arc::new(NoGeolocation)
    } else {
        Arc::new(IpGeolocator::new(geolocation_url).map_err(io::Error::other)?)
    };

    spawn_health_check(client.clone());

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let geolocation_supported = geolocator.is_supported();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(geolocation_supported).with_tab(tab))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(%api_url, %location, ?tab, "dashboard starting");

    let runner = EffectRunner { client, geolocator };
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        AppOptions {
            location,
            refresh_interval,
            output,
        },
        replay_actions,
        runner,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// One controller cycle without a terminal: search, fetch, render, print
async fn print_once(
    client: &WeatherClient,
    location: String,
    tab: Tab,
    output: Option<PathBuf>,
) -> io::Result<()> {
    let mut state = AppState::new(false).with_tab(tab);
    let result = reducer(&mut state, Action::SearchSubmit(Some(location)));
    for effect in result.effects {
        if let Effect::FetchWeather {
            request,
            tab,
            location,
        } = effect
        {
            let action = effect::fetch_weather(client, request, tab, &location).await;
            reducer(&mut state, action);
        }
    }

    print!("{}", state.container.markup());
    if let Some(path) = output {
        HtmlSink::new(path).sync(&state)?;
    }
    if state.weather.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}

fn spawn_health_check(client: WeatherClient) {
    tokio::spawn(async move {
        match client.health().await {
            Ok(health) => tracing::info!(
                status = %health.status,
                version = health.version.as_deref().unwrap_or("unknown"),
                "backend reachable"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                base_url = client.base_url(),
                "backend health check failed"
            ),
        }
    });
}

struct AppOptions {
    location: String,
    refresh_interval: Option<u64>,
    output: Option<PathBuf>,
}

/// Runs effects as tasks. Fetches and position lookups share one task key,
/// so starting either replaces whatever was in flight.
struct EffectRunner {
    client: WeatherClient,
    geolocator: Arc<dyn Geolocator>,
}

impl EffectRunner {
    fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        match effect {
            Effect::FetchWeather {
                request,
                tab,
                location,
            } => {
                let client = self.client.clone();
                ctx.tasks().spawn("weather", async move {
                    effect::fetch_weather(&client, request, tab, &location).await
                });
            }
            Effect::LocateDevice { request } => {
                let geolocator = Arc::clone(&self.geolocator);
                ctx.tasks().spawn("weather", async move {
                    effect::locate_device(geolocator.as_ref(), request).await
                });
            }
        }
    }
}

struct DashUi {
    dashboard: Dashboard,
    search: SearchOverlay,
    sink: Option<HtmlSink>,
}

impl DashUi {
    fn new(output: Option<PathBuf>) -> Self {
        Self {
            dashboard: Dashboard,
            search: SearchOverlay::new(),
            sink: output.map(HtmlSink::new),
        }
    }

    fn search_props(state: &AppState, is_focused: bool) -> SearchOverlayProps<'_> {
        SearchOverlayProps {
            query: &state.search_query,
            is_focused,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: |query| Action::SearchSubmit(Some(query)),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DashComponentId>,
    ) {
        event_ctx.set_component_area(DashComponentId::Dashboard, area);

        let props = DashboardProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.dashboard.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            event_ctx.set_component_area(DashComponentId::Search, area);
            let props = Self::search_props(state, render_ctx.is_focused());
            self.search.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&DashComponentId::Search);
        }

        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.sync(state) {
                tracing::warn!(error = %e, "failed to write dashboard page");
            }
        }
    }

    fn handle_dashboard_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let props = Self::search_props(state, true);
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    options: AppOptions,
    replay_actions: Vec<ReplayItem<Action>>,
    runner: EffectRunner,
) -> io::Result<DebugRunOutput<AppState>> {
    let AppOptions {
        location,
        refresh_interval,
        output,
    } = options;

    let ui = Rc::new(RefCell::new(DashUi::new(output)));
    let mut bus: EventBus<AppState, Action, DashComponentId, DashContext> = EventBus::new();
    let keybindings: Keybindings<DashContext> = Keybindings::new();

    let ui_dashboard = Rc::clone(&ui);
    bus.register(DashComponentId::Dashboard, move |event, state| {
        ui_dashboard
            .borrow_mut()
            .handle_dashboard_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DashComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::SearchSubmit(Some(location))),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );

                if let Some(secs) = refresh_interval {
                    runtime.subscriptions().interval(
                        "refresh",
                        Duration::from_secs(secs),
                        || Action::WeatherFetch,
                    );
                }
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect: Effect, ctx: &mut EffectContext<Action>| runner.handle(effect, ctx),
        )
        .await
}
