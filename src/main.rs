mod app;
mod config;
mod core;
mod domain;
mod infrastructure;
mod modules;
mod store;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::app::{App, StatusLevel};
use crate::config::Config;
use crate::core::Request;
use crate::infrastructure::api::{parse_base_url, ApiConfig, HttpVehicleApi};
use crate::infrastructure::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use crate::store::SessionStore;

#[derive(Debug, Parser)]
#[command(
    name = "garage",
    version,
    about = "Garage: manage your registered vehicles from the terminal"
)]
struct Args {
    /// API base URL (e.g. http://127.0.0.1:8000)
    #[arg(long)]
    api_url: Option<String>,

    /// Save this API token to the session store before starting
    #[arg(long)]
    token: Option<String>,

    /// Forget the stored API token
    #[arg(long, conflicts_with = "token")]
    logout: bool,
}

/// Token lookup result; `warning` is shown once the UI is up
struct Session {
    token: Option<String>,
    warning: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load();
    let api_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_url.clone());
    parse_base_url(&api_url)?;

    let log_path = init_logging(&config);
    info!(api_url = %api_url, log = ?log_path, "starting garage");

    let session = load_session(&args);
    let api = HttpVehicleApi::new(ApiConfig {
        base_url: api_url.clone(),
        token: session.token.clone(),
        timeout: config.request_timeout(),
    })?;
    let runtime = RuntimeBridge::new(Arc::new(api))?;

    let mut app = App::new(api_url, session.token.is_some());
    if let Some(warning) = session.warning {
        app.set_status(warning, StatusLevel::Warn);
    }
    app.mount();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        app.sync_context();
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::VehiclesLoaded { vehicles } => app.apply_vehicles_loaded(vehicles),
            RuntimeEvent::FetchFailed { message } => app.apply_fetch_failed(&message),
            RuntimeEvent::VehicleDeleted { id } => app.apply_vehicle_deleted(&id),
            RuntimeEvent::DeleteFailed {
                id,
                detail,
                message,
            } => app.apply_delete_failed(&id, detail.as_deref(), &message),
            RuntimeEvent::Error { message } => app.apply_runtime_error(message),
        }
    }

    for request in app.take_requests() {
        let cmd = match &request {
            Request::LoadVehicles => RuntimeCommand::FetchVehicles,
            Request::DeleteVehicle(id) => RuntimeCommand::DeleteVehicle { id: id.clone() },
        };
        if let Err(err) = runtime.send(cmd) {
            warn!(error = %err, ?request, "request not dispatched");
            app.apply_dispatch_failed(&request, &err.to_string());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    if app.help_open {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return;
    }
    let page_modal = app.vehicles.is_form_open() || app.vehicles.confirm().is_visible();
    if !page_modal && key.code == KeyCode::Char('?') {
        app.toggle_help();
        return;
    }
    app.handle_key(key);
}

/// Log to a file under the data dir; the terminal belongs to the UI
fn init_logging(config: &Config) -> Option<PathBuf> {
    let path = config::log_path()?;
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level())
        .try_init()
        .ok()?;
    Some(path)
}

fn load_session(args: &Args) -> Session {
    let opened = config::session_db_path()
        .ok_or_else(|| anyhow::anyhow!("no data directory"))
        .and_then(|db_path| {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            SessionStore::open(&db_path)
        });

    let store = match opened {
        Ok(store) => store,
        Err(err) => {
            warn!(error = %err, "session store unavailable");
            return Session {
                token: args.token.clone().filter(|t| !t.trim().is_empty()),
                warning: Some(format!("Session store disabled: {err}")),
            };
        }
    };

    let updated = if args.logout {
        store.clear_token()
    } else if let Some(token) = args.token.as_deref() {
        store.set_token(token)
    } else {
        Ok(())
    };
    if let Err(err) = updated {
        warn!(error = %err, "session store update failed");
    }

    match store.token() {
        Ok(token) => Session {
            warning: token
                .is_none()
                .then(|| "No API token stored; run with --token <TOKEN>".to_string()),
            token,
        },
        Err(err) => {
            warn!(error = %err, "token read failed");
            Session {
                token: None,
                warning: Some(format!("Token read failed: {err}")),
            }
        }
    }
}
