use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use crate::core::{Action, Context, Module, NotifyLevel, Request};
use crate::domain::vehicle::{Vehicle, VehicleId};
use crate::modules::vehicles::VehiclesPage;

/// How long a notification stays on the status line
pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Success => StatusLevel::Success,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug)]
pub struct App {
    /// Shared context for modules
    pub ctx: Context,
    pub vehicles: VehiclesPage,
    pub status: Option<StatusMessage>,
    pub help_open: bool,
    pub should_quit: bool,
    pending_requests: VecDeque<Request>,
}

impl App {
    pub fn new(api_endpoint: String, signed_in: bool) -> Self {
        let mut ctx = Context::new();
        ctx.api_endpoint = api_endpoint;
        ctx.signed_in = signed_in;
        Self {
            ctx,
            vehicles: VehiclesPage::new(),
            status: None,
            help_open: false,
            should_quit: false,
            pending_requests: VecDeque::new(),
        }
    }

    /// Activate the page; the first call queues the initial load
    pub fn mount(&mut self) {
        let action = self.vehicles.mount();
        self.apply_action(action);
    }

    /// Sync context with wall clock
    pub fn sync_context(&mut self) {
        self.ctx.now_ms = chrono::Utc::now().timestamp_millis().max(0) as u64;
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
        self.vehicles.on_tick();
    }

    pub fn toggle_help(&mut self) {
        self.help_open = !self.help_open;
    }

    /// Route a key to the page and apply what it asks for
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = self.vehicles.handle_key(key, &mut self.ctx);
        self.apply_action(action);
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Notify(text, level) => self.set_status(text, level.into()),
            Action::Request(request) => self.pending_requests.push_back(request),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Drain requests queued since the last frame
    pub fn take_requests(&mut self) -> Vec<Request> {
        self.pending_requests.drain(..).collect()
    }

    // === Runtime results ===

    pub fn apply_vehicles_loaded(&mut self, vehicles: Vec<Vehicle>) {
        let action = self.vehicles.apply_loaded(vehicles);
        self.apply_action(action);
    }

    pub fn apply_fetch_failed(&mut self, message: &str) {
        let action = self.vehicles.apply_fetch_failed(message);
        self.apply_action(action);
    }

    pub fn apply_vehicle_deleted(&mut self, id: &VehicleId) {
        let action = self.vehicles.apply_deleted(id);
        self.apply_action(action);
    }

    pub fn apply_delete_failed(&mut self, id: &VehicleId, detail: Option<&str>, message: &str) {
        let action = self.vehicles.apply_delete_failed(id, detail, message);
        self.apply_action(action);
    }

    pub fn apply_runtime_error(&mut self, message: String) {
        self.set_status(message, StatusLevel::Error);
    }

    /// A dispatch that never reached the worker still has to resolve
    pub fn apply_dispatch_failed(&mut self, request: &Request, message: &str) {
        match request {
            Request::LoadVehicles => self.apply_fetch_failed(message),
            Request::DeleteVehicle(id) => self.apply_delete_failed(id, None, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::modules::vehicles::{DELETE_FAILED, DELETE_SUCCEEDED, FETCH_FAILED};

    fn vehicle(id: u64) -> Vehicle {
        Vehicle {
            id: VehicleId::from(id),
            plate_number: Some(format!("P-{id}")),
            vehicle_brand: None,
            vehicle_model: None,
            car_color: None,
            user_id: None,
            created_at: None,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mounted() -> App {
        let mut app = App::new("http://127.0.0.1:8000".to_string(), true);
        app.mount();
        app
    }

    #[test]
    fn test_mount_queues_single_load() {
        let mut app = mounted();
        app.mount();
        assert_eq!(app.take_requests(), vec![Request::LoadVehicles]);
        assert!(app.take_requests().is_empty());
        assert!(app.vehicles.is_loading());
    }

    #[test]
    fn test_fetch_failure_resolves_loading_with_one_notice() {
        let mut app = mounted();
        app.take_requests();
        app.apply_fetch_failed("connection refused");

        assert!(!app.vehicles.is_loading());
        assert!(app.vehicles.vehicles().is_empty());
        assert_eq!(app.status_text(), Some((FETCH_FAILED, StatusLevel::Error)));
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_add_flow_makes_no_request() {
        let mut app = mounted();
        app.take_requests();
        app.apply_vehicles_loaded(vec![vehicle(1), vehicle(2)]);

        app.handle_key(key(KeyCode::Char('a')));
        for c in "ABC-123".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.vehicles.vehicles().len(), 3);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_delete_round_trip() {
        let mut app = mounted();
        app.take_requests();
        app.apply_vehicles_loaded(vec![vehicle(4), vehicle(5), vehicle(6)]);

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('y')));
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(
            app.take_requests(),
            vec![Request::DeleteVehicle(VehicleId::from(5))]
        );

        app.apply_vehicle_deleted(&VehicleId::from(5));
        let ids: Vec<String> = app
            .vehicles
            .vehicles()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, vec!["4", "6"]);
        assert_eq!(
            app.status_text(),
            Some((DELETE_SUCCEEDED, StatusLevel::Success))
        );
    }

    #[test]
    fn test_cancel_makes_no_request() {
        let mut app = mounted();
        app.take_requests();
        app.apply_vehicles_loaded(vec![vehicle(5)]);

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Char('n')));

        assert!(app.take_requests().is_empty());
        assert!(!app.vehicles.confirm().is_visible());
        assert_eq!(app.vehicles.vehicles().len(), 1);
        // 'n' outside the dialog is not bound to anything
        assert!(app.status.is_none());
    }

    #[test]
    fn test_dispatch_failure_resolves_request() {
        let mut app = mounted();
        let requests = app.take_requests();
        app.apply_dispatch_failed(&requests[0], "Worker channel closed");
        assert!(!app.vehicles.is_loading());

        app.apply_vehicles_loaded(vec![vehicle(5)]);
        app.apply_dispatch_failed(&Request::DeleteVehicle(VehicleId::from(5)), "closed");
        assert_eq!(app.status_text(), Some((DELETE_FAILED, StatusLevel::Error)));
        assert_eq!(app.vehicles.vehicles().len(), 1);
    }

    #[test]
    fn test_quit_key() {
        let mut app = mounted();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_repeated_confirm_sends_one_delete() {
        let mut app = mounted();
        app.take_requests();
        app.apply_vehicles_loaded(vec![vehicle(5)]);

        for c in ['d', 'y', 'd', 'y'] {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            app.take_requests(),
            vec![Request::DeleteVehicle(VehicleId::from(5))]
        );
        assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Warn));

        app.apply_vehicle_deleted(&VehicleId::from(5));
        assert!(app.vehicles.vehicles().is_empty());
    }
}
