//! Vehicles page - list, add and delete the signed-in user's vehicles

mod confirm;
mod form;
mod view;

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::Frame;
use tracing::{info, warn};

use crate::core::{Action, Context, Module, NotifyLevel, Request};
use crate::domain::vehicle::{Vehicle, VehicleCollection, VehicleDraft, VehicleId, VehicleRecord};

pub use confirm::DeleteConfirm;
pub use form::{AddVehicleForm, FormField, FormOutcome};

pub const FETCH_FAILED: &str = "Failed to fetch vehicles.";
pub const DELETE_SUCCEEDED: &str = "Vehicle deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete vehicle.";
pub const DELETE_PENDING: &str = "Delete already in progress.";

#[derive(Debug, Default)]
pub struct VehiclesPage {
    vehicles: VehicleCollection,
    loading: bool,
    mounted: bool,
    /// Open add form; `None` means the modal is closed
    form: Option<AddVehicleForm>,
    confirm: DeleteConfirm,
    /// Ids with a delete request awaiting the server
    pending_deletes: HashSet<VehicleId>,
    cursor: usize,
    columns: usize,
    spinner_frame: usize,
}

impl VehiclesPage {
    pub fn new() -> Self {
        Self {
            loading: true,
            columns: 1,
            ..Self::default()
        }
    }

    // === Loader ===

    /// First activation issues the one load request
    pub fn mount(&mut self) -> Action {
        if self.mounted {
            return Action::None;
        }
        self.mounted = true;
        self.loading = true;
        Action::Request(Request::LoadVehicles)
    }

    pub fn reload(&mut self) -> Action {
        if self.loading {
            return Action::None;
        }
        self.loading = true;
        Action::Request(Request::LoadVehicles)
    }

    pub fn apply_loaded(&mut self, vehicles: Vec<Vehicle>) -> Action {
        let dropped = self.vehicles.replace_all(vehicles);
        if !dropped.is_empty() {
            warn!(?dropped, "server sent duplicate vehicle ids");
        }
        self.loading = false;
        self.clamp_cursor();
        Action::None
    }

    /// Prior state is kept; only the loading flag resolves
    pub fn apply_fetch_failed(&mut self, message: &str) -> Action {
        warn!(error = message, "vehicle list unavailable");
        self.loading = false;
        Action::Notify(FETCH_FAILED.to_string(), NotifyLevel::Error)
    }

    // === Add flow ===

    pub fn open_form(&mut self) {
        if self.form.is_none() {
            self.form = Some(AddVehicleForm::new());
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn submit(&mut self, draft: VehicleDraft, now_ms: u64) -> Action {
        self.form = None;
        let id = self.vehicles.append_unconfirmed(draft, now_ms);
        info!(vehicle = %id, "vehicle added locally");
        self.cursor = self.vehicles.len().saturating_sub(1);
        Action::Notify(
            "Vehicle added (unconfirmed until reload)".to_string(),
            NotifyLevel::Info,
        )
    }

    // === Delete flow ===

    /// Arm the confirmation for the card under the cursor
    pub fn request_delete(&mut self) -> Action {
        if self.loading {
            return Action::None;
        }
        match self.vehicles.at(self.cursor) {
            Some(record) => {
                let id = record.id().clone();
                self.request_delete_of(id)
            }
            None => Action::None,
        }
    }

    pub fn request_delete_of(&mut self, id: VehicleId) -> Action {
        if self.pending_deletes.contains(&id) {
            return Action::Notify(DELETE_PENDING.to_string(), NotifyLevel::Warn);
        }
        if self.vehicles.contains(&id) {
            self.confirm.arm(id);
        }
        Action::None
    }

    pub fn confirm_delete(&mut self) -> Action {
        let Some(id) = self.confirm.confirm() else {
            return Action::None;
        };
        match self.vehicles.get(&id) {
            Some(record) if !record.is_confirmed() => {
                // The server never saw it
                self.vehicles.remove(&id);
                self.clamp_cursor();
                Action::Notify(DELETE_SUCCEEDED.to_string(), NotifyLevel::Success)
            }
            Some(_) => {
                if self.pending_deletes.insert(id.clone()) {
                    Action::Request(Request::DeleteVehicle(id))
                } else {
                    Action::None
                }
            }
            None => Action::None,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm.cancel();
    }

    pub fn apply_deleted(&mut self, id: &VehicleId) -> Action {
        self.pending_deletes.remove(id);
        self.vehicles.remove(id);
        self.clamp_cursor();
        Action::Notify(DELETE_SUCCEEDED.to_string(), NotifyLevel::Success)
    }

    pub fn apply_delete_failed(
        &mut self,
        id: &VehicleId,
        detail: Option<&str>,
        message: &str,
    ) -> Action {
        self.pending_deletes.remove(id);
        warn!(vehicle = %id, detail, error = message, "vehicle kept after failed delete");
        let message = detail.unwrap_or(DELETE_FAILED);
        Action::Notify(message.to_string(), NotifyLevel::Error)
    }

    // === Accessors ===

    pub fn vehicles(&self) -> &VehicleCollection {
        &self.vehicles
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&AddVehicleForm> {
        self.form.as_ref()
    }

    pub fn confirm(&self) -> &DeleteConfirm {
        &self.confirm
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_record(&self) -> Option<&VehicleRecord> {
        self.vehicles.at(self.cursor)
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    // === Navigation ===

    pub fn on_tick(&mut self) {
        if self.loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Card grid width as laid out by the last draw
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.vehicles.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.vehicles.len() - 1;
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, last as isize) as usize;
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.vehicles.len().saturating_sub(1));
    }
}

impl Module for VehiclesPage {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        if let Some(form) = self.form.as_mut() {
            return match form.handle_key(key) {
                FormOutcome::Editing => Action::None,
                FormOutcome::Cancelled => {
                    self.close_form();
                    Action::None
                }
                FormOutcome::Submitted(draft) => self.submit(draft, ctx.now_ms),
            };
        }

        if self.confirm.is_visible() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.cancel_delete();
                    Action::None
                }
                _ => Action::None,
            };
        }

        let columns = self.columns as isize;
        match key.code {
            KeyCode::Char('a') => self.open_form(),
            KeyCode::Char('d') | KeyCode::Delete => return self.request_delete(),
            KeyCode::Char('r') => return self.reload(),
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-columns),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(columns),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.move_cursor(isize::MAX / 2),
            _ => {}
        }
        Action::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        view::render(self, frame, area, ctx);
    }
}
