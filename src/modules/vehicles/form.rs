//! Add-vehicle form: owns its field state and validation

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::vehicle::VehicleDraft;

const MAX_FIELD_LEN: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Plate,
    Brand,
    Model,
    Color,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Plate,
        FormField::Brand,
        FormField::Model,
        FormField::Color,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Plate => "Plate number",
            FormField::Brand => "Brand",
            FormField::Model => "Model",
            FormField::Color => "Color",
        }
    }

    fn index(self) -> usize {
        match self {
            FormField::Plate => 0,
            FormField::Brand => 1,
            FormField::Model => 2,
            FormField::Color => 3,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What a key press did to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Editing,
    Cancelled,
    Submitted(VehicleDraft),
}

#[derive(Debug, Clone)]
pub struct AddVehicleForm {
    values: [String; 4],
    focus: FormField,
    error: Option<String>,
}

impl Default for AddVehicleForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddVehicleForm {
    pub fn new() -> Self {
        Self {
            values: Default::default(),
            focus: FormField::Plate,
            error: None,
        }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => FormOutcome::Cancelled,
            KeyCode::Enter => match self.validate() {
                Ok(draft) => FormOutcome::Submitted(draft),
                Err(message) => {
                    self.error = Some(message);
                    FormOutcome::Editing
                }
            },
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                FormOutcome::Editing
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                FormOutcome::Editing
            }
            KeyCode::Backspace => {
                self.values[self.focus.index()].pop();
                FormOutcome::Editing
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                FormOutcome::Editing
            }
            _ => FormOutcome::Editing,
        }
    }

    fn insert_char(&mut self, c: char) {
        let value = &mut self.values[self.focus.index()];
        if value.chars().count() < MAX_FIELD_LEN {
            value.push(c);
            self.error = None;
        }
    }

    /// Plate number is required; blank optional fields become absent
    pub fn validate(&self) -> Result<VehicleDraft, String> {
        let field = |f: FormField| {
            let value = self.value(f).trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        let Some(plate_number) = field(FormField::Plate) else {
            return Err("Plate number is required".to_string());
        };
        Ok(VehicleDraft {
            plate_number: Some(plate_number),
            vehicle_brand: field(FormField::Brand),
            vehicle_model: field(FormField::Model),
            car_color: field(FormField::Color),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(form: &mut AddVehicleForm, code: KeyCode) -> FormOutcome {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut AddVehicleForm, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_submit_collects_trimmed_fields() {
        let mut form = AddVehicleForm::new();
        type_text(&mut form, " ABC-123 ");
        press(&mut form, KeyCode::Tab);
        type_text(&mut form, "Toyota");
        press(&mut form, KeyCode::Tab);
        type_text(&mut form, "   ");

        let outcome = press(&mut form, KeyCode::Enter);
        assert_eq!(
            outcome,
            FormOutcome::Submitted(VehicleDraft {
                plate_number: Some("ABC-123".to_string()),
                vehicle_brand: Some("Toyota".to_string()),
                vehicle_model: None,
                car_color: None,
            })
        );
    }

    #[test]
    fn test_missing_plate_keeps_form_open() {
        let mut form = AddVehicleForm::new();
        assert_eq!(press(&mut form, KeyCode::Enter), FormOutcome::Editing);
        assert_eq!(form.error(), Some("Plate number is required"));

        type_text(&mut form, "X");
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_focus_wraps_and_backspace_edits_focused_field() {
        let mut form = AddVehicleForm::new();
        press(&mut form, KeyCode::BackTab);
        assert_eq!(form.focus(), FormField::Color);
        type_text(&mut form, "Reds");
        press(&mut form, KeyCode::Backspace);
        assert_eq!(form.value(FormField::Color), "Red");
        assert_eq!(form.value(FormField::Plate), "");
        press(&mut form, KeyCode::Down);
        assert_eq!(form.focus(), FormField::Plate);
        assert_eq!(press(&mut form, KeyCode::Esc), FormOutcome::Cancelled);
    }
}
