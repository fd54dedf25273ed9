//! Module trait for UI pages

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use super::{Action, Context};

/// Trait for UI modules that can handle input and draw themselves
pub trait Module {
    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action;

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context);
}
