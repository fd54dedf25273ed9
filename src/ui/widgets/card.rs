//! Vehicle card widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Paragraph, Widget,
    },
};

use crate::domain::vehicle::{created_label, field_label, plate_label, VehicleRecord};

/// Rows a card occupies including borders
pub const CARD_HEIGHT: u16 = 6;
/// Narrowest a card column may get
pub const CARD_MIN_WIDTH: u16 = 32;

pub struct VehicleCard<'a> {
    record: &'a VehicleRecord,
    selected: bool,
}

impl<'a> VehicleCard<'a> {
    pub fn new(record: &'a VehicleRecord) -> Self {
        Self {
            record,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for VehicleCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let vehicle = &self.record.vehicle;

        let mut title = vec![Span::styled(
            format!(" {} ", plate_label(vehicle)),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !self.record.is_confirmed() {
            title.push(Span::styled(
                "unconfirmed ",
                Style::default().fg(Color::LightYellow),
            ));
        }

        let border_style = if self.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Title::from(Line::from(title)));
        if self.selected {
            block = block.title(
                Title::from(Span::styled(" d delete ", Style::default().fg(Color::LightRed)))
                    .position(Position::Bottom)
                    .alignment(Alignment::Right),
            );
        }

        let label = Style::default().fg(Color::DarkGray);
        let lines = vec![
            Line::from(vec![
                Span::styled("Brand:   ", label),
                Span::raw(field_label(vehicle.vehicle_brand.as_deref()).to_string()),
            ]),
            Line::from(vec![
                Span::styled("Model:   ", label),
                Span::raw(field_label(vehicle.vehicle_model.as_deref()).to_string()),
            ]),
            Line::from(vec![
                Span::styled("Color:   ", label),
                Span::raw(field_label(vehicle.car_color.as_deref()).to_string()),
            ]),
            Line::from(vec![
                Span::styled("Created: ", label),
                Span::raw(created_label(vehicle)),
            ]),
        ];

        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(lines).render(inner, buf);
    }
}
