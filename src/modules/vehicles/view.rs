use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::{AddVehicleForm, FormField, VehiclesPage};
use crate::core::Context;
use crate::domain::vehicle::plate_label;
use crate::ui::layout::{card_rect, centered_rect, first_visible_row, grid_rows};
use crate::ui::widgets::VehicleCard;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub const EMPTY_MESSAGE: &str = "No vehicles found.";

pub fn render(page: &VehiclesPage, f: &mut Frame, area: Rect, _ctx: &Context) {
    let count = page.vehicles().len();
    let title = if page.is_loading() {
        " Vehicles ".to_string()
    } else {
        format!(" Vehicles ({count}) ")
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if page.is_loading() {
        let frame = SPINNER[page.spinner_frame() % SPINNER.len()];
        let line = Line::from(vec![
            Span::styled(frame.to_string(), Style::default().fg(Color::LightBlue)),
            Span::raw(" Loading vehicles…"),
        ]);
        draw_centered(f, inner, line);
    } else if page.vehicles().is_empty() {
        draw_centered(f, inner, Line::from(EMPTY_MESSAGE));
    } else {
        draw_cards(page, f, area, inner);
    }

    if let Some(form) = page.form() {
        draw_form_popup(f, area, form);
    }
    if let Some(id) = page.confirm().selected() {
        let plate = page
            .vehicles()
            .get(id)
            .map(|record| plate_label(&record.vehicle).to_string());
        draw_confirm_popup(f, area, plate.as_deref());
    }
}

fn draw_cards(page: &VehiclesPage, f: &mut Frame, area: Rect, inner: Rect) {
    let columns = page.columns;
    let rows = grid_rows(area);
    let first_row = first_visible_row(page.cursor(), columns, rows);
    let skip = first_row * columns;

    for (offset, record) in page.vehicles().iter().enumerate().skip(skip) {
        let slot = offset - skip;
        let Some(rect) = card_rect(inner, columns, slot / columns, slot % columns) else {
            break;
        };
        let card = VehicleCard::new(record).selected(offset == page.cursor());
        f.render_widget(card, rect);
    }
}

fn draw_centered(f: &mut Frame, area: Rect, line: Line<'_>) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    let row = Rect::new(area.x, y, area.width, 1);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

fn draw_form_popup(f: &mut Frame, area: Rect, form: &AddVehicleForm) {
    let popup_area = centered_rect(60, 50, area);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from("")];
    for field in FormField::ALL {
        let focused = field == form.focus();
        let marker = if focused { "> " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let mut value = form.value(field).to_string();
        if focused {
            value.push('_');
        }
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::LightCyan)),
            Span::styled(
                format!("{:<14}", field.label()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(value, value_style),
        ]));
    }
    lines.push(Line::from(""));
    if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::LightRed),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tab next field  Enter save  Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Add Vehicle").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);
}

fn draw_confirm_popup(f: &mut Frame, area: Rect, plate: Option<&str>) {
    let popup_area = centered_rect(50, 30, area);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(""),
        Line::from("Are you sure you want to delete this vehicle?"),
    ];
    if let Some(plate) = plate {
        lines.push(Line::from(Span::styled(
            plate.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            " y  Yes, I'm sure ",
            Style::default().fg(Color::White).bg(Color::Red),
        ),
        Span::raw("   "),
        Span::styled(" n  No, cancel ", Style::default().fg(Color::Black).bg(Color::Gray)),
    ]));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title("Delete Vehicle")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::core::Module;
    use crate::domain::vehicle::{Vehicle, VehicleId};

    fn vehicle(id: u64, plate: Option<&str>) -> Vehicle {
        Vehicle {
            id: VehicleId::from(id),
            plate_number: plate.map(str::to_string),
            vehicle_brand: Some("Toyota".to_string()),
            vehicle_model: None,
            car_color: None,
            user_id: None,
            created_at: None,
        }
    }

    fn screen(page: &VehiclesPage) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let ctx = Context::default();
        terminal
            .draw(|f| {
                let area = f.size();
                page.render(f, area, &ctx);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_loading_shows_spinner_only() {
        let page = VehiclesPage::new();
        let text = screen(&page);
        assert!(text.contains("Loading vehicles"));
        assert!(!text.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_empty_state() {
        let mut page = VehiclesPage::new();
        page.apply_loaded(Vec::new());
        assert!(screen(&page).contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_one_card_per_record() {
        let mut page = VehiclesPage::new();
        page.set_columns(3);
        page.apply_loaded(vec![
            vehicle(1, Some("KL-01")),
            vehicle(2, None),
            vehicle(3, Some("KL-03")),
        ]);
        let text = screen(&page);
        assert!(text.contains("Vehicles (3)"));
        assert!(text.contains("KL-01"));
        assert!(text.contains("No Plate"));
        assert!(text.contains("KL-03"));
        assert_eq!(text.matches("Brand:").count(), 3);
        assert_eq!(text.matches("Created: N/A").count(), 3);
    }

    #[test]
    fn test_confirm_popup_drawn_from_state() {
        let mut page = VehiclesPage::new();
        page.apply_loaded(vec![vehicle(5, Some("KL-05"))]);
        assert!(!screen(&page).contains("Are you sure"));

        page.request_delete_of(VehicleId::from(5));
        assert!(screen(&page).contains("Are you sure you want to delete this vehicle?"));

        page.cancel_delete();
        assert!(!screen(&page).contains("Are you sure"));
    }
}
