use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::widgets::{CARD_HEIGHT, CARD_MIN_WIDTH};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub main: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        main: vertical[1],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

/// Card columns that fit in a bordered page area
pub fn grid_columns(page: Rect) -> usize {
    let inner_width = page.width.saturating_sub(2);
    usize::from((inner_width / CARD_MIN_WIDTH).max(1))
}

/// Card rows that fit in a bordered page area
pub fn grid_rows(page: Rect) -> usize {
    let inner_height = page.height.saturating_sub(2);
    usize::from((inner_height / CARD_HEIGHT).max(1))
}

/// First visible row so that `cursor` stays on screen
pub fn first_visible_row(cursor: usize, columns: usize, rows: usize) -> usize {
    let cursor_row = cursor / columns.max(1);
    let rows = rows.max(1);
    if cursor_row >= rows {
        cursor_row + 1 - rows
    } else {
        0
    }
}

/// Slot for the card at grid position (`row`, `col`) inside `inner`
///
/// Returns `None` when the slot would spill past the bottom edge.
pub fn card_rect(inner: Rect, columns: usize, row: usize, col: usize) -> Option<Rect> {
    let columns = columns.max(1) as u16;
    let width = inner.width / columns;
    let x = inner.x + width * col as u16;
    let y = inner.y.checked_add(CARD_HEIGHT.checked_mul(row as u16)?)?;
    if y + CARD_HEIGHT > inner.y + inner.height {
        return None;
    }
    Some(Rect::new(x, y, width, CARD_HEIGHT))
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
