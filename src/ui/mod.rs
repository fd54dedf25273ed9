use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod widgets;

use crate::app::{App, StatusLevel};
use crate::config;
use crate::core::Module;

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size());

    app.vehicles.set_columns(layout::grid_columns(areas.main));

    draw_header(f, areas.header, app);
    app.vehicles.render(f, areas.main, &app.ctx);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            "Garage",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {} ", app.ctx.api_endpoint)),
    ]);

    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let session = if app.ctx.signed_in {
        Span::styled("signed in", Style::default().fg(Color::LightGreen))
    } else {
        Span::styled("no token", Style::default().fg(Color::LightYellow))
    };
    let right = Paragraph::new(Line::from(vec![
        Span::styled("Session ", Style::default().fg(Color::DarkGray)),
        session,
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Left);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let page = &app.vehicles;
    let state = if page.is_loading() {
        "loading".to_string()
    } else {
        page.vehicles().len().to_string()
    };
    let mut spans = vec![
        Span::styled("Vehicles ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", state)),
    ];
    let unconfirmed = page.vehicles().unconfirmed_count();
    if unconfirmed > 0 {
        spans.push(Span::styled(
            "Unconfirmed ",
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(
            format!("{}  ", unconfirmed),
            Style::default().fg(Color::LightYellow),
        ));
    }
    if let Some(record) = page.selected_record() {
        spans.push(Span::styled("Selected ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(record.id().to_string()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = if let Some((text, level)) = app.status_text() {
        let color = match level {
            StatusLevel::Info => Color::LightCyan,
            StatusLevel::Success => Color::LightGreen,
            StatusLevel::Warn => Color::LightYellow,
            StatusLevel::Error => Color::LightRed,
        };
        Line::from(vec![
            Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
            Span::styled(text, Style::default().fg(color)),
        ])
    } else {
        action_hints(app)
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn action_hints(app: &App) -> Line<'static> {
    let key = Style::default().fg(Color::LightCyan);
    let page = &app.vehicles;

    if page.is_form_open() {
        return Line::from(vec![
            Span::styled("Tab", key),
            Span::raw(" Next field  "),
            Span::styled("Enter", key),
            Span::raw(" Save  "),
            Span::styled("Esc", key),
            Span::raw(" Cancel"),
        ]);
    }
    if page.confirm().is_visible() {
        return Line::from(vec![
            Span::styled("y", key),
            Span::raw(" Delete  "),
            Span::styled("n", key),
            Span::raw(" Cancel"),
        ]);
    }

    Line::from(vec![
        Span::styled("a", key),
        Span::raw(" Add vehicle  "),
        Span::styled("d", key),
        Span::raw(" Delete  "),
        Span::styled("hjkl", key),
        Span::raw(" Move  "),
        Span::styled("r", key),
        Span::raw(" Reload  "),
        Span::styled("?", key),
        Span::raw(" Help  "),
        Span::styled("q", key),
        Span::raw(" Quit"),
    ])
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = layout::centered_rect(64, 60, area);
    f.render_widget(Clear, popup_area);

    let config_path = config::config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(unknown)".to_string());
    let log_path = config::log_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(disabled)".to_string());

    let lines = vec![
        Line::from("Vehicles"),
        Line::from("  a          Add vehicle"),
        Line::from("  d / Del    Delete selected vehicle"),
        Line::from("  y / n      Confirm / cancel delete"),
        Line::from("  r          Reload from server"),
        Line::from(""),
        Line::from("Navigation"),
        Line::from("  h j k l    Move selection (vim)"),
        Line::from("  g / G      First / last card"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from("Unconfirmed vehicles exist only here until the next reload."),
        Line::from(""),
        Line::from(format!("Config: {config_path}")),
        Line::from(format!("Log:    {log_path}")),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}
