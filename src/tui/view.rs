//! Entry screen rendering
//!
//! Top to bottom: the input with ghost text, the live preview, the current
//! selection, key hints, the status line and the records saved this run.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::display::format_preview_line;

use super::app::{App, StatusKind};

/// Render the entry screen
pub fn render(frame: &mut Frame, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(frame.area());

    render_input(frame, app, chunks[0]);
    render_preview(frame, app, chunks[1]);
    render_selection(frame, app, chunks[2]);
    render_help(frame, chunks[3]);
    render_status(frame, app, chunks[4]);
    render_submitted(frame, app, chunks[5]);
}

fn render_input(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let block = Block::default()
        .title(" tally ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = app.input.clone().ghost(app.ghost_text());
    frame.render_widget(input, inner);
}

fn render_preview(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let line = match app.session.preview() {
        Some(draft) => {
            let color = if draft.is_inflow() {
                Color::Green
            } else {
                Color::Yellow
            };
            Line::from(Span::styled(
                format_preview_line(
                    draft,
                    &app.settings.currency_symbol,
                    &app.settings.date_format,
                ),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(Span::styled(
            "No amount yet",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(" Preview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn render_selection(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let selection = app.session.selection();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let date_text = match selection.date {
        Some(date) => format!("{} (picked)", date.format(&app.settings.date_format)),
        None => app
            .effective_date()
            .format(&app.settings.date_format)
            .to_string(),
    };

    let mut spans = vec![
        Span::styled(" Wallet: ", label),
        Span::styled(
            format!("{} ({})", selection.wallet.name, selection.wallet.wallet_type),
            value,
        ),
        Span::raw(" │ "),
        Span::styled("Merchant: ", label),
        Span::styled(selection.merchant.as_deref().unwrap_or("-"), value),
        Span::raw(" │ "),
        Span::styled("Category: ", label),
        Span::styled(selection.category.as_deref().unwrap_or("-"), value),
        Span::raw(" │ "),
        Span::styled("Date: ", label),
        Span::styled(date_text, value),
    ];
    if app.session.is_continuous() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "continuous",
            Style::default().fg(Color::Magenta),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);
    let hints = [
        ("Tab", "accept"),
        ("Enter", "save"),
        ("Esc", "cancel"),
        ("F1", "wallet"),
        ("F2", "merchant"),
        ("F3", "category"),
        ("F4", "continuous"),
        ("PgUp/PgDn", "date"),
        ("Home", "typed date"),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (k, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*k, key));
        spans.push(Span::styled(format!(" {}", action), text));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let Some(status) = &app.status else {
        return;
    };
    let color = match status.kind {
        StatusKind::Info => Color::Yellow,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    };
    let line = Line::from(Span::styled(
        format!(" {}", status.text),
        Style::default().fg(color),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_submitted(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let items: Vec<ListItem> = app
        .submitted
        .iter()
        .map(|record| {
            let mut parts = vec![
                record.date.format(&app.settings.date_format).to_string(),
                record
                    .amount
                    .format_with_symbol(&app.settings.currency_symbol),
            ];
            if !record.merchant.is_empty() {
                parts.push(record.merchant.clone());
            }
            if !record.category.is_empty() {
                parts.push(record.category.clone());
            }
            parts.push(record.wallet.clone());
            ListItem::new(parts.join(" · "))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Saved ({}) ", app.submitted.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}
