//! Shared UI components (status bar, help modal, layout helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, Severity};

/// Render the bottom status bar: the current notification if any, otherwise
/// mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    if let Some(n) = &app.notification {
        let bg = match n.severity {
            Severity::Success => app.theme.success,
            Severity::Error => app.theme.error,
        };
        let p = Paragraph::new(format!(" {}", n.message)).style(
            Style::default()
                .fg(app.theme.header_bg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(p, area);
        return;
    }

    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let search = if app.search_query.is_empty() {
        String::new()
    } else {
        format!("  search:\"{}\"", app.search_query)
    };
    let msg = format!(
        "mode: {mode}  users:{}/{}  rows/page:{}{search}",
        app.visible_users().len(),
        app.store.len(),
        app.rows_per_page,
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the help modal; key names come from the active keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = 22u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let keys = Style::default().add_modifier(Modifier::ITALIC);
    let entry = |label: &str, actions: &[KeyAction]| {
        let bound: Vec<String> = actions
            .iter()
            .map(|a| app.keymap.keys_for(*a).join(", "))
            .collect();
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(bound.join(" / "), keys),
        ])
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Users list", Style::default().add_modifier(Modifier::BOLD))),
        entry("Move up / down", &[KeyAction::MoveUp, KeyAction::MoveDown]),
        entry("Previous / next page", &[KeyAction::MoveLeftPage, KeyAction::MoveRightPage]),
        entry("Search by name", &[KeyAction::StartSearch]),
        entry("Add user", &[KeyAction::NewUser]),
        entry("Edit user", &[KeyAction::EditSelection]),
        entry("Delete user", &[KeyAction::DeleteSelection]),
        entry("View details", &[KeyAction::ViewSelection]),
        entry("Quit", &[KeyAction::Quit]),
        Line::raw(""),
        Line::from(Span::styled("Details", Style::default().add_modifier(Modifier::BOLD))),
        entry("Back to users", &[KeyAction::Back]),
        Line::raw(""),
        Line::from(Span::styled("Form", Style::default().add_modifier(Modifier::BOLD))),
    ];
    for (label, value) in [
        ("Next / previous field", "Tab, Down / BackTab, Up"),
        ("Submit", "Enter on the button, Ctrl+S"),
        ("Cancel", "Esc"),
    ] {
        lines.push(Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(value, keys),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Search: type to filter, "),
        Span::styled("Enter", keys),
        Span::raw(" to keep, "),
        Span::styled("Esc", keys),
        Span::raw(" to clear"),
    ]));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
