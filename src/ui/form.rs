//! The create/edit user form modal.
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::AppState;
use crate::app::form::{FORM_FIELDS, FormField, FormState};
use crate::ui::components::centered_rect;

pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState, form: &FormState) {
    let focused = form.focused();
    let label_w = FORM_FIELDS
        .iter()
        .map(|fld| fld.label().len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::with_capacity(FORM_FIELDS.len() * 2 + 2);
    for field in FORM_FIELDS {
        let marker = if field == focused { "▶ " } else { "  " };
        if field == FormField::Submit {
            lines.push(Line::raw(""));
            let style = if field == focused {
                Style::default()
                    .fg(app.theme.highlight_fg)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(app.theme.title)
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("[ {} ]", form.submit_label()), style),
            ]));
            continue;
        }

        let value = form.value(field);
        let value_style = if !field.is_editable() {
            Style::default().fg(app.theme.muted)
        } else if field == focused {
            Style::default().fg(app.theme.highlight_fg)
        } else {
            Style::default().fg(app.theme.text)
        };
        let cursor = if field == focused && field.is_editable() { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{:<label_w$} : ", field.label()),
                Style::default().fg(app.theme.title),
            ),
            Span::styled(format!("{value}{cursor}"), value_style),
        ]));
        if let Some(msg) = form.error_for(field) {
            lines.push(Line::from(Span::styled(
                format!("    {msg}"),
                Style::default().fg(app.theme.error),
            )));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Tab/Up/Down: move  Enter: next/submit  Ctrl+S: submit  Esc: cancel",
        Style::default().fg(app.theme.muted),
    )));

    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
