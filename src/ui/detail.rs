//! Single-user detail screen.
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::AppState;
use crate::app::detail::{DetailState, DetailView};
use crate::model::{UserRecord, or_not_available};

pub fn render_user_detail(f: &mut Frame, area: Rect, app: &AppState, view: &DetailView) {
    let block = Block::default()
        .title("User Details")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let p = match &view.state {
        DetailState::Loading => Paragraph::new("Loading user...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted)),
        DetailState::NotFound => {
            Paragraph::new("User not found").style(Style::default().fg(app.theme.text))
        }
        // Failure was logged; nothing else to show.
        DetailState::Failed => Paragraph::new(""),
        DetailState::Loaded(user) => {
            Paragraph::new(detail_lines(app, user)).wrap(Wrap { trim: false })
        }
    };
    f.render_widget(p.block(block), area);
}

fn detail_lines<'a>(app: &AppState, user: &'a UserRecord) -> Vec<Line<'a>> {
    let label = Style::default()
        .fg(app.theme.title)
        .add_modifier(Modifier::BOLD);
    let value = Style::default().fg(app.theme.text);
    let row = |name: &'static str, v: &'a str| {
        Line::from(vec![
            Span::styled(format!("{name:<10}"), label),
            Span::styled(v, value),
        ])
    };

    vec![
        Line::from(Span::styled("< Back to Users (Esc)", Style::default().fg(app.theme.muted))),
        Line::raw(""),
        row("Name", &user.name),
        row("Email", &user.email),
        row("Phone", &user.phone),
        row("Username", &user.username),
        row("Website", or_not_available(&user.website)),
        row("Company", or_not_available(&user.company.name)),
        Line::raw(""),
        Line::from(Span::styled("Address", label)),
        row("Street", or_not_available(&user.address.street)),
        row("City", or_not_available(&user.address.city)),
    ]
}
