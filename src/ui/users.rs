//! Users list screen: the filtered table and the delete confirmation.
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::app::{AppState, ModalState};

/// Render the filtered users table, one page at a time around the selection.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if app.loading {
        let p = Paragraph::new("Loading users...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let visible = app.visible_users();
    let total = app.store.len();
    let start = (app.selected_user_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(visible.len());
    let slice = &visible[start.min(end)..end];

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_user_index {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else if absolute_index % 2 == 0 {
            Style::default().fg(app.theme.text)
        } else {
            Style::default().fg(app.theme.muted)
        };
        Row::new(vec![
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from(u.phone.clone()),
            Cell::from(u.username.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Percentage(28),
        Constraint::Percentage(30),
        Constraint::Percentage(24),
        Constraint::Percentage(18),
    ];
    let header = Row::new(vec!["Name", "Email", "Phone", "Username"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let title = if visible.len() == total {
        format!("Users ({total})")
    } else {
        format!("Users ({} of {total})", visible.len())
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(title))
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_delete_confirm(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::DeleteConfirm { id, name, selected } = state else {
        return;
    };
    let rect = crate::ui::components::centered_rect(50, 7, area);
    let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
    let no = if *selected == 1 { "[No]" } else { " No  " };
    let body = format!("Delete user '{name}' (id {id})?\n\n  {yes}    {no}");
    let p = Paragraph::new(body).block(
        Block::default()
            .title("Confirm delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
