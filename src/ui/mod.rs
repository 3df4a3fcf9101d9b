pub mod components;
pub mod detail;
pub mod form;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState, View};

pub const APP_TITLE: &str = "User Management System";

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    let prompt = match (app.input_mode, &app.view) {
        (InputMode::Search, _) => format!("  Search users: {}_", app.search_query),
        (_, View::List) if !app.search_query.is_empty() => {
            format!("  Search users: {}", app.search_query)
        }
        _ => String::new(),
    };
    let hint = match app.view {
        View::List => "/: search; n: add; e: edit; Del: delete; Enter: view; ?: help; q: quit",
        View::Detail(_) => "Esc: back to users; ?: help; q: quit",
    };
    let p = Paragraph::new(format!("{}  {hint}{prompt}", app.api_url))
        .block(
            Block::default()
                .title(APP_TITLE)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    match &app.view {
        View::List => users::render_users_table(f, root[1], app),
        View::Detail(view) => detail::render_user_detail(f, root[1], app, view),
    }

    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(ModalState::UserForm(form)) => form::render_user_form(f, area, app, form),
        Some(state @ ModalState::DeleteConfirm { .. }) => {
            users::render_delete_confirm(f, area, app, state);
        }
        Some(ModalState::Help { scroll }) => components::render_help_modal(f, area, app, *scroll),
        None => {}
    }
}
