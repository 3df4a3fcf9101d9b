use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::app::form::{FormField, FormState};
use crate::app::keymap::KeyAction;
use crate::app::remote::{self, Request};
use crate::app::{AppState, InputMode, ModalState, View};
use crate::search::apply_search;
use crate::ui;

/// Run the UI until the user quits.
///
/// Queued requests are spawned on `handle`; their outcomes are applied at the
/// top of every iteration, before drawing.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    handle: &Handle,
    client: ApiClient,
    mut app: AppState,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    info!(api = %app.api_url, "event loop started");

    loop {
        for request in app.take_requests() {
            remote::spawn(handle, client.clone(), request, tx.clone());
        }
        while let Ok(outcome) = rx.try_recv() {
            app.apply_outcome(outcome);
        }
        app.expire_notification(Instant::now());

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(&mut app, key) {
                    break;
                }
            }
        }
    }

    info!(uptime = ?app.started_at.elapsed(), "event loop finished");
    Ok(())
}

/// Apply one key press. Returns `false` when the application should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Modal => {
            handle_modal_key(app, key);
            true
        }
        InputMode::Search => {
            handle_search_key(app, key.code);
            true
        }
        InputMode::Normal => match app.view {
            View::List => handle_list_key(app, key),
            View::Detail(_) => handle_detail_key(app, key),
        },
    }
}

fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.search_query.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => app.search_query.push(c),
        _ => {}
    }
    apply_search(app);
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> bool {
    let Some(action) = app.keymap.resolve(&key) else {
        return true;
    };
    match action {
        KeyAction::Quit => return false,
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::NewUser => app.open_modal(ModalState::UserForm(FormState::create())),
        KeyAction::EditSelection => {
            if let Some(user) = app.selected_user().cloned() {
                app.open_modal(ModalState::UserForm(FormState::edit(user)));
            }
        }
        KeyAction::DeleteSelection => {
            if let Some(user) = app.selected_user() {
                if let Some(id) = user.id {
                    let name = user.name.clone();
                    app.open_modal(ModalState::DeleteConfirm {
                        id,
                        name,
                        selected: 1,
                    });
                }
            }
        }
        KeyAction::ViewSelection => {
            if let Some(id) = app.selected_user().and_then(|u| u.id) {
                app.open_detail(id);
            }
        }
        KeyAction::OpenHelp => app.open_modal(ModalState::Help { scroll: 0 }),
        KeyAction::MoveUp => {
            app.selected_user_index = app.selected_user_index.saturating_sub(1);
        }
        KeyAction::MoveDown => {
            if app.selected_user_index + 1 < app.visible_users().len() {
                app.selected_user_index += 1;
            }
        }
        KeyAction::MoveLeftPage => {
            let rpp = app.rows_per_page.max(1);
            app.selected_user_index = app.selected_user_index.saturating_sub(rpp);
        }
        KeyAction::MoveRightPage => {
            let rpp = app.rows_per_page.max(1);
            let last = app.visible_users().len().saturating_sub(1);
            app.selected_user_index = app.selected_user_index.saturating_add(rpp).min(last);
        }
        KeyAction::Back | KeyAction::Ignore => {}
    }
    true
}

fn handle_detail_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.keymap.resolve(&key) {
        Some(KeyAction::Quit) => false,
        Some(KeyAction::Back) => {
            app.back_to_list();
            true
        }
        Some(KeyAction::OpenHelp) => {
            app.open_modal(ModalState::Help { scroll: 0 });
            true
        }
        _ => true,
    }
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) {
    let code = key.code;
    match &mut app.modal {
        Some(ModalState::UserForm(form)) => {
            let submit_shortcut =
                key.modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('s');
            match code {
                _ if submit_shortcut => submit_form(app),
                KeyCode::Esc => {
                    debug!("form cancelled");
                    app.close_modal();
                }
                KeyCode::Up | KeyCode::BackTab => form.focus_prev(),
                KeyCode::Down | KeyCode::Tab => form.focus_next(),
                KeyCode::Enter => {
                    if form.focused() == FormField::Submit {
                        submit_form(app);
                    } else {
                        form.focus_next();
                    }
                }
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.input_char(c),
                _ => {}
            }
        }
        Some(ModalState::DeleteConfirm { id, selected, .. }) => match code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                *selected = 1 - (*selected).min(1);
            }
            KeyCode::Char('y') => {
                let id = *id;
                app.close_modal();
                app.request(Request::Delete(id));
            }
            KeyCode::Char('n') => app.close_modal(),
            KeyCode::Enter => {
                let (id, confirmed) = (*id, *selected == 0);
                app.close_modal();
                if confirmed {
                    app.request(Request::Delete(id));
                }
            }
            _ => {}
        },
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_modal()
            }
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        },
        None => app.close_modal(),
    }
}

/// Validate the open form; on success close it and queue the create or update.
fn submit_form(app: &mut AppState) {
    let Some(ModalState::UserForm(form)) = &mut app.modal else {
        return;
    };
    let Some(record) = form.submit() else {
        debug!(errors = form.errors.len(), "form validation failed");
        return;
    };
    let request = if form.is_edit() {
        Request::Update(record)
    } else {
        Request::Create(record)
    };
    app.close_modal();
    app.request(request);
}
