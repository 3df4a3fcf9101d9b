// Unit tests for usrmgr-tui
// These exercise the public API without a network or a terminal.

use std::time::{SystemTime, UNIX_EPOCH};

fn unique_tmp_dir(prefix: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!(
        "usrmgr_tui_{prefix}_{}_{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_user(id: u64, name: &str) -> usrmgr_tui::UserRecord {
    use usrmgr_tui::model::{Address, Company};
    usrmgr_tui::UserRecord {
        id: Some(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "555-0100".to_string(),
        username: format!("user{id}"),
        website: String::new(),
        address: Address {
            street: "Main St".to_string(),
            city: "Springfield".to_string(),
        },
        company: Company {
            name: "Acme".to_string(),
        },
    }
}

#[cfg(test)]
mod validation_tests {
    use super::sample_user;
    use usrmgr_tui::validate::{FieldPath, validate};

    #[test]
    fn test_complete_record_has_no_errors() {
        let user = sample_user(1, "Ann Lee");
        assert!(validate(&user).is_empty());
    }

    #[test]
    fn test_blank_record_reports_all_five_fields() {
        let errors = validate(&usrmgr_tui::UserRecord::default());
        assert_eq!(errors.len(), 5);
        let paths: Vec<&str> = errors.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            vec!["name", "email", "phone", "address.street", "address.city"]
        );
    }

    #[test]
    fn test_optional_fields_are_never_checked() {
        let mut user = sample_user(1, "Ann Lee");
        user.username.clear();
        user.website = "not a url".to_string();
        user.company.name.clear();
        assert!(validate(&user).is_empty());
    }

    #[test]
    fn test_whitespace_counts_towards_name_length() {
        let mut user = sample_user(1, "Ann Lee");
        user.name = "   ".to_string();
        assert!(!validate(&user).contains(FieldPath::Name));
        user.name = "Al".to_string();
        assert_eq!(
            validate(&user).get(FieldPath::Name),
            Some("Name is required and must be at least 3 characters")
        );
    }

    #[test]
    fn test_phone_accepts_digits_spaces_dashes_and_leading_plus() {
        let mut user = sample_user(1, "Ann Lee");
        for ok in ["+1 555-1234", "555 1234", "0"] {
            user.phone = ok.to_string();
            assert!(!validate(&user).contains(FieldPath::Phone), "{ok}");
        }
        for bad in ["555.1234", "(555) 1234", "1-770-736-8031 x56442", "++1"] {
            user.phone = bad.to_string();
            assert!(validate(&user).contains(FieldPath::Phone), "{bad}");
        }
    }
}

#[cfg(test)]
mod store_tests {
    use super::sample_user;
    use usrmgr_tui::app::store::UserStore;

    fn ten_users() -> UserStore {
        UserStore::new((1..=10).map(|i| sample_user(i, &format!("User {i}"))).collect())
    }

    #[test]
    fn test_created_record_is_prepended_with_length_based_id() {
        let mut store = ten_users();
        let id = store.insert_created(sample_user(999, "Jane Doe"));
        assert_eq!(id, 11);
        assert_eq!(store.len(), 11);
        assert_eq!(store.all()[0].id, Some(11));
        assert_eq!(store.all()[0].name, "Jane Doe");
    }

    #[test]
    fn test_length_based_id_can_collide_after_delete() {
        let mut store = ten_users();
        assert_eq!(store.remove(3), 1);
        let id = store.insert_created(sample_user(0, "Jane Doe"));
        assert_eq!(id, 10);
        assert_eq!(store.all().iter().filter(|u| u.id == Some(10)).count(), 2);
    }

    #[test]
    fn test_replace_keeps_order_and_other_records() {
        let mut store = ten_users();
        let before = store.all().to_vec();
        let mut edited = sample_user(4, "User 4");
        edited.email = "four@example.org".to_string();
        assert_eq!(store.replace(&edited), 1);
        for (old, new) in before.iter().zip(store.all()) {
            if old.id == Some(4) {
                assert_eq!(new, &edited);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_remove_missing_id_is_a_no_op() {
        let mut store = ten_users();
        assert_eq!(store.remove(42), 0);
        assert_eq!(store.len(), 10);
    }
}

#[cfg(test)]
mod search_tests {
    use super::sample_user;
    use usrmgr_tui::search::filter_by_name;

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let users = vec![
            sample_user(1, "Leanne Graham"),
            sample_user(2, "Ervin Howell"),
            sample_user(3, "Clementine Bauch"),
        ];
        let hits: Vec<u64> = filter_by_name(&users, "AN")
            .iter()
            .filter_map(|u| u.id)
            .collect();
        assert_eq!(hits, vec![1]);
        assert_eq!(filter_by_name(&users, "").len(), 3);
        assert!(filter_by_name(&users, "zzz").is_empty());
    }
}

#[cfg(test)]
mod app_state_tests {
    use super::sample_user;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::{Duration, Instant};
    use usrmgr_tui::app::detail::DetailState;
    use usrmgr_tui::app::keymap::Keymap;
    use usrmgr_tui::app::remote::{Outcome, Request};
    use usrmgr_tui::app::update::handle_key;
    use usrmgr_tui::app::{AppState, InputMode, ModalState, NOTIFICATION_TTL, Severity, Theme, View};
    use usrmgr_tui::error::{Operation, RemoteError};

    fn loaded_state() -> AppState {
        let mut app = AppState::new("http://localhost", Theme::dark(), Keymap::default());
        assert_eq!(app.take_requests(), vec![Request::LoadUsers]);
        let users = ["Leanne Graham", "Ervin Howell", "Clementine Bauch"]
            .iter()
            .enumerate()
            .map(|(i, n)| sample_user(i as u64 + 1, n))
            .collect();
        app.apply_outcome(Outcome::UsersLoaded(Ok(users)));
        app
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_key_stops_the_loop() {
        let mut app = loaded_state();
        assert!(press(&mut app, KeyCode::Down));
        assert!(!press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_search_mode_captures_letters_and_esc_clears() {
        let mut app = loaded_state();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);
        for c in "qe".chars() {
            assert!(press(&mut app, KeyCode::Char(c)));
        }
        assert_eq!(app.search_query, "qe");
        assert!(app.visible_users().is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(app.search_query.is_empty());
        assert_eq!(app.visible_users().len(), 3);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_selection_is_clamped_to_filtered_rows() {
        let mut app = loaded_state();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_user_index, 2);
        press(&mut app, KeyCode::Char('/'));
        for c in "ervin".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.selected_user_index, 0);
        assert_eq!(app.selected_user().map(|u| u.name.as_str()), Some("Ervin Howell"));
    }

    #[test]
    fn test_cancelled_form_sends_nothing() {
        let mut app = loaded_state();
        press(&mut app, KeyCode::Char('e'));
        assert!(matches!(app.modal, Some(ModalState::UserForm(_))));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        assert!(app.take_requests().is_empty());
        assert_eq!(app.store.all()[0].name, "Leanne Graham");
    }

    #[test]
    fn test_edit_submission_queues_update_with_existing_username() {
        let mut app = loaded_state();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('!'));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );
        let requests = app.take_requests();
        let [Request::Update(record)] = requests.as_slice() else {
            panic!("expected a single update, got {requests:?}");
        };
        assert_eq!(record.id, Some(1));
        assert_eq!(record.name, "Leanne Graham!");
        assert_eq!(record.username, "user1");
    }

    #[test]
    fn test_delete_confirmation_defaults_to_no() {
        let mut app = loaded_state();
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_none());
        assert!(app.take_requests().is_empty());

        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.take_requests(), vec![Request::Delete(1)]);
    }

    #[test]
    fn test_failed_create_leaves_collection_and_reports() {
        let mut app = loaded_state();
        app.apply_outcome(Outcome::Created(Err(RemoteError::new(
            Operation::CreateUser,
            "500 Internal Server Error",
        ))));
        assert_eq!(app.store.len(), 3);
        let note = app.notification.clone().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(note.message, "Failed to create user");
    }

    #[test]
    fn test_new_notification_replaces_old_and_expires() {
        let mut app = loaded_state();
        app.notify("first", Severity::Success);
        app.notify("second", Severity::Error);
        assert_eq!(app.notification.as_ref().unwrap().message, "second");

        let shown = app.notification.as_ref().unwrap().shown_at;
        app.expire_notification(shown + NOTIFICATION_TTL - Duration::from_millis(1));
        assert!(app.notification.is_some());
        app.expire_notification(shown + NOTIFICATION_TTL);
        assert!(app.notification.is_none());
        app.expire_notification(Instant::now());
    }

    #[test]
    fn test_detail_response_for_previous_id_is_ignored() {
        let mut app = loaded_state();
        app.open_detail(1);
        app.back_to_list();
        app.open_detail(2);
        app.apply_outcome(Outcome::UserLoaded {
            id: 1,
            result: Ok(Some(sample_user(1, "Leanne Graham"))),
        });
        match &app.view {
            View::Detail(d) => {
                assert_eq!(d.id, 2);
                assert_eq!(d.state, DetailState::Loading);
            }
            View::List => panic!("expected detail view"),
        }
        app.apply_outcome(Outcome::UserLoaded { id: 2, result: Ok(None) });
        match &app.view {
            View::Detail(d) => assert_eq!(d.state, DetailState::NotFound),
            View::List => panic!("expected detail view"),
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::unique_tmp_dir;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::style::Color;
    use usrmgr_tui::app::Theme;
    use usrmgr_tui::app::keymap::{KeyAction, Keymap};

    #[test]
    fn test_theme_load_or_init_writes_defaults_then_reads_overrides() {
        let dir = unique_tmp_dir("theme");
        let path = dir.join("theme.conf");
        let initial = Theme::load_or_init(&path);
        assert!(path.exists());
        assert_eq!(initial.success, Theme::mocha().success);

        std::fs::write(
            &path,
            "# custom\nsuccess = #112233\nerror=reset\nbogus = #000000\n",
        )
        .unwrap();
        let loaded = Theme::load_or_init(&path);
        assert_eq!(loaded.success, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(loaded.error, Color::Reset);
        assert_eq!(loaded.text, Theme::mocha().text);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_keymap_file_overrides_and_round_trips() {
        let dir = unique_tmp_dir("keys");
        let path = dir.join("keybinds.conf");
        let defaults = Keymap::load_or_init(&path);
        assert!(path.exists());
        assert_eq!(
            Keymap::from_file(&path).unwrap().keys_for(KeyAction::Quit),
            defaults.keys_for(KeyAction::Quit)
        );

        std::fs::write(&path, "NewUser = a\nQuit = Ctrl+q\nNoSuchAction = x\n").unwrap();
        let km = Keymap::load_or_init(&path);
        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(km.resolve(&a), Some(KeyAction::NewUser));
        assert_eq!(km.resolve(&ctrl_q), Some(KeyAction::Quit));
        // defaults survive alongside overrides
        let n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&n), Some(KeyAction::NewUser));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
