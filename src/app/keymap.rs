//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Bindings only apply in normal mode; text entry in the search prompt and
//! the form modal always receives the raw keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::path::Path;

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Start typing a name filter.
    StartSearch,
    /// Open the form in create mode.
    NewUser,
    /// Open the form pre-filled with the selected user.
    EditSelection,
    /// Ask to delete the selected user.
    DeleteSelection,
    /// Open the detail view of the selected user.
    ViewSelection,
    /// Leave the detail view.
    Back,
    OpenHelp,
    MoveUp,
    MoveDown,
    /// Previous page of rows.
    MoveLeftPage,
    /// Next page of rows.
    MoveRightPage,
    Ignore,
}

const ACTIONS: [(KeyAction, &str); 13] = [
    (KeyAction::Quit, "Quit"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::NewUser, "NewUser"),
    (KeyAction::EditSelection, "EditSelection"),
    (KeyAction::DeleteSelection, "DeleteSelection"),
    (KeyAction::ViewSelection, "ViewSelection"),
    (KeyAction::Back, "Back"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::MoveLeftPage, "MoveLeftPage"),
    (KeyAction::MoveRightPage, "MoveRightPage"),
    (KeyAction::Ignore, "Ignore"),
];

/// Maps `(modifiers, code)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Enter), KeyAction::ViewSelection);
        bindings.insert((M::NONE, Char('v')), KeyAction::ViewSelection);
        bindings.insert((M::NONE, Esc), KeyAction::Back);
        bindings.insert((M::NONE, Backspace), KeyAction::Back);
        bindings.insert((M::NONE, Char('b')), KeyAction::Back);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        // Some terminals report '?' with SHIFT
        bindings.insert((M::SHIFT, Char('?')), KeyAction::OpenHelp);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::MoveLeftPage);
        bindings.insert((M::NONE, Right), KeyAction::MoveRightPage);
        bindings.insert((M::NONE, PageUp), KeyAction::MoveLeftPage);
        bindings.insert((M::NONE, PageDown), KeyAction::MoveRightPage);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::MoveLeftPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::MoveRightPage);

        Self { bindings }
    }

    /// Load `path`, or write the defaults there if it does not exist yet.
    pub fn load_or_init(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(err) = km.write_file(path) {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not write default keybindings"
            );
        }
        km
    }

    /// Parse `<Action> = <KeySpec>` lines on top of the defaults.
    ///
    /// Returns `None` if the file cannot be read. Lines naming an unknown
    /// action or key are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::from_config(&contents))
    }

    pub fn from_config(contents: &str) -> Self {
        let mut map = Self::default();
        for (lhs, rhs) in crate::app::config_pairs(contents) {
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        map
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# usrmgr-tui keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Backspace, Delete, Up, Down,\n");
        buf.push_str("#   Left, Right, PageUp, PageDown, /, ?\n");
        let names: Vec<&str> = ACTIONS.iter().map(|(_, n)| *n).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut lines: Vec<String> = self
            .all_bindings()
            .into_iter()
            .map(|((mods, code), action)| {
                format!("{} = {}", format_action(action), Self::format_key(mods, code))
            })
            .collect();
        lines.sort();
        for line in lines {
            let _ = writeln!(&mut buf, "{line}");
        }
        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Keys bound to `action`, formatted and sorted, for help text.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Format a key like "Ctrl+c" or "PageDown".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Backspace => "Backspace".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{code:?}"),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{base}")
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let (mods, rest) = match spec.trim().strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, spec.trim()),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Backspace" => Backspace,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    ACTIONS
        .iter()
        .find(|(_, name)| *name == s.trim())
        .map(|(a, _)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTIONS
        .iter()
        .find(|(action, _)| *action == a)
        .map(|(_, name)| *name)
        .unwrap_or("Ignore")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn defaults_cover_list_actions() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&key(KeyCode::Char('n'))), Some(KeyAction::NewUser));
        assert_eq!(km.resolve(&key(KeyCode::Char('e'))), Some(KeyAction::EditSelection));
        assert_eq!(km.resolve(&key(KeyCode::Delete)), Some(KeyAction::DeleteSelection));
        assert_eq!(km.resolve(&key(KeyCode::Enter)), Some(KeyAction::ViewSelection));
        assert_eq!(km.resolve(&key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn config_overrides_and_skips_garbage() {
        let km = Keymap::from_config(
            "# comment\nNewUser = a\nBogus = x\nQuit = Ctrl+x\nMoveUp = Up Up\n",
        );
        assert_eq!(km.resolve(&key(KeyCode::Char('a'))), Some(KeyAction::NewUser));
        assert_eq!(km.resolve(&key(KeyCode::Char('x'))), None);
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(km.resolve(&ctrl_x), Some(KeyAction::Quit));
        // defaults survive
        assert_eq!(km.resolve(&key(KeyCode::Char('n'))), Some(KeyAction::NewUser));
    }

    #[test]
    fn action_names_round_trip() {
        for (action, name) in ACTIONS {
            assert_eq!(parse_action(name), Some(action));
            assert_eq!(format_action(action), name);
        }
    }

    #[test]
    fn keys_for_lists_every_binding() {
        let km = Keymap::default();
        assert_eq!(km.keys_for(KeyAction::Back), vec!["Backspace", "Esc", "b"]);
        assert_eq!(km.keys_for(KeyAction::Quit), vec!["Ctrl+c", "q"]);
    }
}
