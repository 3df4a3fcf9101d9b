//! Application state types and entry glue.
//!
//! Defines the views, modes and modal states of the TUI, the owned
//! [`AppState`], and how remote [`Outcome`]s reconcile it. The event loop is
//! re-exported as `run`.
//!
pub mod detail;
pub mod form;
pub mod keymap;
pub mod remote;
pub mod store;
pub mod update;

use ratatui::style::Color;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::model::UserRecord;
use crate::search;
use detail::DetailView;
use form::FormState;
use keymap::Keymap;
use remote::{Outcome, Request};
use store::UserStore;

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(6000);

/// The two addressable views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    List,
    Detail(DetailView),
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient status message.
#[derive(Clone, Debug)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTIFICATION_TTL
    }
}

/// Modal dialogs drawn over the list view.
#[derive(Clone, Debug)]
pub enum ModalState {
    UserForm(FormState),
    DeleteConfirm {
        id: u64,
        name: String,
        /// 0 = Yes, 1 = No
        selected: usize,
    },
    Help {
        scroll: u16,
    },
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub error: Color,
}

impl Theme {
    /// Plain terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            success: Color::Green,
            error: Color::Red,
        }
    }

    /// Catppuccin Mocha palette.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            success: Color::Rgb(0xa6, 0xe3, 0xa1),      // green
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
        }
    }

    fn entries(&self) -> [(&'static str, Color); 12] {
        [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
            ("success", self.success),
            ("error", self.error),
        ]
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            "success" => &mut self.success,
            "error" => &mut self.error,
            _ => return None,
        })
    }

    /// Load theme from a `key = value` file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: impl AsRef<Path>) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();
        for (key, val) in config_pairs(&contents) {
            if let (Some(slot), Some(color)) = (theme.slot_mut(key), Self::parse_color(val)) {
                *slot = color;
            }
        }
        Some(theme)
    }

    /// Parse "#RRGGBB", "RRGGBB" or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    fn format_color(c: Color) -> String {
        match c {
            Color::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
            Color::Reset => "reset".to_string(),
            Color::Black => "#000000".to_string(),
            Color::Red => "#FF0000".to_string(),
            Color::Green => "#00FF00".to_string(),
            Color::Yellow => "#FFFF00".to_string(),
            Color::Cyan => "#00FFFF".to_string(),
            Color::Gray => "#B3B3B3".to_string(),
            Color::DarkGray => "#4D4D4D".to_string(),
            Color::White => "#FFFFFF".to_string(),
            // best-effort for the rest
            _ => "reset".to_string(),
        }
    }

    /// Persist the theme in `key = value` format.
    pub fn write_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# usrmgr-tui theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        for (key, color) in self.entries() {
            let _ = writeln!(&mut buf, "{key} = {}", Self::format_color(color));
        }
        std::fs::write(path, buf)
    }

    /// Load the theme file, writing the default theme first if it is missing.
    pub fn load_or_init(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let theme = Self::mocha();
        if let Err(err) = theme.write_file(path) {
            tracing::warn!(path = %path.display(), error = %err, "could not write default theme");
        }
        theme
    }
}

/// Split a config file into trimmed `(key, value)` pairs, skipping blank
/// lines, `#` comments and lines without both sides of the `=`.
pub(crate) fn config_pairs(contents: &str) -> impl Iterator<Item = (&str, &str)> {
    contents.lines().filter_map(|raw| {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (lhs, rhs) = line.split_once('=')?;
        let (lhs, rhs) = (lhs.trim(), rhs.trim());
        (!lhs.is_empty() && !rhs.is_empty()).then_some((lhs, rhs))
    })
}

/// Default configuration directory: `$XDG_CONFIG_HOME/usrmgr-tui`, then
/// `$HOME/.config/usrmgr-tui`, then the working directory.
pub fn default_config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("usrmgr-tui");
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config").join("usrmgr-tui");
    }
    PathBuf::from(".")
}

pub struct AppState {
    pub started_at: Instant,
    pub api_url: String,
    pub store: UserStore,
    /// True until the initial list fetch completes.
    pub loading: bool,
    pub view: View,
    pub selected_user_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub search_query: String,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    pub notification: Option<Notification>,
    pending: Vec<Request>,
}

impl AppState {
    /// Fresh state with the initial list fetch queued.
    pub fn new(api_url: impl Into<String>, theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            api_url: api_url.into(),
            store: UserStore::default(),
            loading: true,
            view: View::List,
            selected_user_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme,
            keymap,
            modal: None,
            notification: None,
            pending: vec![Request::LoadUsers],
        }
    }

    /// The collection filtered by the current search term.
    pub fn visible_users(&self) -> Vec<&UserRecord> {
        search::filter_by_name(self.store.all(), &self.search_query)
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.visible_users().get(self.selected_user_index).copied()
    }

    /// Queue a remote request for the event loop.
    pub fn request(&mut self, request: Request) {
        self.pending.push(request);
    }

    /// Drain queued requests.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.pending)
    }

    /// Show `message`, replacing any current notification.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notification = Some(Notification {
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        });
    }

    pub fn expire_notification(&mut self, now: Instant) {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
        }
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    /// Navigate to the detail route for `id` and queue its fetch.
    pub fn open_detail(&mut self, id: u64) {
        self.close_modal();
        self.view = View::Detail(DetailView::open(id));
        self.request(Request::LoadUser(id));
    }

    pub fn back_to_list(&mut self) {
        self.view = View::List;
        self.input_mode = InputMode::Normal;
    }

    /// Reconcile local state with a finished remote request.
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::UsersLoaded(Ok(users)) => {
                info!(count = users.len(), "users loaded");
                self.store.replace_all(users);
                self.loading = false;
            }
            Outcome::UsersLoaded(Err(err)) => {
                error!(error = %err, "failed to fetch users");
                self.store.clear();
                self.loading = false;
                self.notify("Failed to fetch users", Severity::Error);
            }
            Outcome::UserLoaded { id, result } => {
                let applied = match &mut self.view {
                    View::Detail(detail) => detail.apply(id, result),
                    View::List => false,
                };
                if !applied {
                    tracing::debug!(id, "discarding detail response for an inactive view");
                }
            }
            Outcome::Created(Ok(created)) => {
                let id = self.store.insert_created(created);
                info!(id, "user created");
                self.notify("User created successfully", Severity::Success);
            }
            Outcome::Created(Err(err)) => {
                error!(error = %err, "failed to create user");
                self.notify("Failed to create user", Severity::Error);
            }
            Outcome::Updated {
                submitted,
                result: Ok(()),
            } => {
                let replaced = self.store.replace(&submitted);
                info!(id = ?submitted.id, replaced, "user updated");
                self.notify("User updated successfully", Severity::Success);
            }
            Outcome::Updated {
                submitted,
                result: Err(err),
            } => {
                error!(id = ?submitted.id, error = %err, "failed to update user");
                self.notify("Failed to update user", Severity::Error);
            }
            Outcome::Deleted { id, result: Ok(()) } => {
                let removed = self.store.remove(id);
                info!(id, removed, "user deleted");
                self.notify("User deleted successfully", Severity::Success);
            }
            Outcome::Deleted {
                id,
                result: Err(err),
            } => {
                error!(id, error = %err, "failed to delete user");
                self.notify("Failed to delete user", Severity::Error);
            }
        }
        search::apply_search(self);
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
