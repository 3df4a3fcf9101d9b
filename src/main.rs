//! usrmgr-tui binary entry point.
//!
//! Parses configuration, sets up logging and the async runtime, initializes
//! the terminal in raw mode, runs the TUI event loop, and restores the
//! terminal state on exit.
//!
use anyhow::Context;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;
use tracing::{error, info};

use usrmgr_tui::Result;
use usrmgr_tui::api::ApiClient;
use usrmgr_tui::app::keymap::Keymap;
use usrmgr_tui::app::{self, AppState, Theme};
use usrmgr_tui::cli::Args;
use usrmgr_tui::telemetry;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let args = Args::parse();
    let config_dir = args.config_dir();
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("create config dir {}", config_dir.display()))?;
    telemetry::init(&args.log_file())?;

    let client = ApiClient::new(&args.api_url, Duration::from_secs(args.timeout_secs))?;
    let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;

    let theme = Theme::load_or_init(config_dir.join("theme.conf"));
    let keymap = Keymap::load_or_init(config_dir.join("keybinds.conf"));
    let state = AppState::new(client.base_url(), theme, keymap);
    info!(api = %client.base_url(), config = %config_dir.display(), "starting usrmgr-tui");

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, runtime.handle(), client, state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    runtime.shutdown_timeout(Duration::from_millis(500));
    Ok(())
}
