//! Command-line and environment configuration.
use clap::Parser;
use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "usrmgr-tui",
    version,
    about = "Manage users of a remote REST API from the terminal"
)]
pub struct Args {
    /// Base URL of the API exposing the `users` resource.
    #[arg(long, env = "USRMGR_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Directory holding theme.conf and keybinds.conf.
    #[arg(long, env = "USRMGR_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log file (default: usrmgr-tui.log in the config directory).
    #[arg(long, env = "USRMGR_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "USRMGR_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Args {
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir
            .clone()
            .unwrap_or_else(crate::app::default_config_dir)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.config_dir().join("usrmgr-tui.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_placeholder_api() {
        let args = Args::try_parse_from(["usrmgr-tui", "--config-dir", "/tmp/usrmgr"]).unwrap();
        assert_eq!(args.timeout_secs, 10);
        assert_eq!(args.config_dir(), PathBuf::from("/tmp/usrmgr"));
        assert_eq!(args.log_file(), PathBuf::from("/tmp/usrmgr/usrmgr-tui.log"));
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "usrmgr-tui",
            "--api-url",
            "http://127.0.0.1:3000",
            "--log-file",
            "/tmp/x.log",
            "--timeout-secs",
            "3",
        ])
        .unwrap();
        assert_eq!(args.api_url, "http://127.0.0.1:3000");
        assert_eq!(args.log_file(), PathBuf::from("/tmp/x.log"));
        assert_eq!(args.timeout_secs, 3);
    }
}
