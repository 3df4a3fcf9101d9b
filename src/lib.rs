//! Library crate for usrmgr-tui.
//!
//! This crate exposes the building blocks of the TUI:
//! - REST client for the remote `users` resource (`api`)
//! - Application state, remote outcomes and the update loop (`app`)
//! - Command-line configuration (`cli`)
//! - Error and result types (`error`)
//! - The user record (`model`)
//! - In-memory name search (`search`)
//! - Log setup (`telemetry`)
//! - UI rendering (`ui`)
//! - Submit-time form validation (`validate`)
//!
//! It is used by the `usrmgr-tui` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod cli;
pub mod error;
pub mod model;
pub mod search;
pub mod telemetry;
pub mod ui;
pub mod validate;

// Re-export commonly used items at the crate root for convenience
pub use error::{RemoteError, Result};
pub use model::UserRecord;
