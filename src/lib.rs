//! Satsang management prototype: data entry, reports, and settings pages in
//! a terminal UI.
//!
//! Nothing entered here is stored. The navigation controller in [`state`] and
//! the report generators in [`reports`] are usable without a terminal.
pub mod config;
pub mod logging;
pub mod models;
pub mod reports;
pub mod state;
pub mod ui;

pub use config::{AppConfig, ConfigError};
pub use state::{NavEvent, NavigationState, Page, Report, View};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
