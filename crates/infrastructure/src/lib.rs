//! postcheck infrastructure - adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading and
//! report rendering for the binary.

pub mod adapters;
pub mod report;
pub mod settings;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use report::{SerializationError, render, render_text};
pub use settings::{ReportFormat, RunSettings, Settings, SettingsError, SettingsLoader};
