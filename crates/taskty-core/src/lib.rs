//! Taskty Core
//!
//! Layered architecture:
//! - domain: Tasks, sessions, report statistics
//! - backend: Identity / document store abstractions and the in-memory backend
//! - controllers: Authentication and task controllers driving a `View`
//! - app: Bootstrap wiring session transitions to the controllers

pub mod app;
pub mod backend;
pub mod config;
pub mod controllers;
pub mod domain;
pub mod view;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use app::Taskty;
pub use config::{AppConfig, BackendConfig, ConfigError, FirebaseConfig};
pub use view::{ButtonId, MessageKind, ReportView, View};
