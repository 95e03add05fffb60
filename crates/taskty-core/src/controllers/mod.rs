//! Controllers
//!
//! Translate user intents into backend calls and push results to the view.

mod action;
mod auth;
mod auth_errors;
mod tasks;

pub use action::TaskAction;
pub use auth::{validate_credentials, validate_registration, AuthController};
pub use auth_errors::{auth_error_message, GENERIC_ERROR};
pub use tasks::{TaskController, DEFAULT_LIST_LIMIT};
