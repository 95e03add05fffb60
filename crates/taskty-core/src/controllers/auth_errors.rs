//! Backend error codes to user-facing text

use crate::domain::BackendError;

pub const GENERIC_ERROR: &str = "An unexpected error occurred.";

const AUTH_ERROR_MESSAGES: &[(&str, &str)] = &[
    (
        "auth/email-already-in-use",
        "This email is already registered. Please sign in instead.",
    ),
    (
        "auth/weak-password",
        "Password is too weak. Please choose a stronger password.",
    ),
    ("auth/invalid-email", "Please enter a valid email address."),
    ("auth/user-not-found", "No account found with this email address."),
    ("auth/wrong-password", "Incorrect password. Please try again."),
    (
        "auth/too-many-requests",
        "Too many failed attempts. Please try again later.",
    ),
    (
        "auth/network-request-failed",
        "Network error. Please check your connection.",
    ),
    (
        "auth/popup-closed-by-user",
        "Sign-in popup was closed. Please try again.",
    ),
];

/// Mapped text for known codes, else the backend message, else a generic line
pub fn auth_error_message(error: &BackendError) -> String {
    error
        .code()
        .and_then(|code| {
            AUTH_ERROR_MESSAGES
                .iter()
                .find(|(known, _)| *known == code)
                .map(|(_, text)| text.to_string())
        })
        .or_else(|| error.message.clone().filter(|m| !m.trim().is_empty()))
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}
