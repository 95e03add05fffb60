//! Domain Errors

use thiserror::Error;

/// Common result type for backend calls
pub type BackendResult<T> = Result<T, BackendError>;

/// Failure reported by the remote backend.
///
/// Firebase-style errors carry a machine-readable `code` such as
/// `auth/wrong-password`; transport-level failures may carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.code, .message))]
pub struct BackendError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl BackendError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
        }
    }

    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

fn describe(code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{message} ({code})"),
        (Some(code), None) => code.clone(),
        (None, Some(message)) => message.clone(),
        (None, None) => "unknown backend error".to_string(),
    }
}

/// Client-side input failures, caught before any backend call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingRegistrationFields,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Please enter email and password")]
    MissingCredentials,
    #[error("Please enter your email to reset password")]
    MissingResetEmail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::new("auth/invalid-email", "Firebase: bad email");
        assert_eq!(err.to_string(), "Firebase: bad email (auth/invalid-email)");
        assert_eq!(BackendError::with_code("x/y").to_string(), "x/y");
        assert_eq!(
            BackendError { code: None, message: None }.to_string(),
            "unknown backend error"
        );
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters"
        );
    }
}
