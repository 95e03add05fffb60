//! Authentication Controller
//!
//! Registration, sign-in (password and federated), sign-out and password
//! reset. Owns the single session-change listener of the page.

use std::cell::RefCell;
use std::rc::Rc;

use super::auth_errors::auth_error_message;
use crate::backend::{FederatedProvider, IdentityBackend, SessionCallback, Subscription};
use crate::domain::{BackendResult, Session, SessionState, ValidationError};
use crate::view::{ButtonId, MessageKind, View};

const MIN_PASSWORD_LEN: usize = 6;

const REGISTER_LOADING: &str = "⏳ Creating account...";
const LOGIN_LOADING: &str = "⏳ Signing in...";
const GOOGLE_LOADING: &str = "⏳ Signing in with Google...";

const REGISTERED: &str = "Account created successfully! Welcome to Taskty! 🎉";
const INVALID_CREDENTIALS: &str = "Invalid email or password. Please try again.";
const ALREADY_SIGNED_IN: &str = "You are already signed in.";
const GOOGLE_WELCOME: &str = "Welcome to Taskty! Let's get started! 🎉";
const SIGN_OUT_FAILED: &str = "Error signing out. Please try again.";
const RESET_SENT: &str = "Password reset email sent! Please check your inbox.";

/// Name and email are expected trimmed; the password is taken as typed and
/// measured in UTF-16 units, as the identity provider measures it.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingRegistrationFields);
    }
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

pub struct AuthController<I, V> {
    identity: Rc<I>,
    view: Rc<V>,
    session: SessionState,
    listener: RefCell<Option<Subscription>>,
}

impl<I, V> AuthController<I, V>
where
    I: IdentityBackend + 'static,
    V: View + 'static,
{
    pub fn new(identity: Rc<I>, view: Rc<V>, session: SessionState) -> Self {
        Self {
            identity,
            view,
            session,
            listener: RefCell::new(None),
        }
    }

    /// Register the session-change listener. Every transition is written to
    /// the shared session state before `on_change` runs. Calling this again
    /// replaces the previous listener.
    pub fn initialize(&self, on_change: impl Fn(Option<Session>) + 'static) {
        if let Some(mut previous) = self.listener.borrow_mut().take() {
            log::warn!("[auth] initialize called twice, replacing session listener");
            previous.cancel();
        }

        let session = self.session.clone();
        let callback: SessionCallback = Rc::new(move |next: Option<Session>| {
            match &next {
                Some(s) => log::info!("[auth] signed in: {}", s.email),
                None => log::info!("[auth] signed out"),
            }
            session.set(next.clone());
            on_change(next);
        });
        let subscription = self.identity.on_session_change(callback);
        *self.listener.borrow_mut() = Some(subscription);
    }

    pub fn is_listening(&self) -> bool {
        self.listener
            .borrow()
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.current()
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) {
        let name = name.trim();
        let email = email.trim();
        if let Err(invalid) = validate_registration(name, email, password) {
            self.view.show_message(&invalid.to_string(), MessageKind::Error);
            return;
        }

        self.view
            .set_button_loading(ButtonId::Register, REGISTER_LOADING, true);
        match self.create_profile(name, email, password).await {
            Ok(session) => {
                log::info!("[auth] registered {}", session.uid);
                self.view.show_message(REGISTERED, MessageKind::Success);
                self.view.clear_auth_inputs();
            }
            Err(err) => {
                log::warn!("[auth] registration failed: {err}");
                self.view
                    .show_message(&auth_error_message(&err), MessageKind::Error);
            }
        }
        self.view
            .set_button_loading(ButtonId::Register, REGISTER_LOADING, false);
    }

    async fn create_profile(&self, name: &str, email: &str, password: &str) -> BackendResult<Session> {
        let created = self.identity.create_account(email, password).await?;
        let named = self.identity.update_display_name(&created, name).await?;

        // The transition already fired without a display name
        if self.session.current().is_some_and(|s| s.uid == named.uid) {
            self.session.set(Some(named.clone()));
            self.view.show_app(&named);
        }
        Ok(named)
    }

    /// Any backend failure is reported the same way, without the code
    pub async fn login(&self, email: &str, password: &str) {
        let email = email.trim();
        if let Err(invalid) = validate_credentials(email, password) {
            self.view.show_message(&invalid.to_string(), MessageKind::Error);
            return;
        }

        self.view.set_button_loading(ButtonId::Login, LOGIN_LOADING, true);
        if let Err(err) = self.identity.sign_in(email, password).await {
            log::warn!("[auth] sign-in failed: {err}");
            self.view.show_message(INVALID_CREDENTIALS, MessageKind::Error);
        }
        self.view.clear_auth_inputs();
        self.view.set_button_loading(ButtonId::Login, LOGIN_LOADING, false);
    }

    pub async fn login_with_google(&self) {
        if self.session.is_signed_in() {
            self.view.show_message(ALREADY_SIGNED_IN, MessageKind::Error);
            return;
        }

        self.view
            .set_button_loading(ButtonId::GoogleLogin, GOOGLE_LOADING, true);
        match self
            .identity
            .sign_in_with_popup(FederatedProvider::Google)
            .await
        {
            Ok(_) => self.view.show_message(GOOGLE_WELCOME, MessageKind::Success),
            Err(err) => {
                log::warn!("[auth] popup sign-in failed: {err}");
                self.view
                    .show_message(&auth_error_message(&err), MessageKind::Error);
            }
        }
        self.view
            .set_button_loading(ButtonId::GoogleLogin, GOOGLE_LOADING, false);
    }

    pub async fn logout(&self) {
        match self.identity.sign_out().await {
            Ok(()) => self.view.clear_auth_inputs(),
            Err(err) => {
                log::error!("[auth] error signing out: {err}");
                self.view.show_message(SIGN_OUT_FAILED, MessageKind::Error);
            }
        }
    }

    pub async fn reset_password(&self, email: &str) {
        let email = email.trim();
        if email.is_empty() {
            self.view.show_message(
                &ValidationError::MissingResetEmail.to_string(),
                MessageKind::Error,
            );
            return;
        }

        match self.identity.send_password_reset(email).await {
            Ok(()) => self.view.show_message(RESET_SENT, MessageKind::Success),
            Err(err) => {
                log::warn!("[auth] password reset failed: {err}");
                self.view
                    .show_message(&auth_error_message(&err), MessageKind::Error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::domain::BackendError;
    use crate::test_support::{RecordingView, ViewEvent};
    use std::cell::RefCell;

    fn setup() -> (MemoryBackend, Rc<RecordingView>, AuthController<MemoryBackend, RecordingView>) {
        let backend = MemoryBackend::new();
        let view = Rc::new(RecordingView::new());
        let controller = AuthController::new(
            Rc::new(backend.clone()),
            view.clone(),
            SessionState::new(),
        );
        controller.initialize(|_| {});
        (backend, view, controller)
    }

    #[test]
    fn test_validate_registration() {
        assert_eq!(
            validate_registration("", "a@x.com", "secret1"),
            Err(ValidationError::MissingRegistrationFields)
        );
        assert_eq!(
            validate_registration("Ann", "", "secret1"),
            Err(ValidationError::MissingRegistrationFields)
        );
        assert_eq!(
            validate_registration("Ann", "a@x.com", ""),
            Err(ValidationError::MissingRegistrationFields)
        );
        assert_eq!(
            validate_registration("Ann", "a@x.com", "12345"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(validate_registration("Ann", "a@x.com", "123456"), Ok(()));
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        // three astral characters are six UTF-16 units
        assert_eq!(validate_registration("Ann", "a@x.com", "🔑🔑🔑"), Ok(()));
        assert_eq!(
            validate_registration("Ann", "a@x.com", "ééééé"),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input_without_backend_call() {
        let (backend, view, auth) = setup();
        let cases = [
            ("", "ann@x.com", "secret1"),
            ("Ann", "   ", "secret1"),
            ("Ann", "ann@x.com", ""),
            ("Ann", "ann@x.com", "short"),
        ];
        for (name, email, password) in cases {
            auth.register(name, email, password).await;
        }

        assert!(!backend.calls().contains(&"create_account"));
        assert_eq!(view.messages().len(), 4);
        assert_eq!(
            view.last_message().unwrap().0,
            "Password must be at least 6 characters"
        );
        assert!(view.loading_events().is_empty());
    }

    #[tokio::test]
    async fn test_register_success() {
        let (backend, view, auth) = setup();
        auth.register("  Ann ", " ann@x.com ", "secret1").await;

        assert_eq!(
            backend.calls(),
            vec!["create_account", "update_display_name"]
        );
        let session = auth.current_session().unwrap();
        assert_eq!(session.display_name.as_deref(), Some("Ann"));
        assert_eq!(
            view.last_message(),
            Some((REGISTERED.to_string(), MessageKind::Success))
        );
        assert!(view.events().contains(&ViewEvent::ClearAuthInputs));
        assert_eq!(
            view.loading_events(),
            vec![
                (ButtonId::Register, REGISTER_LOADING.to_string(), true),
                (ButtonId::Register, REGISTER_LOADING.to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_register_maps_backend_error() {
        let (backend, view, auth) = setup();
        backend.create_account("ann@x.com", "secret1").await.unwrap();
        backend.sign_out().await.unwrap();

        auth.register("Ann", "ann@x.com", "secret1").await;
        assert_eq!(
            view.last_message().unwrap().0,
            "This email is already registered. Please sign in instead."
        );
        assert!(!view.events().contains(&ViewEvent::ClearAuthInputs));
        assert_eq!(view.loading_events().last().unwrap().2, false);
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (backend, view, auth) = setup();
        auth.login("ann@x.com", "").await;
        auth.login("  ", "secret1").await;
        assert!(!backend.calls().contains(&"sign_in"));
        assert_eq!(view.last_message().unwrap().0, "Please enter email and password");
    }

    #[tokio::test]
    async fn test_login_failure_is_generic_and_clears_inputs() {
        let (backend, view, auth) = setup();
        backend.create_account("ann@x.com", "secret1").await.unwrap();
        backend.sign_out().await.unwrap();

        auth.login("ann@x.com", "wrong-password").await;
        assert_eq!(view.last_message().unwrap().0, INVALID_CREDENTIALS);
        assert!(view.events().contains(&ViewEvent::ClearAuthInputs));
        assert!(auth.current_session().is_none());

        auth.login("ann@x.com", "secret1").await;
        assert_eq!(auth.current_session().unwrap().email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_google_login_guard_when_signed_in() {
        let (backend, view, auth) = setup();
        backend.create_account("ann@x.com", "secret1").await.unwrap();

        auth.login_with_google().await;
        assert_eq!(view.last_message().unwrap().0, ALREADY_SIGNED_IN);
        assert!(!backend.calls().contains(&"sign_in_with_popup"));
    }

    #[tokio::test]
    async fn test_google_login_popup_closed() {
        let (_backend, view, auth) = setup();
        auth.login_with_google().await;
        assert_eq!(
            view.last_message().unwrap().0,
            "Sign-in popup was closed. Please try again."
        );
        assert_eq!(view.loading_events().len(), 2);
    }

    #[tokio::test]
    async fn test_google_login_success() {
        let backend = MemoryBackend::new().with_federated_account("g@x.com", Some("Gee"));
        let view = Rc::new(RecordingView::new());
        let auth = AuthController::new(Rc::new(backend), view.clone(), SessionState::new());
        auth.initialize(|_| {});

        auth.login_with_google().await;
        assert_eq!(
            view.last_message(),
            Some((GOOGLE_WELCOME.to_string(), MessageKind::Success))
        );
        assert_eq!(auth.current_session().unwrap().greeting_name(), "Gee");
    }

    #[tokio::test]
    async fn test_logout_failure_is_reported() {
        let (backend, view, auth) = setup();
        backend.fail_next(BackendError::with_code("auth/network-request-failed"));
        auth.logout().await;
        assert_eq!(view.last_message().unwrap().0, SIGN_OUT_FAILED);
    }

    #[tokio::test]
    async fn test_reset_password() {
        let (backend, view, auth) = setup();
        auth.reset_password(" ").await;
        assert_eq!(
            view.last_message().unwrap().0,
            "Please enter your email to reset password"
        );

        auth.reset_password("ghost@x.com").await;
        assert_eq!(
            view.last_message().unwrap().0,
            "No account found with this email address."
        );

        backend.create_account("ann@x.com", "secret1").await.unwrap();
        auth.reset_password("ann@x.com").await;
        assert_eq!(
            view.last_message(),
            Some((RESET_SENT.to_string(), MessageKind::Success))
        );
        assert_eq!(backend.password_reset_emails(), vec!["ann@x.com"]);
    }

    #[tokio::test]
    async fn test_initialize_keeps_a_single_listener() {
        let (backend, _view, auth) = setup();
        let seen = Rc::new(RefCell::new(0));
        let counter = seen.clone();
        auth.initialize(move |_| *counter.borrow_mut() += 1);

        assert_eq!(backend.session_listeners(), 1);
        assert!(auth.is_listening());
        backend.create_account("ann@x.com", "secret1").await.unwrap();
        // initial state + sign-in
        assert_eq!(*seen.borrow(), 2);
    }
}
