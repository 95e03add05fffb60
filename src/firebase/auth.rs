//! Firebase Authentication
//!
//! Identity backend over the auth module.

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{backend_error, get, FirebaseBackend};
use taskty_core::backend::{FederatedProvider, IdentityBackend, SessionCallback, Subscription};
use taskty_core::domain::{BackendError, BackendResult, Session, UserId};

#[wasm_bindgen(raw_module = "https://www.gstatic.com/firebasejs/9.23.0/firebase-auth.js")]
extern "C" {
    type GoogleAuthProvider;

    #[wasm_bindgen(constructor)]
    fn new() -> GoogleAuthProvider;

    #[wasm_bindgen(catch, js_name = createUserWithEmailAndPassword)]
    async fn create_user_with_email_and_password(
        auth: &JsValue,
        email: &str,
        password: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = signInWithEmailAndPassword)]
    async fn sign_in_with_email_and_password(
        auth: &JsValue,
        email: &str,
        password: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = signInWithPopup)]
    async fn sign_in_with_popup(auth: &JsValue, provider: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = signOut)]
    async fn sign_out(auth: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = sendPasswordResetEmail)]
    async fn send_password_reset_email(auth: &JsValue, email: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = updateProfile)]
    async fn update_profile(user: &JsValue, profile: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = onAuthStateChanged)]
    fn on_auth_state_changed(auth: &JsValue, next: &Closure<dyn FnMut(JsValue)>) -> js_sys::Function;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdate<'a> {
    display_name: &'a str,
}

/// `None` for a null / undefined user
fn session_from_user(user: &JsValue) -> Option<Session> {
    if user.is_null() || user.is_undefined() {
        return None;
    }
    let uid = get(user, "uid").ok()?.as_string()?;
    Some(Session {
        uid: UserId(uid),
        email: get(user, "email")
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        display_name: get(user, "displayName").ok().and_then(|v| v.as_string()),
    })
}

fn session_from_credential(credential: &JsValue) -> BackendResult<Session> {
    let user = get(credential, "user")?;
    session_from_user(&user)
        .ok_or_else(|| BackendError::with_message("Sign-in returned no user"))
}

#[async_trait(?Send)]
impl IdentityBackend for FirebaseBackend {
    async fn create_account(&self, email: &str, password: &str) -> BackendResult<Session> {
        let credential = create_user_with_email_and_password(&self.auth, email, password)
            .await
            .map_err(backend_error)?;
        session_from_credential(&credential)
    }

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        let credential = sign_in_with_email_and_password(&self.auth, email, password)
            .await
            .map_err(backend_error)?;
        session_from_credential(&credential)
    }

    async fn sign_in_with_popup(&self, provider: FederatedProvider) -> BackendResult<Session> {
        let provider = match provider {
            FederatedProvider::Google => GoogleAuthProvider::new(),
        };
        let credential = sign_in_with_popup(&self.auth, &provider)
            .await
            .map_err(backend_error)?;
        session_from_credential(&credential)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        sign_out(&self.auth).await.map_err(backend_error)?;
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> BackendResult<()> {
        send_password_reset_email(&self.auth, email)
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn update_display_name(&self, session: &Session, name: &str) -> BackendResult<Session> {
        let user = get(&self.auth, "currentUser")?;
        match session_from_user(&user) {
            Some(current) if current.uid == session.uid => {}
            _ => return Err(BackendError::new("auth/user-mismatch", "User is no longer signed in")),
        }

        let profile = serde_wasm_bindgen::to_value(&ProfileUpdate { display_name: name })
            .map_err(|e| BackendError::with_message(format!("Serialization error: {}", e)))?;
        update_profile(&user, &profile).await.map_err(backend_error)?;
        Ok(Session {
            display_name: Some(name.to_string()),
            ..session.clone()
        })
    }

    fn on_session_change(&self, callback: SessionCallback) -> Subscription {
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |user: JsValue| {
            callback(session_from_user(&user));
        });
        let unsubscribe = on_auth_state_changed(&self.auth, &listener);
        Subscription::new(move || {
            let _ = unsubscribe.call0(&JsValue::NULL);
            drop(listener);
        })
    }
}
