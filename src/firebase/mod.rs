//! Firebase Bindings
//!
//! wasm-bindgen imports of the Firebase v9 modular web SDK and the backend
//! built on them, organized by service.

mod auth;
mod tasks;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use taskty_core::domain::{BackendError, BackendResult};
use taskty_core::FirebaseConfig;

#[wasm_bindgen(raw_module = "https://www.gstatic.com/firebasejs/9.23.0/firebase-app.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = initializeApp)]
    fn initialize_app(config: &JsValue) -> Result<JsValue, JsValue>;
}

#[wasm_bindgen(raw_module = "https://www.gstatic.com/firebasejs/9.23.0/firebase-auth.js")]
extern "C" {
    #[wasm_bindgen(js_name = getAuth)]
    fn get_auth(app: &JsValue) -> JsValue;
}

#[wasm_bindgen(raw_module = "https://www.gstatic.com/firebasejs/9.23.0/firebase-firestore.js")]
extern "C" {
    #[wasm_bindgen(js_name = getFirestore)]
    fn get_firestore(app: &JsValue) -> JsValue;
}

/// Firebase Authentication + Cloud Firestore
#[derive(Clone)]
pub struct FirebaseBackend {
    auth: JsValue,
    db: JsValue,
    collection: String,
}

impl FirebaseBackend {
    pub fn initialize(config: &FirebaseConfig, collection: &str) -> BackendResult<Self> {
        let js_config = serde_wasm_bindgen::to_value(config)
            .map_err(|e| BackendError::with_message(format!("Serialization error: {}", e)))?;
        let app = initialize_app(&js_config).map_err(backend_error)?;
        log::info!("[firebase] initialized project {}", config.project_id);
        Ok(Self {
            auth: get_auth(&app),
            db: get_firestore(&app),
            collection: collection.to_string(),
        })
    }
}

/// Convert a rejected SDK promise into a `BackendError`, keeping the
/// `auth/...` code when the SDK supplied one
pub(crate) fn backend_error(err: JsValue) -> BackendError {
    let code = js_sys::Reflect::get(&err, &"code".into())
        .ok()
        .and_then(|v| v.as_string());
    let message = js_sys::Reflect::get(&err, &"message".into())
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| err.as_string());
    BackendError { code, message }
}

/// Read a property, mapping JS exceptions
pub(crate) fn get(target: &JsValue, key: &str) -> BackendResult<JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(key)).map_err(backend_error)
}

pub(crate) fn set(target: &JsValue, key: &str, value: &JsValue) -> BackendResult<()> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(backend_error)
}

/// Call a zero-argument method such as `doc.data()`
pub(crate) fn call_method(target: &JsValue, name: &str) -> BackendResult<JsValue> {
    let method: js_sys::Function = get(target, name)?
        .dyn_into()
        .map_err(|_| BackendError::with_message(format!("{} is not a function", name)))?;
    method.call0(target).map_err(backend_error)
}
