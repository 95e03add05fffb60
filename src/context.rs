//! Application Context
//!
//! The running application provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use taskty_core::controllers::{AuthController, TaskController};
use taskty_core::Taskty;

use crate::backend::Backend;
use crate::view::LeptosView;

pub type TasktyApp = Taskty<Backend, Backend, LeptosView>;

/// Handle to the controllers, usable from any component
#[derive(Clone, Copy)]
pub struct AppContext {
    app: StoredValue<Rc<TasktyApp>, LocalStorage>,
}

impl AppContext {
    pub fn new(app: Rc<TasktyApp>) -> Self {
        Self {
            app: StoredValue::new_local(app),
        }
    }

    pub fn auth(&self) -> Rc<AuthController<Backend, LeptosView>> {
        self.app.with_value(|app| app.auth.clone())
    }

    pub fn tasks(&self) -> Rc<TaskController<Backend, LeptosView>> {
        self.app.with_value(|app| app.tasks.clone())
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
