#![allow(warnings)]
//! Taskty Frontend Entry Point

mod app;
mod backend;
mod components;
mod context;
mod firebase;
mod store;
mod view;

use app::App;
use leptos::prelude::*;
use taskty_core::AppConfig;

const CONFIG_JSON: &str = include_str!("../config/taskty.json");

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::from_json(CONFIG_JSON) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let level = config.log_level().unwrap_or(log::Level::Info);
    let _ = console_log::init_with_level(level);
    if let Some(err) = config_error {
        log::error!("[config] invalid config/taskty.json, using defaults: {}", err);
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}
