use log::{info, warn};
use wasm_bindgen::prelude::*;

pub mod api;
pub mod config;
pub mod form;
pub mod interface;
pub mod session;
mod utils;
pub mod view;

use crate::config::AppConfig;

static INIT: std::sync::Once = std::sync::Once::new();

fn initialize(level: log::Level) {
    INIT.call_once(|| {
        utils::set_panic_hook();
        wasm_logger::init(wasm_logger::Config::new(level)); // ロガー初期化
        info!("Logger initialized ({level})");
    });
}

/// アプリを起動する。
///
/// `config` は `{ apiBaseUrl?, rootId?, logLevel? }` 形式のオブジェクト、または `undefined`。
#[wasm_bindgen]
pub fn start(config: JsValue) -> Result<(), JsValue> {
    let (mut config, parse_error) = match AppConfig::from_js(config) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    initialize(config.level());

    if let Some(err) = parse_error {
        warn!("Failed to parse config, using defaults: {:?}", err);
    }
    config.validate();
    info!("Starting battle front: {:?}", config);

    view::mount(&config)
}
