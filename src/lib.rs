// ==================== Imports ====================
use wasm_bindgen::prelude::*;

mod browser;
pub mod config;
pub mod context;
pub mod engine;
pub mod game;
pub mod mode;
pub mod router;
pub mod sprite;

use engine::GameLoop;
use game::HeroWalk;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs panic hook + console logger
/// - loads config and sprite sheet
/// - starts the game loop once the sprite sheet is ready
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already set : {}", err).into());
    }

    browser::spawn_local(async move {
        // nothing to retry against, there is only one sprite sheet
        if let Err(err) = GameLoop::start(HeroWalk::new()).await {
            log::error!("Could not start game : {:#}", err);
        }
    });

    Ok(())
}
