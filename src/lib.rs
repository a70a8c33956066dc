//! Claw Typer core crate.
//!
//! A cat runs along an undulating jungle floor while raptors and pterodactyls
//! close in from both sides. Every enemy carries a word; typing it throws
//! shurikens (or, up close, a claw swipe) until the enemy drops.
//!
//! The simulation in [`sim`] is plain Rust and runs natively under
//! `cargo test`. The browser half (canvas, DOM overlays, input listeners)
//! is exported to JS through `start_game()` / `restart_game()`.

use wasm_bindgen::prelude::*;

pub mod config;
mod game;
pub mod logging;
pub mod sim;

pub use config::{ConfigError, GameConfig, Vocabulary};
pub use sim::{GameEvent, Session, SessionStatus, Viewport};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Built-in vocabulary. Lowercase ASCII, no duplicates.
// -----------------------------------------------------------------------------

pub const WORD_LIST: &[&str] = &[
    "run", "hunt", "bite", "claw", "roar", "prey", "flesh", "bone", "skull", "blood",
    "fury", "rage", "kill", "gore", "teeth", "snap", "tear", "rip", "shred", "maul",
    "dead", "gone", "lost", "fear", "doom", "grim", "dark", "evil", "vile", "beast",
    "monster", "demon", "devil", "hell", "pain", "hurt", "wound", "slash", "cut",
];

// -----------------------------------------------------------------------------
// Lifecycle entrypoints
// -----------------------------------------------------------------------------

fn to_js(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Starts a session with the default balance and word list. Call once the
/// page (fonts, overlays) is ready; calling again starts over.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start(GameConfig::default(), Vocabulary::default())
}

/// Starts a session with a caller-supplied word list.
#[wasm_bindgen]
pub fn start_game_with_words(words: Vec<String>) -> Result<(), JsValue> {
    let vocabulary = Vocabulary::new(words).map_err(to_js)?;
    game::start(GameConfig::default(), vocabulary)
}

/// Starts a session with balance overrides given as JSON, e.g.
/// `{"spawn_interval_ms": 1500}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = GameConfig::from_json(json).map_err(to_js)?;
    game::start(cfg, Vocabulary::default())
}

/// Resets score, level and every entity and resumes play.
#[wasm_bindgen]
pub fn restart_game() -> Result<(), JsValue> {
    game::restart()
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
