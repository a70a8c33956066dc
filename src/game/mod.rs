//! Browser front-end: owns the canvas, the HUD overlays and the
//! animation-frame loop, and feeds DOM events into the [`Session`].
//!
//! State lives in a thread-local because every entry point is a JS callback.
//! The loop stops on game over and is re-armed by a restart.
use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window, window};

use crate::config::{GameConfig, Vocabulary};
use crate::sim::targeting::Key;
use crate::sim::{GameEvent, Session, Viewport};

mod render;

const CANVAS_ID: &str = "ct-canvas";
const SCORE_ID: &str = "ct-score";
const LEVEL_ID: &str = "ct-level";
const INPUT_ID: &str = "ct-input";
const GAME_OVER_ID: &str = "ct-game-over";

struct GameState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: Session,
    /// Timestamp of the previous frame; `None` right after (re)start.
    last_ts: Option<f64>,
    looping: bool,
}

thread_local! {
    static GAME: RefCell<Option<GameState>> = RefCell::new(None);
    static FRAME: RefCell<Option<Closure<dyn FnMut(f64)>>> = RefCell::new(None);
    static LISTENERS_INSTALLED: RefCell<bool> = RefCell::new(false);
}

fn browser() -> Result<(Window, Document), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    Ok((win, doc))
}

fn window_size(win: &Window) -> Viewport {
    let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
    let height = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
    Viewport { width, height }
}

/// Creates (or reuses) the canvas and overlays and begins a fresh session.
pub fn start(cfg: GameConfig, vocabulary: Vocabulary) -> Result<(), JsValue> {
    let (win, doc) = browser()?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_attribute("style", "position:fixed; left:0; top:0; display:block; background:#1a1510; z-index:10;")?;
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let view = window_size(&win);
    canvas.set_width(view.width as u32);
    canvas.set_height(view.height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    ensure_overlay(&doc, SCORE_ID, "Score: 0", "position:fixed; top:10px; left:12px; font-family:'Press Start 2P', 'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45;")?;
    ensure_overlay(&doc, LEVEL_ID, "Level: 1", "position:fixed; top:10px; right:12px; font-family:'Press Start 2P', 'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45;")?;
    ensure_overlay(&doc, INPUT_ID, "", "position:fixed; bottom:40px; left:50%; transform:translateX(-50%); font-family:'Press Start 2P', 'Fira Code', monospace; font-size:22px; padding:4px 10px; background:rgba(0,0,0,0.35); border:1px solid #333; border-radius:6px; color:#ff4d4d; z-index:30;")?;
    ensure_overlay(&doc, GAME_OVER_ID, "", "position:fixed; top:40%; left:50%; transform:translate(-50%,-50%); font-family:'Press Start 2P', 'Fira Code', monospace; font-size:24px; text-align:center; padding:18px 24px; background:rgba(0,0,0,0.75); border:2px solid #ff4d4d; border-radius:10px; color:#fff; z-index:50; display:none;")?;

    let session = Session::new(cfg, vocabulary, view, seed())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("session started at {}x{}", view.width, view.height);
    // a frame chain may still be pending from an earlier start
    let looping = GAME.with(|g| g.borrow().as_ref().is_some_and(|s| s.looping));
    let state = GameState {
        canvas,
        ctx,
        session,
        last_ts: None,
        looping,
    };
    GAME.with(|g| g.replace(Some(state)));

    install_listeners(&win, &doc)?;
    with_state(|state, doc| {
        set_text(doc, SCORE_ID, "Score: 0");
        set_text(doc, LEVEL_ID, "Level: 1");
        set_text(doc, INPUT_ID, "");
        show_game_over(doc, None);
        arm_loop(state)
    })
    .unwrap_or(Ok(()))
}

/// Re-initialises the running session from scratch.
pub fn restart() -> Result<(), JsValue> {
    with_state(restart_state).unwrap_or_else(|| Err(JsValue::from_str("game not started")))
}

fn restart_state(state: &mut GameState, doc: &Document) -> Result<(), JsValue> {
    state.session.restart();
    state.last_ts = None;
    show_game_over(doc, None);
    apply_events(doc, &mut state.session);
    arm_loop(state)
}

/// Runs `f` against the live state, if there is one.
fn with_state<T>(f: impl FnOnce(&mut GameState, &Document) -> T) -> Option<T> {
    let doc = window().and_then(|w| w.document())?;
    GAME.with(|cell| cell.borrow_mut().as_mut().map(|state| f(state, &doc)))
}

fn ensure_overlay(doc: &Document, id: &str, text: &str, style: &str) -> Result<(), JsValue> {
    if doc.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let div = doc.create_element("div")?;
    div.set_id(id);
    div.set_text_content(Some(text));
    div.set_attribute("style", style)?;
    body.append_child(&div)?;
    Ok(())
}

fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn show_game_over(doc: &Document, final_score: Option<u32>) {
    let Some(el) = doc.get_element_by_id(GAME_OVER_ID) else {
        return;
    };
    let Ok(panel) = el.dyn_into::<web_sys::HtmlElement>() else {
        return;
    };
    match final_score {
        Some(score) => {
            panel.set_inner_text(&format!("GAME OVER\nScore: {score}\n\nPress Enter to restart"));
            panel.style().set_property("display", "block").ok();
        }
        None => {
            panel.style().set_property("display", "none").ok();
        }
    }
}

/// Pushes drained session events into the HUD.
fn apply_events(doc: &Document, session: &mut Session) {
    for event in session.drain_events() {
        match event {
            GameEvent::ScoreChanged(score) => set_text(doc, SCORE_ID, &format!("Score: {score}")),
            GameEvent::LevelUp { level } => set_text(doc, LEVEL_ID, &format!("Level: {level}")),
            GameEvent::InputChanged(typed) => set_text(doc, INPUT_ID, &typed.to_uppercase()),
            GameEvent::GameOver { score } => {
                log::info!("game over with {score} points");
                show_game_over(doc, Some(score));
            }
            GameEvent::EnemySpawned { .. } | GameEvent::EnemyKilled { .. } => {}
        }
    }
}

fn install_listeners(win: &Window, doc: &Document) -> Result<(), JsValue> {
    if LISTENERS_INSTALLED.with(|flag| flag.replace(true)) {
        return Ok(());
    }

    let on_key = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let key = Key::from_dom(&evt.key());
        if key == Key::Backspace {
            // keep the browser from navigating back
            evt.prevent_default();
        }
        let result = with_state(|state, doc| {
            if state.session.is_over() {
                return if key == Key::Enter {
                    restart_state(state, doc)
                } else {
                    Ok(())
                };
            }
            state.session.handle_key(key);
            apply_events(doc, &mut state.session);
            Ok(())
        });
        if let Some(Err(e)) = result {
            log::error!("key handler failed: {e:?}");
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    let on_resize = Closure::wrap(Box::new(move || {
        let Some(win) = window() else {
            return;
        };
        let view = window_size(&win);
        with_state(|state, _| {
            state.canvas.set_width(view.width as u32);
            state.canvas.set_height(view.height as u32);
            state.session.resize(view);
        });
    }) as Box<dyn FnMut()>);
    win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

// --- Frame loop -------------------------------------------------------------

fn arm_loop(state: &mut GameState) -> Result<(), JsValue> {
    if state.looping {
        return Ok(());
    }
    state.looping = true;
    request_frame()
}

fn request_frame() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    FRAME.with(|slot| {
        let mut slot = slot.borrow_mut();
        let callback =
            slot.get_or_insert_with(|| Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>));
        win.request_animation_frame(callback.as_ref().unchecked_ref())?;
        Ok(())
    })
}

fn on_frame(ts: f64) {
    let again = with_state(|state, doc| {
        let dt = state.last_ts.map_or(0.0, |last| ts - last);
        state.last_ts = Some(ts);
        state.session.step(dt);
        if let Err(e) = render::draw(&state.ctx, &state.session) {
            log::warn!("render failed: {e:?}");
        }
        apply_events(doc, &mut state.session);
        state.looping = !state.session.is_over();
        state.looping
    })
    .unwrap_or(false);
    if again {
        if let Err(e) = request_frame() {
            log::error!("could not schedule frame: {e:?}");
        }
    }
}

fn seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u64::from_le_bytes(buf);
        }
    }
    crate::performance_now().to_bits()
}
