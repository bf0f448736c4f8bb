//! WASM bridge for the spread canvas.
//!
//! Compiled via `wasm-pack build --target web` and loaded by the template
//! editor page. Positions cross the boundary as JSON; every interaction
//! handler returns the resulting `CanvasEvent`s as a JSON array.

mod render2d;

use spread_core::{
    CanvasConfig, LintSeverity, Position, PositionStore, SpreadLayout, lint_layout,
};
use spread_editor::{CanvasEvent, CanvasMode, SpreadCanvas};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The WASM-facing canvas controller.
///
/// Owns the position list on behalf of the page and the canvas state
/// machine that edits it.
#[wasm_bindgen]
pub struct SpreadCanvasHandle {
    layout: SpreadLayout,
    canvas: SpreadCanvas,
    width: f64,
    height: f64,
    dark_mode: bool,
}

#[wasm_bindgen]
impl SpreadCanvasHandle {
    /// Create a controller. `config_json` may be empty for defaults; an
    /// invalid config is logged and replaced by defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, read_only: bool) -> Self {
        console_error_panic_hook_setup();

        let config = parse_config(config_json).unwrap_or_else(|e| {
            console_warn(&e);
            CanvasConfig::default()
        });
        let mode = if read_only {
            CanvasMode::ReadOnly
        } else {
            CanvasMode::Editable
        };
        let width = f64::from(config.area_width);
        let height = f64::from(config.area_height);
        Self {
            layout: SpreadLayout::new(config.clone()),
            canvas: SpreadCanvas::new(config, mode),
            width,
            height,
            dark_mode: false,
        }
    }

    // ─── Positions ───────────────────────────────────────────────────────

    /// Replace the position list. Returns `false` (and keeps the old list)
    /// if the JSON does not parse.
    pub fn set_positions_json(&mut self, json: &str) -> bool {
        match parse_positions(json) {
            Ok(positions) => {
                let config = self.layout.config().clone();
                self.layout = SpreadLayout::from_positions(positions, config);
                self.canvas.on_collection_replaced(self.layout.len());
                true
            }
            Err(e) => {
                console_warn(&e);
                false
            }
        }
    }

    pub fn get_positions_json(&self) -> String {
        serde_json::to_string(self.layout.positions()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Whether the list changed since the last call; resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        self.layout.take_dirty()
    }

    pub fn can_add(&self) -> bool {
        self.layout.can_add()
    }

    pub fn can_remove(&self) -> bool {
        self.layout.can_remove()
    }

    /// Append a card in the next free default slot. Returns its index, or
    /// -1 at the ceiling.
    pub fn add_default(&mut self) -> i32 {
        if !self.layout.can_add() {
            return -1;
        }
        index_to_js(Some(self.layout.add_default()))
    }

    /// Append a card centred on canvas point (x, y). Returns its index, or
    /// -1 at the ceiling.
    pub fn add_at(&mut self, x: i32, y: i32) -> i32 {
        if !self.layout.can_add() {
            return -1;
        }
        index_to_js(Some(self.layout.add_at(x, y)))
    }

    /// Remove a card. Refused for the last remaining card.
    pub fn remove(&mut self, index: usize) -> String {
        if !self.layout.can_remove() || self.layout.remove(index).is_none() {
            return "[]".to_string();
        }
        events_json(&self.canvas.on_entry_removed(index))
    }

    pub fn move_entry(&mut self, from: usize, to: usize) -> String {
        if !self.layout.move_entry(from, to) {
            return "[]".to_string();
        }
        events_json(&self.canvas.on_entry_moved(from, to))
    }

    pub fn rename(&mut self, index: usize, name: &str) -> bool {
        self.layout.rename(index, name)
    }

    /// Rotate by one 45° step, clockwise or not.
    pub fn rotate(&mut self, index: usize, clockwise: bool) -> bool {
        let Some(r) = self.layout.get(index).map(|p| p.r) else {
            return false;
        };
        let next = if clockwise { r.rotate_cw() } else { r.rotate_ccw() };
        self.layout.set_rotation(index, next)
    }

    pub fn set_z(&mut self, index: usize, z: u8) -> bool {
        self.layout.set_z(index, z)
    }

    /// Lint findings as `[{"index":..,"rule":..,"severity":..,"message":..}]`.
    pub fn lint_json(&self) -> String {
        let findings: Vec<serde_json::Value> = lint_layout(&self.layout)
            .into_iter()
            .map(|d| {
                serde_json::json!({
                    "index": d.position.map(|(i, _)| i),
                    "rule": d.rule,
                    "severity": match d.severity {
                        LintSeverity::Warning => "warning",
                        LintSeverity::Info => "info",
                    },
                    "message": d.message,
                })
            })
            .collect();
        serde_json::Value::Array(findings).to_string()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Active card index, or -1.
    pub fn get_active(&self) -> i32 {
        index_to_js(self.canvas.selection().active())
    }

    /// Set the active card; a negative index clears it.
    pub fn set_active(&mut self, index: i32) -> String {
        let index = usize::try_from(index).ok();
        events_json(&self.canvas.set_active(&self.layout, index))
    }

    pub fn get_selected_json(&self) -> String {
        serde_json::to_string(self.canvas.selection().selected()).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Record where the canvas container sits in client space.
    pub fn mount(&mut self, origin_x: f64, origin_y: f64) {
        self.canvas.mount(origin_x, origin_y);
    }

    pub fn unmount(&mut self) {
        self.canvas.unmount();
    }

    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> String {
        events_json(&self.canvas.pointer_down(&mut self.layout, x, y))
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> String {
        events_json(&self.canvas.pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> String {
        events_json(&self.canvas.pointer_up(&mut self.layout, x, y))
    }

    pub fn handle_double_click(&mut self, x: f64, y: f64) -> String {
        events_json(&self.canvas.double_click(&self.layout, x, y))
    }

    pub fn handle_key_down(&mut self, key: &str, text_entry_focused: bool) -> String {
        events_json(&self.canvas.key_down(key, text_entry_focused))
    }

    pub fn handle_key_up(&mut self, key: &str) {
        self.canvas.key_up(key);
    }

    /// Window blur: held keys count as released.
    pub fn handle_blur(&mut self) {
        self.canvas.handle(&mut self.layout, &spread_editor::InputEvent::Blur);
    }

    /// The viewport element was resized (CSS pixels).
    pub fn resize(&mut self, width: f64, height: f64) -> String {
        self.width = width;
        self.height = height;
        events_json(&self.canvas.resize(width.round() as i32, height.round() as i32))
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    /// Surface size as `[width, height]`; the page sizes its scroller with it.
    pub fn surface_size(&self) -> Vec<i32> {
        let (w, h) = self.canvas.surface_size();
        vec![w, h]
    }

    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let theme = if self.dark_mode {
            render2d::CanvasTheme::dark()
        } else {
            render2d::CanvasTheme::light()
        };
        let frame = self.canvas.frame(&self.layout);
        render2d::render_frame(ctx, &frame, self.width, self.height, &theme);
    }

    /// The composed frame as JSON, for DOM-based renderers.
    pub fn frame_json(&self) -> String {
        serde_json::to_string(&self.canvas.frame(&self.layout)).unwrap_or_else(|_| "{}".to_string())
    }
}

// ─── Boundary parsing ────────────────────────────────────────────────────

/// Parse a canvas config; empty input means defaults.
pub fn parse_config(json: &str) -> Result<CanvasConfig, String> {
    if json.trim().is_empty() {
        return Ok(CanvasConfig::default());
    }
    let config: CanvasConfig =
        serde_json::from_str(json).map_err(|e| format!("invalid canvas config: {e}"))?;
    if config.grid <= 0 || config.card_width <= 0 || config.card_height <= 0 {
        return Err("invalid canvas config: grid and card size must be positive".to_string());
    }
    Ok(config)
}

pub fn parse_positions(json: &str) -> Result<Vec<Position>, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid positions: {e}"))
}

fn events_json(events: &[CanvasEvent]) -> String {
    serde_json::to_string(events).unwrap_or_else(|e| {
        log::warn!("event serialization failed: {e}");
        "[]".to_string()
    })
}

fn index_to_js(index: Option<usize>) -> i32 {
    index.and_then(|i| i32::try_from(i).ok()).unwrap_or(-1)
}

fn console_warn(message: &str) {
    log::warn!("{message}");
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("spread canvas panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Validate a positions payload. Returns JSON: `{"ok":true,"count":n}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_positions(json: &str) -> String {
    match parse_positions(json) {
        Ok(positions) => serde_json::json!({ "ok": true, "count": positions.len() }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e }).to_string(),
    }
}
