//! The spread canvas: one state machine composing mapping, selection,
//! drag, guides and panning over an externally owned position list.
//!
//! The canvas never owns positions. Every operation that reads or commits
//! coordinates takes the store as an argument, and the canvas writes x/y
//! only when a drag ends.
//!
//! ```text
//!            press on card (editable)         release
//!   Idle ───────────────────────────▶ Dragging ───────▶ Idle
//!    │  press on background                     release
//!    ├─────────────────────────────▶ Marqueeing ──────▶ Idle
//!    │  press while pan key held                release / key up
//!    └─────────────────────────────▶ Panning ─────────▶ Idle
//! ```

use crate::coords::CoordinateMapper;
use crate::drag::DragEngine;
use crate::guides::{Guides, alignment_guides};
use crate::input::InputEvent;
use crate::pan::PanController;
use crate::selection::{MarqueeOutcome, SelectionController};
use crate::shortcuts::{KeyAction, KeyMap};
use serde::Serialize;
use smallvec::SmallVec;
use spread_core::{CanvasConfig, PositionStore};
use spread_render::{Frame, FrameInputs, compose_frame, hit_test};

/// Whether the canvas accepts layout edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CanvasMode {
    #[default]
    Editable,
    /// Cards can be clicked to inspect; nothing moves and nothing is placed.
    ReadOnly,
}

/// What the pointer is doing right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CanvasState {
    #[default]
    Idle,
    Dragging {
        index: usize,
        /// Canvas point of the press.
        press: (i32, i32),
        /// Travel reached the click threshold at some point.
        moved: bool,
    },
    Marqueeing,
    Panning,
}

/// Notifications for the host, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CanvasEvent {
    SelectionChanged { selected: Vec<usize> },
    ActiveChanged { active: Option<usize> },
    /// A drag ended; the dragged card and its siblings were written.
    Committed {
        index: usize,
        x: i32,
        y: i32,
        siblings: Vec<usize>,
    },
    /// Double-click on empty background, canvas coordinates.
    PlaceRequested { x: i32, y: i32 },
    ScrollChanged { x: f64, y: f64 },
}

pub struct SpreadCanvas {
    config: CanvasConfig,
    mode: CanvasMode,
    keys: KeyMap,
    mapper: CoordinateMapper,
    selection: SelectionController,
    drag: DragEngine,
    pan: PanController,
    state: CanvasState,
    viewport: (i32, i32),
}

impl SpreadCanvas {
    pub fn new(config: CanvasConfig, mode: CanvasMode) -> Self {
        let mut pan = PanController::new();
        let viewport = (config.area_width, config.area_height);
        pan.set_extent(config.surface_size(viewport.0, viewport.1), viewport);
        Self {
            keys: KeyMap::new(config.pan_key.clone()),
            drag: DragEngine::new(config.clone()),
            mapper: CoordinateMapper::new(),
            selection: SelectionController::new(),
            pan,
            state: CanvasState::Idle,
            viewport,
            mode,
            config,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn mode(&self) -> CanvasMode {
        self.mode
    }

    pub fn state(&self) -> CanvasState {
        self.state
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// The surface was attached at this client origin.
    pub fn mount(&mut self, origin_x: f64, origin_y: f64) {
        self.mapper.mount(origin_x, origin_y);
    }

    pub fn unmount(&mut self) {
        self.mapper.unmount();
    }

    /// Dispatch a normalized input event.
    pub fn handle(&mut self, store: &mut impl PositionStore, event: &InputEvent) -> Vec<CanvasEvent> {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(store, *x, *y),
            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            InputEvent::PointerUp { x, y } => self.pointer_up(store, *x, *y),
            InputEvent::DoubleClick { x, y } => self.double_click(&*store, *x, *y),
            InputEvent::KeyDown {
                key,
                text_entry_focused,
            } => self.key_down(key, *text_entry_focused),
            InputEvent::KeyUp { key } => {
                self.key_up(key);
                Vec::new()
            }
            InputEvent::Blur => {
                self.release_pan();
                Vec::new()
            }
            InputEvent::Resize { width, height } => self.resize(*width, *height),
        }
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, store: &mut impl PositionStore, client_x: f64, client_y: f64) -> Vec<CanvasEvent> {
        if self.state != CanvasState::Idle {
            log::warn!("pointer down in {:?}; resetting", self.state);
            self.reset_gesture();
        }

        if self.pan.begin(client_x, client_y) {
            self.state = CanvasState::Panning;
            return Vec::new();
        }

        let (x, y) = self.mapper.to_canvas_units(client_x, client_y);
        match hit_test(store.positions(), &self.config, &self.drag, x, y) {
            Some(index) if self.mode == CanvasMode::ReadOnly => {
                let before = self.snapshot();
                self.selection.click_card(index);
                self.changes_since(before)
            }
            Some(index) => {
                if self.drag.start(index, &*store, &self.selection.cell()) {
                    self.state = CanvasState::Dragging {
                        index,
                        press: (x, y),
                        moved: false,
                    };
                }
                Vec::new()
            }
            None => {
                self.selection.begin_marquee(x, y);
                self.state = CanvasState::Marqueeing;
                Vec::new()
            }
        }
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> Vec<CanvasEvent> {
        match self.state {
            CanvasState::Panning => {
                if self.pan.update(client_x, client_y) {
                    self.mapper.set_scroll(self.pan.scroll());
                    let scroll = self.pan.scroll();
                    return vec![CanvasEvent::ScrollChanged {
                        x: scroll.x,
                        y: scroll.y,
                    }];
                }
            }
            CanvasState::Dragging { index, press, moved } => {
                let (x, y) = self.mapper.to_canvas_units(client_x, client_y);
                let (dx, dy) = (x.saturating_sub(press.0), y.saturating_sub(press.1));
                if let Some(origin) = self.drag.session().map(|s| s.origin) {
                    let target = origin.offset(dx, dy);
                    let live = self.config.place(target.x, target.y);
                    self.drag.move_to(index, live.x, live.y);
                }
                let threshold = self.config.click_threshold;
                self.state = CanvasState::Dragging {
                    index,
                    press,
                    moved: moved || dx.saturating_abs() >= threshold || dy.saturating_abs() >= threshold,
                };
            }
            CanvasState::Marqueeing => {
                let (x, y) = self.mapper.to_canvas_units(client_x, client_y);
                self.selection.update_marquee(x, y);
            }
            CanvasState::Idle => {}
        }
        Vec::new()
    }

    pub fn pointer_up(&mut self, store: &mut impl PositionStore, client_x: f64, client_y: f64) -> Vec<CanvasEvent> {
        let state = std::mem::take(&mut self.state);
        match state {
            CanvasState::Idle => Vec::new(),
            CanvasState::Panning => {
                self.pan.end();
                Vec::new()
            }
            CanvasState::Dragging { index, moved, .. } => {
                if !moved {
                    // Press and release in place: a click.
                    self.drag.cancel();
                    let before = self.snapshot();
                    self.selection.click_card(index);
                    return self.changes_since(before);
                }
                let Some((_, live)) = self.drag.dragged() else {
                    return Vec::new();
                };
                store.set_xy(index, live.x, live.y);
                let siblings = self.drag.end(index, store);
                vec![CanvasEvent::Committed {
                    index,
                    x: live.x,
                    y: live.y,
                    siblings: siblings.into_iter().map(|(i, _)| i).collect(),
                }]
            }
            CanvasState::Marqueeing => {
                let (x, y) = self.mapper.to_canvas_units(client_x, client_y);
                let before = self.snapshot();
                if self.mode == CanvasMode::ReadOnly {
                    self.selection.update_marquee(x, y);
                    if self.selection.marquee_rect(self.config.click_threshold).is_some() {
                        self.selection.abandon_marquee();
                        return Vec::new();
                    }
                }
                match self.selection.finish_marquee(x, y, store.positions(), &self.config) {
                    MarqueeOutcome::Click => log::debug!("background click at ({x}, {y})"),
                    MarqueeOutcome::Selected(indices) => log::debug!("marquee selected {} card(s)", indices.len()),
                }
                self.changes_since(before)
            }
        }
    }

    /// Double-click: on empty background in editable mode, ask the host to
    /// place a new card here.
    pub fn double_click(&mut self, store: &impl PositionStore, client_x: f64, client_y: f64) -> Vec<CanvasEvent> {
        if self.mode == CanvasMode::ReadOnly || self.pan.is_armed() {
            return Vec::new();
        }
        let (x, y) = self.mapper.to_canvas_units(client_x, client_y);
        if hit_test(store.positions(), &self.config, &self.drag, x, y).is_some() {
            return Vec::new();
        }
        vec![CanvasEvent::PlaceRequested { x, y }]
    }

    // ─── Keyboard & viewport ─────────────────────────────────────────────

    pub fn key_down(&mut self, key: &str, text_entry_focused: bool) -> Vec<CanvasEvent> {
        match self.keys.resolve(key, text_entry_focused) {
            Some(KeyAction::PanHold) => {
                self.pan.key_down(text_entry_focused);
                Vec::new()
            }
            Some(KeyAction::ClearSelection) if self.state == CanvasState::Idle => {
                let before = self.snapshot();
                self.selection.clear();
                self.changes_since(before)
            }
            _ => Vec::new(),
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if self.keys.releases_pan(key) {
            self.release_pan();
        }
    }

    /// The viewport changed size. The surface never shrinks below the
    /// working area; scroll is re-clamped to the new extent.
    pub fn resize(&mut self, width: i32, height: i32) -> Vec<CanvasEvent> {
        self.viewport = (width.max(0), height.max(0));
        let before = self.pan.scroll();
        let surface = self.surface_size();
        self.pan.set_extent(surface, self.viewport);
        let scroll = self.pan.scroll();
        self.mapper.set_scroll(scroll);
        if scroll == before {
            return Vec::new();
        }
        vec![CanvasEvent::ScrollChanged {
            x: scroll.x,
            y: scroll.y,
        }]
    }

    pub fn surface_size(&self) -> (i32, i32) {
        self.config.surface_size(self.viewport.0, self.viewport.1)
    }

    // ─── Collection changes ──────────────────────────────────────────────

    /// The host removed entry `index`.
    pub fn on_entry_removed(&mut self, index: usize) -> Vec<CanvasEvent> {
        self.abort_drag();
        let before = self.snapshot();
        self.selection.on_removed(index);
        self.changes_since(before)
    }

    /// The host moved entry `from` to `to`.
    pub fn on_entry_moved(&mut self, from: usize, to: usize) -> Vec<CanvasEvent> {
        self.abort_drag();
        let before = self.snapshot();
        self.selection.on_moved(from, to);
        self.changes_since(before)
    }

    /// The host swapped in a different collection of `len` entries.
    pub fn on_collection_replaced(&mut self, len: usize) -> Vec<CanvasEvent> {
        self.abort_drag();
        let before = self.snapshot();
        self.selection.retain_len(len);
        self.changes_since(before)
    }

    /// External setter for the active card.
    pub fn set_active(&mut self, store: &impl PositionStore, index: Option<usize>) -> Vec<CanvasEvent> {
        let before = self.snapshot();
        self.selection.set_active(index, store.len());
        self.changes_since(before)
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn guides(&self, store: &impl PositionStore) -> Guides {
        alignment_guides(
            store.positions(),
            &self.config,
            self.drag.dragged(),
            self.selection.selected(),
        )
    }

    pub fn frame(&self, store: &impl PositionStore) -> Frame {
        let guides = self.guides(store);
        let scroll = self.pan.scroll();
        let inputs = FrameInputs {
            selected: self.selection.selected(),
            active: self.selection.active(),
            dragging: self.drag.dragged().map(|(i, _)| i),
            guides: guides.as_slice(),
            // Read-only background presses only track travel for clear-on-click.
            marquee: match self.mode {
                CanvasMode::ReadOnly => None,
                CanvasMode::Editable => self.selection.marquee_rect(self.config.click_threshold),
            },
            surface: self.surface_size(),
            card: (self.config.card_width, self.config.card_height),
            grid: self.config.grid,
            scroll: (scroll.x, scroll.y),
        };
        compose_frame(store.positions(), &self.drag, &inputs)
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn release_pan(&mut self) {
        self.pan.key_up();
        if self.state == CanvasState::Panning {
            self.state = CanvasState::Idle;
        }
    }

    fn abort_drag(&mut self) {
        if let CanvasState::Dragging { .. } = self.state {
            self.state = CanvasState::Idle;
        }
        self.drag.cancel();
    }

    fn reset_gesture(&mut self) {
        self.drag.cancel();
        self.selection.abandon_marquee();
        self.pan.end();
        self.state = CanvasState::Idle;
    }

    fn snapshot(&self) -> (SmallVec<[usize; 8]>, Option<usize>) {
        (
            SmallVec::from_slice(self.selection.selected()),
            self.selection.active(),
        )
    }

    fn changes_since(&self, (selected, active): (SmallVec<[usize; 8]>, Option<usize>)) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        if selected.as_slice() != self.selection.selected() {
            events.push(CanvasEvent::SelectionChanged {
                selected: self.selection.selected().to_vec(),
            });
        }
        if active != self.selection.active() {
            events.push(CanvasEvent::ActiveChanged {
                active: self.selection.active(),
            });
        }
        events
    }
}
