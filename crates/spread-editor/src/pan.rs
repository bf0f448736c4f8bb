//! Modifier-held viewport panning.
//!
//! Holding the pan key (outside a text field) arms panning. A press while
//! armed starts a session; moves scroll the viewport by the negative of the
//! pointer displacement; release, or letting go of the key, ends it.
//! Displacement is measured in client space: canvas-space coordinates shift
//! under the pointer as the scroll offset changes.

use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Copy)]
struct PanSession {
    start_client: Point,
    start_scroll: Vec2,
}

#[derive(Debug, Default)]
pub struct PanController {
    modifier_held: bool,
    session: Option<PanSession>,
    scroll: Vec2,
    /// Largest scroll offset per axis (surface minus viewport).
    max_scroll: Vec2,
}

impl PanController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pan key went down. Ignored while a text field has focus.
    /// Returns whether panning is now armed.
    pub fn key_down(&mut self, text_entry_focused: bool) -> bool {
        if !text_entry_focused {
            self.modifier_held = true;
        }
        self.modifier_held
    }

    /// Pan key released: disarm and end any session.
    pub fn key_up(&mut self) {
        self.modifier_held = false;
        self.end();
    }

    pub fn is_armed(&self) -> bool {
        self.modifier_held
    }

    pub fn is_panning(&self) -> bool {
        self.session.is_some()
    }

    /// Press while armed: capture the current scroll offset.
    pub fn begin(&mut self, client_x: f64, client_y: f64) -> bool {
        if !self.modifier_held {
            return false;
        }
        self.session = Some(PanSession {
            start_client: Point::new(client_x, client_y),
            start_scroll: self.scroll,
        });
        true
    }

    /// Pointer moved: scroll opposite to the displacement. Returns whether
    /// the scroll offset changed.
    pub fn update(&mut self, client_x: f64, client_y: f64) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        let displacement = Point::new(client_x, client_y) - session.start_client;
        let next = self.clamp(session.start_scroll - displacement);
        let changed = next != self.scroll;
        self.scroll = next;
        log::trace!("pan scroll ({:.1}, {:.1})", self.scroll.x, self.scroll.y);
        changed
    }

    pub fn end(&mut self) {
        self.session = None;
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Set the scrollable extent from the surface and viewport sizes.
    pub fn set_extent(&mut self, surface: (i32, i32), viewport: (i32, i32)) {
        self.max_scroll = Vec2::new(
            f64::from((surface.0 - viewport.0).max(0)),
            f64::from((surface.1 - viewport.1).max(0)),
        );
        self.scroll = self.clamp(self.scroll);
    }

    fn clamp(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x.clamp(0.0, self.max_scroll.x), v.y.clamp(0.0, self.max_scroll.y))
    }
}
