//! Client → canvas coordinate mapping.
//!
//! The canvas surface sits inside a scrolling container. Its screen transform
//! is a translation by the container's client origin minus the current scroll
//! offset. Mapping a pointer into canvas space inverts that transform; it is
//! rebuilt on every call so it always reflects the latest scroll position.

use kurbo::{Affine, Point, Vec2};

/// Maps pointer client coordinates into canvas-local coordinates.
#[derive(Debug, Clone, Default)]
pub struct CoordinateMapper {
    /// Client position of the container's top-left. `None` until mounted.
    origin: Option<Vec2>,
    scroll: Vec2,
}

impl CoordinateMapper {
    /// An unmounted mapper: passes coordinates through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the surface's container sits on screen.
    pub fn mount(&mut self, origin_x: f64, origin_y: f64) {
        self.origin = Some(Vec2::new(origin_x, origin_y));
    }

    pub fn unmount(&mut self) {
        self.origin = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.origin.is_some()
    }

    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Canvas → client transform, if the surface is mounted.
    pub fn screen_transform(&self) -> Option<Affine> {
        self.origin
            .map(|origin| Affine::translate(origin - self.scroll))
    }

    /// Map a client point into canvas space.
    ///
    /// Unmounted surfaces (or a degenerate transform) return the input as-is.
    pub fn to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        let client = Point::new(client_x, client_y);
        match self.screen_transform() {
            Some(t) if t.determinant().abs() > f64::EPSILON => t.inverse() * client,
            _ => client,
        }
    }

    /// `to_canvas`, rounded to integer canvas units.
    pub fn to_canvas_units(&self, client_x: f64, client_y: f64) -> (i32, i32) {
        let p = self.to_canvas(client_x, client_y);
        (p.x.round() as i32, p.y.round() as i32)
    }
}
