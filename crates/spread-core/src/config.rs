//! Canvas geometry and interaction settings.

use crate::grid::{GridPoint, clamp_axis, snap_to_grid};
use serde::{Deserialize, Serialize};

pub const GRID_SIZE: i32 = 15;
pub const CARD_WIDTH: i32 = 90;
pub const CARD_HEIGHT: i32 = 150;
/// Side of the square working area. The canvas never shrinks below this.
pub const WORKING_AREA: i32 = 1500;
pub const MAX_POSITIONS: usize = 78;
pub const MAX_Z: u8 = 100;
/// Pointer travel (per axis, canvas units) below which a gesture is a click.
pub const CLICK_THRESHOLD: i32 = 5;

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration shared by the layout model and the canvas controller.
///
/// Every field has a default; hosts usually only override `pan_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Grid step used for snapping. Default: **15**.
    pub grid: i32,
    /// Fixed card footprint. Default: **90 × 150**.
    pub card_width: i32,
    pub card_height: i32,
    /// Working area placement bounds are derived from. Default: **1500 × 1500**.
    pub area_width: i32,
    pub area_height: i32,
    /// Click-vs-marquee travel threshold. Default: **5**.
    pub click_threshold: i32,
    /// `KeyboardEvent.key` value that engages panning while held. Default: Space.
    pub pan_key: String,
    /// Collection ceiling callers should enforce. Default: **78**.
    pub max_positions: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid: GRID_SIZE,
            card_width: CARD_WIDTH,
            card_height: CARD_HEIGHT,
            area_width: WORKING_AREA,
            area_height: WORKING_AREA,
            click_threshold: CLICK_THRESHOLD,
            pan_key: " ".to_string(),
            max_positions: MAX_POSITIONS,
        }
    }
}

impl CanvasConfig {
    /// Largest top-left x that keeps the whole card inside the working area.
    pub fn max_x(&self) -> i32 {
        (self.area_width - self.card_width).max(0)
    }

    /// Largest top-left y that keeps the whole card inside the working area.
    pub fn max_y(&self) -> i32 {
        (self.area_height - self.card_height).max(0)
    }

    /// Snap each axis to the grid, then clamp into placement bounds.
    ///
    /// Clamping last means the bounds always win: if a bound is not itself a
    /// grid multiple, a value pushed against it ends up off-grid.
    pub fn place(&self, x: i32, y: i32) -> GridPoint {
        GridPoint {
            x: clamp_axis(snap_to_grid(x, self.grid), self.max_x()),
            y: clamp_axis(snap_to_grid(y, self.grid), self.max_y()),
        }
    }

    /// Whether a top-left coordinate lies inside placement bounds.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..=self.max_x()).contains(&x) && (0..=self.max_y()).contains(&y)
    }

    /// Whether both axes sit on the grid.
    pub fn on_grid(&self, x: i32, y: i32) -> bool {
        self.grid <= 0 || (x.rem_euclid(self.grid) == 0 && y.rem_euclid(self.grid) == 0)
    }

    /// Working-area extent for a viewport: the viewport, but never smaller than
    /// the configured area.
    pub fn surface_size(&self, viewport_width: i32, viewport_height: i32) -> (i32, i32) {
        (
            viewport_width.max(self.area_width),
            viewport_height.max(self.area_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_keep_card_inside_area() {
        let config = CanvasConfig::default();
        assert_eq!(config.max_x(), 1410);
        assert_eq!(config.max_y(), 1350);
        assert!(config.in_bounds(1410, 1350));
        assert!(!config.in_bounds(1411, 0));
        assert!(!config.in_bounds(0, -1));
    }

    #[test]
    fn place_snaps_then_clamps() {
        let config = CanvasConfig::default();
        assert_eq!(config.place(22, 8), GridPoint { x: 15, y: 15 });
        assert_eq!(config.place(-40, 2000), GridPoint { x: 0, y: 1350 });
        // 1418 snaps to 1425, clamp brings it back to the bound.
        assert_eq!(config.place(1418, 1343), GridPoint { x: 1410, y: 1350 });
    }

    #[test]
    fn default_bounds_are_grid_multiples() {
        // With the default geometry snap-then-clamp can never leave the grid.
        let config = CanvasConfig::default();
        for v in (-100..1600).step_by(7) {
            let p = config.place(v, v);
            assert!(config.on_grid(p.x, p.y), "{v} placed off-grid at {p:?}");
            assert!(config.in_bounds(p.x, p.y));
        }
    }

    #[test]
    fn clamp_wins_when_bound_is_off_grid() {
        let config = CanvasConfig {
            grid: 20,
            ..CanvasConfig::default()
        };
        // 1405 snaps to 1400 (on-grid, in bounds); 1415 snaps to 1420, clamped to 1410.
        assert_eq!(config.place(1405, 0).x, 1400);
        let edge = config.place(1415, 0);
        assert_eq!(edge.x, 1410);
        assert!(!config.on_grid(edge.x, edge.y));
    }

    #[test]
    fn surface_never_shrinks_below_area() {
        let config = CanvasConfig::default();
        assert_eq!(config.surface_size(800, 600), (1500, 1500));
        assert_eq!(config.surface_size(1920, 1080), (1920, 1500));
    }
}
