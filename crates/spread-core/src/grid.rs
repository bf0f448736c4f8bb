//! Grid quantisation and placement clamping.

use serde::{Deserialize, Serialize};

/// A top-left card coordinate in canvas units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - origin`.
    pub fn delta_from(self, origin: GridPoint) -> (i32, i32) {
        (self.x.saturating_sub(origin.x), self.y.saturating_sub(origin.y))
    }

    pub fn offset(self, dx: i32, dy: i32) -> GridPoint {
        GridPoint {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Round `value` to the nearest multiple of `grid`, halves rounding up.
///
/// A non-positive grid disables snapping. Results past the `i32` range
/// saturate to the largest multiple of `grid` that fits.
pub fn snap_to_grid(value: i32, grid: i32) -> i32 {
    if grid <= 0 {
        return value;
    }
    let (v, g) = (i64::from(value), i64::from(grid));
    let steps = (v * 2 + g).div_euclid(g * 2);
    let snapped = steps * g;
    if snapped > i64::from(i32::MAX) {
        (steps - 1) as i32 * grid
    } else if snapped < i64::from(i32::MIN) {
        (steps + 1) as i32 * grid
    } else {
        snapped as i32
    }
}

/// Clamp a coordinate into `[0, max]`.
pub fn clamp_axis(value: i32, max: i32) -> i32 {
    value.clamp(0, max.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_nearest_step() {
        assert_eq!(snap_to_grid(0, 15), 0);
        assert_eq!(snap_to_grid(7, 15), 0);
        assert_eq!(snap_to_grid(8, 15), 15);
        assert_eq!(snap_to_grid(22, 15), 15);
        assert_eq!(snap_to_grid(23, 15), 30);
        assert_eq!(snap_to_grid(-7, 15), 0);
        assert_eq!(snap_to_grid(-8, 15), -15);
    }

    #[test]
    fn snap_rounds_halves_up() {
        assert_eq!(snap_to_grid(5, 10), 10);
        assert_eq!(snap_to_grid(-5, 10), 0);
    }

    #[test]
    fn snap_is_idempotent() {
        for x in -3000..3000 {
            let once = snap_to_grid(x, 15);
            assert_eq!(snap_to_grid(once, 15), once, "not idempotent at {x}");
        }
        let extremes = (0..64).flat_map(|d| [i32::MIN + d, i32::MAX - d]);
        for x in extremes.chain([i32::MIN / 2, i32::MAX / 2]) {
            for grid in [1, 2, 15, 64, i32::MAX] {
                let once = snap_to_grid(x, grid);
                assert_eq!(once % grid, 0, "off grid at {x} / {grid}");
                assert_eq!(snap_to_grid(once, grid), once, "not idempotent at {x} / {grid}");
            }
        }
    }

    #[test]
    fn snap_saturates_at_the_integer_edges() {
        assert_eq!(snap_to_grid(i32::MAX, 15), i32::MAX / 15 * 15);
        assert_eq!(snap_to_grid(i32::MIN, 15), i32::MIN / 15 * 15);
        assert_eq!(snap_to_grid(i32::MAX, 1), i32::MAX);
    }

    #[test]
    fn grid_point_arithmetic_saturates() {
        let far = GridPoint::new(i32::MAX, i32::MIN);
        assert_eq!(far.offset(10, -10), far);
        assert_eq!(far.delta_from(GridPoint::new(-1, 1)), (i32::MAX, i32::MIN));
    }

    #[test]
    fn zero_grid_is_identity() {
        assert_eq!(snap_to_grid(17, 0), 17);
    }

    #[test]
    fn clamp_axis_bounds() {
        assert_eq!(clamp_axis(-1, 1410), 0);
        assert_eq!(clamp_axis(1411, 1410), 1410);
        assert_eq!(clamp_axis(700, 1410), 700);
    }
}
