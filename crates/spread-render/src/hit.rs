//! Hit testing: point → card lookup, marquee → card set.

use crate::zorder::z_order;
use spread_core::{CanvasConfig, CardRect, LiveTransforms, Position};

/// Find the topmost card at canvas point (px, py).
/// Returns the card's list index, or `None` for background.
///
/// Walks paint order front to back and tests each card where it is currently
/// drawn, so a card mid-drag is hit at its live position.
pub fn hit_test(
    positions: &[Position],
    config: &CanvasConfig,
    live: &impl LiveTransforms,
    px: i32,
    py: i32,
) -> Option<usize> {
    z_order(positions)
        .iter()
        .rev()
        .find(|entry| CardRect::at(live.displayed(entry.card), config).contains(px, py))
        .map(|entry| entry.index)
}

/// Indices (ascending) of every card whose footprint overlaps `marquee`.
///
/// Uses rest positions: a marquee can only be drawn while nothing is dragged.
pub fn hit_test_rect(positions: &[Position], config: &CanvasConfig, marquee: &CardRect) -> Vec<usize> {
    positions
        .iter()
        .enumerate()
        .filter(|(_, pos)| pos.rect(config).overlaps(marquee))
        .map(|(i, _)| i)
        .collect()
}
