//! Alignment guides for solo drags.
//!
//! While one card is dragged on its own, every x-edge (left, right) it shares
//! exactly with another card yields a vertical guide, and every shared y-edge
//! (top, bottom) a horizontal one. Coordinates are grid-quantised, so exact
//! equality is enough. Group drags show no guides.

use smallvec::SmallVec;
use spread_core::{CanvasConfig, CardRect, GridPoint, Guide, Position};

/// At most two vertical and two horizontal lines: one per dragged edge.
pub type Guides = SmallVec<[Guide; 4]>;

/// Compute the guides for the current frame.
///
/// `dragged` is the dragged card's index and live top-left, `None` when no
/// drag is active. `selected` is the multi-selection; if the dragged card is
/// one of several selected cards the drag is a group drag and nothing is
/// returned. Guides come back sorted and deduplicated by (axis, position).
pub fn alignment_guides(
    positions: &[Position],
    config: &CanvasConfig,
    dragged: Option<(usize, GridPoint)>,
    selected: &[usize],
) -> Guides {
    let mut guides = Guides::new();
    let Some((index, live)) = dragged else {
        return guides;
    };
    if selected.len() > 1 && selected.contains(&index) {
        return guides;
    }

    let moving = CardRect::at(live, config);
    let others = positions
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, p)| p.rect(config));

    for other in others {
        for x in [moving.left, moving.right] {
            if x == other.left || x == other.right {
                guides.push(Guide::vertical(x));
            }
        }
        for y in [moving.top, moving.bottom] {
            if y == other.top || y == other.bottom {
                guides.push(Guide::horizontal(y));
            }
        }
    }

    guides.sort_unstable();
    guides.dedup();
    guides
}
