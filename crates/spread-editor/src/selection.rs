//! Selection: single "active" card plus an index-based multi-selection.
//!
//! The two are independent. Clicking a card makes it active and drops any
//! multi-selection; a marquee replaces the multi-selection and leaves the
//! active card alone. Both are plain list indices, so they are renumbered
//! whenever the collection is reordered or shrinks.

use smallvec::SmallVec;
use spread_core::{CanvasConfig, CardRect, Position};
use spread_render::hit_test_rect;
use std::cell::RefCell;
use std::rc::Rc;

/// Sorted, duplicate-free list indices.
pub type IndexSet = SmallVec<[usize; 8]>;

/// Shared cell holding the latest multi-selection.
///
/// Long-lived listeners registered once (drag start, key handlers) hold a
/// clone and read it on demand instead of capturing a snapshot.
#[derive(Debug, Clone, Default)]
pub struct SelectionCell(Rc<RefCell<IndexSet>>);

impl SelectionCell {
    pub fn get(&self) -> IndexSet {
        self.0.borrow().clone()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.borrow().contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn set(&self, indices: &IndexSet) {
        *self.0.borrow_mut() = indices.clone();
    }
}

/// Result of releasing a background press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarqueeOutcome {
    /// Travel stayed under the click threshold: everything was deselected.
    Click,
    /// The marquee replaced the multi-selection with these indices.
    Selected(IndexSet),
}

#[derive(Debug, Clone, Copy)]
struct Marquee {
    anchor: (i32, i32),
    current: (i32, i32),
}

#[derive(Debug, Default)]
pub struct SelectionController {
    selected: IndexSet,
    active: Option<usize>,
    marquee: Option<Marquee>,
    cell: SelectionCell,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the latest-selection cell.
    pub fn cell(&self) -> SelectionCell {
        self.cell.clone()
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Whether `index` is part of a multi-selection of more than one card.
    pub fn is_group_member(&self, index: usize) -> bool {
        self.selected.len() > 1 && self.selected.contains(&index)
    }

    // ─── Clicks ──────────────────────────────────────────────────────────

    /// Click on a card: drop the multi-selection, make the card active.
    pub fn click_card(&mut self, index: usize) {
        self.selected.clear();
        self.active = Some(index);
        self.publish();
    }

    /// Clear active and multi-selection (background click).
    pub fn clear(&mut self) {
        self.selected.clear();
        self.active = None;
        self.publish();
    }

    /// External setter for the active card. A stale index clears it.
    pub fn set_active(&mut self, index: Option<usize>, len: usize) {
        self.active = match index {
            Some(i) if i < len => Some(i),
            Some(i) => {
                log::warn!("set_active: stale index {i} (len {len}), clearing");
                None
            }
            None => None,
        };
    }

    /// Replace the multi-selection wholesale.
    pub fn set_selected(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.selected = indices.into_iter().collect();
        self.normalize();
        self.publish();
    }

    // ─── Marquee ─────────────────────────────────────────────────────────

    /// Background press: start a candidate rectangle anchored at (x, y).
    pub fn begin_marquee(&mut self, x: i32, y: i32) {
        self.marquee = Some(Marquee {
            anchor: (x, y),
            current: (x, y),
        });
    }

    pub fn update_marquee(&mut self, x: i32, y: i32) {
        if let Some(m) = self.marquee.as_mut() {
            m.current = (x, y);
        }
    }

    pub fn is_marqueeing(&self) -> bool {
        self.marquee.is_some()
    }

    /// The candidate rectangle, once it has grown past the click threshold.
    pub fn marquee_rect(&self, threshold: i32) -> Option<CardRect> {
        self.marquee
            .filter(|m| !within_threshold(m.anchor, m.current, threshold))
            .map(|m| CardRect::from_corners(m.anchor, m.current))
    }

    /// Release: either a click (clear everything) or a replacing marquee.
    pub fn finish_marquee(
        &mut self,
        x: i32,
        y: i32,
        positions: &[Position],
        config: &CanvasConfig,
    ) -> MarqueeOutcome {
        let Some(m) = self.marquee.take() else {
            return MarqueeOutcome::Click;
        };
        if within_threshold(m.anchor, (x, y), config.click_threshold) {
            self.clear();
            return MarqueeOutcome::Click;
        }
        let rect = CardRect::from_corners(m.anchor, (x, y));
        self.selected = hit_test_rect(positions, config, &rect).into_iter().collect();
        self.publish();
        log::debug!("marquee {rect:?} selected {:?}", self.selected);
        MarqueeOutcome::Selected(self.selected.clone())
    }

    /// Drop an in-progress marquee without touching the selection.
    pub fn abandon_marquee(&mut self) {
        self.marquee = None;
    }

    // ─── Renumbering ─────────────────────────────────────────────────────

    /// Entry `removed` left the list: drop it, shift later indices down.
    pub fn on_removed(&mut self, removed: usize) {
        let shift = |i: usize| match i.cmp(&removed) {
            std::cmp::Ordering::Less => Some(i),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(i - 1),
        };
        self.selected = self.selected.iter().filter_map(|&i| shift(i)).collect();
        self.active = self.active.and_then(shift);
        self.publish();
    }

    /// Entry moved from `from` to `to`; every index follows its entry.
    pub fn on_moved(&mut self, from: usize, to: usize) {
        let remap = |i: usize| {
            if i == from {
                to
            } else if from < to && i > from && i <= to {
                i - 1
            } else if to < from && i >= to && i < from {
                i + 1
            } else {
                i
            }
        };
        self.selected = self.selected.iter().map(|&i| remap(i)).collect();
        self.active = self.active.map(remap);
        self.normalize();
        self.publish();
    }

    /// The collection was replaced: drop indices that no longer exist.
    pub fn retain_len(&mut self, len: usize) {
        self.selected.retain(|i| *i < len);
        self.active = self.active.filter(|i| *i < len);
        self.publish();
    }

    fn normalize(&mut self) {
        self.selected.sort_unstable();
        self.selected.dedup();
    }

    fn publish(&self) {
        self.cell.set(&self.selected);
    }
}

/// Per-axis travel check: a click unless one axis moved at least `threshold`.
fn within_threshold(a: (i32, i32), b: (i32, i32), threshold: i32) -> bool {
    (a.0 - b.0).abs() < threshold && (a.1 - b.1).abs() < threshold
}
