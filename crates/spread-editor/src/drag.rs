//! Drag lifecycle for single cards and multi-selection groups.
//!
//! ## Performance Notes
//!
//! `move_to` runs on every pointer move. It only rewrites the dragged card's
//! live position and, for group drags, the sibling entries of the override
//! map. Authoritative coordinates are written once, in `end`.
//!
//! Sibling positions are always derived from their drag-start origin plus
//! the total delta, so per-frame snapping never accumulates drift.

use crate::selection::SelectionCell;
use spread_core::{CanvasConfig, GridPoint, LiveOverrides, LiveTransforms, PositionId, PositionStore};
use std::collections::BTreeMap;

/// Origin of a sibling captured at drag start.
#[derive(Debug, Clone, Copy)]
struct SiblingOrigin {
    id: PositionId,
    origin: GridPoint,
}

/// State of one in-flight drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub index: usize,
    pub id: PositionId,
    /// Authoritative rest position at drag start.
    pub origin: GridPoint,
    /// Latest live position of the dragged card.
    pub live: GridPoint,
    siblings: BTreeMap<usize, SiblingOrigin>,
}

impl DragSession {
    pub fn is_group(&self) -> bool {
        !self.siblings.is_empty()
    }

    /// Total displacement of the dragged card so far.
    pub fn delta(&self) -> (i32, i32) {
        self.live.delta_from(self.origin)
    }
}

pub struct DragEngine {
    config: CanvasConfig,
    session: Option<DragSession>,
    overrides: LiveOverrides,
}

impl DragEngine {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            session: None,
            overrides: LiveOverrides::new(),
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged(&self) -> Option<(usize, GridPoint)> {
        self.session.as_ref().map(|s| (s.index, s.live))
    }

    /// Visual overrides for group siblings.
    pub fn overrides(&self) -> &LiveOverrides {
        &self.overrides
    }

    /// Begin dragging `index`. Reads rest positions from the store, never
    /// from anything currently drawn. Returns `false` for a stale index.
    pub fn start(&mut self, index: usize, store: &impl PositionStore, selection: &SelectionCell) -> bool {
        if self.session.is_some() {
            log::warn!("drag start on {index} while a drag was active; discarding it");
            self.clear();
        }
        let Some(pos) = store.get(index) else {
            log::warn!("drag start: stale index {index}");
            return false;
        };

        let mut siblings = BTreeMap::new();
        let selected = selection.get();
        if selected.len() > 1 && selected.contains(&index) {
            for &other in selected.iter().filter(|&&i| i != index) {
                if let Some(p) = store.get(other) {
                    siblings.insert(
                        other,
                        SiblingOrigin {
                            id: p.id,
                            origin: p.origin(),
                        },
                    );
                }
            }
        }

        log::debug!(
            "drag start {} at ({}, {}), {} sibling(s)",
            pos.id,
            pos.x,
            pos.y,
            siblings.len()
        );
        self.session = Some(DragSession {
            index,
            id: pos.id,
            origin: pos.origin(),
            live: pos.origin(),
            siblings,
        });
        true
    }

    /// Update the dragged card's live position and re-derive sibling
    /// overrides. Authoritative state is not touched.
    pub fn move_to(&mut self, index: usize, live_x: i32, live_y: i32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.index != index {
            log::warn!("drag move for {index} but {} is being dragged", session.index);
            return;
        }
        session.live = GridPoint::new(live_x, live_y);
        if session.siblings.is_empty() {
            return;
        }
        let (dx, dy) = session.delta();
        for sibling in session.siblings.values() {
            let target = sibling.origin.offset(dx, dy);
            let at = self.config.place(target.x, target.y);
            self.overrides.set(sibling.id, at);
        }
        log::trace!("drag move {index} delta ({dx}, {dy})");
    }

    /// Finish the drag: commit every sibling's final position as one batch.
    ///
    /// The dragged card itself is committed by the caller through
    /// `PositionStore::set_xy`. State is cleared whatever happens. Returns
    /// the committed sibling batch.
    pub fn end(&mut self, index: usize, store: &mut impl PositionStore) -> Vec<(usize, GridPoint)> {
        let Some(session) = self.session.take() else {
            self.clear();
            return Vec::new();
        };
        if session.index != index {
            log::warn!("drag end for {index} but {} was dragged; dropping", session.index);
            self.clear();
            return Vec::new();
        }

        let (dx, dy) = session.delta();
        let batch: Vec<(usize, GridPoint)> = session
            .siblings
            .iter()
            .map(|(&i, s)| {
                let target = s.origin.offset(dx, dy);
                (i, self.config.place(target.x, target.y))
            })
            .collect();
        if !batch.is_empty() {
            store.commit_batch(&batch);
        }
        log::debug!("drag end {} delta ({dx}, {dy}), {} sibling(s) committed", session.id, batch.len());
        self.clear();
        batch
    }

    /// Drop the session without committing anything.
    pub fn cancel(&mut self) {
        if let Some(session) = &self.session {
            log::debug!("drag on {} cancelled", session.id);
        }
        self.clear();
    }

    fn clear(&mut self) {
        self.session = None;
        self.overrides.clear();
    }
}

impl LiveTransforms for DragEngine {
    fn live_position(&self, id: PositionId) -> Option<GridPoint> {
        match &self.session {
            Some(s) if s.id == id => Some(s.live),
            _ => self.overrides.get(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionController;
    use pretty_assertions::assert_eq;
    use spread_core::{Position, SpreadLayout};

    fn layout(points: &[(i32, i32)]) -> SpreadLayout {
        let positions = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Position::new(PositionId::fresh(), format!("P{i}"), x, y))
            .collect();
        SpreadLayout::from_positions(positions, CanvasConfig::default())
    }

    fn origins(layout: &SpreadLayout) -> Vec<GridPoint> {
        layout.positions().iter().map(Position::origin).collect()
    }

    #[test]
    fn solo_drag_touches_nothing_but_the_session() {
        let mut store = layout(&[(0, 0), (300, 300)]);
        let sel = SelectionController::new();
        let mut drag = DragEngine::new(CanvasConfig::default());

        assert!(drag.start(0, &store, &sel.cell()));
        drag.move_to(0, 45, 60);
        assert!(drag.overrides().is_empty());
        assert_eq!(drag.live_position(store.positions()[0].id), Some(GridPoint::new(45, 60)));

        let batch = drag.end(0, &mut store);
        assert!(batch.is_empty());
        assert!(!drag.is_active());
        // The engine never commits the dragged card itself.
        assert_eq!(origins(&store)[0], GridPoint::new(0, 0));
        assert!(!store.is_dirty());
    }

    #[test]
    fn group_siblings_follow_the_same_delta() {
        let mut store = layout(&[(0, 0), (150, 150), (300, 30)]);
        let mut sel = SelectionController::new();
        sel.set_selected([0, 1, 2]);
        let mut drag = DragEngine::new(CanvasConfig::default());

        drag.start(0, &store, &sel.cell());
        // Pre-snap delta of (30, -15).
        drag.move_to(0, 30, -15);
        let ids: Vec<PositionId> = store.positions().iter().map(|p| p.id).collect();
        assert_eq!(drag.overrides().get(ids[1]), Some(GridPoint::new(180, 135)));
        assert_eq!(drag.overrides().get(ids[2]), Some(GridPoint::new(330, 15)));
        // Mid-drag the authoritative list is untouched.
        assert_eq!(origins(&store)[1], GridPoint::new(150, 150));

        let batch = drag.end(0, &mut store);
        assert_eq!(
            batch,
            vec![(1, GridPoint::new(180, 135)), (2, GridPoint::new(330, 15))]
        );
        assert_eq!(origins(&store)[1..], [GridPoint::new(180, 135), GridPoint::new(330, 15)]);
        assert!(store.is_dirty());
        assert!(drag.overrides().is_empty());
    }

    #[test]
    fn siblings_snap_and_clamp_independently() {
        let mut store = layout(&[(600, 600), (7, 1340), (1400, 600)]);
        let mut sel = SelectionController::new();
        sel.set_selected([0, 1, 2]);
        let mut drag = DragEngine::new(CanvasConfig::default());

        drag.start(0, &store, &sel.cell());
        drag.move_to(0, 630, 630);
        let batch = drag.end(0, &mut store);
        // (7 + 30) = 37 → 30; (1340 + 30) = 1370 → 1365 → 1350
        // (1400 + 30) = 1430 → 1425 → 1410
        assert_eq!(
            batch,
            vec![(1, GridPoint::new(30, 1350)), (2, GridPoint::new(1410, 630))]
        );
    }

    #[test]
    fn commit_uses_total_delta_not_accumulated_steps() {
        let mut store = layout(&[(0, 0), (7, 7)]);
        let mut sel = SelectionController::new();
        sel.set_selected([0, 1]);
        let mut drag = DragEngine::new(CanvasConfig::default());

        drag.start(0, &store, &sel.cell());
        // Many small frames; each frame's snapped sibling position is
        // derived from the origin, so the result depends only on the last.
        for step in 1..=20 {
            drag.move_to(0, step, step);
        }
        let batch = drag.end(0, &mut store);
        // 7 + 20 = 27 → 30
        assert_eq!(batch, vec![(1, GridPoint::new(30, 30))]);
    }

    #[test]
    fn dragging_a_card_outside_the_selection_is_solo() {
        let store = layout(&[(0, 0), (150, 0), (300, 0)]);
        let mut sel = SelectionController::new();
        sel.set_selected([1, 2]);
        let mut drag = DragEngine::new(CanvasConfig::default());
        drag.start(0, &store, &sel.cell());
        assert!(!drag.session().unwrap().is_group());
    }

    #[test]
    fn mismatched_end_clears_without_commit() {
        let mut store = layout(&[(0, 0), (150, 0)]);
        let mut sel = SelectionController::new();
        sel.set_selected([0, 1]);
        let mut drag = DragEngine::new(CanvasConfig::default());
        drag.start(0, &store, &sel.cell());
        drag.move_to(0, 60, 0);
        assert!(drag.end(1, &mut store).is_empty());
        assert!(!drag.is_active());
        assert!(drag.overrides().is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn cancel_discards_overrides() {
        let store = layout(&[(0, 0), (150, 0)]);
        let mut sel = SelectionController::new();
        sel.set_selected([0, 1]);
        let mut drag = DragEngine::new(CanvasConfig::default());
        drag.start(0, &store, &sel.cell());
        drag.move_to(0, 60, 0);
        assert_eq!(drag.overrides().len(), 1);
        drag.cancel();
        assert!(drag.overrides().is_empty());
        assert!(drag.dragged().is_none());
    }

    #[test]
    fn start_on_stale_index_fails() {
        let store = layout(&[(0, 0)]);
        let mut drag = DragEngine::new(CanvasConfig::default());
        assert!(!drag.start(3, &store, &SelectionCell::default()));
        assert!(!drag.is_active());
    }
}
