//! Visual-only position overrides consulted by the render layer.
//!
//! While a group drag is in flight the siblings of the dragged card move on
//! screen without their authoritative coordinates changing. The drag engine
//! writes their live positions here, keyed by stable id, and the frame
//! composer reads them back each frame. Nothing in this map is ever written
//! into the position collection directly.

use crate::grid::GridPoint;
use crate::id::PositionId;
use crate::model::Position;
use std::collections::HashMap;

/// Anything that can answer "where is this card drawn right now?".
pub trait LiveTransforms {
    /// Live top-left for `id`, or `None` to draw it at its rest position.
    fn live_position(&self, id: PositionId) -> Option<GridPoint>;

    /// Position to draw `pos` at this frame.
    fn displayed(&self, pos: &Position) -> GridPoint {
        self.live_position(pos.id).unwrap_or(pos.origin())
    }
}

/// Map from stable id to live top-left override.
#[derive(Debug, Clone, Default)]
pub struct LiveOverrides {
    entries: HashMap<PositionId, GridPoint>,
}

impl LiveOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: PositionId, at: GridPoint) {
        self.entries.insert(id, at);
    }

    pub fn get(&self, id: PositionId) -> Option<GridPoint> {
        self.entries.get(&id).copied()
    }

    pub fn remove(&mut self, id: PositionId) {
        self.entries.remove(&id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LiveTransforms for LiveOverrides {
    fn live_position(&self, id: PositionId) -> Option<GridPoint> {
        self.get(id)
    }
}
