//! Position model for spread templates.
//!
//! A spread is an ordered list of card positions laid out on a fixed-size
//! working area. Each position carries a stable id, a grid-aligned top-left,
//! a rotation and a render layer (`z`). List order and `z` are independent:
//! list order numbers the slots, `z` decides which card is drawn on top.
//!
//! The canvas never owns this list. It reads it through [`PositionStore`]
//! and writes back x/y only when a drag gesture ends.

use crate::config::{CanvasConfig, MAX_Z};
use crate::grid::GridPoint;
use crate::id::PositionId;
use serde::{Deserialize, Serialize};

// ─── Rotation ────────────────────────────────────────────────────────────

/// Card rotation in degrees: one of 0, 45, ..., 315.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rotation(u16);

impl Rotation {
    pub const STEP: u16 = 45;

    /// Normalise `degrees` into `[0, 360)`; `None` unless it is a 45° multiple.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        let normalized = degrees.rem_euclid(360);
        (normalized % Self::STEP as i32 == 0).then_some(Self(normalized as u16))
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    pub fn rotate_cw(self) -> Self {
        Self((self.0 + Self::STEP) % 360)
    }

    pub fn rotate_ccw(self) -> Self {
        Self((self.0 + 360 - Self::STEP) % 360)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = String;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
            .ok_or_else(|| format!("rotation must be a multiple of 45 degrees, got {degrees}"))
    }
}

impl From<Rotation> for i32 {
    fn from(r: Rotation) -> Self {
        r.0 as i32
    }
}

// ─── Position ────────────────────────────────────────────────────────────

/// One card slot in a spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default = "PositionId::fresh")]
    pub id: PositionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_reverse: Option<bool>,
    /// Top-left, canvas units.
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub r: Rotation,
    /// Render layer, 0–100. Ties keep list order.
    #[serde(default)]
    pub z: u8,
}

impl Position {
    pub fn new(id: PositionId, name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            allow_reverse: None,
            x,
            y,
            r: Rotation::default(),
            z: 0,
        }
    }

    /// Builder-style layer assignment, clamped to 0–100.
    pub fn with_z(mut self, z: u8) -> Self {
        self.z = z.min(MAX_Z);
        self
    }

    pub fn origin(&self) -> GridPoint {
        GridPoint::new(self.x, self.y)
    }

    /// Footprint of this card at its rest position.
    pub fn rect(&self, config: &CanvasConfig) -> CardRect {
        CardRect::at(self.origin(), config)
    }
}

// ─── Rectangles ──────────────────────────────────────────────────────────

/// Axis-aligned rectangle in canvas units, edges as coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CardRect {
    /// Card footprint with its top-left at `origin`.
    pub fn at(origin: GridPoint, config: &CanvasConfig) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + config.card_width,
            bottom: origin.y + config.card_height,
        }
    }

    /// Normalised rectangle spanning two corners in any order.
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            left: a.0.min(b.0),
            top: a.1.min(b.1),
            right: a.0.max(b.0),
            bottom: a.1.max(b.1),
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Point containment; left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.left && px < self.right && py >= self.top && py < self.bottom
    }

    /// Strict AABB overlap. Rectangles that merely touch do not overlap.
    pub fn overlaps(&self, other: &CardRect) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }
}

// ─── Store seam ──────────────────────────────────────────────────────────

/// The externally owned position collection, as seen by the canvas.
///
/// The canvas reads the whole list every frame and writes back only x/y,
/// only at the end of a drag.
pub trait PositionStore {
    /// All positions in list order.
    fn positions(&self) -> &[Position];

    /// Commit a single card's final coordinates (the dragged card's own handle).
    fn set_xy(&mut self, index: usize, x: i32, y: i32);

    /// Commit several cards at once (group-drag siblings).
    fn commit_batch(&mut self, batch: &[(usize, GridPoint)]) {
        for &(index, at) in batch {
            self.set_xy(index, at.x, at.y);
        }
    }

    fn len(&self) -> usize {
        self.positions().len()
    }

    fn is_empty(&self) -> bool {
        self.positions().is_empty()
    }

    fn get(&self, index: usize) -> Option<&Position> {
        self.positions().get(index)
    }
}

// ─── SpreadLayout ────────────────────────────────────────────────────────

/// Ordered position collection with the editing operations of the template
/// form: add, remove, reorder, field edits and x/y commits.
///
/// Preconditions such as the 78-card ceiling and "never remove the last card"
/// are left to the caller (see [`SpreadLayout::can_add`] and
/// [`SpreadLayout::can_remove`]).
#[derive(Debug, Clone, Default)]
pub struct SpreadLayout {
    positions: Vec<Position>,
    config: CanvasConfig,
    /// Set when coordinates or fields change; cleared by the save layer.
    dirty: bool,
}

impl SpreadLayout {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            positions: Vec::new(),
            config,
            dirty: false,
        }
    }

    pub fn from_positions(positions: Vec<Position>, config: CanvasConfig) -> Self {
        Self {
            positions,
            config,
            dirty: false,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }

    pub fn index_of(&self, id: PositionId) -> Option<usize> {
        self.positions.iter().position(|p| p.id == id)
    }

    pub fn get_by_id(&self, id: PositionId) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    pub fn can_add(&self) -> bool {
        self.positions.len() < self.config.max_positions
    }

    pub fn can_remove(&self) -> bool {
        self.positions.len() > 1
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and reset the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // ─── Add ─────────────────────────────────────────────────────────────

    /// Append a card at the first unoccupied default grid slot.
    ///
    /// Slots run left to right, top to bottom, one card footprint plus one
    /// grid step apart. Returns the new index.
    pub fn add_default(&mut self) -> usize {
        let at = self.next_default_slot();
        self.push_new(at)
    }

    /// Append a card centred on a canvas point (click-to-place), snapped and
    /// clamped like a drag. Returns the new index.
    pub fn add_at(&mut self, x: i32, y: i32) -> usize {
        let at = self.config.place(
            x.saturating_sub(self.config.card_width / 2),
            y.saturating_sub(self.config.card_height / 2),
        );
        self.push_new(at)
    }

    fn push_new(&mut self, at: GridPoint) -> usize {
        let index = self.positions.len();
        let pos = Position::new(PositionId::fresh(), format!("Position {}", index + 1), at.x, at.y);
        log::debug!("add {} at ({}, {}) as index {index}", pos.id, at.x, at.y);
        self.positions.push(pos);
        self.dirty = true;
        index
    }

    fn default_slot(&self, slot: usize) -> GridPoint {
        let step_x = (self.config.card_width + self.config.grid).max(1);
        let step_y = (self.config.card_height + self.config.grid).max(1);
        let columns = (self.config.max_x() / step_x + 1).max(1) as usize;
        let col = (slot % columns) as i32;
        let row = (slot / columns) as i32;
        self.config.place(col * step_x, row * step_y)
    }

    fn next_default_slot(&self) -> GridPoint {
        let rows = (self.config.max_y() / (self.config.card_height + self.config.grid).max(1) + 1)
            .max(1) as usize;
        let columns = (self.config.max_x() / (self.config.card_width + self.config.grid).max(1) + 1)
            .max(1) as usize;
        let total = rows * columns;
        (0..total)
            .map(|slot| self.default_slot(slot))
            .find(|at| !self.positions.iter().any(|p| p.origin() == *at))
            .unwrap_or_else(|| self.default_slot(self.positions.len() % total))
    }

    // ─── Remove / reorder ────────────────────────────────────────────────

    /// Remove by list index; later entries shift down. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<Position> {
        if index >= self.positions.len() {
            log::warn!("remove: index {index} out of range ({})", self.positions.len());
            return None;
        }
        self.dirty = true;
        Some(self.positions.remove(index))
    }

    /// Move the entry at `from` so it ends up at `to`. `z` is not touched.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        let len = self.positions.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let entry = self.positions.remove(from);
            self.positions.insert(to, entry);
            self.dirty = true;
        }
        true
    }

    // ─── Field edits ─────────────────────────────────────────────────────

    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> bool {
        self.edit(index, |p| p.name = name.into())
    }

    pub fn set_description(&mut self, index: usize, description: Option<String>) -> bool {
        self.edit(index, |p| p.description = description)
    }

    pub fn set_allow_reverse(&mut self, index: usize, allow: Option<bool>) -> bool {
        self.edit(index, |p| p.allow_reverse = allow)
    }

    pub fn set_rotation(&mut self, index: usize, r: Rotation) -> bool {
        self.edit(index, |p| p.r = r)
    }

    /// Set the render layer, clamped to 0–100.
    pub fn set_z(&mut self, index: usize, z: u8) -> bool {
        self.edit(index, |p| p.z = z.min(MAX_Z))
    }

    fn edit(&mut self, index: usize, f: impl FnOnce(&mut Position)) -> bool {
        match self.positions.get_mut(index) {
            Some(pos) => {
                f(pos);
                self.dirty = true;
                true
            }
            None => false,
        }
    }
}

impl PositionStore for SpreadLayout {
    fn positions(&self) -> &[Position] {
        &self.positions
    }

    fn set_xy(&mut self, index: usize, x: i32, y: i32) {
        match self.positions.get_mut(index) {
            Some(pos) if pos.x != x || pos.y != y => {
                pos.x = x;
                pos.y = y;
                self.dirty = true;
            }
            Some(_) => {}
            None => log::warn!("set_xy: stale index {index}"),
        }
    }

    fn commit_batch(&mut self, batch: &[(usize, GridPoint)]) {
        for &(index, at) in batch {
            self.set_xy(index, at.x, at.y);
        }
        log::debug!("committed {} sibling position(s)", batch.len());
    }
}
