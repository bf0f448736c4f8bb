//! Frame composition: positions + interaction state → drawable frame.
//!
//! The frame is a flat, serialisable display list. Painters (the Canvas2D
//! bridge, snapshot tests) consume it without knowing anything about drag
//! sessions or selection bookkeeping.

use crate::zorder::z_order;
use serde::Serialize;
use spread_core::{CardRect, Guide, LiveTransforms, Position};

/// One card as drawn this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprite {
    pub id: String,
    /// Authoritative list index.
    pub index: usize,
    /// Slot number shown on the card (index + 1).
    pub number: usize,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub rotation: u16,
    pub z: u8,
    pub selected: bool,
    pub active: bool,
    pub dragging: bool,
}

/// Everything the painter needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub surface_width: i32,
    pub surface_height: i32,
    pub card_width: i32,
    pub card_height: i32,
    pub grid: i32,
    pub scroll_x: f64,
    pub scroll_y: f64,
    /// Paint order, bottom first.
    pub sprites: Vec<Sprite>,
    pub guides: Vec<Guide>,
    pub marquee: Option<CardRect>,
}

/// Interaction state the frame is composed from.
#[derive(Debug, Clone, Default)]
pub struct FrameInputs<'a> {
    pub selected: &'a [usize],
    pub active: Option<usize>,
    pub dragging: Option<usize>,
    pub guides: &'a [Guide],
    pub marquee: Option<CardRect>,
    pub surface: (i32, i32),
    pub card: (i32, i32),
    pub grid: i32,
    pub scroll: (f64, f64),
}

/// Compose the visible frame. Cards are placed where `live` says they are
/// drawn right now, falling back to their rest positions.
pub fn compose_frame(
    positions: &[Position],
    live: &impl LiveTransforms,
    inputs: &FrameInputs<'_>,
) -> Frame {
    let sprites = z_order(positions)
        .into_iter()
        .map(|entry| {
            let at = live.displayed(entry.card);
            Sprite {
                id: entry.card.id.as_str().to_string(),
                index: entry.index,
                number: entry.index + 1,
                name: entry.card.name.clone(),
                x: at.x,
                y: at.y,
                rotation: entry.card.r.degrees(),
                z: entry.card.z,
                selected: inputs.selected.contains(&entry.index),
                active: inputs.active == Some(entry.index),
                dragging: inputs.dragging == Some(entry.index),
            }
        })
        .collect();

    log::trace!(
        "FRAME {} sprites, {} guides, marquee={:?}",
        positions.len(),
        inputs.guides.len(),
        inputs.marquee
    );

    Frame {
        surface_width: inputs.surface.0,
        surface_height: inputs.surface.1,
        card_width: inputs.card.0,
        card_height: inputs.card.1,
        grid: inputs.grid,
        scroll_x: inputs.scroll.0,
        scroll_y: inputs.scroll.1,
        sprites,
        guides: inputs.guides.to_vec(),
        marquee: inputs.marquee,
    }
}
