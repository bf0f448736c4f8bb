use serde::Serialize;

/// Orientation of an alignment guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    /// Full-height line at a shared x.
    Vertical,
    /// Full-width line at a shared y.
    Horizontal,
}

/// A transient alignment line shown while a card is dragged alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Guide {
    pub axis: GuideAxis,
    pub position: i32,
}

impl Guide {
    pub const fn vertical(x: i32) -> Self {
        Self {
            axis: GuideAxis::Vertical,
            position: x,
        }
    }

    pub const fn horizontal(y: i32) -> Self {
        Self {
            axis: GuideAxis::Horizontal,
            position: y,
        }
    }
}
