pub mod config;
pub mod grid;
pub mod guide;
pub mod id;
pub mod lint;
pub mod model;
pub mod overrides;

pub use config::CanvasConfig;
pub use grid::{GridPoint, clamp_axis, snap_to_grid};
pub use guide::{Guide, GuideAxis};
pub use id::PositionId;
pub use lint::{LayoutDiagnostic, LintSeverity, lint_layout};
pub use model::*;
pub use overrides::{LiveOverrides, LiveTransforms};
