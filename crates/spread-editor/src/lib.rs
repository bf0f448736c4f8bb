pub mod canvas;
pub mod coords;
pub mod drag;
pub mod guides;
pub mod input;
pub mod pan;
pub mod selection;
pub mod shortcuts;

pub use canvas::{CanvasEvent, CanvasMode, CanvasState, SpreadCanvas};
pub use coords::CoordinateMapper;
pub use drag::{DragEngine, DragSession};
pub use guides::alignment_guides;
pub use input::InputEvent;
pub use pan::PanController;
pub use selection::{MarqueeOutcome, SelectionCell, SelectionController};
pub use shortcuts::{KeyAction, KeyMap};
