pub mod frame;
pub mod hit;
pub mod zorder;

pub use frame::{Frame, FrameInputs, Sprite, compose_frame};
pub use hit::{hit_test, hit_test_rect};
pub use zorder::{ZOrdered, z_order};
