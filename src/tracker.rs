mod control_state;
mod controller;
mod geometry;
mod rect;
mod selector;

pub use control_state::ControlState;
pub use controller::{
    ControlConfig, Decision, MIN_ROTATE_STEP, TrackingController, decide, direction_for,
    proportional_step,
};
pub use geometry::FrameGeometry;
pub use rect::BoundingBox;
pub use selector::{Target, select_target};
