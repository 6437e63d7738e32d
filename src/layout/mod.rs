pub mod drag;
pub mod lanes;
pub mod viewport;

pub use drag::{DragController, DragMode};
pub use lanes::{assign_lanes, lane_rows, Lane};
pub use viewport::{ItemGeometry, Viewport, VisibleRange};
