//! Analog controller input: raw samples, gesture classification, and the
//! per-tick event queue.

pub mod axis;
pub mod gesture;
pub mod queue;

pub use axis::{AXIS_MAX, Axis, AxisInputMapper, AxisSample, GestureZone};
pub use gesture::{Gesture, SelectionGesture};
pub use queue::{InputEvent, InputQueue};
