//! Keyboard and mouse emulation of the analog controller.
//!
//! Arrow keys or WASD drive the two axes to their extremes. While any
//! direction is held, both axes are sampled every frame like a real
//! controller stream; the frame a key is let go sends one centered sample
//! and then the stream goes silent, so the engine sees a pause.

use macroquad::prelude::*;
use tm_engine::{AXIS_MAX, Axis, AxisSample, InputEvent};

/// Centered axis reading.
const CENTER: i32 = 64;

/// Axis value for a pair of opposing keys.
pub fn axis_value(negative: bool, positive: bool) -> i32 {
    match (negative, positive) {
        (true, false) => 0,
        (false, true) => AXIS_MAX,
        _ => CENTER,
    }
}

/// Directions held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Held {
    /// Left or A.
    pub left: bool,
    /// Right or D.
    pub right: bool,
    /// Up or W.
    pub up: bool,
    /// Down or S.
    pub down: bool,
}

impl Held {
    /// Read the direction keys.
    pub fn read() -> Self {
        Self {
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
        }
    }

    /// Whether any direction is held.
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Axis readings; up is the high end of Y.
    pub fn values(&self) -> (i32, i32) {
        (
            axis_value(self.left, self.right),
            axis_value(self.down, self.up),
        )
    }
}

/// Turns held keys into the axis sample stream.
#[derive(Debug, Default)]
pub struct KeyboardController {
    streaming: bool,
}

impl KeyboardController {
    /// A controller at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples to send for this frame.
    pub fn samples(&mut self, held: Held, now: f64) -> Vec<InputEvent> {
        if !held.any() && !self.streaming {
            return Vec::new();
        }
        self.streaming = held.any();
        let (x, y) = held.values();
        vec![
            InputEvent::Axis(AxisSample::new(Axis::X, x, now)),
            InputEvent::Axis(AxisSample::new(Axis::Y, y, now)),
        ]
    }

    /// Stop streaming without a trailing sample.
    pub fn reset(&mut self) {
        self.streaming = false;
    }
}

/// Mouse events for this frame, in map coordinates.
pub fn mouse_events(canvas: (f32, f32), last: &mut Option<(f32, f32)>) -> Vec<InputEvent> {
    let (x, y) = crate::theme::mouse_canvas_position(canvas.0, canvas.1);
    let mut events = Vec::new();
    if *last != Some((x, y)) {
        *last = Some((x, y));
        events.push(InputEvent::PointerMove { x, y });
    }
    if is_mouse_button_pressed(MouseButton::Left) {
        events.push(InputEvent::PointerClick { x, y });
    }
    events
}

/// A full-strength controller click when Space is pressed.
pub fn controller_click(now: f64) -> Option<InputEvent> {
    is_key_pressed(KeyCode::Space).then_some(InputEvent::ControllerClick {
        value: AXIS_MAX,
        timestamp: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn y_value(event: &InputEvent) -> Option<i32> {
        match event {
            InputEvent::Axis(s) if s.axis == Axis::Y => Some(s.value),
            _ => None,
        }
    }

    #[test]
    fn opposing_keys_cancel() {
        assert_eq!(axis_value(true, true), CENTER);
        assert_eq!(axis_value(false, false), CENTER);
        assert_eq!(axis_value(true, false), 0);
        assert_eq!(axis_value(false, true), AXIS_MAX);
    }

    #[test]
    fn up_is_high_y() {
        let held = Held {
            up: true,
            ..Held::default()
        };
        assert_eq!(held.values(), (CENTER, AXIS_MAX));
    }

    #[test]
    fn silent_at_rest() {
        let mut pad = KeyboardController::new();
        assert!(pad.samples(Held::default(), 0.0).is_empty());
    }

    #[test]
    fn release_sends_one_centered_sample() {
        let mut pad = KeyboardController::new();
        let up = Held {
            up: true,
            ..Held::default()
        };
        let held = pad.samples(up, 0.0);
        assert_eq!(held.iter().find_map(y_value), Some(AXIS_MAX));

        let released = pad.samples(Held::default(), 0.016);
        assert_eq!(released.iter().find_map(y_value), Some(CENTER));

        assert!(pad.samples(Held::default(), 0.033).is_empty());
    }
}
