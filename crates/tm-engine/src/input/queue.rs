//! Pending input events, drained once per tick.

use std::collections::VecDeque;
use std::collections::vec_deque::Drain;

use serde::{Deserialize, Serialize};

use super::axis::AxisSample;

/// Everything the presentation layer can feed into a game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// A reading of one analog axis.
    Axis(AxisSample),
    /// A reading of the discrete click channel.
    ControllerClick {
        /// Raw channel value; counts as a click above the configured threshold.
        value: i32,
        /// Arrival time in seconds.
        timestamp: f64,
    },
    /// A pointer click in world coordinates.
    PointerClick {
        /// Pointer x.
        x: f32,
        /// Pointer y.
        y: f32,
    },
    /// The pointer moved, in world coordinates.
    PointerMove {
        /// Pointer x.
        x: f32,
        /// Pointer y.
        y: f32,
    },
}

/// FIFO of events that arrived since the last tick.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Extend<InputEvent> for InputQueue {
    fn extend<T: IntoIterator<Item = InputEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Axis;

    #[test]
    fn drain_preserves_arrival_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Axis(AxisSample::new(Axis::X, 1, 0.0)));
        queue.push(InputEvent::PointerMove { x: 1.0, y: 2.0 });
        queue.push(InputEvent::Axis(AxisSample::new(Axis::Y, 2, 0.1)));

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained.len(), 3);
        assert!(matches!(drained[1], InputEvent::PointerMove { .. }));
        assert!(queue.is_empty());
    }

    #[test]
    fn events_deserialize_from_json() {
        let event: InputEvent =
            serde_json::from_str(r#"{"axis": {"axis": "y", "value": 90, "timestamp": 0.5}}"#)
                .unwrap();
        assert_eq!(event, InputEvent::Axis(AxisSample::new(Axis::Y, 90, 0.5)));
    }
}
