//! Raw axis samples to movement factors and gesture zones.

use serde::{Deserialize, Serialize};

use crate::config::InputConfig;

/// Highest value an axis can report.
pub const AXIS_MAX: i32 = 127;

/// One of the two continuous controller channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal: 0 = left, 127 = right.
    X,
    /// Vertical: 0 = down, 127 = up.
    Y,
}

/// One reading of a controller channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSample {
    /// Which channel.
    pub axis: Axis,
    /// Raw value, nominally 0..=127.
    pub value: i32,
    /// Arrival time in seconds.
    pub timestamp: f64,
}

impl AxisSample {
    /// Create a sample.
    pub fn new(axis: Axis, value: i32, timestamp: f64) -> Self {
        Self {
            axis,
            value,
            timestamp,
        }
    }
}

/// Gesture classification of a single axis value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureZone {
    /// Clearly above center.
    Upper,
    /// Inside the hysteresis band.
    Neutral,
    /// Clearly below center.
    Lower,
}

/// Converts raw axis values into movement factors and gesture zones.
///
/// Also remembers the latest value of each axis so movement can be
/// recomputed every tick from the current controller position.
#[derive(Debug, Clone)]
pub struct AxisInputMapper {
    center: i32,
    deadzone: i32,
    upper_threshold: i32,
    lower_threshold: i32,
    stale_after: f64,
    x: i32,
    y: i32,
    last_sample: Option<f64>,
}

impl AxisInputMapper {
    /// Create a mapper resting at center.
    pub fn new(config: &InputConfig) -> Self {
        Self {
            center: config.center,
            deadzone: config.deadzone,
            upper_threshold: config.upper_threshold,
            lower_threshold: config.lower_threshold,
            stale_after: config.stale_after,
            x: config.center,
            y: config.center,
            last_sample: None,
        }
    }

    /// Clamp a raw value into the valid axis range.
    pub fn clamp_value(value: i32) -> i32 {
        value.clamp(0, AXIS_MAX)
    }

    /// Signed movement factor for a value: `(v - C) / C` outside the deadzone, else 0.
    pub fn factor(&self, value: i32) -> f32 {
        let offset = Self::clamp_value(value) - self.center;
        if offset.abs() > self.deadzone {
            offset as f32 / self.center as f32
        } else {
            0.0
        }
    }

    /// Classify a value into a gesture zone.
    pub fn classify(&self, value: i32) -> GestureZone {
        let v = Self::clamp_value(value);
        if v > self.upper_threshold {
            GestureZone::Upper
        } else if v < self.lower_threshold {
            GestureZone::Lower
        } else {
            GestureZone::Neutral
        }
    }

    /// Record a sample as the current controller position.
    pub fn apply(&mut self, sample: &AxisSample) {
        let value = Self::clamp_value(sample.value);
        match sample.axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
        self.last_sample = Some(sample.timestamp);
    }

    /// True if a sample arrived within the staleness window.
    pub fn is_fresh(&self, now: f64) -> bool {
        self.last_sample
            .is_some_and(|t| now - t < self.stale_after)
    }

    /// Movement intent `(dx, dy)` in screen orientation (y grows downward).
    ///
    /// Zero when the controller has gone quiet.
    pub fn movement(&self, now: f64) -> (f32, f32) {
        if !self.is_fresh(now) {
            return (0.0, 0.0);
        }
        (self.factor(self.x), -self.factor(self.y))
    }

    /// Latest `(x, y)` axis values.
    pub fn values(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// The point in a `width` x `height` area the axes address as a touch pad.
    pub fn absolute_target(&self, width: f32, height: f32) -> (f32, f32) {
        let max = AXIS_MAX as f32;
        (
            self.x as f32 / max * width,
            (1.0 - self.y as f32 / max) * height,
        )
    }

    /// Return to center with no recorded samples.
    pub fn reset(&mut self) {
        self.x = self.center;
        self.y = self.center;
        self.last_sample = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mapper() -> AxisInputMapper {
        AxisInputMapper::new(&InputConfig::default())
    }

    #[test]
    fn factor_deadzone() {
        let m = mapper();
        assert_eq!(m.factor(64), 0.0);
        assert_eq!(m.factor(74), 0.0);
        assert_eq!(m.factor(54), 0.0);
        assert!((m.factor(75) - 11.0 / 64.0).abs() < 1e-6);
        assert!((m.factor(0) + 1.0).abs() < 1e-6);
        assert!((m.factor(127) - 63.0 / 64.0).abs() < 1e-6);
    }

    #[test]
    fn factor_clamps_malformed_values() {
        let m = mapper();
        assert_eq!(m.factor(500), m.factor(127));
        assert_eq!(m.factor(-20), m.factor(0));
    }

    #[test]
    fn classify_boundaries() {
        let m = mapper();
        assert_eq!(m.classify(76), GestureZone::Upper);
        assert_eq!(m.classify(75), GestureZone::Neutral);
        assert_eq!(m.classify(53), GestureZone::Neutral);
        assert_eq!(m.classify(52), GestureZone::Lower);
        assert_eq!(m.classify(200), GestureZone::Upper);
        assert_eq!(m.classify(-1), GestureZone::Lower);
    }

    #[test]
    fn movement_inverts_y() {
        let mut m = mapper();
        m.apply(&AxisSample::new(Axis::X, 127, 0.0));
        m.apply(&AxisSample::new(Axis::Y, 127, 0.0));
        let (dx, dy) = m.movement(0.05);
        assert!(dx > 0.9);
        assert!(dy < -0.9);
    }

    #[test]
    fn movement_stops_when_stale() {
        let mut m = mapper();
        m.apply(&AxisSample::new(Axis::X, 127, 1.0));
        assert!(m.movement(1.05).0 > 0.0);
        assert_eq!(m.movement(1.2), (0.0, 0.0));
        assert_eq!(mapper().movement(0.0), (0.0, 0.0));
    }

    #[test]
    fn absolute_target_maps_touch_pad() {
        let mut m = mapper();
        m.apply(&AxisSample::new(Axis::X, 0, 0.0));
        m.apply(&AxisSample::new(Axis::Y, 127, 0.0));
        assert_eq!(m.absolute_target(1024.0, 768.0), (0.0, 0.0));
        m.apply(&AxisSample::new(Axis::X, 127, 0.0));
        m.apply(&AxisSample::new(Axis::Y, 0, 0.0));
        assert_eq!(m.absolute_target(1024.0, 768.0), (1024.0, 768.0));
    }

    #[test]
    fn reset_returns_to_center() {
        let mut m = mapper();
        m.apply(&AxisSample::new(Axis::X, 0, 0.0));
        m.reset();
        assert_eq!(m.values(), (64, 64));
        assert!(!m.is_fresh(0.0));
    }

    proptest! {
        #[test]
        fn classify_partitions_axis_range(v in 0i32..=127) {
            let zone = mapper().classify(v);
            prop_assert_eq!(zone == GestureZone::Upper, v > 75);
            prop_assert_eq!(zone == GestureZone::Lower, v < 53);
            prop_assert_eq!(zone == GestureZone::Neutral, (53..=75).contains(&v));
        }

        #[test]
        fn factor_is_bounded(v in any::<i32>()) {
            let f = mapper().factor(v);
            prop_assert!((-1.0..=1.0).contains(&f));
        }
    }
}
