//! Debouncing classified samples into discrete taps.

use serde::Serialize;

use super::axis::GestureZone;
use crate::config::InputConfig;

/// A discrete, debounced selection tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    /// Tap on the upper half.
    Upper,
    /// Tap on the lower half.
    Lower,
}

impl Gesture {
    /// The visible-choice index this tap addresses.
    ///
    /// Upper addresses the first choice, lower the second (or the only one).
    pub fn target_index(self, visible_len: usize) -> usize {
        match self {
            Gesture::Upper => 0,
            Gesture::Lower => 1.min(visible_len.saturating_sub(1)),
        }
    }
}

/// Turns a stream of gesture zones into taps, honoring a tap cooldown and
/// tracking axis activity for the pause reset.
#[derive(Debug, Clone)]
pub struct SelectionGesture {
    tap_cooldown: f64,
    pause_reset: f64,
    last_accepted: Option<f64>,
    last_activity: Option<f64>,
}

impl SelectionGesture {
    /// Create a debouncer with the configured timers.
    pub fn new(config: &InputConfig) -> Self {
        Self {
            tap_cooldown: config.tap_cooldown,
            pause_reset: config.pause_reset,
            last_accepted: None,
            last_activity: None,
        }
    }

    /// Feed one classified sample. Returns a tap if one is accepted.
    ///
    /// Every sample counts as activity; neutral samples and samples inside
    /// the cooldown window never produce a tap.
    pub fn observe(&mut self, zone: GestureZone, now: f64) -> Option<Gesture> {
        self.touch(now);
        let gesture = match zone {
            GestureZone::Upper => Gesture::Upper,
            GestureZone::Lower => Gesture::Lower,
            GestureZone::Neutral => return None,
        };
        if self.in_cooldown(now) {
            return None;
        }
        self.last_accepted = Some(now);
        Some(gesture)
    }

    /// Record axis activity without classifying it.
    pub fn touch(&mut self, now: f64) {
        self.last_activity = Some(now);
    }

    /// True while taps are still being suppressed after the last accepted one.
    pub fn in_cooldown(&self, now: f64) -> bool {
        self.last_accepted
            .is_some_and(|t| now - t < self.tap_cooldown)
    }

    /// True once the axis has been silent for the pause-reset interval.
    pub fn is_paused(&self, now: f64) -> bool {
        self.last_activity
            .is_some_and(|t| now - t >= self.pause_reset)
    }

    /// Start a fresh cooldown window, as if a tap had just been accepted.
    pub fn arm(&mut self, now: f64) {
        self.last_accepted = Some(now);
    }

    /// Forget all timing history.
    pub fn reset(&mut self) {
        self.last_accepted = None;
        self.last_activity = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture() -> SelectionGesture {
        SelectionGesture::new(&InputConfig::default())
    }

    #[test]
    fn neutral_never_taps() {
        let mut g = gesture();
        assert_eq!(g.observe(GestureZone::Neutral, 0.0), None);
        assert!(!g.in_cooldown(0.0));
    }

    #[test]
    fn cooldown_suppresses_taps() {
        let mut g = gesture();
        assert_eq!(g.observe(GestureZone::Upper, 0.0), Some(Gesture::Upper));
        assert_eq!(g.observe(GestureZone::Upper, 0.1), None);
        assert_eq!(g.observe(GestureZone::Lower, 0.29), None);
        assert_eq!(g.observe(GestureZone::Lower, 0.3), Some(Gesture::Lower));
    }

    #[test]
    fn suppressed_samples_do_not_extend_cooldown() {
        let mut g = gesture();
        g.observe(GestureZone::Upper, 0.0);
        g.observe(GestureZone::Upper, 0.2);
        assert_eq!(g.observe(GestureZone::Upper, 0.31), Some(Gesture::Upper));
    }

    #[test]
    fn pause_detection() {
        let mut g = gesture();
        assert!(!g.is_paused(10.0));
        g.observe(GestureZone::Neutral, 1.0);
        assert!(!g.is_paused(1.1));
        assert!(g.is_paused(1.25));
    }

    #[test]
    fn touch_counts_as_activity() {
        let mut g = gesture();
        g.observe(GestureZone::Upper, 0.0);
        g.touch(0.15);
        assert!(!g.is_paused(0.3));
        assert!(g.is_paused(0.4));
    }

    #[test]
    fn arm_starts_cooldown() {
        let mut g = gesture();
        g.arm(5.0);
        assert_eq!(g.observe(GestureZone::Upper, 5.1), None);
        assert_eq!(g.observe(GestureZone::Upper, 5.35), Some(Gesture::Upper));
    }

    #[test]
    fn target_indices() {
        assert_eq!(Gesture::Upper.target_index(2), 0);
        assert_eq!(Gesture::Lower.target_index(2), 1);
        assert_eq!(Gesture::Lower.target_index(5), 1);
        assert_eq!(Gesture::Lower.target_index(1), 0);
        assert_eq!(Gesture::Lower.target_index(0), 0);
    }
}
