//! Player token movement.

use tm_core::Rect;
use tm_core::state::BASE_SPEED_MULTIPLIER;

use crate::config::GameConfig;

/// Position and movement of the player token.
///
/// Two modes share one position: axis-driven movement recomputed every
/// tick, and target-driven movement toward a clicked point. Whatever the
/// mode, the token stays fully inside the drawable bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerKinematics {
    start: (f32, f32),
    position: (f32, f32),
    base_speed: f32,
    speed_multiplier: f32,
    move_target: Option<(f32, f32)>,
    bounds: (f32, f32),
    token_size: f32,
    snap_distance: f32,
}

impl PlayerKinematics {
    /// Place a token at the configured start position.
    pub fn new(config: &GameConfig) -> Self {
        let mut kinematics = Self {
            start: config.player.start,
            position: config.player.start,
            base_speed: config.player.base_speed,
            speed_multiplier: BASE_SPEED_MULTIPLIER,
            move_target: None,
            bounds: (config.width, config.height),
            token_size: config.player.token_size,
            snap_distance: config.player.snap_distance,
        };
        kinematics.clamp();
        kinematics.start = kinematics.position;
        kinematics
    }

    /// Center of the token.
    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    /// Pending click-to-move target.
    pub fn move_target(&self) -> Option<(f32, f32)> {
        self.move_target
    }

    /// Current multiplier on the base speed.
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Movement per tick at full deflection.
    pub fn effective_speed(&self) -> f32 {
        self.base_speed * self.speed_multiplier
    }

    /// Adopt a new speed multiplier.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier.max(BASE_SPEED_MULTIPLIER);
    }

    /// The token's bounding square.
    pub fn player_rect(&self) -> Rect {
        Rect::centered(self.position.0, self.position.1, self.token_size)
    }

    /// Move by an axis intent in `[-1, 1]` per component. Cancels any target.
    pub fn apply_axis(&mut self, dx: f32, dy: f32) {
        self.move_target = None;
        let speed = self.effective_speed();
        self.position.0 += dx * speed;
        self.position.1 += dy * speed;
        self.clamp();
    }

    /// Start moving toward a point.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.move_target = Some(self.clamped(x, y));
    }

    /// Forget the click-to-move target.
    pub fn clear_target(&mut self) {
        self.move_target = None;
    }

    /// Advance one tick toward the target, snapping onto it when close.
    ///
    /// Returns false if there is no target.
    pub fn step_toward_target(&mut self) -> bool {
        let Some((tx, ty)) = self.move_target else {
            return false;
        };
        let (dx, dy) = (tx - self.position.0, ty - self.position.1);
        let distance = dx.hypot(dy);
        let speed = self.effective_speed();
        if distance <= self.snap_distance || distance <= speed {
            self.position = (tx, ty);
            self.move_target = None;
        } else {
            self.position.0 += dx / distance * speed;
            self.position.1 += dy / distance * speed;
        }
        self.clamp();
        true
    }

    /// Jump to a point, clamped to the bounds. Cancels any target.
    pub fn teleport(&mut self, x: f32, y: f32) {
        self.move_target = None;
        self.position = self.clamped(x, y);
    }

    /// Back to the start position at base speed.
    pub fn reset(&mut self) {
        self.position = self.start;
        self.speed_multiplier = BASE_SPEED_MULTIPLIER;
        self.move_target = None;
    }

    fn clamp(&mut self) {
        self.position = self.clamped(self.position.0, self.position.1);
    }

    fn clamped(&self, x: f32, y: f32) -> (f32, f32) {
        let half = self.token_size / 2.0;
        let max_x = (self.bounds.0 - half).max(half);
        let max_y = (self.bounds.1 - half).max(half);
        (x.clamp(half, max_x), y.clamp(half, max_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinematics() -> PlayerKinematics {
        PlayerKinematics::new(&GameConfig::default())
    }

    #[test]
    fn starts_at_configured_position() {
        let k = kinematics();
        assert_eq!(k.position(), (100.0, 100.0));
        assert_eq!(k.player_rect(), Rect::new(96.0, 96.0, 8.0, 8.0));
    }

    #[test]
    fn axis_movement_scales_with_multiplier() {
        let mut k = kinematics();
        k.apply_axis(1.0, 0.0);
        assert_eq!(k.position(), (102.0, 100.0));
        k.set_speed_multiplier(3.0);
        k.apply_axis(0.0, -1.0);
        assert_eq!(k.position(), (102.0, 94.0));
    }

    #[test]
    fn position_clamped_to_bounds() {
        let mut k = kinematics();
        for _ in 0..100 {
            k.apply_axis(-1.0, -1.0);
        }
        assert_eq!(k.position(), (4.0, 4.0));
        k.teleport(5000.0, 5000.0);
        assert_eq!(k.position(), (1020.0, 764.0));
    }

    #[test]
    fn target_movement_snaps() {
        let mut k = kinematics();
        k.set_target(110.0, 100.0);
        assert!(k.step_toward_target());
        assert_eq!(k.position(), (102.0, 100.0));
        for _ in 0..3 {
            k.step_toward_target();
        }
        assert_eq!(k.position(), (108.0, 100.0));
        k.step_toward_target();
        assert_eq!(k.position(), (110.0, 100.0));
        assert_eq!(k.move_target(), None);
        assert!(!k.step_toward_target());
    }

    #[test]
    fn axis_cancels_target() {
        let mut k = kinematics();
        k.set_target(500.0, 500.0);
        k.apply_axis(0.5, 0.0);
        assert_eq!(k.move_target(), None);
    }

    #[test]
    fn reset_restores_start() {
        let mut k = kinematics();
        k.set_speed_multiplier(2.0);
        k.teleport(300.0, 300.0);
        k.set_target(10.0, 10.0);
        k.reset();
        assert_eq!(k, kinematics());
    }
}
