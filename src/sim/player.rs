//! Player vehicle
//!
//! Lane-based movement with exponential easing toward the current lane
//! center, a decaying invincibility timer, and a terminal dead state.

use glam::Vec2;

use super::collision::Rect;
use crate::consts::*;
use crate::{lane_center_x, road_left, road_right, tick_factor};

/// Per-tick input snapshot. Level-sensed booleans from the host, not raw key
/// events - a held key shifts one lane per tick it stays pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// The player's vehicle
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    current_lane: usize,
    target_x: f32,
    pub alive: bool,
    invincible: bool,
    invincible_remaining_ms: f32,
    /// Animation phase for the renderer (wheels/exhaust flicker)
    pub animation_phase: f32,
}

impl Player {
    /// Spawn at the given position, centered lane
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            current_lane: PLAYER_SPAWN_LANE,
            target_x: x,
            alive: true,
            invincible: false,
            invincible_remaining_ms: 0.0,
            animation_phase: 0.0,
        }
    }

    /// Advance one tick. No-op once dead.
    pub fn update(&mut self, delta_ms: f32, input: TickInput) {
        if !self.alive {
            return;
        }

        let dt = tick_factor(delta_ms);

        // Invincibility decays to exactly zero
        if self.invincible {
            self.invincible_remaining_ms -= delta_ms;
            if self.invincible_remaining_ms <= 0.0 {
                self.invincible = false;
                self.invincible_remaining_ms = 0.0;
            }
        }

        // Lane shift. Explicit tie-break: simultaneous left+right nets a
        // single shift to the right.
        let shift: i32 = match (input.left, input.right) {
            (true, true) => 1,
            (true, false) => -1,
            (false, true) => 1,
            (false, false) => 0,
        };
        if shift != 0 {
            let lane = (self.current_lane as i32 + shift).clamp(0, LANE_COUNT as i32 - 1);
            self.current_lane = lane as usize;
            self.target_x = lane_center_x(self.current_lane) - PLAYER_WIDTH / 2.0;
        }

        // Exponential ease: cover a fixed fraction of the remaining gap to
        // the lane center each reference tick
        self.x += (self.target_x - self.x) * LANE_SMOOTHING * dt;

        // Keep the vehicle on the road
        let min_x = road_left() + ROAD_EDGE_MARGIN;
        let max_x = road_right() - ROAD_EDGE_MARGIN - PLAYER_WIDTH;
        self.x = self.x.clamp(min_x, max_x);

        self.animation_phase = (self.animation_phase + 0.15 * dt) % 2.0;
    }

    /// Grant invincibility; a zero/negative duration means the standard one
    pub fn set_invincible(&mut self, duration_ms: f32) {
        self.invincible = true;
        self.invincible_remaining_ms = if duration_ms > 0.0 {
            duration_ms
        } else {
            DEFAULT_INVINCIBILITY_MS
        };
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn invincible_remaining_ms(&self) -> f32 {
        self.invincible_remaining_ms
    }

    pub fn current_lane(&self) -> usize {
        self.current_lane
    }

    /// Dead is terminal until `reset`
    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Restore spawn state for a new run
    pub fn reset(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.current_lane = PLAYER_SPAWN_LANE;
        self.target_x = x;
        self.alive = true;
        self.invincible = false;
        self.invincible_remaining_ms = 0.0;
        self.animation_phase = 0.0;
    }

    /// Hit rectangle used by every collision check against the player
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Center point (magnet target)
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_TICK_MS;

    fn spawn() -> Player {
        Player::new(lane_center_x(2) - PLAYER_WIDTH / 2.0, 480.0)
    }

    #[test]
    fn test_lane_shift_clamps_to_road() {
        let mut p = spawn();
        for _ in 0..10 {
            p.update(REFERENCE_TICK_MS, TickInput { left: true, right: false });
        }
        assert_eq!(p.current_lane(), 0);
        for _ in 0..20 {
            p.update(REFERENCE_TICK_MS, TickInput { left: false, right: true });
        }
        assert_eq!(p.current_lane(), 4);
    }

    #[test]
    fn test_lane_shift_tie_break_prefers_right() {
        let mut p = spawn();
        p.update(REFERENCE_TICK_MS, TickInput { left: true, right: true });
        assert_eq!(p.current_lane(), 3);
    }

    #[test]
    fn test_smoothing_approaches_lane_center() {
        let mut p = spawn();
        p.update(REFERENCE_TICK_MS, TickInput { left: false, right: true });
        let target = lane_center_x(3) - PLAYER_WIDTH / 2.0;
        // One tick covers 15% of the gap, not all of it
        assert!(p.x < target);
        for _ in 0..200 {
            p.update(REFERENCE_TICK_MS, TickInput::default());
        }
        assert!((p.x - target).abs() < 0.5);
    }

    #[test]
    fn test_position_stays_in_bounds() {
        let mut p = spawn();
        let min_x = road_left() + ROAD_EDGE_MARGIN;
        let max_x = road_right() - ROAD_EDGE_MARGIN - PLAYER_WIDTH;
        for i in 0..500 {
            let input = TickInput {
                left: i % 3 == 0,
                right: i % 2 == 0,
            };
            p.update(REFERENCE_TICK_MS * 1.7, input);
            assert!(p.x >= min_x && p.x <= max_x);
            assert!(p.current_lane() <= 4);
        }
    }

    #[test]
    fn test_invincibility_decays_to_zero() {
        let mut p = spawn();
        p.set_invincible(100.0);
        assert!(p.is_invincible());
        for _ in 0..5 {
            p.update(REFERENCE_TICK_MS, TickInput::default());
        }
        assert!(p.is_invincible());
        for _ in 0..2 {
            p.update(REFERENCE_TICK_MS, TickInput::default());
        }
        assert!(!p.is_invincible());
        assert_eq!(p.invincible_remaining_ms(), 0.0);
    }

    #[test]
    fn test_default_invincibility_duration() {
        let mut p = spawn();
        p.set_invincible(0.0);
        assert_eq!(p.invincible_remaining_ms(), DEFAULT_INVINCIBILITY_MS);
    }

    #[test]
    fn test_dead_is_terminal_until_reset() {
        let mut p = spawn();
        p.die();
        let lane = p.current_lane();
        let x = p.x;
        p.update(REFERENCE_TICK_MS, TickInput { left: true, right: false });
        assert_eq!(p.current_lane(), lane);
        assert_eq!(p.x, x);

        p.reset(400.0, 480.0);
        assert!(p.alive);
        assert_eq!(p.current_lane(), PLAYER_SPAWN_LANE);
        assert!(!p.is_invincible());
    }
}
