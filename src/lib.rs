//! Neon Racer - a five-lane traffic dodger
//!
//! Core modules:
//! - `sim`: Simulation core (frame clock, entities, collisions, scoring)
//! - `storage`: Persisted run summary (high score, totals) in LocalStorage
//! - `settings`: Player preferences

pub mod settings;
pub mod sim;
pub mod storage;

pub use settings::Settings;
pub use storage::GameData;

/// Game configuration constants
pub mod consts {
    /// Reference tick length at 60 Hz. All motion is expressed as
    /// `speed * (delta_ms / REFERENCE_TICK_MS)`.
    pub const REFERENCE_TICK_MS: f32 = 1000.0 / 60.0;
    /// Fixed physics step (60 Hz)
    pub const FIXED_STEP_MS: f32 = 1000.0 / 60.0;
    /// Frame delta clamp - prevents catch-up bursts after a stall/tab suspend
    pub const MAX_FRAME_DELTA_MS: f32 = 250.0;

    /// Playing field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Road geometry - five lanes centered in the field
    pub const ROAD_WIDTH: f32 = 500.0;
    pub const LANE_COUNT: usize = 5;
    pub const LANE_WIDTH: f32 = ROAD_WIDTH / LANE_COUNT as f32;
    /// Player x clamp margin inside the road edges
    pub const ROAD_EDGE_MARGIN: f32 = 10.0;

    /// Player vehicle
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPAWN_LANE: usize = 2;
    /// Fraction of the gap to the lane center covered per reference tick
    pub const LANE_SMOOTHING: f32 = 0.15;
    pub const DEFAULT_INVINCIBILITY_MS: f32 = 2000.0;

    /// Enemy vehicles
    pub const CAR_WIDTH: f32 = 40.0;
    pub const CAR_HEIGHT: f32 = 60.0;
    pub const TRUCK_WIDTH: f32 = 45.0;
    pub const TRUCK_HEIGHT: f32 = 80.0;
    pub const ENEMY_SPAWN_Y: f32 = -80.0;
    /// Off-screen margin before an enemy despawns (trucks are tall)
    pub const ENEMY_DESPAWN_MARGIN: f32 = 100.0;
    pub const ENEMY_BASE_INTERVAL_MS: f32 = 1500.0;
    pub const ENEMY_MIN_INTERVAL_MS: f32 = 600.0;
    /// Interval shrink per difficulty level - the primary difficulty lever
    pub const ENEMY_INTERVAL_STEP_MS: f32 = 100.0;
    pub const ENEMY_BASE_SPEED: f32 = 3.0;
    pub const ENEMY_SPEED_JITTER: f32 = 2.0;
    pub const ENEMY_SPEED_PER_DIFFICULTY: f32 = 0.3;
    pub const TRUCK_CHANCE: f64 = 0.2;
    /// No second spawn into a lane while an enemy is still this close to the top
    pub const SPAWN_SAFETY_ZONE: f32 = 100.0;

    /// Coins
    pub const COIN_RADIUS: f32 = 12.0;
    pub const COIN_SPAWN_Y: f32 = -50.0;
    pub const COIN_SPAWN_INTERVAL_MS: f32 = 2000.0;
    pub const COIN_GROUP_CHANCE: f64 = 0.3;
    /// Vertical spacing inside a diagonal coin group
    pub const COIN_GROUP_Y_STEP: f32 = 50.0;
    pub const COIN_DESPAWN_MARGIN: f32 = 50.0;
    pub const COIN_SCORE: u32 = 10;
    /// Magnet effect pull range and speed (per reference tick)
    pub const MAGNET_RADIUS: f32 = 150.0;
    pub const MAGNET_PULL_SPEED: f32 = 6.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_SPAWN_Y: f32 = -50.0;
    pub const POWERUP_SPAWN_INTERVAL_MS: f32 = 8000.0;
    pub const POWERUP_DESPAWN_MARGIN: f32 = 50.0;
    pub const SHIELD_DURATION_MS: f32 = 5000.0;
    pub const MAGNET_DURATION_MS: f32 = 7000.0;
    pub const MULTIPLIER_DURATION_MS: f32 = 10000.0;
    /// Score multiplier while the multiplier effect runs
    pub const MULTIPLIER_BONUS: f32 = 2.0;

    /// Progression
    pub const SCORE_PER_LEVEL: u64 = 500;
    pub const MAX_LEVEL: u32 = 10;
    pub const BASE_GAME_SPEED: f32 = 3.0;
    pub const SPEED_INCREASE_PER_LEVEL: f32 = 0.5;
    /// Distance accumulated per reference tick per unit of game speed
    pub const DISTANCE_FACTOR: f32 = 0.1;
}

/// Normalized delta-time factor: 1.0 at exactly 60 Hz
#[inline]
pub fn tick_factor(delta_ms: f32) -> f32 {
    delta_ms / consts::REFERENCE_TICK_MS
}

/// Left edge of the road
#[inline]
pub fn road_left() -> f32 {
    (consts::FIELD_WIDTH - consts::ROAD_WIDTH) / 2.0
}

/// Right edge of the road
#[inline]
pub fn road_right() -> f32 {
    road_left() + consts::ROAD_WIDTH
}

/// Center x of a lane. Out-of-range lanes are clamped into [0, 4] -
/// a corrupt lane index must never crash a run.
#[inline]
pub fn lane_center_x(lane: usize) -> f32 {
    let lane = lane.min(consts::LANE_COUNT - 1);
    road_left() + consts::LANE_WIDTH * lane as f32 + consts::LANE_WIDTH / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_centers_span_road() {
        assert_eq!(lane_center_x(0), 200.0);
        assert_eq!(lane_center_x(2), 400.0);
        assert_eq!(lane_center_x(4), 600.0);
        // Out-of-range lanes clamp instead of panicking
        assert_eq!(lane_center_x(99), lane_center_x(4));
    }

    #[test]
    fn test_tick_factor_is_unity_at_60hz() {
        assert!((tick_factor(consts::REFERENCE_TICK_MS) - 1.0).abs() < 1e-6);
        assert!((tick_factor(consts::REFERENCE_TICK_MS * 2.0) - 2.0).abs() < 1e-6);
    }
}
