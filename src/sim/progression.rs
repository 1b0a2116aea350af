//! Score, level, and difficulty progression
//!
//! Level is derived from score: the run sits at the smallest level whose
//! score threshold it has not yet passed, capped at the max level. Levels
//! never decrease, and a large score jump may skip levels in one evaluation.

use crate::consts::*;
use crate::tick_factor;

#[derive(Debug, Clone)]
pub struct Progression {
    level: u32,
    score: u64,
    distance: f32,
    coins_collected: u32,
    score_multiplier: f32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            distance: 0.0,
            coins_collected: 0,
            score_multiplier: 1.0,
        }
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance distance, then re-evaluate the level
    pub fn update(&mut self, delta_ms: f32) {
        self.distance += self.game_speed() * tick_factor(delta_ms) * DISTANCE_FACTOR;
        self.check_level_up();
    }

    /// Jump straight to the level the current score earns. No hysteresis.
    pub fn check_level_up(&mut self) {
        let target = (MAX_LEVEL as u64).min(self.score / SCORE_PER_LEVEL + 1) as u32;
        if target > self.level {
            log::info!("Level up: {} -> {}", self.level, target);
            self.level = target;
        }
    }

    /// Add points through the current multiplier (floored)
    pub fn add_score(&mut self, points: u32) {
        self.score += (points as f32 * self.score_multiplier).floor() as u64;
    }

    /// Bank a coin: counts it, then scores its fixed base value
    pub fn add_coin(&mut self) {
        self.coins_collected += 1;
        self.add_score(COIN_SCORE);
    }

    /// Scroll speed for the current level - linear ramp, recomputed on demand
    pub fn game_speed(&self) -> f32 {
        BASE_GAME_SPEED + (self.level - 1) as f32 * SPEED_INCREASE_PER_LEVEL
    }

    /// Difficulty is the level itself
    pub fn difficulty(&self) -> u32 {
        self.level
    }

    /// Fraction of the way through the current level, for the HUD bar
    pub fn level_progress(&self) -> f32 {
        (self.score % SCORE_PER_LEVEL) as f32 / SCORE_PER_LEVEL as f32
    }

    pub fn set_score_multiplier(&mut self, multiplier: f32) {
        self.score_multiplier = multiplier.max(0.0);
    }

    pub fn score_multiplier(&self) -> f32 {
        self.score_multiplier
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
