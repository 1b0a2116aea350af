//! Coins
//!
//! Single coins or diagonal groups scroll down the road; the player sweeps
//! them up on contact. While a magnet effect runs, nearby coins drift toward
//! the player instead of falling straight.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{Rect, rects_intersect};
use super::player::Player;
use crate::consts::*;
use crate::{lane_center_x, tick_factor};

/// A coin, positioned by its center
#[derive(Debug, Clone)]
pub struct Coin {
    pub lane: usize,
    pub pos: Vec2,
    pub active: bool,
    pub collected: bool,
    /// Spin and pulse phases for the renderer
    pub rotation: f32,
    pub pulse_phase: f32,
}

impl Coin {
    fn new(lane: usize, y: f32, pulse_phase: f32) -> Self {
        Self {
            lane,
            pos: Vec2::new(lane_center_x(lane), y),
            active: true,
            collected: false,
            rotation: 0.0,
            pulse_phase,
        }
    }

    fn update(&mut self, delta_ms: f32, game_speed: f32, magnet_target: Option<Vec2>) {
        let dt = tick_factor(delta_ms);
        self.pos.y += game_speed * dt;

        // Magnet pull - drift toward the player while in range
        if let Some(target) = magnet_target {
            let to_player = target - self.pos;
            if to_player.length_squared() < MAGNET_RADIUS * MAGNET_RADIUS {
                self.pos += to_player.normalize_or_zero() * MAGNET_PULL_SPEED * dt;
            }
        }

        self.rotation += 0.1 * dt;
        self.pulse_phase += 0.05 * dt;

        if self.pos.y > FIELD_HEIGHT + COIN_DESPAWN_MARGIN {
            self.active = false;
        }
    }

    fn collect(&mut self) {
        self.collected = true;
        self.active = false;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - COIN_RADIUS,
            self.pos.y - COIN_RADIUS,
            COIN_RADIUS * 2.0,
            COIN_RADIUS * 2.0,
        )
    }
}

/// Owns every active coin; spawns singles or diagonal groups on a fixed timer
#[derive(Debug, Default)]
pub struct CoinManager {
    coins: Vec<Coin>,
    spawn_timer_ms: f32,
}

impl CoinManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a single coin. Lane is clamped into the road.
    pub fn spawn(&mut self, lane: usize, y: f32, rng: &mut Pcg32) {
        let lane = lane.min(LANE_COUNT - 1);
        let phase = rng.random::<f32>() * std::f32::consts::TAU;
        self.coins.push(Coin::new(lane, y, phase));
    }

    /// Diagonal run of coins across consecutive lanes, each one step higher
    pub fn spawn_group(&mut self, start_lane: usize, count: usize, rng: &mut Pcg32) {
        for i in 0..count {
            let lane = (start_lane + i).min(LANE_COUNT - 1);
            let y = COIN_SPAWN_Y - i as f32 * COIN_GROUP_Y_STEP;
            self.spawn(lane, y, rng);
        }
    }

    fn spawn_coin(&mut self, rng: &mut Pcg32) {
        if rng.random_bool(COIN_GROUP_CHANCE) {
            // Group starts far enough left that three coins fit
            let start_lane = rng.random_range(0..3);
            let count = rng.random_range(3..=4);
            self.spawn_group(start_lane, count, rng);
        } else {
            let lane = rng.random_range(0..LANE_COUNT);
            self.spawn(lane, COIN_SPAWN_Y, rng);
        }
    }

    /// Advance spawning and motion, then evict off-screen coins
    pub fn update(
        &mut self,
        delta_ms: f32,
        game_speed: f32,
        magnet_target: Option<Vec2>,
        rng: &mut Pcg32,
    ) {
        self.spawn_timer_ms += delta_ms;
        if self.spawn_timer_ms >= COIN_SPAWN_INTERVAL_MS {
            self.spawn_timer_ms = 0.0;
            self.spawn_coin(rng);
        }

        for coin in &mut self.coins {
            coin.update(delta_ms, game_speed, magnet_target);
        }
        self.coins.retain(|c| c.active);
    }

    /// Collect every coin overlapping the player this tick. Collected coins
    /// leave the collection immediately; all of them are reported.
    pub fn check_collisions(&mut self, player: &Player) -> Vec<Coin> {
        let player_bounds = player.bounds();
        let mut collected = Vec::new();
        self.coins.retain_mut(|coin| {
            if rects_intersect(&player_bounds, &coin.bounds()) {
                coin.collect();
                collected.push(coin.clone());
                false
            } else {
                true
            }
        });
        collected
    }

    pub fn clear(&mut self) {
        self.coins.clear();
        self.spawn_timer_ms = 0.0;
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter()
    }
}
