//! Power-ups and their timed effects
//!
//! Entity lifetime (a pickup scrolling down the road) is distinct from effect
//! lifetime (the countdown that starts when the pickup is collected).
//! Re-collecting a kind restarts its countdown rather than stacking.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{Rect, rects_intersect};
use super::player::Player;
use crate::consts::*;
use crate::{lane_center_x, tick_factor};

/// Closed set of power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PowerUpKind {
    Shield,
    Magnet,
    Multiplier,
}

/// All kinds, for uniform spawn rolls and effect iteration
pub const ALL_KINDS: [PowerUpKind; 3] =
    [PowerUpKind::Shield, PowerUpKind::Magnet, PowerUpKind::Multiplier];

impl PowerUpKind {
    /// Effect duration once collected
    pub fn duration_ms(&self) -> f32 {
        match self {
            PowerUpKind::Shield => SHIELD_DURATION_MS,
            PowerUpKind::Magnet => MAGNET_DURATION_MS,
            PowerUpKind::Multiplier => MULTIPLIER_DURATION_MS,
        }
    }

    /// Icon color for the renderer, packed 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Shield => 0x8338ec,
            PowerUpKind::Magnet => 0xff006e,
            PowerUpKind::Multiplier => 0x00f5ff,
        }
    }
}

/// A power-up pickup, positioned by its center
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub lane: usize,
    pub pos: Vec2,
    pub active: bool,
    pub collected: bool,
    /// Spin and bob phases for the renderer
    pub rotation: f32,
    pub bob_phase: f32,
}

impl PowerUp {
    fn new(kind: PowerUpKind, lane: usize, y: f32, bob_phase: f32) -> Self {
        Self {
            kind,
            lane,
            pos: Vec2::new(lane_center_x(lane), y),
            active: true,
            collected: false,
            rotation: 0.0,
            bob_phase,
        }
    }

    fn update(&mut self, delta_ms: f32, game_speed: f32) {
        let dt = tick_factor(delta_ms);
        self.pos.y += game_speed * dt;
        self.rotation += 0.05 * dt;
        self.bob_phase += 0.08 * dt;

        if self.pos.y > FIELD_HEIGHT + POWERUP_DESPAWN_MARGIN {
            self.active = false;
        }
    }

    fn collect(&mut self) {
        self.collected = true;
        self.active = false;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - POWERUP_SIZE / 2.0,
            self.pos.y - POWERUP_SIZE / 2.0,
            POWERUP_SIZE,
            POWERUP_SIZE,
        )
    }
}

/// Per-kind effect countdowns. `remaining > 0` is exactly "active".
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveEffects {
    shield_ms: f32,
    magnet_ms: f32,
    multiplier_ms: f32,
}

impl ActiveEffects {
    fn slot(&mut self, kind: PowerUpKind) -> &mut f32 {
        match kind {
            PowerUpKind::Shield => &mut self.shield_ms,
            PowerUpKind::Magnet => &mut self.magnet_ms,
            PowerUpKind::Multiplier => &mut self.multiplier_ms,
        }
    }

    /// Restart the kind's countdown at its full duration
    pub fn activate(&mut self, kind: PowerUpKind) {
        *self.slot(kind) = kind.duration_ms();
    }

    /// Decay every running countdown toward exactly zero
    pub fn update(&mut self, delta_ms: f32) {
        for kind in ALL_KINDS {
            let slot = self.slot(kind);
            if *slot > 0.0 {
                *slot = (*slot - delta_ms).max(0.0);
            }
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining_ms(kind) > 0.0
    }

    pub fn remaining_ms(&self, kind: PowerUpKind) -> f32 {
        match kind {
            PowerUpKind::Shield => self.shield_ms,
            PowerUpKind::Magnet => self.magnet_ms,
            PowerUpKind::Multiplier => self.multiplier_ms,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Owns every active pickup plus the collected-effect timers
#[derive(Debug, Default)]
pub struct PowerUpManager {
    powerups: Vec<PowerUp>,
    spawn_timer_ms: f32,
    effects: ActiveEffects,
}

impl PowerUpManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicitly place a pickup. Lane is clamped into the road.
    pub fn spawn(&mut self, lane: usize, kind: PowerUpKind, y: f32, rng: &mut Pcg32) {
        let lane = lane.min(LANE_COUNT - 1);
        let phase = rng.random::<f32>() * std::f32::consts::TAU;
        self.powerups.push(PowerUp::new(kind, lane, y, phase));
    }

    fn spawn_powerup(&mut self, rng: &mut Pcg32) {
        let lane = rng.random_range(0..LANE_COUNT);
        let kind = ALL_KINDS[rng.random_range(0..ALL_KINDS.len())];
        self.spawn(lane, kind, POWERUP_SPAWN_Y, rng);
    }

    /// Advance effect timers, spawning, and motion, then evict
    pub fn update(&mut self, delta_ms: f32, game_speed: f32, rng: &mut Pcg32) {
        self.effects.update(delta_ms);

        self.spawn_timer_ms += delta_ms;
        if self.spawn_timer_ms >= POWERUP_SPAWN_INTERVAL_MS {
            self.spawn_timer_ms = 0.0;
            self.spawn_powerup(rng);
        }

        for p in &mut self.powerups {
            p.update(delta_ms, game_speed);
        }
        self.powerups.retain(|p| p.active);
    }

    /// Collect every pickup overlapping the player this tick and start its
    /// effect countdown. All collections are reported.
    pub fn check_collisions(&mut self, player: &Player) -> Vec<PowerUp> {
        let player_bounds = player.bounds();
        let mut collected = Vec::new();
        let effects = &mut self.effects;
        self.powerups.retain_mut(|p| {
            if rects_intersect(&player_bounds, &p.bounds()) {
                p.collect();
                effects.activate(p.kind);
                collected.push(p.clone());
                false
            } else {
                true
            }
        });
        collected
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.effects.is_active(kind)
    }

    pub fn remaining_ms(&self, kind: PowerUpKind) -> f32 {
        self.effects.remaining_ms(kind)
    }

    /// Clear pickups, the spawn timer, and every running effect
    pub fn clear(&mut self) {
        self.powerups.clear();
        self.spawn_timer_ms = 0.0;
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.powerups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powerups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PowerUp> {
        self.powerups.iter()
    }
}
