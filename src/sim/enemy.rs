//! Enemy traffic
//!
//! Oncoming vehicles scroll down the road at the world speed plus a small
//! per-vehicle offset. The spawn interval shrinks with difficulty down to a
//! floor - this is the primary difficulty lever of the game.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{Rect, rects_intersect};
use super::player::Player;
use crate::consts::*;
use crate::{lane_center_x, tick_factor};

/// Closed set of enemy vehicle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EnemyKind {
    Car,
    Truck,
}

impl EnemyKind {
    /// Sprite footprint (width, height)
    pub fn size(&self) -> Vec2 {
        match self {
            EnemyKind::Car => Vec2::new(CAR_WIDTH, CAR_HEIGHT),
            EnemyKind::Truck => Vec2::new(TRUCK_WIDTH, TRUCK_HEIGHT),
        }
    }

    /// Body color choices for the renderer, packed 0xRRGGBB
    pub fn palette(&self) -> &'static [u32] {
        match self {
            EnemyKind::Car => &[0xff006e, 0x8338ec, 0x00f5ff, 0xffbe0b],
            EnemyKind::Truck => &[0xe63946, 0x457b9d, 0x2a9d8f],
        }
    }
}

/// A single enemy vehicle
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub lane: usize,
    pub pos: Vec2,
    /// Per-vehicle speed offset on top of the world scroll speed
    pub base_speed: f32,
    /// Body color for the renderer, picked from the kind's palette
    pub color: u32,
    pub active: bool,
}

impl Enemy {
    fn new(kind: EnemyKind, lane: usize, base_speed: f32, color: u32) -> Self {
        let size = kind.size();
        let x = lane_center_x(lane) - size.x / 2.0;
        Self {
            kind,
            lane,
            pos: Vec2::new(x, ENEMY_SPAWN_Y),
            base_speed,
            color,
            active: true,
        }
    }

    fn update(&mut self, delta_ms: f32, game_speed: f32) {
        let speed = self.base_speed + game_speed;
        self.pos.y += speed * tick_factor(delta_ms);

        if self.pos.y > FIELD_HEIGHT + ENEMY_DESPAWN_MARGIN {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(self.pos.x, self.pos.y, size.x, size.y)
    }
}

/// Owns every active enemy; spawns on a difficulty-scaled timer
#[derive(Debug, Default)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    spawn_timer_ms: f32,
}

impl EnemyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn interval for a difficulty level
    fn spawn_interval_ms(difficulty: u32) -> f32 {
        (ENEMY_BASE_INTERVAL_MS - difficulty as f32 * ENEMY_INTERVAL_STEP_MS)
            .max(ENEMY_MIN_INTERVAL_MS)
    }

    /// Explicitly place an enemy. Lane is clamped into the road.
    pub fn spawn(&mut self, lane: usize, base_speed: f32, kind: EnemyKind, rng: &mut Pcg32) {
        let lane = lane.min(LANE_COUNT - 1);
        let palette = kind.palette();
        let color = palette[rng.random_range(0..palette.len())];
        self.enemies.push(Enemy::new(kind, lane, base_speed, color));
    }

    /// Random spawn decision. Skipped (not rescheduled) when the target lane
    /// already holds an enemy near the top - stacked spawns would be
    /// impossible to dodge.
    fn spawn_enemy(&mut self, difficulty: u32, rng: &mut Pcg32) {
        let lane = rng.random_range(0..LANE_COUNT);

        let lane_blocked = self
            .enemies
            .iter()
            .any(|e| e.lane == lane && e.pos.y < SPAWN_SAFETY_ZONE);
        if lane_blocked {
            return;
        }

        let kind = if rng.random_bool(TRUCK_CHANCE) {
            EnemyKind::Truck
        } else {
            EnemyKind::Car
        };
        let base_speed = ENEMY_BASE_SPEED
            + rng.random::<f32>() * ENEMY_SPEED_JITTER
            + difficulty as f32 * ENEMY_SPEED_PER_DIFFICULTY;

        self.spawn(lane, base_speed, kind, rng);
    }

    /// Advance spawning and motion, then evict everything that left the field
    pub fn update(&mut self, delta_ms: f32, game_speed: f32, difficulty: u32, rng: &mut Pcg32) {
        self.spawn_timer_ms += delta_ms;
        if self.spawn_timer_ms >= Self::spawn_interval_ms(difficulty) {
            self.spawn_timer_ms = 0.0;
            self.spawn_enemy(difficulty, rng);
        }

        for enemy in &mut self.enemies {
            enemy.update(delta_ms, game_speed);
        }
        self.enemies.retain(|e| e.active);
    }

    /// First enemy overlapping the player, in collection order. Read-only:
    /// the caller decides the consequence. Always `None` while the player is
    /// invincible.
    pub fn check_collision(&self, player: &Player) -> Option<&Enemy> {
        if player.is_invincible() {
            return None;
        }
        let player_bounds = player.bounds();
        self.enemies
            .iter()
            .find(|e| rects_intersect(&player_bounds, &e.bounds()))
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
        self.spawn_timer_ms = 0.0;
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Render view of active enemies
    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_TICK_MS;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_spawn_interval_shrinks_to_floor() {
        assert_eq!(EnemyManager::spawn_interval_ms(1), 1400.0);
        assert_eq!(EnemyManager::spawn_interval_ms(5), 1000.0);
        // Floor at high difficulty
        assert_eq!(EnemyManager::spawn_interval_ms(50), ENEMY_MIN_INTERVAL_MS);
    }

    #[test]
    fn test_lane_safety_skips_spawn() {
        let mut rng = rng();
        let mut mgr = EnemyManager::new();
        // Occupy every lane near the top so any roll is blocked
        for lane in 0..LANE_COUNT {
            mgr.spawn(lane, 3.0, EnemyKind::Car, &mut rng);
            mgr.enemies.last_mut().unwrap().pos.y = 50.0;
        }
        let before = mgr.len();
        mgr.spawn_enemy(1, &mut rng);
        assert_eq!(mgr.len(), before);
    }

    #[test]
    fn test_all_entities_active_after_update() {
        let mut rng = rng();
        let mut mgr = EnemyManager::new();
        for lane in 0..LANE_COUNT {
            mgr.spawn(lane, 3.0, EnemyKind::Car, &mut rng);
        }
        // Push one past the despawn line
        mgr.enemies[2].pos.y = FIELD_HEIGHT + ENEMY_DESPAWN_MARGIN + 1.0;
        mgr.update(REFERENCE_TICK_MS, 3.0, 1, &mut rng);
        assert!(mgr.iter().all(|e| e.active));
        assert!(mgr.iter().all(|e| e.pos.y <= FIELD_HEIGHT + ENEMY_DESPAWN_MARGIN));
    }

    #[test]
    fn test_enemies_move_down_with_game_speed() {
        let mut rng = rng();
        let mut mgr = EnemyManager::new();
        mgr.spawn(2, 2.0, EnemyKind::Truck, &mut rng);
        let y0 = mgr.enemies[0].pos.y;
        mgr.update(REFERENCE_TICK_MS, 4.0, 1, &mut rng);
        // base 2 + world 4 = 6 units per reference tick
        assert!((mgr.enemies[0].pos.y - (y0 + 6.0)).abs() < 1e-3);
    }

    #[test]
    fn test_invincible_player_bypasses_collision() {
        let mut rng = rng();
        let mut mgr = EnemyManager::new();
        let mut player = Player::new(lane_center_x(2) - PLAYER_WIDTH / 2.0, 480.0);
        mgr.spawn(2, 3.0, EnemyKind::Car, &mut rng);
        // Drop the enemy right on the player
        mgr.enemies[0].pos = Vec2::new(player.x, player.y);
        assert!(mgr.check_collision(&player).is_some());

        player.set_invincible(2000.0);
        assert!(mgr.check_collision(&player).is_none());
    }

    #[test]
    fn test_check_collision_returns_first_in_order() {
        let mut rng = rng();
        let mut mgr = EnemyManager::new();
        let player = Player::new(lane_center_x(2) - PLAYER_WIDTH / 2.0, 480.0);
        mgr.spawn(2, 3.0, EnemyKind::Car, &mut rng);
        mgr.spawn(2, 3.0, EnemyKind::Truck, &mut rng);
        mgr.enemies[0].pos = Vec2::new(player.x, player.y);
        mgr.enemies[1].pos = Vec2::new(player.x, player.y);
        assert_eq!(mgr.check_collision(&player).unwrap().kind, EnemyKind::Car);
    }

    #[test]
    fn test_clear_resets_timer_and_collection() {
        let mut rng = rng();
        let mut mgr = EnemyManager::new();
        mgr.spawn(0, 3.0, EnemyKind::Car, &mut rng);
        mgr.spawn_timer_ms = 900.0;
        mgr.clear();
        assert!(mgr.is_empty());
        assert_eq!(mgr.spawn_timer_ms, 0.0);
    }
}
