//! World orchestration
//!
//! One `World` owns the player, the three entity managers, the progression
//! tracker, and the run RNG. `advance` runs the per-tick order that the rest
//! of the game depends on: progression first (so this tick uses fresh
//! speed/difficulty), then the player, then each manager, then collision
//! resolution - enemies before pickups, because a fatal hit voids everything
//! else that tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::coin::CoinManager;
use super::enemy::EnemyManager;
use super::player::{Player, TickInput};
use super::powerup::{PowerUpKind, PowerUpManager};
use super::progression::Progression;
use crate::consts::*;
use crate::lane_center_x;

/// Fire-and-forget notifications for the audio/particle/persistence
/// collaborators. Each fires exactly once per qualifying tick event.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted,
    CoinCollected { pos: Vec2 },
    PowerUpCollected { kind: PowerUpKind, pos: Vec2 },
    EnemyCollision { pos: Vec2 },
    LevelUp { level: u32 },
    RunEnded { summary: RunSummary },
}

/// Snapshot of a finished run, handed to the storage collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub coins: u32,
    pub distance: f32,
    pub level: u32,
}

/// The whole simulation for one run
#[derive(Debug)]
pub struct World {
    pub player: Player,
    pub enemies: EnemyManager,
    pub coins: CoinManager,
    pub powerups: PowerUpManager,
    pub progression: Progression,
    rng: Pcg32,
    over: bool,
    summary_reported: bool,
}

impl World {
    /// Fresh world for a new run
    pub fn new(seed: u64) -> Self {
        let spawn = Self::player_spawn();
        log::info!("New run, seed {seed}");
        Self {
            player: Player::new(spawn.x, spawn.y),
            enemies: EnemyManager::new(),
            coins: CoinManager::new(),
            powerups: PowerUpManager::new(),
            progression: Progression::new(),
            rng: Pcg32::seed_from_u64(seed),
            over: false,
            summary_reported: false,
        }
    }

    fn player_spawn() -> Vec2 {
        Vec2::new(
            lane_center_x(PLAYER_SPAWN_LANE) - PLAYER_WIDTH / 2.0,
            FIELD_HEIGHT - 120.0,
        )
    }

    /// Advance one variable-step tick. Returns the tick's events.
    pub fn advance(&mut self, input: TickInput, delta_ms: f32) -> Vec<GameEvent> {
        if self.over {
            return Vec::new();
        }

        let mut events = Vec::new();
        let level_before = self.progression.level();

        // Derive this tick's speed and difficulty
        self.progression.update(delta_ms);
        let game_speed = self.progression.game_speed();
        let difficulty = self.progression.difficulty();
        if self.progression.level() > level_before {
            events.push(GameEvent::LevelUp {
                level: self.progression.level(),
            });
        }

        // (Road/background decor updates here, on the renderer's side)

        self.player.update(delta_ms, input);
        self.enemies
            .update(delta_ms, game_speed, difficulty, &mut self.rng);

        let magnet_target = self
            .powerups
            .is_active(PowerUpKind::Magnet)
            .then(|| self.player.center());
        self.coins
            .update(delta_ms, game_speed, magnet_target, &mut self.rng);
        self.powerups.update(delta_ms, game_speed, &mut self.rng);

        // Collision resolution. The enemy check runs first: a fatal hit ends
        // the run and voids any pickup that would have landed this tick.
        if !self.powerups.is_active(PowerUpKind::Shield) {
            if let Some(enemy) = self.enemies.check_collision(&self.player) {
                let pos = enemy.bounds().center();
                self.player.die();
                self.over = true;
                events.push(GameEvent::EnemyCollision { pos });
                events.push(GameEvent::RunEnded {
                    summary: self.summary(),
                });
                log::info!(
                    "Run over: score {}, level {}",
                    self.progression.score(),
                    self.progression.level()
                );
                return events;
            }
        }

        for coin in self.coins.check_collisions(&self.player) {
            self.progression.add_coin();
            events.push(GameEvent::CoinCollected { pos: coin.pos });
        }

        for powerup in self.powerups.check_collisions(&self.player) {
            if powerup.kind == PowerUpKind::Shield {
                self.player.set_invincible(SHIELD_DURATION_MS);
            }
            events.push(GameEvent::PowerUpCollected {
                kind: powerup.kind,
                pos: powerup.pos,
            });
        }

        // Multiplier effect drives the score multiplier while it runs
        let multiplier = if self.powerups.is_active(PowerUpKind::Multiplier) {
            MULTIPLIER_BONUS
        } else {
            1.0
        };
        self.progression.set_score_multiplier(multiplier);

        // Survival score: staying alive at speed is worth points every tick
        self.progression.add_score((game_speed * 0.1) as u32);

        events
    }

    /// Reserved fixed-rate hook, driven by the frame clock's fixed steps.
    /// Gameplay currently runs entirely on the variable step.
    pub fn fixed_update(&mut self, _delta_ms: f32) {}

    pub fn is_over(&self) -> bool {
        self.over
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.progression.score(),
            coins: self.progression.coins_collected(),
            distance: self.progression.distance(),
            level: self.progression.level(),
        }
    }

    /// Take the run summary for persistence. Yields `Some` exactly once per
    /// ended run, so a double end-of-game cannot double-count totals.
    pub fn finish_run(&mut self) -> Option<RunSummary> {
        if !self.over || self.summary_reported {
            return None;
        }
        self.summary_reported = true;
        Some(self.summary())
    }

    /// Reset everything for a new run. The caller emits this as a run start.
    pub fn reset(&mut self, seed: u64) -> GameEvent {
        let spawn = Self::player_spawn();
        self.player.reset(spawn.x, spawn.y);
        self.enemies.clear();
        self.coins.clear();
        self.powerups.clear();
        self.progression.reset();
        self.rng = Pcg32::seed_from_u64(seed);
        self.over = false;
        self.summary_reported = false;
        log::info!("Run reset, seed {seed}");
        GameEvent::RunStarted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_TICK_MS;
    use crate::sim::enemy::EnemyKind;

    fn tick(world: &mut World) -> Vec<GameEvent> {
        world.advance(TickInput::default(), REFERENCE_TICK_MS)
    }

    /// Overlap an enemy with the player by parking the player on the spawn
    /// row and spawning into the same lane
    fn plant_enemy_on_player(world: &mut World) {
        let mut rng = Pcg32::seed_from_u64(0);
        world.player.y = ENEMY_SPAWN_Y + 10.0;
        world
            .enemies
            .spawn(world.player.current_lane(), 0.0, EnemyKind::Car, &mut rng);
    }

    #[test]
    fn test_enemy_hit_ends_run_and_voids_pickups() {
        let mut world = World::new(42);
        plant_enemy_on_player(&mut world);
        // A coin also overlaps the player this tick
        let mut rng = Pcg32::seed_from_u64(1);
        let center = world.player.center();
        world.coins.spawn(world.player.current_lane(), center.y, &mut rng);

        let events = tick(&mut world);
        assert!(events.iter().any(|e| matches!(e, GameEvent::EnemyCollision { .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::RunEnded { .. })));
        // The coin pickup was voided by the fatal hit
        assert!(!events.iter().any(|e| matches!(e, GameEvent::CoinCollected { .. })));
        assert!(world.is_over());
        assert!(!world.player.alive);
        assert_eq!(world.progression.coins_collected(), 0);
    }

    #[test]
    fn test_shield_effect_blocks_fatal_hit() {
        let mut world = World::new(42);
        let mut rng = Pcg32::seed_from_u64(2);
        // Collect a shield, then drive into an enemy
        let center = world.player.center();
        world
            .powerups
            .spawn(world.player.current_lane(), PowerUpKind::Shield, center.y, &mut rng);
        let events = tick(&mut world);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::PowerUpCollected { kind: PowerUpKind::Shield, .. }
        )));
        assert!(world.player.is_invincible());

        plant_enemy_on_player(&mut world);
        let events = tick(&mut world);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::EnemyCollision { .. })));
        assert!(!world.is_over());
    }

    #[test]
    fn test_coin_collection_scores_and_reports() {
        let mut world = World::new(42);
        let mut rng = Pcg32::seed_from_u64(3);
        let center = world.player.center();
        world.coins.spawn(world.player.current_lane(), center.y, &mut rng);

        let events = tick(&mut world);
        let coin_events = events
            .iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .count();
        assert_eq!(coin_events, 1);
        assert_eq!(world.progression.coins_collected(), 1);
        assert!(world.progression.score() >= COIN_SCORE as u64);
    }

    #[test]
    fn test_multiplier_effect_drives_score_multiplier() {
        let mut world = World::new(42);
        let mut rng = Pcg32::seed_from_u64(4);
        let center = world.player.center();
        world.powerups.spawn(
            world.player.current_lane(),
            PowerUpKind::Multiplier,
            center.y,
            &mut rng,
        );
        tick(&mut world);
        assert_eq!(world.progression.score_multiplier(), MULTIPLIER_BONUS);
    }

    #[test]
    fn test_survival_score_floors_at_low_speed() {
        let mut world = World::new(42);
        let s0 = world.progression.score();
        tick(&mut world);
        // floor(gameSpeed * 0.1) = 0 at base speed 3.0
        assert_eq!(world.progression.score(), s0);
    }

    #[test]
    fn test_finish_run_is_idempotent() {
        let mut world = World::new(42);
        plant_enemy_on_player(&mut world);
        tick(&mut world);
        assert!(world.is_over());

        let first = world.finish_run();
        assert!(first.is_some());
        assert!(world.finish_run().is_none());
        assert!(world.finish_run().is_none());
    }

    #[test]
    fn test_finish_run_requires_ended_run() {
        let mut world = World::new(42);
        assert!(world.finish_run().is_none());
    }

    #[test]
    fn test_advance_after_game_over_is_inert() {
        let mut world = World::new(42);
        plant_enemy_on_player(&mut world);
        tick(&mut world);
        let score = world.progression.score();
        let events = tick(&mut world);
        assert!(events.is_empty());
        assert_eq!(world.progression.score(), score);
    }

    #[test]
    fn test_reset_starts_a_fresh_run() {
        let mut world = World::new(42);
        plant_enemy_on_player(&mut world);
        tick(&mut world);
        world.finish_run();

        let event = world.reset(99);
        assert_eq!(event, GameEvent::RunStarted);
        assert!(!world.is_over());
        assert!(world.player.alive);
        assert_eq!(world.progression.score(), 0);
        assert!(world.enemies.is_empty());
        assert!(world.coins.is_empty());
        assert!(world.powerups.is_empty());

        // The new run can end and report again
        plant_enemy_on_player(&mut world);
        tick(&mut world);
        assert!(world.finish_run().is_some());
    }

    #[test]
    fn test_level_up_event_fires_once() {
        let mut world = World::new(42);
        world.progression.add_score(500);
        let events = tick(&mut world);
        let level_ups: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .collect();
        assert_eq!(level_ups.len(), 1);

        // No repeat on the next tick
        let events = tick(&mut world);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::LevelUp { .. })));
    }
}
