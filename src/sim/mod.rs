//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Delta-time driven, scaled by the 60 Hz reference tick
//! - Seeded RNG only (one `Pcg32` per run)
//! - No rendering, audio, or platform dependencies

pub mod coin;
pub mod collision;
pub mod enemy;
pub mod frame;
pub mod player;
pub mod powerup;
pub mod progression;
pub mod world;

pub use coin::{Coin, CoinManager};
pub use collision::{
    Circle, Rect, SpatialGrid, circle_rect_intersect, circles_intersect, find_all_intersections,
    point_in_rect, rects_intersect,
};
pub use enemy::{Enemy, EnemyKind, EnemyManager};
pub use frame::{FrameClock, FrameTiming};
pub use player::{Player, TickInput};
pub use powerup::{ActiveEffects, PowerUp, PowerUpKind, PowerUpManager};
pub use progression::Progression;
pub use world::{GameEvent, RunSummary, World};
