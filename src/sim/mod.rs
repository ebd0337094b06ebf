//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness through [`RandomSource`] only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod defense;
pub mod enemy;
pub mod explosion;
pub mod item;
pub mod level;
pub mod projectile;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_intersects_rect, point_in_circle};
pub use defense::{Building, Cannon, layout_buildings, layout_cannons};
pub use enemy::{Enemy, EnemyKind};
pub use explosion::{Explosion, ExplosionKind};
pub use item::{ActiveEffects, FloatingText, Item, ItemKind};
pub use level::{LevelError, LevelManager, SpawnOrder, WaveData, WavePhase};
pub use projectile::{EnemyMissile, PlayerProjectile, Trajectory};
pub use rng::{RandomSource, seeded};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, autopilot_target, fire_at, tick};
