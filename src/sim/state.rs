//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here and is read-only
//! between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::defense::{Building, Cannon, layout_buildings, layout_cannons};
use super::enemy::{Enemy, EnemyKind};
use super::explosion::Explosion;
use super::item::{ActiveEffects, FloatingText, Item, ItemKind};
use super::level::LevelManager;
use super::projectile::{EnemyMissile, PlayerProjectile};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking
    Running,
    /// Every building is gone; ticks are ignored until restart
    GameOver,
}

/// Things the host may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new wave began
    WaveStarted { level: u32 },
    /// A special enemy was shot down
    EnemyDestroyed { kind: EnemyKind, score: u64 },
    /// An item was collected
    ItemActivated { kind: ItemKind },
    /// A building was hit (it never comes back)
    BuildingDestroyed { index: usize },
    /// A cannon was hit (it respawns)
    CannonDestroyed { index: usize },
    /// The last building fell; emitted exactly once per game
    GameFinished { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Simulation clock
    pub time_ms: u64,
    /// Tick counter
    pub time_ticks: u64,
    pub score: u64,
    pub phase: GamePhase,
    /// Last aim point (cannon orientation when rendering)
    pub aim: Vec2,
    pub cannons: Vec<Cannon>,
    pub buildings: Vec<Building>,
    pub projectiles: Vec<PlayerProjectile>,
    pub missiles: Vec<EnemyMissile>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    pub items: Vec<Item>,
    pub floating_texts: Vec<FloatingText>,
    pub effects: ActiveEffects,
    pub levels: LevelManager,
}

impl GameState {
    /// Create a fresh game (the "start" signal)
    pub fn new(settings: Settings, levels: LevelManager) -> Self {
        let mut state = Self {
            settings,
            time_ms: 0,
            time_ticks: 0,
            score: 0,
            phase: GamePhase::Running,
            aim: Vec2::ZERO,
            cannons: Vec::new(),
            buildings: Vec::new(),
            projectiles: Vec::new(),
            missiles: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            items: Vec::new(),
            floating_texts: Vec::new(),
            effects: ActiveEffects::default(),
            levels,
        };
        state.restart();
        state
    }

    /// Reset everything and begin a new game with the same settings and waves
    pub fn restart(&mut self) {
        let (w, h) = self.viewport();
        self.cannons = layout_cannons(w, h);
        self.buildings = layout_buildings(&self.cannons, h);

        self.time_ms = 0;
        self.time_ticks = 0;
        self.score = 0;
        self.phase = GamePhase::Running;
        self.aim = Vec2::new(w / 2.0, h / 2.0);
        self.projectiles.clear();
        self.missiles.clear();
        self.enemies.clear();
        self.explosions.clear();
        self.items.clear();
        self.floating_texts.clear();
        self.effects = ActiveEffects::default();
        self.levels.reset();

        log::info!("Game started at level {}", self.levels.level_index());
    }

    #[inline]
    pub fn viewport(&self) -> (f32, f32) {
        (self.settings.viewport_width, self.settings.viewport_height)
    }

    /// No live hostile missiles or special enemies remain
    pub fn battlefield_clear(&self) -> bool {
        !self.missiles.iter().any(|m| m.alive) && !self.enemies.iter().any(|e| e.alive)
    }

    pub fn all_buildings_destroyed(&self) -> bool {
        self.buildings.iter().all(|b| b.destroyed)
    }

    /// Cooldown applying to cannons right now
    pub fn cannon_cooldown_ms(&self) -> u32 {
        self.settings
            .player
            .cooldown_ms(self.effects.rate_boost_active())
    }

    /// Max radius of a player explosion right now
    pub fn player_explosion_radius(&self) -> f32 {
        self.settings.player.explosion_max_radius
            * self
                .effects
                .explosion_radius_multiplier(self.settings.area_boost_factor)
    }

    /// Drop every entity whose liveness flag is down
    pub fn purge_dead(&mut self) {
        self.projectiles.retain(|p| p.alive);
        self.missiles.retain(|m| m.alive);
        self.enemies.retain(|e| e.alive);
        self.explosions.retain(|e| e.alive);
        self.items.retain(|i| i.alive);
        self.floating_texts.retain(|t| t.alive());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new(Settings::default(), LevelManager::new());
        assert_eq!(state.cannons.len(), 3);
        assert_eq!(state.buildings.len(), 6);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.battlefield_clear());
        assert!(!state.all_buildings_destroyed());
    }

    #[test]
    fn test_restart_clears_progress() {
        let mut state = GameState::new(Settings::default(), LevelManager::new());
        state.score = 1234;
        state.time_ms = 99_000;
        state.buildings[0].take_hit();
        state.cannons[1].take_hit();
        state.phase = GamePhase::GameOver;
        state.effects.activate(ItemKind::AreaBoost, 10_000);

        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ms, 0);
        assert!(state.buildings.iter().all(|b| !b.destroyed));
        assert!(state.cannons.iter().all(|c| !c.destroyed));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.effects, ActiveEffects::default());
    }

    #[test]
    fn test_player_explosion_radius_scales_with_area_boost() {
        let mut state = GameState::new(Settings::default(), LevelManager::new());
        assert_eq!(state.player_explosion_radius(), 50.0);
        state.effects.activate(ItemKind::AreaBoost, 10_000);
        assert_eq!(state.player_explosion_radius(), 150.0);
    }

    #[test]
    fn test_rate_boost_shortens_cooldown() {
        let mut state = GameState::new(Settings::default(), LevelManager::new());
        assert_eq!(state.cannon_cooldown_ms(), 500);
        state.effects.activate(ItemKind::RateBoost, 10_000);
        assert_eq!(state.cannon_cooldown_ms(), 100);
    }
}
