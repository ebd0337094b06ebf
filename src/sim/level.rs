//! Wave progression
//!
//! A wave is active while it still has spawns left, finished once its
//! counter reaches zero. Moving on to the next wave also needs a clear
//! battlefield, which only the caller knows about. When the predefined
//! waves run out, harder waves are generated forever.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enemy::EnemyKind;
use super::rng::RandomSource;
use crate::consts::{SPAWN_JITTER_MIN, SPAWN_JITTER_SPAN};

/// Shortest spawn interval procedural waves can reach (seconds)
pub const MIN_SPAWN_INTERVAL_SECS: f32 = 0.2;

/// Failure to load wave definitions
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read wave file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse wave list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("wave list is empty")]
    Empty,
}

/// Parameters of one wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveData {
    pub level: u32,
    /// Spawns (missiles and specials together) left in this wave
    pub total_enemies: u32,
    /// Seconds between spawns before jitter
    #[serde(rename = "spawnInterval")]
    pub spawn_interval_secs: f32,
    /// Plain missile speed (pixels per tick)
    pub missile_speed: f32,
    /// Special enemies left in this wave
    pub special_enemy_count: u32,
}

impl WaveData {
    pub fn new(
        level: u32,
        total_enemies: u32,
        spawn_interval_secs: f32,
        missile_speed: f32,
        special_enemy_count: u32,
    ) -> Self {
        Self {
            level,
            total_enemies,
            spawn_interval_secs,
            missile_speed,
            special_enemy_count,
        }
    }

    /// Built-in wave used when no wave list is available
    pub fn default_wave() -> Self {
        Self::new(1, 10, 2.0, 3.0, 0)
    }

    /// The next procedural wave after this one
    pub fn escalated(&self) -> Self {
        Self {
            level: self.level + 1,
            total_enemies: self.total_enemies + 5,
            spawn_interval_secs: (self.spawn_interval_secs * 0.9).max(MIN_SPAWN_INTERVAL_SECS),
            missile_speed: self.missile_speed * 1.1,
            special_enemy_count: self.special_enemy_count + 1,
        }
    }
}

/// Wave state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePhase {
    Active {
        total_remaining: u32,
        special_remaining: u32,
    },
    Finished,
}

/// What the spawner should create this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnOrder {
    /// A plain missile at the wave's missile speed
    Missile { speed: f32 },
    /// A special enemy
    Special(EnemyKind),
}

/// Tracks the active wave and decides when and what to spawn
#[derive(Debug, Clone)]
pub struct LevelManager {
    waves: Vec<WaveData>,
    start_index: usize,
    index: usize,
    /// Live counters of the active wave
    current: WaveData,
    /// Simulation time of the next allowed spawn
    next_spawn_ms: u64,
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelManager {
    /// Manager running the built-in default wave
    pub fn new() -> Self {
        let wave = WaveData::default_wave();
        Self {
            waves: Vec::new(),
            start_index: 0,
            index: 0,
            current: wave,
            next_spawn_ms: 0,
        }
    }

    /// Manager over a predefined wave list, starting at `start_index`
    ///
    /// An out-of-range start index is clamped to the last wave.
    pub fn with_waves(waves: Vec<WaveData>, start_index: usize) -> Result<Self, LevelError> {
        if waves.is_empty() {
            return Err(LevelError::Empty);
        }
        let start = if start_index >= waves.len() {
            log::warn!(
                "Start wave {} out of range ({} waves), using the last one",
                start_index,
                waves.len()
            );
            waves.len() - 1
        } else {
            start_index
        };
        let wave = waves[start].clone();
        log::info!("Waves loaded: {}, starting at index {}", waves.len(), start);
        Ok(Self {
            waves,
            start_index: start,
            index: start,
            current: wave,
            next_spawn_ms: 0,
        })
    }

    /// Parse a JSON array of wave records
    pub fn from_json_str(json: &str, start_index: usize) -> Result<Self, LevelError> {
        let waves: Vec<WaveData> = serde_json::from_str(json)?;
        Self::with_waves(waves, start_index)
    }

    /// Load a JSON wave file
    pub fn load_file(path: impl AsRef<Path>, start_index: usize) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json, start_index)
    }

    /// Load a JSON wave file, falling back to the built-in wave on any failure
    pub fn load_or_default(path: impl AsRef<Path>, start_index: usize) -> Self {
        match Self::load_file(path, start_index) {
            Ok(manager) => manager,
            Err(e) => {
                log::warn!("Failed to load levels ({}), using default wave", e);
                Self::new()
            }
        }
    }

    /// Back to the starting wave with fresh counters
    pub fn reset(&mut self) {
        self.index = self.start_index;
        self.current = self
            .waves
            .get(self.start_index)
            .cloned()
            .unwrap_or_else(WaveData::default_wave);
        self.next_spawn_ms = 0;
    }

    /// Live counters of the active wave
    pub fn current_wave(&self) -> &WaveData {
        &self.current
    }

    pub fn level_index(&self) -> u32 {
        self.current.level
    }

    pub fn remaining_enemies(&self) -> u32 {
        self.current.total_enemies
    }

    pub fn remaining_special(&self) -> u32 {
        self.current.special_enemy_count
    }

    pub fn next_spawn_ms(&self) -> u64 {
        self.next_spawn_ms
    }

    pub fn decrease_enemy_count(&mut self) {
        self.current.total_enemies = self.current.total_enemies.saturating_sub(1);
    }

    pub fn decrease_special_count(&mut self) {
        self.current.special_enemy_count = self.current.special_enemy_count.saturating_sub(1);
    }

    /// All spawns of this wave are out
    pub fn is_wave_finished(&self) -> bool {
        self.current.total_enemies == 0
    }

    pub fn phase(&self) -> WavePhase {
        if self.is_wave_finished() {
            WavePhase::Finished
        } else {
            WavePhase::Active {
                total_remaining: self.current.total_enemies,
                special_remaining: self.current.special_enemy_count,
            }
        }
    }

    /// Load the next wave: the next predefined one verbatim, or the live
    /// counters escalated in place (leftover specials carry over)
    pub fn next_wave(&mut self) {
        self.index += 1;
        self.current = match self.waves.get(self.index) {
            Some(wave) => {
                log::info!("Level up! Now level {}", wave.level);
                wave.clone()
            }
            None => {
                let wave = self.current.escalated();
                log::info!("Infinite mode! Procedural level {}", wave.level);
                wave
            }
        };
    }

    /// Start the next wave if this one is finished and the field is clear
    ///
    /// Returns true when a new wave began.
    pub fn advance_if_clear(&mut self, battlefield_clear: bool) -> bool {
        if self.is_wave_finished() && battlefield_clear {
            self.next_wave();
            true
        } else {
            false
        }
    }

    /// Decide what to spawn at `now_ms`, if anything
    ///
    /// Only spawns while the wave is active and the spawn deadline has passed.
    /// Each spawn consumes one from the wave total; specials also consume one
    /// from the special quota. The next deadline is jittered to [0.8, 1.2) of
    /// the wave interval.
    pub fn plan_spawn(
        &mut self,
        now_ms: u64,
        special_percent: u32,
        rng: &mut impl RandomSource,
    ) -> Option<SpawnOrder> {
        if self.is_wave_finished() || now_ms < self.next_spawn_ms {
            return None;
        }

        let jitter = rng.range_f32(SPAWN_JITTER_MIN, SPAWN_JITTER_SPAN);
        let delay_ms = self.current.spawn_interval_secs * 1000.0 * jitter;
        self.next_spawn_ms = now_ms + delay_ms.max(0.0) as u64;

        let special = self.remaining_special() > 0 && rng.percent(special_percent);

        let order = if special {
            let kind = EnemyKind::from_roll(rng.below(EnemyKind::ALL.len() as u32));
            self.decrease_special_count();
            SpawnOrder::Special(kind)
        } else {
            SpawnOrder::Missile {
                speed: self.current.missile_speed,
            }
        };
        self.decrease_enemy_count();
        Some(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    fn three_waves() -> Vec<WaveData> {
        vec![
            WaveData::new(1, 5, 2.0, 2.0, 0),
            WaveData::new(2, 8, 1.5, 2.5, 1),
            WaveData::new(3, 12, 1.0, 3.0, 2),
        ]
    }

    #[test]
    fn test_default_wave() {
        let lm = LevelManager::new();
        assert_eq!(lm.current_wave(), &WaveData::new(1, 10, 2.0, 3.0, 0));
        assert!(!lm.is_wave_finished());
    }

    #[test]
    fn test_json_keys() {
        let json = r#"[
            {"level": 1, "totalEnemies": 4, "spawnInterval": 1.5, "missileSpeed": 2.5, "specialEnemyCount": 1},
            {"level": 2, "totalEnemies": 6, "spawnInterval": 1.2, "missileSpeed": 3.0, "specialEnemyCount": 2}
        ]"#;
        let lm = LevelManager::from_json_str(json, 0).unwrap();
        assert_eq!(lm.current_wave(), &WaveData::new(1, 4, 1.5, 2.5, 1));
    }

    #[test]
    fn test_start_index_is_honored_and_clamped() {
        let lm = LevelManager::with_waves(three_waves(), 2).unwrap();
        assert_eq!(lm.level_index(), 3);

        let lm = LevelManager::with_waves(three_waves(), 10).unwrap();
        assert_eq!(lm.level_index(), 3);
    }

    #[test]
    fn test_empty_list_is_error() {
        assert!(matches!(
            LevelManager::with_waves(Vec::new(), 0),
            Err(LevelError::Empty)
        ));
        assert!(matches!(
            LevelManager::from_json_str("{}", 0),
            Err(LevelError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let lm = LevelManager::load_or_default("/no/such/level.json", 2);
        assert_eq!(lm.current_wave(), &WaveData::default_wave());
    }

    #[test]
    fn test_counters_clamp_at_zero() {
        let mut lm = LevelManager::with_waves(vec![WaveData::new(1, 1, 1.0, 1.0, 0)], 0).unwrap();
        lm.decrease_enemy_count();
        lm.decrease_enemy_count();
        lm.decrease_special_count();
        assert_eq!(lm.remaining_enemies(), 0);
        assert_eq!(lm.remaining_special(), 0);
        assert!(lm.is_wave_finished());
        assert_eq!(lm.phase(), WavePhase::Finished);
    }

    #[test]
    fn test_next_wave_verbatim_then_procedural() {
        let mut lm = LevelManager::with_waves(three_waves(), 1).unwrap();
        lm.decrease_enemy_count();

        lm.next_wave();
        assert_eq!(lm.current_wave(), &three_waves()[2]);

        // Exhausted: deltas apply to the drained live counters
        for _ in 0..12 {
            lm.decrease_enemy_count();
        }
        lm.next_wave();
        let w = lm.current_wave();
        assert_eq!(w.level, 4);
        assert_eq!(w.total_enemies, 5);
        assert_eq!(w.special_enemy_count, 3);
        assert!((w.missile_speed - 3.3).abs() < 1e-5);
        assert!((w.spawn_interval_secs - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_leftover_specials_carry_into_procedural_wave() {
        let mut lm = LevelManager::with_waves(vec![WaveData::new(1, 10, 2.0, 3.0, 2)], 0).unwrap();
        for _ in 0..10 {
            lm.decrease_enemy_count();
        }
        lm.next_wave();
        let w = lm.current_wave();
        assert_eq!(w.level, 2);
        assert_eq!(w.total_enemies, 5);
        assert_eq!(w.special_enemy_count, 3);
    }

    #[test]
    fn test_procedural_interval_floor() {
        let mut lm = LevelManager::with_waves(vec![WaveData::new(1, 1, 0.21, 1.0, 0)], 0).unwrap();
        lm.next_wave();
        assert_eq!(lm.current_wave().spawn_interval_secs, MIN_SPAWN_INTERVAL_SECS);
        lm.next_wave();
        assert_eq!(lm.current_wave().spawn_interval_secs, MIN_SPAWN_INTERVAL_SECS);
    }

    #[test]
    fn test_advance_needs_clear_field() {
        let mut lm = LevelManager::with_waves(three_waves(), 0).unwrap();
        assert!(!lm.advance_if_clear(true)); // still active

        for _ in 0..5 {
            lm.decrease_enemy_count();
        }
        assert!(!lm.advance_if_clear(false));
        assert_eq!(lm.level_index(), 1);
        assert!(lm.advance_if_clear(true));
        assert_eq!(lm.level_index(), 2);
    }

    #[test]
    fn test_plan_spawn_timing_and_counters() {
        let mut lm = LevelManager::with_waves(vec![WaveData::new(1, 2, 2.0, 3.5, 0)], 0).unwrap();
        // jitter 0.8 + 0.5 * 0.4 = 1.0
        let mut rng = ScriptedRng::new(vec![0.5], vec![0]);

        let order = lm.plan_spawn(0, 40, &mut rng);
        assert_eq!(order, Some(SpawnOrder::Missile { speed: 3.5 }));
        assert_eq!(lm.remaining_enemies(), 1);
        assert_eq!(lm.next_spawn_ms(), 2000);

        assert_eq!(lm.plan_spawn(1999, 40, &mut rng), None);
        assert!(lm.plan_spawn(2000, 40, &mut rng).is_some());
        assert!(lm.is_wave_finished());
        assert_eq!(lm.plan_spawn(10_000, 40, &mut rng), None);
    }

    #[test]
    fn test_plan_spawn_special() {
        let mut lm = LevelManager::with_waves(vec![WaveData::new(1, 3, 1.0, 2.0, 1)], 0).unwrap();
        // percent roll 10 < 40 -> special; kind roll 1 -> boss
        let mut rng = ScriptedRng::new(vec![0.0], vec![10, 1]);
        let order = lm.plan_spawn(0, 40, &mut rng);
        assert_eq!(order, Some(SpawnOrder::Special(EnemyKind::TripleBoss)));
        assert_eq!(lm.remaining_enemies(), 2);
        assert_eq!(lm.remaining_special(), 0);

        // Quota used up: missiles only even with a winning roll
        let order = lm.plan_spawn(lm.next_spawn_ms(), 40, &mut rng);
        assert!(matches!(order, Some(SpawnOrder::Missile { .. })));
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut lm = LevelManager::with_waves(three_waves(), 1).unwrap();
        lm.next_wave();
        lm.next_wave();
        lm.reset();
        assert_eq!(lm.current_wave(), &three_waves()[1]);
        assert_eq!(lm.next_spawn_ms(), 0);
    }
}
