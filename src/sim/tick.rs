//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::circle_intersects_rect;
use super::enemy::{Enemy, EnemyKind};
use super::explosion::{Explosion, ExplosionKind};
use super::item::{FloatingText, Item, ItemKind};
use super::level::SpawnOrder;
use super::projectile::{EnemyMissile, PlayerProjectile};
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire request at a field point (click/tap)
    pub fire_at: Option<Vec2>,
    /// Pointer position, kept for rendering cannon orientation
    pub aim: Option<Vec2>,
}

/// Advance the game state by one fixed timestep
///
/// Returns the events raised during the tick. Does nothing once the game is
/// over.
pub fn tick<R: RandomSource>(
    state: &mut GameState,
    rng: &mut R,
    input: &TickInput,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;
    state.time_ms += u64::from(TICK_MS);

    if let Some(aim) = input.aim {
        state.aim = aim;
    }
    if let Some(target) = input.fire_at {
        state.aim = target;
        fire_at(state, target);
    }

    spawn_hostiles(state, rng, &mut events);

    for cannon in &mut state.cannons {
        cannon.update(TICK_MS);
    }

    update_entities(state, rng);
    resolve_collisions(state, &mut events);
    state.purge_dead();
    state.effects.decay(TICK_MS);

    if state.all_buildings_destroyed() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over! Final score: {}", state.score);
        events.push(GameEvent::GameFinished { score: state.score });
    }

    events
}

/// Fire the best ready cannon at `target`
///
/// Candidates are cannons that are standing and off cooldown; the one whose
/// muzzle is closest to the target wins. Returns false (and changes nothing)
/// when no cannon is ready or the game is over.
pub fn fire_at(state: &mut GameState, target: Vec2) -> bool {
    if state.phase == GamePhase::GameOver {
        return false;
    }

    let now = state.time_ms;
    let cooldown = state.cannon_cooldown_ms();

    let chosen = state
        .cannons
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.destroyed && c.can_fire(now, cooldown))
        .min_by(|(_, a), (_, b)| {
            a.muzzle()
                .distance_squared(target)
                .total_cmp(&b.muzzle().distance_squared(target))
        })
        .map(|(i, _)| i);

    let Some(index) = chosen else {
        return false;
    };

    let cannon = &mut state.cannons[index];
    cannon.fire(now);
    let muzzle = cannon.muzzle();
    state.projectiles.push(PlayerProjectile::new(
        muzzle,
        target,
        state.settings.player.projectile_speed,
    ));
    true
}

/// Pick a fire target for demo play: the lowest live missile
pub fn autopilot_target(state: &GameState) -> Option<Vec2> {
    state
        .missiles
        .iter()
        .filter(|m| m.alive)
        .map(|m| m.pos())
        .max_by(|a, b| a.y.total_cmp(&b.y))
}

/// Wave transition or a single spawn
fn spawn_hostiles<R: RandomSource>(
    state: &mut GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if state.levels.is_wave_finished() {
        // The next wave only starts once the field is clear; no spawn this tick
        let clear = state.battlefield_clear();
        if state.levels.advance_if_clear(clear) {
            events.push(GameEvent::WaveStarted {
                level: state.levels.level_index(),
            });
        }
        return;
    }

    let order = state.levels.plan_spawn(
        state.time_ms,
        state.settings.special_spawn_percent,
        rng,
    );
    match order {
        Some(SpawnOrder::Missile { speed }) => spawn_missile(state, rng, speed),
        Some(SpawnOrder::Special(kind)) => spawn_enemy(state, rng, kind),
        None => {}
    }
}

/// Plain missile from the top edge toward a random standing structure
fn spawn_missile<R: RandomSource>(state: &mut GameState, rng: &mut R, speed: f32) {
    let (w, h) = state.viewport();
    let span = w.max(1.0) as u32;
    let start = Vec2::new(rng.below(span) as f32, 0.0);

    let targets: Vec<Vec2> = state
        .buildings
        .iter()
        .filter(|b| !b.destroyed)
        .map(|b| b.center())
        .chain(
            state
                .cannons
                .iter()
                .filter(|c| !c.destroyed)
                .map(|c| c.muzzle()),
        )
        .collect();

    let target = if targets.is_empty() {
        Vec2::new(rng.below(span) as f32, h)
    } else {
        targets[rng.below(targets.len() as u32) as usize]
    };

    log::debug!("Missile spawned at {:?} toward {:?}", start, target);
    state.missiles.push(EnemyMissile::aimed(start, target, speed));
}

fn spawn_enemy<R: RandomSource>(state: &mut GameState, rng: &mut R, kind: EnemyKind) {
    let enemy = Enemy::spawn(kind, state.settings.viewport_width, rng);
    log::debug!("{:?} spawned at {:?}", kind, enemy.pos);
    state.enemies.push(enemy);
}

/// Advance every entity by one tick
fn update_entities<R: RandomSource>(state: &mut GameState, rng: &mut R) {
    let blast_radius = state.player_explosion_radius();
    let growth = state.settings.player.explosion_growth_rate;

    // Shells that reach their target detonate there
    for projectile in &mut state.projectiles {
        if !projectile.alive {
            continue;
        }
        projectile.update();
        if !projectile.alive {
            state.explosions.push(Explosion::new(
                ExplosionKind::Player,
                projectile.target(),
                blast_radius,
                growth,
            ));
        }
    }

    for explosion in &mut state.explosions {
        explosion.update();
    }

    let mut fired = Vec::new();
    for enemy in &mut state.enemies {
        fired.extend(enemy.update(TICK_MS));
    }
    state.missiles.extend(fired);

    for missile in &mut state.missiles {
        missile.update();
    }

    let width = state.settings.viewport_width;
    if rng.below(1000) < state.settings.item_spawn_per_mille {
        let kind = if rng.below(2) == 0 {
            ItemKind::AreaBoost
        } else {
            ItemKind::RateBoost
        };
        let item = Item::spawn(kind, width, rng);
        log::debug!("{:?} item spawned at {:?}", kind, item.pos);
        state.items.push(item);
    }
    for item in &mut state.items {
        item.update(width);
    }

    for text in &mut state.floating_texts {
        text.update();
    }
}

/// Explosions against hostiles and items, then missiles against structures
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut blasts = Vec::new();

    for explosion in state.explosions.iter().filter(|e| e.alive) {
        let (center, radius) = (explosion.center, explosion.radius);

        for missile in state.missiles.iter_mut().filter(|m| m.alive) {
            if circle_intersects_rect(center, radius, &missile.hitbox()) {
                missile.alive = false;
                state.score += MISSILE_KILL_SCORE;
            }
        }

        for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
            if !circle_intersects_rect(center, radius, &enemy.hitbox()) {
                continue;
            }
            enemy.take_hit();
            if !enemy.alive {
                let score = enemy.kind.kill_score();
                state.score += score;
                blasts.push(Explosion::fixed(ExplosionKind::EnemyKill, enemy.pos));
                state
                    .floating_texts
                    .push(FloatingText::new(enemy.pos, format!("+{score}"), 0xFFFFFF));
                log::info!("{:?} destroyed (+{})", enemy.kind, score);
                events.push(GameEvent::EnemyDestroyed {
                    kind: enemy.kind,
                    score,
                });
            }
        }

        for item in state.items.iter_mut().filter(|i| i.alive) {
            if circle_intersects_rect(center, radius, &item.hitbox()) {
                item.alive = false;
                state
                    .effects
                    .activate(item.kind, state.settings.item_duration_ms);
                state.floating_texts.push(FloatingText::new(
                    item.pos,
                    item.kind.banner(),
                    item.kind.color(),
                ));
                log::info!("{:?} activated", item.kind);
                events.push(GameEvent::ItemActivated { kind: item.kind });
            }
        }
    }

    // Each missile is consumed by the first structure it lands in
    for missile in state.missiles.iter_mut().filter(|m| m.alive) {
        let pos = missile.pos();

        if let Some((index, building)) = state
            .buildings
            .iter_mut()
            .enumerate()
            .find(|(_, b)| !b.destroyed && b.rect.contains(pos))
        {
            building.take_hit();
            missile.alive = false;
            blasts.push(Explosion::fixed(ExplosionKind::BuildingImpact, pos));
            log::info!("Building {} destroyed", index);
            events.push(GameEvent::BuildingDestroyed { index });
            continue;
        }

        if let Some((index, cannon)) = state
            .cannons
            .iter_mut()
            .enumerate()
            .find(|(_, c)| !c.destroyed && c.hitbox.contains(pos))
        {
            cannon.take_hit();
            missile.alive = false;
            blasts.push(Explosion::fixed(ExplosionKind::CannonImpact, pos));
            log::info!("Cannon {} destroyed", index);
            events.push(GameEvent::CannonDestroyed { index });
        }
    }

    state.explosions.extend(blasts);
}
