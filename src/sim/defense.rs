//! Static defenses: cannons and buildings
//!
//! Cannons go down for a while when hit and come back on their own.
//! Buildings stay destroyed for the rest of the game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// A player cannon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    /// Base-center position
    pub pos: Vec2,
    /// Hitbox standing on `pos`
    pub hitbox: Rect,
    /// Simulation time of the last shot
    pub last_fire_ms: i64,
    pub destroyed: bool,
    /// Time left until the cannon is back; nonzero only while destroyed
    pub respawn_timer_ms: u32,
}

impl Cannon {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            hitbox: Rect::from_bottom_center(pos, Vec2::new(CANNON_WIDTH, CANNON_HEIGHT)),
            last_fire_ms: CANNON_INITIAL_LAST_FIRE_MS,
            destroyed: false,
            respawn_timer_ms: 0,
        }
    }

    /// Where projectiles leave from and where targeting distance is measured
    #[inline]
    pub fn muzzle(&self) -> Vec2 {
        self.hitbox.center()
    }

    /// Alive and off cooldown
    pub fn can_fire(&self, now_ms: u64, cooldown_ms: u32) -> bool {
        !self.destroyed && now_ms as i64 - self.last_fire_ms > i64::from(cooldown_ms)
    }

    pub fn fire(&mut self, now_ms: u64) {
        self.last_fire_ms = now_ms as i64;
    }

    /// Knock the cannon out; ignored while it is already down
    pub fn take_hit(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.respawn_timer_ms = RESPAWN_TIME_MS;
    }

    /// Count down the respawn timer
    pub fn update(&mut self, dt_ms: u32) {
        if !self.destroyed {
            return;
        }
        self.respawn_timer_ms = self.respawn_timer_ms.saturating_sub(dt_ms);
        if self.respawn_timer_ms == 0 {
            self.destroyed = false;
        }
    }
}

/// A building the player defends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub rect: Rect,
    pub destroyed: bool,
}

impl Building {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            destroyed: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn take_hit(&mut self) {
        self.destroyed = true;
    }
}

/// Place the cannons along the bottom edge of the viewport
pub fn layout_cannons(width: f32, height: f32) -> Vec<Cannon> {
    CANNON_ANCHORS
        .iter()
        .map(|&fx| Cannon::new(Vec2::new(width * fx, height)))
        .collect()
}

/// Pack buildings evenly into each gap between neighbouring cannons
///
/// Layout: [C0] B B B [C1] B B B [C2]
pub fn layout_buildings(cannons: &[Cannon], height: f32) -> Vec<Building> {
    let top = height - BUILDING_HEIGHT;
    let per_zone = BUILDINGS_PER_ZONE as f32;

    cannons
        .windows(2)
        .flat_map(|pair| {
            let zone_start = pair[0].hitbox.right();
            let zone_width = pair[1].hitbox.left() - zone_start;
            let gap = (zone_width - BUILDING_WIDTH * per_zone) / (per_zone + 1.0);

            (0..BUILDINGS_PER_ZONE).map(move |i| {
                let x = zone_start + gap + i as f32 * (BUILDING_WIDTH + gap);
                Building::new(Rect::from_xywh(x, top, BUILDING_WIDTH, BUILDING_HEIGHT))
            })
        })
        .collect()
}
