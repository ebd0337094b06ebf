//! Power-up items, their timed effects, and floating text annotations

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::rng::RandomSource;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Player explosions grow larger
    AreaBoost,
    /// Cannons cool down faster
    RateBoost,
}

impl ItemKind {
    /// Banner shown when collected
    pub fn banner(self) -> &'static str {
        match self {
            ItemKind::AreaBoost => "BIG BOOM!",
            ItemKind::RateBoost => "RAPID FIRE!",
        }
    }

    /// Banner color (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            ItemKind::AreaBoost => 0xFFFF00,
            ItemKind::RateBoost => 0x00FFFF,
        }
    }
}

/// An item drifting across the field, collected by shooting it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
}

impl Item {
    /// Spawn at a random side and height
    pub fn spawn(kind: ItemKind, viewport_width: f32, rng: &mut impl RandomSource) -> Self {
        let from_left = rng.next_f32() < 0.5;
        let y = ITEM_MIN_Y + rng.below(ITEM_Y_RANGE) as f32;
        let (x, vx) = if from_left {
            (-ITEM_ENTRY_MARGIN, ITEM_SPEED)
        } else {
            (viewport_width + ITEM_ENTRY_MARGIN, -ITEM_SPEED)
        };
        Self {
            kind,
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, 0.0),
            alive: true,
        }
    }

    /// Drift; dies once well outside the viewport
    pub fn update(&mut self, viewport_width: f32) {
        if !self.alive {
            return;
        }
        self.pos += self.vel;
        if self.pos.x < -ITEM_EXIT_MARGIN || self.pos.x > viewport_width + ITEM_EXIT_MARGIN {
            self.alive = false;
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center_size(self.pos, Vec2::splat(ITEM_SIZE))
    }
}

/// Remaining time of each global item effect
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub area_boost_ms: u32,
    pub rate_boost_ms: u32,
}

impl ActiveEffects {
    /// Start (or refresh) an effect at full duration
    pub fn activate(&mut self, kind: ItemKind, duration_ms: u32) {
        match kind {
            ItemKind::AreaBoost => self.area_boost_ms = duration_ms,
            ItemKind::RateBoost => self.rate_boost_ms = duration_ms,
        }
    }

    pub fn decay(&mut self, dt_ms: u32) {
        self.area_boost_ms = self.area_boost_ms.saturating_sub(dt_ms);
        self.rate_boost_ms = self.rate_boost_ms.saturating_sub(dt_ms);
    }

    #[inline]
    pub fn area_boost_active(&self) -> bool {
        self.area_boost_ms > 0
    }

    #[inline]
    pub fn rate_boost_active(&self) -> bool {
        self.rate_boost_ms > 0
    }

    /// Factor applied to player explosion radius right now
    pub fn explosion_radius_multiplier(&self, boost_factor: f32) -> f32 {
        if self.area_boost_active() {
            boost_factor
        } else {
            1.0
        }
    }
}

/// Short-lived text drawn over the field (display only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    /// 0xRRGGBB
    pub color: u32,
    /// Frames left before it disappears
    pub ttl_frames: u32,
}

impl FloatingText {
    pub fn new(pos: Vec2, text: impl Into<String>, color: u32) -> Self {
        Self {
            pos,
            text: text.into(),
            color,
            ttl_frames: FLOATING_TEXT_FRAMES,
        }
    }

    pub fn update(&mut self) {
        self.ttl_frames = self.ttl_frames.saturating_sub(1);
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.ttl_frames > 0
    }

    /// Opacity in [0, 1] for fading out
    pub fn alpha(&self) -> f32 {
        self.ttl_frames as f32 / FLOATING_TEXT_FRAMES as f32
    }
}
