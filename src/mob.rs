//! wandering NPCs and their per‑turn movement
use rand::Rng;
use serde::Deserialize;

use crate::config::MobConfig;
use crate::terrain::{Terrain, TileImage, TilePos};

/// movement policy, picked from the config `type` field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum MobBehavior {
    /// one axis per turn
    #[serde(rename = "animal")]
    Wanderer,
    /// both axes at once, diagonals allowed
    #[serde(rename = "fast_animal")]
    Erratic,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mob {
    pub name: String,
    pub image: TileImage,
    pub pos: TilePos,
    pub health: i32,
    pub tangible: bool,
    pub behavior: MobBehavior,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blocked {
    OutOfBounds,
    Player,
    Solid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// rolled a zero step
    Idle,
    Moved { dx: i32, dy: i32 },
    Blocked(Blocked),
}

impl Mob {
    pub fn from_config(cfg: &MobConfig, pos: TilePos) -> Self {
        Self {
            name: cfg.name.clone(),
            image: cfg.image(),
            pos,
            health: cfg.health,
            tangible: cfg.tangible,
            behavior: cfg.behavior,
        }
    }

    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
    }

    pub fn plan_step<R: Rng>(&self, rng: &mut R) -> (i32, i32) {
        match self.behavior {
            MobBehavior::Wanderer => {
                let m = rng.gen_range(-1..=1);
                if rng.gen_bool(0.5) {
                    (m, 0)
                } else {
                    (0, m)
                }
            }
            MobBehavior::Erratic => (rng.gen_range(-1..=1), rng.gen_range(-1..=1)),
        }
    }

    /// roll a step and take it if the destination is free
    pub fn take_turn<R: Rng>(&mut self, terrain: &Terrain, player: TilePos, rng: &mut R) -> StepOutcome {
        let (dx, dy) = self.plan_step(rng);
        if dx == 0 && dy == 0 {
            return StepOutcome::Idle;
        }
        let dest = self.pos.offset(dx, dy);

        let Some(tile) = terrain.get(dest) else {
            return StepOutcome::Blocked(Blocked::OutOfBounds);
        };
        if dest == player {
            return StepOutcome::Blocked(Blocked::Player);
        }
        if tile.tangible {
            return StepOutcome::Blocked(Blocked::Solid);
        }

        self.pos = dest;
        StepOutcome::Moved { dx, dy }
    }
}
