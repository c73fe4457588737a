//! the player: position, stats, inventory and selection
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::items::{Inventory, InventorySlot};
use crate::mob::Mob;
use crate::terrain::{Terrain, TileImage, TilePos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Stats {
    pub health: i32,
    pub strength: i32,
    pub agility: i32,
    pub dexterity: i32,
    pub intelligence: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            health: 20,
            strength: 5,
            agility: 5,
            dexterity: 5,
            intelligence: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: TilePos,
    pub image: TileImage,
    pub exp: u32,
    pub stats: Stats,
    pub inventory: Inventory,
    /// index into `inventory`
    pub selected: Option<usize>,
}

impl Player {
    pub fn new(pos: TilePos, image: TileImage, stats: Stats) -> Self {
        Self {
            pos,
            image,
            exp: 0,
            stats,
            inventory: Inventory::starting(),
            selected: None,
        }
    }

    pub fn selected_slot(&self) -> Option<&InventorySlot> {
        self.selected.and_then(|i| self.inventory.get(i))
    }
}

/// random passable cell on the surface floor that no tangible mob holds
pub fn pick_spawn<R: Rng>(terrain: &Terrain, mobs: &[Mob], rng: &mut R) -> Option<TilePos> {
    let open: Vec<TilePos> = terrain
        .floor(terrain.surface())
        .filter(|t| !t.tangible)
        .map(|t| t.pos)
        .filter(|&p| !mobs.iter().any(|m| m.tangible && m.pos == p))
        .collect();
    open.choose(rng).copied()
}
