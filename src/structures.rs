//! multi‑floor tile structures (stairwells)
//!
//! Placement is two‑pass: every trigger is decided against the classified
//! grid first, then pairs are written.  A pair whose cells were already
//! claimed by an earlier pair is dropped, so each stairwell ends up with
//! exactly one partner on a neighbouring floor pointing back at it.
use std::collections::HashSet;

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

use crate::config::{StructureRule, StructureTrigger};
use crate::constants::STRUCTURE_HIT;
use crate::terrain::{StairDirection, Terrain, Tile, TilePos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Stairwell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StairPlacement {
    pub at: TilePos,
    pub direction: StairDirection,
}

impl StairPlacement {
    pub const fn partner(&self) -> TilePos {
        TilePos::new(self.at.x, self.at.y, self.at.z + self.direction.dz())
    }
}

/// `randint(1, range - chance) == 1`
pub fn triggers<R: Rng>(trigger: StructureTrigger, rng: &mut R) -> bool {
    match trigger {
        StructureTrigger::Randint { range, chance } => {
            let upper = range.saturating_sub(chance).max(1);
            rng.gen_range(1..=upper) == STRUCTURE_HIT
        }
    }
}

/// the direction a new stairwell may link; boundary floors have one choice
pub fn stair_direction<R: Rng>(z: usize, depth: usize, rng: &mut R) -> Option<StairDirection> {
    match (z, depth) {
        (_, 0 | 1) => None,
        (0, _) => Some(StairDirection::Up),
        (z, d) if z == d - 1 => Some(StairDirection::Down),
        _ if rng.gen_bool(0.5) => Some(StairDirection::Up),
        _ => Some(StairDirection::Down),
    }
}

/* ---------- pass 1: decide ---------- */
pub fn plan_stairwells<R: Rng>(
    terrain: &Terrain,
    rule: &StructureRule,
    rng: &mut R,
) -> Vec<StairPlacement> {
    let mut plan = Vec::new();
    for tile in terrain.tiles() {
        if !rule.allowed_tiles.iter().any(|name| *name == tile.name) {
            continue;
        }
        if !triggers(rule.random, rng) {
            continue;
        }
        if let Some(direction) = stair_direction(tile.pos.z as usize, terrain.depth, rng) {
            plan.push(StairPlacement { at: tile.pos, direction });
        }
    }
    plan
}

/* ---------- pass 2: apply ---------- */
/// returns the placements that were actually written
pub fn apply_stairwells(
    terrain: &mut Terrain,
    rule: &StructureRule,
    plan: &[StairPlacement],
) -> Vec<StairPlacement> {
    let mut claimed = HashSet::new();
    let mut placed = Vec::with_capacity(plan.len());

    for p in plan {
        let partner = p.partner();
        if !terrain.contains(partner) || claimed.contains(&p.at) || claimed.contains(&partner) {
            continue;
        }
        claimed.insert(p.at);
        claimed.insert(partner);

        terrain.set(p.at, stair_tile(rule, p.at, p.direction));
        terrain.set(partner, stair_tile(rule, partner, p.direction.opposite()));
        placed.push(*p);
    }
    placed
}

fn stair_tile(rule: &StructureRule, pos: TilePos, direction: StairDirection) -> Tile {
    Tile {
        name: rule.tile.name.clone(),
        pos,
        tangible: rule.tile.tangible,
        image: Some(rule.tile.image),
        stairwell: Some(direction),
    }
}

/// run every configured structure rule over the grid
pub fn place_structures<R: Rng>(terrain: &mut Terrain, rules: &[StructureRule], rng: &mut R) -> usize {
    let mut total = 0;
    for rule in rules {
        match rule.name {
            StructureKind::Stairwell => {
                let plan = plan_stairwells(terrain, rule, rng);
                let placed = apply_stairwells(terrain, rule, &plan);
                debug!("stairwells: {} planned, {} placed", plan.len(), placed.len());
                total += placed.len();
            }
        }
    }
    info!("placed {total} tile structures");
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{fixtures, StructureTile};
    use crate::terrain::tests::rule as terrain_rule;
    use crate::terrain::TileImage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stair_rule(range: u32, chance: u32) -> StructureRule {
        StructureRule {
            name: StructureKind::Stairwell,
            random: StructureTrigger::Randint { range, chance },
            allowed_tiles: vec!["grass".into()],
            tile: StructureTile {
                name: "stairwell".into(),
                tangible: false,
                image: TileImage { x: 3, y: 0 },
            },
        }
    }

    fn grass(w: usize, h: usize, d: usize) -> Terrain {
        Terrain::filled(w, h, d, &terrain_rule("grass", 0, 255, false))
    }

    /// every stairwell's partner exists, is a stairwell and points back
    fn assert_paired(t: &Terrain) {
        for tile in t.tiles() {
            let Some(dir) = tile.stairwell else { continue };
            let target = TilePos::new(tile.pos.x, tile.pos.y, tile.pos.z + dir.dz());
            let other = t.get(target).expect("stairwell leads off the world");
            assert_eq!(other.stairwell, Some(dir.opposite()), "unpaired at {:?}", tile.pos);
        }
    }

    #[test]
    fn boundary_floors_have_forced_directions() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(stair_direction(0, 4, &mut rng), Some(StairDirection::Up));
            assert_eq!(stair_direction(3, 4, &mut rng), Some(StairDirection::Down));
        }
        assert_eq!(stair_direction(0, 1, &mut rng), None);
    }

    #[test]
    fn range_one_above_chance_always_triggers() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!((0..100).all(|_| triggers(StructureTrigger::Randint { range: 11, chance: 10 }, &mut rng)));
    }

    #[test]
    fn dense_placement_keeps_every_pair_consistent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut t = grass(8, 8, 5);
        let placed = place_structures(&mut t, &[stair_rule(3, 0)], &mut rng);
        assert!(placed > 0);
        assert_paired(&t);
        assert_eq!(t.tiles().filter(|t| t.stairwell.is_some()).count(), placed * 2);
    }

    #[test]
    fn single_floor_world_gets_no_stairwells() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut t = grass(4, 4, 1);
        assert_eq!(place_structures(&mut t, &[stair_rule(2, 1)], &mut rng), 0);
    }

    #[test]
    fn only_allowed_terrain_is_considered() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut t = Terrain::filled(4, 4, 3, &terrain_rule("rock", 0, 255, true));
        assert_eq!(place_structures(&mut t, &[stair_rule(2, 1)], &mut rng), 0);
    }

    #[test]
    fn conflicting_plans_are_dropped() {
        let rule = stair_rule(2, 1);
        let mut t = grass(1, 1, 3);
        let plan = [
            StairPlacement { at: TilePos::new(0, 0, 0), direction: StairDirection::Up },
            StairPlacement { at: TilePos::new(0, 0, 2), direction: StairDirection::Down },
        ];
        let placed = apply_stairwells(&mut t, &rule, &plan);
        assert_eq!(placed, vec![plan[0]]);
        assert_eq!(t.get(TilePos::new(0, 0, 2)).unwrap().stairwell, None);
        assert_paired(&t);
    }

    #[test]
    fn fixture_rule_places_pairs_on_mixed_terrain() {
        let cfg = fixtures::config();
        let mut rng = StdRng::seed_from_u64(6);
        let mut t = grass(16, 12, 3);
        place_structures(&mut t, &cfg.tile_structures, &mut rng);
        assert_paired(&t);
    }
}
