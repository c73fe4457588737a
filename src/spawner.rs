//! initial mob population
use bevy::prelude::*;
use rand::Rng;

use crate::config::MobConfig;
use crate::constants::{SPAWN_HIT, SPAWN_WEIGHT_MAX};
use crate::mob::Mob;
use crate::terrain::Terrain;

/// weight 100 always spawns; otherwise `randint(0, 100 - weight) == 1`
pub fn spawn_roll<R: Rng>(weight: u32, rng: &mut R) -> bool {
    if weight >= SPAWN_WEIGHT_MAX {
        return true;
    }
    rng.gen_range(0..=SPAWN_WEIGHT_MAX - weight) == SPAWN_HIT
}

/// one roll per (cell, mob type); different types may share a cell
pub fn spawn_mobs<R: Rng>(terrain: &Terrain, mobs: &[MobConfig], rng: &mut R) -> Vec<Mob> {
    let mut spawned = Vec::new();
    for tile in terrain.tiles() {
        for cfg in mobs {
            let Some(&weight) = cfg.spawn.get(&tile.name) else { continue };
            if spawn_roll(weight, rng) {
                spawned.push(Mob::from_config(cfg, tile.pos));
            }
        }
    }
    info!("spawned {} mobs", spawned.len());
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures;
    use crate::terrain::tests::rule;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn full_weight_always_spawns() {
        let mut rng = StdRng::seed_from_u64(20);
        assert!((0..1_000).all(|_| spawn_roll(100, &mut rng)));
    }

    #[test]
    fn zero_weight_is_about_one_percent() {
        let mut rng = StdRng::seed_from_u64(21);
        let trials = 200_000;
        let hits = (0..trials).filter(|_| spawn_roll(0, &mut rng)).count();
        let rate = hits as f64 / trials as f64;
        // expected 1/101
        assert!((0.0085..0.0115).contains(&rate), "rate {rate}");
    }

    #[test]
    fn higher_weight_spawns_more_often() {
        let mut rng = StdRng::seed_from_u64(22);
        let low = (0..20_000).filter(|_| spawn_roll(10, &mut rng)).count();
        let high = (0..20_000).filter(|_| spawn_roll(90, &mut rng)).count();
        assert!(high > low * 5);
    }

    #[test]
    fn mob_types_stack_and_respect_terrain() {
        let mut cfg = fixtures::config();
        for m in &mut cfg.mobs {
            m.spawn.insert("grass".into(), 100);
        }
        let grass = Terrain::filled(3, 2, 2, &rule("grass", 0, 255, false));
        let mut rng = StdRng::seed_from_u64(23);
        let mobs = spawn_mobs(&grass, &cfg.mobs, &mut rng);
        assert_eq!(mobs.len(), 3 * 2 * 2 * cfg.mobs.len());
        assert_eq!(mobs[0].pos, mobs[1].pos);
        assert_ne!(mobs[0].behavior, mobs[1].behavior);

        let rock = Terrain::filled(3, 2, 2, &rule("rock", 0, 255, true));
        assert!(spawn_mobs(&rock, &cfg.mobs, &mut rng).is_empty());
    }
}
