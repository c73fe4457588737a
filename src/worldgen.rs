//! full setup pipeline: noise → terrain → structures → mobs → player
use bevy::prelude::*;
use noise::NoiseFn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::SetupError;
use crate::noise_field::NoiseField;
use crate::player::{pick_spawn, Player};
use crate::spawner::spawn_mobs;
use crate::structures::place_structures;
use crate::terrain::{Classified, Terrain};
use crate::turn::{Game, WorldReport};

/// fresh world with a new random seed
pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R) -> Result<Game, SetupError> {
    let seed: u32 = rng.gen();
    info!("using {seed} as the seed");
    let field = NoiseField::seeded(seed, &config.world.generator);
    generate_with(config, &field, seed, rng)
}

pub fn generate_with<N: NoiseFn<f64, 3>, R: Rng>(
    config: &GameConfig,
    field: &NoiseField<N>,
    seed: u32,
    rng: &mut R,
) -> Result<Game, SetupError> {
    let w = &config.world;
    let Classified { mut terrain, unmatched } =
        Terrain::classify(field, &config.terrain, w.width, w.height, w.depth);
    if unmatched > 0 {
        warn!("{unmatched} tiles matched no terrain rule and were left as {}", crate::constants::VOID_TILE);
    }
    info!("created world {}×{}×{}", w.width, w.height, w.depth);

    let structures = place_structures(&mut terrain, &config.tile_structures, rng);
    let mobs = spawn_mobs(&terrain, &config.mobs, rng);

    let spawn = pick_spawn(&terrain, &mobs, rng).ok_or(SetupError::NoSpawnTile)?;
    info!("generated player spawn at ({}, {}, {})", spawn.x, spawn.y, spawn.z);
    let player = Player::new(spawn, config.player.image, config.player.stats);

    let report = WorldReport {
        seed,
        unmatched_tiles: unmatched,
        structures,
        mobs: mobs.len(),
    };
    Ok(Game::new(terrain, mobs, player, report, StdRng::seed_from_u64(rng.gen())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures;
    use crate::terrain::tests::rule;
    use noise::Constant;

    #[test]
    fn constant_noise_builds_an_all_floor_world() {
        let mut cfg = fixtures::config();
        cfg.terrain = vec![rule("floor", 150, 255, false)];
        let field = NoiseField::new(Constant::new(72.0 / 127.0), &cfg.world.generator);
        let mut rng = StdRng::seed_from_u64(40);

        let game = generate_with(&cfg, &field, 0, &mut rng).unwrap();
        assert_eq!(game.report.unmatched_tiles, 0);
        assert!(game.terrain.tiles().all(|t| t.name == "floor" && !t.tangible));
        // neither stairwells nor mobs are allowed on "floor"
        assert_eq!(game.report.structures, 0);
        assert!(game.mobs.is_empty());
        assert_eq!(game.player.pos.z as usize, cfg.world.depth - 1);
    }

    #[test]
    fn solid_surface_aborts_setup() {
        let mut cfg = fixtures::config();
        cfg.terrain = vec![rule("rock", 0, 255, true)];
        let field = NoiseField::new(Constant::new(0.0), &cfg.world.generator);
        let mut rng = StdRng::seed_from_u64(41);
        assert!(matches!(
            generate_with(&cfg, &field, 0, &mut rng),
            Err(SetupError::NoSpawnTile)
        ));
    }

    #[test]
    fn player_never_starts_under_a_tangible_mob() {
        let mut cfg = fixtures::config();
        cfg.terrain = vec![rule("grass", 0, 255, false)];
        cfg.tile_structures.clear();
        cfg.mobs.truncate(1);
        assert!(cfg.mobs[0].tangible);
        cfg.mobs[0].spawn.insert("grass".into(), 100);
        let field = NoiseField::new(Constant::new(0.0), &cfg.world.generator);
        let mut rng = StdRng::seed_from_u64(43);

        // every surface cell holds a rabbit, so there is nowhere to stand
        assert!(matches!(
            generate_with(&cfg, &field, 0, &mut rng),
            Err(SetupError::NoSpawnTile)
        ));

        cfg.mobs[0].spawn.insert("grass".into(), 0);
        let game = generate_with(&cfg, &field, 0, &mut rng).unwrap();
        assert!(!game.mobs.iter().any(|m| m.tangible && m.pos == game.player.pos));
    }

    #[test]
    fn seeded_world_has_consistent_stairwells() {
        let cfg = fixtures::config();
        let mut rng = StdRng::seed_from_u64(42);
        let game = generate(&cfg, &mut rng).unwrap();
        for tile in game.terrain.tiles() {
            let Some(dir) = tile.stairwell else { continue };
            let partner = crate::terrain::TilePos::new(tile.pos.x, tile.pos.y, tile.pos.z + dir.dz());
            assert_eq!(game.terrain.get(partner).and_then(|t| t.stairwell), Some(dir.opposite()));
        }
        assert!(!game.terrain.solid(game.player.pos));
    }
}
