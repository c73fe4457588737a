//! world drawing: tiles around the player, mobs on the same floor, player
use bevy::prelude::*;

use crate::components::{MobSprite, PlayerSprite, TileSprite, Tileset, WorldSprite};
use crate::config::GameConfig;
use crate::constants::{MOB_LAYER, PLAYER_LAYER, TILE_LAYER, TILE_SIZE};
use crate::terrain::TilePos;
use crate::turn::Game;

/// row‑0 = top, so y grows downward on screen
pub fn tile_to_world(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * TILE_SIZE, -(y as f32) * TILE_SIZE)
}

/// inclusive tile range visible around `center` on one axis
pub fn view_span(center: i32, screen_px: f32, world_len: usize) -> (i32, i32) {
    let half = (screen_px / TILE_SIZE / 2.0).ceil() as i32 + 1;
    let lo = (center - half).max(0);
    let hi = (center + half).min(world_len as i32 - 1);
    (lo, hi)
}

/// despawn last turn's sprites and draw the current one
pub fn redraw_world_system(
    mut commands: Commands,
    mut game: ResMut<Game>,
    tileset: Res<Tileset>,
    config: Res<GameConfig>,
    drawn: Query<Entity, With<WorldSprite>>,
) {
    if !game.is_changed() {
        return;
    }
    let reaped = game.bypass_change_detection().render_pass();
    if reaped > 0 {
        debug!("removed {reaped} dead mobs");
    }

    for e in &drawn {
        commands.entity(e).despawn();
    }

    let player = game.player.pos;
    let (x0, x1) = view_span(player.x, config.screen.width, game.terrain.width);
    let (y0, y1) = view_span(player.y, config.screen.height, game.terrain.height);

    /* ---- tiles ---- */
    for y in y0..=y1 {
        for x in x0..=x1 {
            let Some(tile) = game.terrain.get(TilePos::new(x, y, player.z)) else { continue };
            let Some(image) = tile.image else { continue };
            commands.spawn((
                tileset.sprite(image),
                Transform::from_translation(tile_to_world(x, y).extend(TILE_LAYER)),
                TileSprite,
                WorldSprite,
            ));
        }
    }

    /* ---- mobs ---- */
    let in_view = |p: TilePos| p.z == player.z && (x0..=x1).contains(&p.x) && (y0..=y1).contains(&p.y);
    for mob in game.mobs.iter().filter(|m| in_view(m.pos)) {
        commands.spawn((
            tileset.sprite(mob.image),
            Transform::from_translation(tile_to_world(mob.pos.x, mob.pos.y).extend(MOB_LAYER)),
            MobSprite,
            WorldSprite,
        ));
    }

    /* ---- player ---- */
    commands.spawn((
        tileset.sprite(game.player.image),
        Transform::from_translation(tile_to_world(player.x, player.y).extend(PLAYER_LAYER)),
        PlayerSprite,
        WorldSprite,
    ));
}
