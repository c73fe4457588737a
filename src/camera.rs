use bevy::prelude::*;

use crate::render::tile_to_world;
use crate::turn::Game;

/// pixel snapping helper – keeps the camera on whole pixels so sprites never
/// land on half‑pixels and shimmer
#[inline]
fn snap(v: f32) -> f32 {
    v.round()
}

/// keep the player's tile in the middle of the screen
///
/// NOTE: runs in **PostUpdate**, after the turn has been resolved.
pub fn camera_follow_system(
    mut cam_q: Query<&mut Transform, With<Camera2d>>,
    game: Res<Game>,
) {
    if !game.is_changed() {
        return;
    }
    let Ok(mut cam_tf) = cam_q.get_single_mut() else { return };

    let p = game.player.pos;
    let target = tile_to_world(p.x, p.y);
    cam_tf.translation.x = snap(target.x);
    cam_tf.translation.y = snap(target.y);
}
