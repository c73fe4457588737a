use bevy::prelude::*;

use crate::config::TilesetConfig;
use crate::terrain::TileImage;

/* ===========================================================
   world sprites, rebuilt after every turn
   =========================================================== */
#[derive(Component)]
pub struct WorldSprite;

#[derive(Component)]
pub struct TileSprite;

#[derive(Component)]
pub struct MobSprite;

#[derive(Component)]
pub struct PlayerSprite;

/* ===========================================================
   hud
   =========================================================== */
#[derive(Component)]
pub struct HudElement;

/* ===========================================================
   sprite sheet
   =========================================================== */
#[derive(Resource)]
pub struct Tileset {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub config: TilesetConfig,
}

impl Tileset {
    pub fn atlas(&self, cell: TileImage) -> TextureAtlas {
        TextureAtlas {
            layout: self.layout.clone(),
            index: self.config.atlas_index(cell),
        }
    }

    pub fn sprite(&self, cell: TileImage) -> Sprite {
        Sprite::from_atlas_image(self.image.clone(), self.atlas(cell))
    }

    pub fn ui_image(&self, cell: TileImage) -> ImageNode {
        ImageNode::from_atlas_image(self.image.clone(), self.atlas(cell))
    }
}
