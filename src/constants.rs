use bevy::prelude::*;

/// -------- tiles & view --------
pub const TILE_SIZE: f32 = 32.0;
pub const CONFIG_DIR: &str = "config";
pub const TILESET_DIR: &str = "tilesets";

/// fallback for cells no terrain rule claims
pub const VOID_TILE: &str = "void";

/// -------- noise → byte range --------
pub const NOISE_SCALE: f64 = 127.0;
pub const NOISE_OFFSET: f64 = 128.0;
pub const NOISE_MAX: u8 = 255;

/// -------- spawning --------
pub const SPAWN_WEIGHT_MAX: u32 = 100;
pub const SPAWN_HIT: u32 = 1;
pub const STRUCTURE_HIT: u32 = 1;

/// -------- draw layers --------
pub const TILE_LAYER: f32 = 0.0;
pub const MOB_LAYER: f32 = 5.0;
pub const PLAYER_LAYER: f32 = 10.0;

/// -------- hud --------
pub const HUD_FONT_SIZE: f32 = 16.0;
pub const INDICATOR_WIDTH: f32 = 128.0;
pub const INDICATOR_HEIGHT: f32 = 48.0;
pub const HUD_TEXT_COLOR: Color = Color::WHITE;
pub const CLEAR_COLOR: Color = Color::BLACK;
