//! minimal bootstrap for the tile‑based exploration game
//!
//! Setup (config → world → tileset) runs as a startup system; after that the
//! game only advances when a key is pressed.  Works with **Bevy 0.15**.

mod camera;
mod components;
mod config;
mod constants;
mod error;
mod hud;
mod input;
mod items;
mod menu;
mod mob;
mod noise_field;
mod player;
mod render;
mod spawner;
mod structures;
mod terrain;
mod turn;
mod worldgen;

use std::path::Path;

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
    LogDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowMode};

use camera::camera_follow_system;
use components::Tileset;
use config::GameConfig;
use constants::{CLEAR_COLOR, CONFIG_DIR, TILESET_DIR};
use error::SetupError;
use hud::update_hud_system;
use input::turn_input_system;
use render::redraw_world_system;
use turn::Game;

/* ------------------------------------------------------------------------ */
/* camera                                                                   */
/* ------------------------------------------------------------------------ */
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/* ------------------------------------------------------------------------ */
/* config, tileset & world                                                  */
/* ------------------------------------------------------------------------ */
fn setup_game(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut atlas_layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut window_q: Query<&mut Window, With<PrimaryWindow>>,
    mut exit: EventWriter<AppExit>,
) {
    match build_game(&asset_server, &mut atlas_layouts) {
        Ok((config, tileset, game)) => {
            if let Ok(mut window) = window_q.get_single_mut() {
                window.title = config.window_title();
                window.resolution.set(config.screen.width, config.screen.height);
            }
            info!("loaded icons for items: {}", hud::icon_summary(&config));
            commands.insert_resource(tileset);
            commands.insert_resource(game);
            commands.insert_resource(config);
        }
        Err(e) => {
            error!("setup failed: {e}");
            exit.send(AppExit::error());
        }
    }
}

fn build_game(
    asset_server: &AssetServer,
    atlas_layouts: &mut Assets<TextureAtlasLayout>,
) -> Result<(GameConfig, Tileset, Game), SetupError> {
    let config = GameConfig::load_dir(Path::new(CONFIG_DIR))?;

    let sheet = config
        .default_tileset()
        .cloned()
        .ok_or_else(|| error::ConfigError::Invalid("no default tileset".into()))?;
    let layout = TextureAtlasLayout::from_grid(
        UVec2::new(sheet.tile_width, sheet.tile_height),
        sheet.columns,
        sheet.rows,
        None,
        None,
    );
    let tileset = Tileset {
        image: asset_server.load(format!("{TILESET_DIR}/{}", sheet.file)),
        layout: atlas_layouts.add(layout),
        config: sheet,
    };
    info!("loaded tileset");

    let game = worldgen::generate(&config, &mut rand::thread_rng())?;
    let r = game.report;
    info!(
        "world ready: seed {}, {} stairwells, {} mobs, {} void tiles",
        r.seed, r.structures, r.mobs, r.unmatched_tiles
    );
    Ok((config, tileset, game))
}

/* ------------------------------------------------------------------------ */
/* main                                                                     */
/* ------------------------------------------------------------------------ */
fn main() {
    App::new()
        /* diagnostics ----------------------------------------------------- */
        .add_plugins((
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
            EntityCountDiagnosticsPlugin::default(),
        ))

        /* bevy core ------------------------------------------------------- */
        .insert_resource(ClearColor(CLEAR_COLOR))
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        mode: WindowMode::Windowed,
                        ..default()
                    }),
                    ..default()
                }),
        )

        /* startup systems ------------------------------------------------- */
        .add_systems(Startup, (setup_camera, setup_game))

        /* one turn per key press ------------------------------------------ */
        .add_systems(
            Update,
            (
                turn_input_system,    // key → player action → mob turns
                redraw_world_system,  // reap dead mobs, redraw view
                update_hud_system,    // info line, indicator, menu
            )
                .chain()
                .run_if(resource_exists::<Game>),
        )

        /* post‑update (camera) -------------------------------------------- */
        .add_systems(
            PostUpdate,
            camera_follow_system.run_if(resource_exists::<Game>),
        )
        .run();
}
