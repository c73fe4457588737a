//! info line, target indicator, selected item & the open menu
use bevy::prelude::*;

use crate::components::{HudElement, Tileset};
use crate::config::{rgb, GameConfig};
use crate::constants::{HUD_FONT_SIZE, HUD_TEXT_COLOR, INDICATOR_HEIGHT, INDICATOR_WIDTH, TILE_SIZE};
use crate::items::ItemId;
use crate::turn::Game;

fn text(value: impl Into<String>, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont { font_size: HUD_FONT_SIZE, ..default() },
        TextColor(color),
    )
}

fn absolute() -> Node {
    Node { position_type: PositionType::Absolute, ..default() }
}

/// `<version> (x, y, z) <tile>`
pub fn info_line(version: &str, game: &Game) -> String {
    let p = game.player.pos;
    let tile = game.player_tile().map_or("?", |t| t.name.as_str());
    format!("{version} ({}, {}, {}) {tile}", p.x, p.y, p.z)
}

pub fn update_hud_system(
    mut commands: Commands,
    game: Res<Game>,
    config: Res<GameConfig>,
    tileset: Res<Tileset>,
    old: Query<Entity, With<HudElement>>,
) {
    if !game.is_changed() {
        return;
    }
    for e in &old {
        commands.entity(e).despawn_recursive();
    }

    /* ---- info line ---- */
    commands.spawn((
        text(info_line(&config.game.version, &game), HUD_TEXT_COLOR),
        Node { left: Val::Px(0.0), top: Val::Px(0.0), ..absolute() },
        HudElement,
    ));

    /* ---- target indicator ---- */
    if let Some(target) = game.target().filter(|m| m.is_alive()) {
        let ind = &config.indicators;
        commands
            .spawn((
                Node {
                    right: Val::Px(0.0),
                    top: Val::Px(0.0),
                    width: Val::Px(INDICATOR_WIDTH),
                    height: Val::Px(INDICATOR_HEIGHT),
                    ..absolute()
                },
                BackgroundColor(rgb(ind.background)),
                HudElement,
            ))
            .with_children(|p| {
                p.spawn((
                    tileset.ui_image(target.image),
                    Node {
                        left: Val::Px(ind.image.padding_left),
                        top: Val::Px(ind.image.padding_top),
                        width: Val::Px(TILE_SIZE),
                        height: Val::Px(TILE_SIZE),
                        ..absolute()
                    },
                ));
                let text_left = ind.image.padding_left + TILE_SIZE;
                p.spawn((
                    text(target.name.clone(), HUD_TEXT_COLOR),
                    Node {
                        left: Val::Px(text_left + ind.title.padding_left),
                        top: Val::Px(ind.title.padding_top),
                        ..absolute()
                    },
                ));
                p.spawn((
                    text(format!("HP: {}", target.health), HUD_TEXT_COLOR),
                    Node {
                        left: Val::Px(text_left + ind.hp.padding_left),
                        top: Val::Px(ind.title.padding_top + HUD_FONT_SIZE + ind.hp.padding_top),
                        ..absolute()
                    },
                ));
            });
    }

    /* ---- selected item ---- */
    if let Some(icon) = game.player.selected_slot().and_then(|s| config.item_icon(s.item)) {
        commands.spawn((
            tileset.ui_image(icon),
            Node {
                left: Val::Px(0.0),
                bottom: Val::Px(0.0),
                width: Val::Px(TILE_SIZE),
                height: Val::Px(TILE_SIZE),
                ..absolute()
            },
            HudElement,
        ));
    }

    /* ---- open menu ---- */
    let Some(menu) = game.open_menu() else { return };
    let style = &config.menu;
    commands
        .spawn((
            Node {
                left: Val::Px(style.x),
                top: Val::Px(style.y),
                flex_direction: FlexDirection::Column,
                padding: UiRect {
                    left: Val::Px(style.margin_left),
                    right: Val::Px(style.margin_right),
                    top: Val::Px(style.margin_top),
                    bottom: Val::Px(style.margin_top),
                },
                ..absolute()
            },
            BackgroundColor(rgb(style.colors.background)),
            HudElement,
        ))
        .with_children(|p| {
            p.spawn((
                text(menu.title, rgb(style.colors.title)),
                Node { align_self: AlignSelf::Center, ..default() },
            ));
            for (i, item) in menu.items.iter().enumerate() {
                let color = if i == menu.selected {
                    style.colors.selected
                } else {
                    style.colors.default
                };
                p.spawn(text(item.label.clone(), rgb(color)));
            }
        });
}

/// names of every item the icon table covers, for the startup log
pub fn icon_summary(config: &GameConfig) -> String {
    ItemId::ALL
        .iter()
        .filter(|id| config.item_icon(**id).is_some())
        .map(|id| id.def().name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures;
    use crate::player::{Player, Stats};
    use crate::terrain::tests::rule;
    use crate::terrain::{Terrain, TileImage, TilePos};
    use crate::turn::WorldReport;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn info_line_shows_position_and_tile() {
        let t = Terrain::filled(4, 4, 2, &rule("grass", 0, 255, false));
        let player = Player::new(TilePos::new(3, 1, 1), TileImage { x: 4, y: 0 }, Stats::default());
        let game = Game::new(t, vec![], player, WorldReport::default(), StdRng::seed_from_u64(1));
        assert_eq!(info_line("0.2", &game), "0.2 (3, 1, 1) grass");
    }

    #[test]
    fn every_item_has_an_icon_in_the_fixture() {
        assert_eq!(icon_summary(&fixtures::config()), "Sword, Hammer");
    }
}
