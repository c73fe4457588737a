//! keyboard → turn engine
use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::turn::{Game, Response};
use crate::worldgen;

/// keys the engine understands, independent of the windowing layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Char(char),
    /// any other key; still costs a turn
    Other,
}

const LETTERS: [(KeyCode, char); 26] = [
    (KeyCode::KeyA, 'a'),
    (KeyCode::KeyB, 'b'),
    (KeyCode::KeyC, 'c'),
    (KeyCode::KeyD, 'd'),
    (KeyCode::KeyE, 'e'),
    (KeyCode::KeyF, 'f'),
    (KeyCode::KeyG, 'g'),
    (KeyCode::KeyH, 'h'),
    (KeyCode::KeyI, 'i'),
    (KeyCode::KeyJ, 'j'),
    (KeyCode::KeyK, 'k'),
    (KeyCode::KeyL, 'l'),
    (KeyCode::KeyM, 'm'),
    (KeyCode::KeyN, 'n'),
    (KeyCode::KeyO, 'o'),
    (KeyCode::KeyP, 'p'),
    (KeyCode::KeyQ, 'q'),
    (KeyCode::KeyR, 'r'),
    (KeyCode::KeyS, 's'),
    (KeyCode::KeyT, 't'),
    (KeyCode::KeyU, 'u'),
    (KeyCode::KeyV, 'v'),
    (KeyCode::KeyW, 'w'),
    (KeyCode::KeyX, 'x'),
    (KeyCode::KeyY, 'y'),
    (KeyCode::KeyZ, 'z'),
];

impl Key {
    pub fn from_code(code: KeyCode) -> Self {
        match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::ArrowLeft => Key::Left,
            KeyCode::ArrowRight => Key::Right,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            other => LETTERS
                .iter()
                .find(|(c, _)| *c == other)
                .map_or(Key::Other, |&(_, ch)| Key::Char(ch)),
        }
    }
}

/* ===========================================================
   one turn per key press
   =========================================================== */
pub fn turn_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    mut game: ResMut<Game>,
    mut exit: EventWriter<AppExit>,
) {
    let pressed: Vec<Key> = keys.get_just_pressed().copied().map(Key::from_code).collect();

    for key in pressed {
        match game.handle_key(key) {
            Response::Continue => {}
            Response::Quit => {
                info!("quitting game");
                exit.send(AppExit::Success);
                return;
            }
            Response::Restart => {
                info!("restarting game");
                match worldgen::generate(&config, &mut rand::thread_rng()) {
                    Ok(fresh) => *game = fresh,
                    Err(e) => error!("restart failed, keeping the current world: {e}"),
                }
            }
            Response::About { page, title } => {
                info!("help page '{page}' ({title}) is not bundled with this build");
            }
        }
    }
}
