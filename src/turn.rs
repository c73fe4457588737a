//! the turn engine: one key press → player action → every mob moves once
use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::input::Key;
use crate::menu::{Menu, MenuAction, MenuKind};
use crate::mob::Mob;
use crate::player::Player;
use crate::terrain::{Terrain, Tile, TilePos};

/// where key presses are routed; at most one menu is open
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UiMode {
    #[default]
    Idle,
    MenuOpen(MenuKind),
}

/// what the app shell has to do after a key press
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Continue,
    Quit,
    Restart,
    About { page: &'static str, title: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerMove {
    Moved,
    Blocked,
    ChangedFloor { from: i32, to: i32 },
}

/// numbers gathered while the world was generated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldReport {
    pub seed: u32,
    pub unmatched_tiles: usize,
    pub structures: usize,
    pub mobs: usize,
}

#[derive(Resource)]
pub struct Game {
    pub terrain: Terrain,
    pub mobs: Vec<Mob>,
    pub player: Player,
    pub menus: Vec<Menu>,
    pub mode: UiMode,
    pub turn: u64,
    pub report: WorldReport,
    rng: StdRng,
}

impl Game {
    pub fn new(terrain: Terrain, mobs: Vec<Mob>, player: Player, report: WorldReport, rng: StdRng) -> Self {
        let menus = vec![Menu::game(), Menu::inventory(&player.inventory)];
        Self {
            terrain,
            mobs,
            player,
            menus,
            mode: UiMode::Idle,
            turn: 0,
            report,
            rng,
        }
    }

    pub fn open_menu(&self) -> Option<&Menu> {
        match self.mode {
            UiMode::Idle => None,
            UiMode::MenuOpen(kind) => self.menus.iter().find(|m| m.kind == kind),
        }
    }

    pub fn player_tile(&self) -> Option<&Tile> {
        self.terrain.get(self.player.pos)
    }

    /// mob directly north of the player; a live one wins over a corpse
    /// that has not been reaped yet
    pub fn target(&self) -> Option<&Mob> {
        self.target_index().map(|i| &self.mobs[i])
    }

    fn target_index(&self) -> Option<usize> {
        let north = self.player.pos.north();
        let here = |m: &Mob| m.pos == north;
        self.mobs
            .iter()
            .position(|m| here(m) && m.is_alive())
            .or_else(|| self.mobs.iter().position(here))
    }

    /// tangible mobs block, dead or not
    pub fn occupied(&self, pos: TilePos) -> bool {
        self.mobs.iter().any(|m| m.tangible && m.pos == pos)
    }

    /* ---------- input ---------- */
    pub fn handle_key(&mut self, key: Key) -> Response {
        match self.mode {
            UiMode::MenuOpen(kind) => self.handle_menu_key(kind, key),
            UiMode::Idle => self.handle_idle_key(key),
        }
    }

    fn handle_menu_key(&mut self, kind: MenuKind, key: Key) -> Response {
        let Some(menu) = self.menus.iter_mut().find(|m| m.kind == kind) else {
            self.mode = UiMode::Idle;
            return Response::Continue;
        };
        match key {
            Key::Char(c) if c == menu.toggle_key => self.mode = UiMode::Idle,
            Key::Up => menu.select_prev(),
            Key::Down => menu.select_next(),
            Key::Enter => {
                let action = menu.highlighted().map(|item| item.action.clone());
                self.mode = UiMode::Idle;
                if let Some(action) = action {
                    return self.run_action(action);
                }
            }
            _ => {}
        }
        Response::Continue
    }

    fn handle_idle_key(&mut self, key: Key) -> Response {
        match key {
            Key::Escape => return Response::Quit,
            Key::Up => {
                self.move_player(0, -1);
            }
            Key::Down => {
                self.move_player(0, 1);
            }
            Key::Left => {
                self.move_player(-1, 0);
            }
            Key::Right => {
                self.move_player(1, 0);
            }
            Key::Char('a') => {
                self.attack();
            }
            Key::Char(c) => {
                if let Some(menu) = self.menus.iter().find(|m| m.toggle_key == c) {
                    self.mode = UiMode::MenuOpen(menu.kind);
                }
            }
            Key::Enter | Key::Other => {}
        }

        if self.mode == UiMode::Idle {
            self.advance_mobs();
        }
        Response::Continue
    }

    fn run_action(&mut self, action: MenuAction) -> Response {
        match action {
            MenuAction::Quit => Response::Quit,
            MenuAction::Restart => Response::Restart,
            MenuAction::About { page, title } => Response::About { page, title },
            MenuAction::SelectItem(slot) => {
                if let Some(item) = self.player.inventory.get(slot) {
                    info!("selected inventory item {}", item.def().name);
                    self.player.selected = Some(slot);
                }
                Response::Continue
            }
        }
    }

    /* ---------- player actions ---------- */
    pub fn move_player(&mut self, dx: i32, dy: i32) -> PlayerMove {
        let dest = self.player.pos.offset(dx, dy);
        if self.terrain.solid(dest) || self.occupied(dest) {
            return PlayerMove::Blocked;
        }
        self.player.pos = dest;

        let Some(direction) = self.terrain.get(dest).and_then(|t| t.stairwell) else {
            return PlayerMove::Moved;
        };
        let below_or_above = TilePos::new(dest.x, dest.y, dest.z + direction.dz());
        if !self.terrain.contains(below_or_above) {
            warn!("stairwell at {dest:?} leads off the world");
            return PlayerMove::Moved;
        }
        self.player.pos = below_or_above;
        debug!("took stairwell from floor {} to {}", dest.z, below_or_above.z);
        PlayerMove::ChangedFloor { from: dest.z, to: below_or_above.z }
    }

    /// hit the mob north of the player with the selected item
    pub fn attack(&mut self) -> Option<i32> {
        let index = self.target_index()?;
        let slot = self.player.selected.and_then(|i| self.player.inventory.get_mut(i))?;
        let target = &mut self.mobs[index];

        let damage = slot.def().stats.attack;
        target.take_damage(damage);
        slot.uses += 1;
        debug!("{} hit with {} for {damage}, {} hp left", target.name, slot.def().name, target.health);
        Some(damage)
    }

    /* ---------- mobs ---------- */
    pub fn advance_mobs(&mut self) {
        let player = self.player.pos;
        for mob in self.mobs.iter_mut().filter(|m| m.is_alive()) {
            mob.take_turn(&self.terrain, player, &mut self.rng);
        }
        self.turn += 1;
    }

    /// drop mobs that died since the last pass; returns how many
    pub fn render_pass(&mut self) -> usize {
        let before = self.mobs.len();
        self.mobs.retain(Mob::is_alive);
        before - self.mobs.len()
    }
}
