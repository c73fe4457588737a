//! in‑game menus; which one is open is tracked by the turn engine
use crate::items::Inventory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuKind {
    Game,
    Inventory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Quit,
    Restart,
    About { page: &'static str, title: &'static str },
    SelectItem(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self { label: label.into(), action }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub kind: MenuKind,
    pub title: &'static str,
    pub toggle_key: char,
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl Menu {
    pub fn game() -> Self {
        Self {
            kind: MenuKind::Game,
            title: "Game",
            toggle_key: 'm',
            items: vec![
                MenuItem::new("Quit", MenuAction::Quit),
                MenuItem::new("Restart", MenuAction::Restart),
                MenuItem::new(
                    "About",
                    MenuAction::About { page: "about", title: "About ExploreGame" },
                ),
            ],
            selected: 0,
        }
    }

    pub fn inventory(inventory: &Inventory) -> Self {
        Self {
            kind: MenuKind::Inventory,
            title: "Inventory",
            toggle_key: 'i',
            items: inventory
                .slots()
                .iter()
                .enumerate()
                .map(|(i, slot)| MenuItem::new(slot.def().name, MenuAction::SelectItem(i)))
                .collect(),
            selected: 0,
        }
    }

    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.checked_sub(1).unwrap_or(self.items.len() - 1);
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn highlighted(&self) -> Option<&MenuItem> {
        self.items.get(self.selected)
    }
}
