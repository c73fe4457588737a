//! item catalogue & inventory
//!
//! Definitions are immutable statics shared by everyone; anything that
//! changes while playing lives on the owning `InventorySlot`.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemStats {
    pub attack: i32,
    pub defense: i32,
    pub health: i32,
    pub strength: i32,
    pub agility: i32,
    pub dexterity: i32,
    pub intelligence: i32,
}

impl ItemStats {
    const NONE: Self = Self {
        attack: 0,
        defense: 0,
        health: 0,
        strength: 0,
        agility: 0,
        dexterity: 0,
        intelligence: 0,
    };
}

#[derive(Debug, PartialEq, Eq)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: &'static str,
    pub stats: ItemStats,
    pub wearable: bool,
    pub price: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemId {
    Sword,
    Hammer,
}

static SWORD: ItemDef = ItemDef {
    id: ItemId::Sword,
    name: "Sword",
    stats: ItemStats { attack: 5, ..ItemStats::NONE },
    wearable: false,
    price: 5,
};

static HAMMER: ItemDef = ItemDef {
    id: ItemId::Hammer,
    name: "Hammer",
    stats: ItemStats { attack: 3, dexterity: 2, ..ItemStats::NONE },
    wearable: false,
    price: 5,
};

impl ItemId {
    pub const ALL: [ItemId; 2] = [ItemId::Sword, ItemId::Hammer];

    pub fn def(self) -> &'static ItemDef {
        match self {
            ItemId::Sword => &SWORD,
            ItemId::Hammer => &HAMMER,
        }
    }

    /// key under `items` in the config
    pub const fn key(self) -> &'static str {
        match self {
            ItemId::Sword => "sword",
            ItemId::Hammer => "hammer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InventorySlot {
    pub item: ItemId,
    /// successful hits made with this copy
    pub uses: u32,
}

impl InventorySlot {
    pub const fn new(item: ItemId) -> Self {
        Self { item, uses: 0 }
    }

    pub fn def(&self) -> &'static ItemDef {
        self.item.def()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
}

impl Inventory {
    pub fn starting() -> Self {
        Self {
            slots: ItemId::ALL.iter().copied().map(InventorySlot::new).collect(),
        }
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&InventorySlot> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut InventorySlot> {
        self.slots.get_mut(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_matches_ids() {
        for id in ItemId::ALL {
            assert_eq!(id.def().id, id);
        }
        assert_eq!(ItemId::Sword.def().stats.attack, 5);
        assert_eq!(ItemId::Hammer.def().stats.dexterity, 2);
    }

    #[test]
    fn slot_state_is_per_copy() {
        let mut mine = Inventory::starting();
        let theirs = Inventory::starting();
        mine.get_mut(0).unwrap().uses += 3;
        assert_eq!(mine.get(0).unwrap().uses, 3);
        assert_eq!(theirs.get(0).unwrap().uses, 0);
        assert!(std::ptr::eq(mine.get(0).unwrap().def(), theirs.get(0).unwrap().def()));
    }
}
