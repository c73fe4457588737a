//! tile grid, terrain classification & lookup helpers
use bevy::prelude::*;
use noise::NoiseFn;
use serde::Deserialize;

use crate::config::TerrainRule;
use crate::constants::VOID_TILE;
use crate::noise_field::NoiseField;

/// cell on the default sprite sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct TileImage {
    pub x: u32,
    pub y: u32,
}

/// signed so neighbour arithmetic never underflows; row‑0 = top
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, z: self.z }
    }

    pub const fn north(self) -> Self {
        self.offset(0, -1)
    }
}

/// which neighbour floor a stairwell leads to; `Up` = `z + 1`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StairDirection {
    Up,
    Down,
}

impl StairDirection {
    pub const fn dz(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub name: String,
    pub pos: TilePos,
    pub tangible: bool,
    pub image: Option<TileImage>,
    pub stairwell: Option<StairDirection>,
}

impl Tile {
    pub fn from_rule(rule: &TerrainRule, pos: TilePos) -> Self {
        Self {
            name: rule.name.clone(),
            pos,
            tangible: rule.tangible,
            image: Some(rule.image),
            stairwell: None,
        }
    }

    /// stands in for cells no terrain rule covers; never walkable
    pub fn void(pos: TilePos) -> Self {
        Self {
            name: VOID_TILE.to_owned(),
            pos,
            tangible: true,
            image: None,
            stairwell: None,
        }
    }
}

/// first rule with `min ≤ |v| ≤ max`; order matters
pub fn classify(rules: &[TerrainRule], value: i32) -> Option<&TerrainRule> {
    let v = value.abs();
    rules.iter().find(|r| r.min <= v && v <= r.max)
}

/// -------- grid --------
#[derive(Clone, Debug)]
pub struct Terrain {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    tiles: Vec<Tile>,
}

/// outcome of one classification pass
#[derive(Debug)]
pub struct Classified {
    pub terrain: Terrain,
    pub unmatched: usize,
}

impl Terrain {
    /// build every floor from the height field
    pub fn classify<N: NoiseFn<f64, 3>>(
        field: &NoiseField<N>,
        rules: &[TerrainRule],
        width: usize,
        height: usize,
        depth: usize,
    ) -> Classified {
        let mut tiles = Vec::with_capacity(width * height * depth);
        let mut unmatched = 0;

        for z in 0..depth {
            for y in 0..height {
                for x in 0..width {
                    let pos = TilePos::new(x as i32, y as i32, z as i32);
                    let v = field.sample(x, y, z);
                    match classify(rules, v as i32) {
                        Some(rule) => tiles.push(Tile::from_rule(rule, pos)),
                        None => {
                            warn!("could not find terrain for tile at ({x}, {y}, {z}), value {v}");
                            unmatched += 1;
                            tiles.push(Tile::void(pos));
                        }
                    }
                }
            }
        }

        Classified {
            terrain: Self { width, height, depth, tiles },
            unmatched,
        }
    }

    /// a single floor kind everywhere; handy for fixed layouts
    pub fn filled(width: usize, height: usize, depth: usize, rule: &TerrainRule) -> Self {
        let mut tiles = Vec::with_capacity(width * height * depth);
        for z in 0..depth {
            for y in 0..height {
                for x in 0..width {
                    tiles.push(Tile::from_rule(rule, TilePos::new(x as i32, y as i32, z as i32)));
                }
            }
        }
        Self { width, height, depth, tiles }
    }

    #[inline]
    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
            && (pos.z as usize) < self.depth
    }

    #[inline]
    fn idx(&self, pos: TilePos) -> Option<usize> {
        self.contains(pos).then(|| {
            (pos.z as usize * self.height + pos.y as usize) * self.width + pos.x as usize
        })
    }

    pub fn get(&self, pos: TilePos) -> Option<&Tile> {
        self.idx(pos).map(|i| &self.tiles[i])
    }

    /// overwrite the tile at `pos`; out of bounds is ignored
    pub fn set(&mut self, pos: TilePos, mut tile: Tile) {
        if let Some(i) = self.idx(pos) {
            tile.pos = pos;
            self.tiles[i] = tile;
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn floor(&self, z: usize) -> impl Iterator<Item = &Tile> {
        let per_floor = self.width * self.height;
        self.tiles.iter().skip(z * per_floor).take(per_floor)
    }

    pub const fn surface(&self) -> usize {
        self.depth.saturating_sub(1)
    }

    /// out of bounds counts as solid
    pub fn solid(&self, pos: TilePos) -> bool {
        self.get(pos).map_or(true, |t| t.tangible)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::config::{fixtures, GeneratorConfig};
    use noise::Constant;

    pub fn rule(name: &str, min: i32, max: i32, tangible: bool) -> TerrainRule {
        TerrainRule {
            name: name.into(),
            min,
            max,
            tangible,
            image: TileImage { x: 0, y: 0 },
        }
    }

    fn field(value: f64) -> NoiseField<Constant> {
        NoiseField::new(
            Constant::new(value),
            &GeneratorConfig { freq: 4.0, octaves: 1, z_multiplier: 1.0 },
        )
    }

    #[test]
    fn first_matching_rule_wins_on_overlap() {
        let rules = vec![rule("sand", 100, 200, false), rule("grass", 150, 255, false)];
        assert_eq!(classify(&rules, 175).unwrap().name, "sand");
        assert_eq!(classify(&rules, 201).unwrap().name, "grass");
        assert!(classify(&rules, 50).is_none());
    }

    #[test]
    fn classification_uses_absolute_value() {
        let rules = vec![rule("deep", 10, 20, true)];
        assert_eq!(classify(&rules, -15).unwrap().name, "deep");
    }

    #[test]
    fn constant_field_yields_uniform_passable_floor() {
        let rules = vec![rule("floor", 150, 255, false)];
        let out = Terrain::classify(&field(72.0 / 127.0), &rules, 6, 5, 3);
        assert_eq!(out.unmatched, 0);
        assert_eq!(out.terrain.tiles().count(), 6 * 5 * 3);
        assert!(out.terrain.tiles().all(|t| t.name == "floor" && !t.tangible));
    }

    #[test]
    fn unmatched_cells_become_void() {
        let rules = vec![rule("floor", 150, 255, false)];
        let out = Terrain::classify(&field(0.0), &rules, 2, 2, 1);
        assert_eq!(out.unmatched, 4);
        assert!(out.terrain.tiles().all(|t| t.name == VOID_TILE && t.tangible));
    }

    #[test]
    fn lookup_is_bounds_checked() {
        let t = Terrain::filled(3, 2, 2, &fixtures::config().terrain[1]);
        assert!(t.get(TilePos::new(2, 1, 1)).is_some());
        assert!(t.get(TilePos::new(3, 0, 0)).is_none());
        assert!(t.get(TilePos::new(0, -1, 0)).is_none());
        assert!(t.get(TilePos::new(0, 0, 2)).is_none());
        assert!(t.solid(TilePos::new(-1, 0, 0)));
        assert_eq!(t.get(TilePos::new(1, 1, 1)).unwrap().pos, TilePos::new(1, 1, 1));
        assert_eq!(t.floor(1).count(), 6);
    }
}
