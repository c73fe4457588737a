//! JSON configuration: every `*.json` under `config/` is merged key‑by‑key
//! (file‑name order, later files win) and then deserialised in one go.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::constants::SPAWN_WEIGHT_MAX;
use crate::error::ConfigError;
use crate::items::ItemId;
use crate::mob::MobBehavior;
use crate::player::Stats;
use crate::structures::StructureKind;
use crate::terrain::TileImage;

/* ===========================================================
   layout
   =========================================================== */
#[derive(Resource, Clone, Debug, Deserialize)]
pub struct GameConfig {
    pub game: GameInfo,
    pub screen: ScreenConfig,
    pub world: WorldConfig,
    pub terrain: Vec<TerrainRule>,
    #[serde(default)]
    pub tile_structures: Vec<StructureRule>,
    #[serde(default)]
    pub mobs: Vec<MobConfig>,
    pub items: BTreeMap<String, ItemConfig>,
    pub tilesets: Vec<TilesetConfig>,
    pub player: PlayerConfig,
    pub menu: MenuStyle,
    pub indicators: IndicatorStyle,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GameInfo {
    pub version: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScreenConfig {
    pub title: String,
    #[serde(default)]
    pub include_version_in_title: bool,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub generator: GeneratorConfig,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct GeneratorConfig {
    pub freq: f64,
    pub octaves: u32,
    #[serde(rename = "z-multiplier")]
    pub z_multiplier: f64,
}

/// one entry of the ordered terrain table; first match wins
#[derive(Clone, Debug, Deserialize)]
pub struct TerrainRule {
    pub name: String,
    pub min: i32,
    pub max: i32,
    pub tangible: bool,
    #[serde(flatten)]
    pub image: TileImage,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StructureRule {
    pub name: StructureKind,
    pub random: StructureTrigger,
    pub allowed_tiles: Vec<String>,
    pub tile: StructureTile,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructureTrigger {
    /// fires when `randint(1, range - chance) == 1`
    Randint { range: u32, chance: u32 },
}

#[derive(Clone, Debug, Deserialize)]
pub struct StructureTile {
    pub name: String,
    pub tangible: bool,
    pub image: TileImage,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MobConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub behavior: MobBehavior,
    pub health: i32,
    pub tangible: bool,
    pub tilex: u32,
    pub tiley: u32,
    /// terrain name → spawn weight (0–100)
    pub spawn: BTreeMap<String, u32>,
}

impl MobConfig {
    pub fn image(&self) -> TileImage {
        TileImage { x: self.tilex, y: self.tiley }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ItemConfig {
    pub icon: TileImage,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TilesetConfig {
    pub name: String,
    pub file: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub rows: u32,
    #[serde(default)]
    pub default: bool,
}

impl TilesetConfig {
    /// sheet cell → atlas index
    pub fn atlas_index(&self, image: TileImage) -> usize {
        (image.y * self.columns + image.x) as usize
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlayerConfig {
    pub image: TileImage,
    #[serde(default)]
    pub stats: Stats,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MenuStyle {
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub x: f32,
    pub y: f32,
    pub colors: MenuColors,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MenuColors {
    pub background: [u8; 3],
    pub title: [u8; 3],
    pub selected: [u8; 3],
    pub default: [u8; 3],
}

#[derive(Clone, Debug, Deserialize)]
pub struct IndicatorStyle {
    pub background: [u8; 3],
    pub image: Padding,
    pub title: Padding,
    pub hp: Padding,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Padding {
    pub padding_left: f32,
    pub padding_top: f32,
}

pub fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}

/* ===========================================================
   loading
   =========================================================== */
impl GameConfig {
    /// read, merge, parse and validate every `*.json` in `dir`
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let entries = fs::read_dir(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            let value: Value = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.clone(),
                source,
            })?;
            info!("loaded config file: {}", path.display());
            documents.push((path, value));
        }

        Self::from_value(Value::Object(merge_documents(documents)?))
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value).map_err(ConfigError::Layout)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if w.width == 0 || w.height == 0 || w.depth == 0 {
            return invalid(format!(
                "world must be at least 1×1×1, got {}×{}×{}",
                w.width, w.height, w.depth
            ));
        }
        if w.generator.freq <= 0.0 || w.generator.octaves == 0 {
            return invalid("generator freq and octaves must be positive".into());
        }
        if self.terrain.is_empty() {
            return invalid("at least one terrain rule is required".into());
        }
        for rule in &self.terrain {
            if rule.min > rule.max {
                return invalid(format!("terrain '{}' has min > max", rule.name));
            }
        }
        for rule in &self.tile_structures {
            let StructureTrigger::Randint { range, chance } = rule.random;
            if range <= chance {
                return invalid(format!(
                    "structure {:?} needs range > chance (got {range} ≤ {chance})",
                    rule.name
                ));
            }
        }
        for mob in &self.mobs {
            if let Some((tile, weight)) = mob.spawn.iter().find(|(_, w)| **w > SPAWN_WEIGHT_MAX) {
                return invalid(format!(
                    "mob '{}' has spawn weight {weight} on '{tile}' (max {SPAWN_WEIGHT_MAX})",
                    mob.name
                ));
            }
        }
        for id in ItemId::ALL {
            if !self.items.contains_key(id.key()) {
                return invalid(format!("item '{}' has no icon entry", id.key()));
            }
        }
        match self.default_tileset() {
            Some(t) if t.columns > 0 && t.rows > 0 => Ok(()),
            Some(t) => invalid(format!("tileset '{}' has an empty grid", t.name)),
            None => invalid("no tileset is marked as default".into()),
        }
    }

    pub fn default_tileset(&self) -> Option<&TilesetConfig> {
        self.tilesets.iter().find(|t| t.default)
    }

    pub fn item_icon(&self, id: ItemId) -> Option<TileImage> {
        self.items.get(id.key()).map(|i| i.icon)
    }

    pub fn window_title(&self) -> String {
        if self.screen.include_version_in_title {
            format!("{}{}", self.screen.title, self.game.version)
        } else {
            self.screen.title.clone()
        }
    }
}

fn invalid(msg: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(msg))
}

/// shallow top‑level merge; later documents replace earlier keys
pub fn merge_documents(
    documents: impl IntoIterator<Item = (PathBuf, Value)>,
) -> Result<Map<String, Value>, ConfigError> {
    let mut merged = Map::new();
    for (path, value) in documents {
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAnObject { path });
        };
        merged.extend(map);
    }
    Ok(merged)
}

/* ===========================================================
   fixtures shared by the other modules' tests
   =========================================================== */

#[cfg(test)]
mod tests {
    use super::fixtures::{config, config_json};
    use super::*;
    use serde_json::json;

    #[test]
    fn fixture_parses_with_renamed_keys() {
        let c = config();
        assert_eq!(c.world.generator.z_multiplier, 4.0);
        assert_eq!(c.mobs[0].behavior, MobBehavior::Erratic);
        assert_eq!(c.mobs[1].behavior, MobBehavior::Wanderer);
        assert_eq!(c.terrain[1].image, TileImage { x: 1, y: 0 });
        assert_eq!(c.window_title(), "Explore test");
    }

    #[test]
    fn later_documents_override_earlier_keys() {
        let merged = merge_documents([
            ("a.json".into(), json!({ "world": 1, "keep": true })),
            ("b.json".into(), json!({ "world": 2 })),
        ])
        .unwrap();
        assert_eq!(merged["world"], json!(2));
        assert_eq!(merged["keep"], json!(true));
    }

    #[test]
    fn non_object_document_is_rejected() {
        let err = merge_documents([("bad.json".into(), json!([1, 2]))]).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { .. }));
    }

    #[test]
    fn structure_range_must_exceed_chance() {
        let mut v = config_json();
        v["tile_structures"][0]["random"]["chance"] = json!(60);
        assert!(matches!(GameConfig::from_value(v), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn spawn_weight_above_hundred_is_rejected() {
        let mut v = config_json();
        v["mobs"][0]["spawn"]["grass"] = json!(101);
        assert!(matches!(GameConfig::from_value(v), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_mob_type_fails_layout() {
        let mut v = config_json();
        v["mobs"][0]["type"] = json!("dragon");
        assert!(matches!(GameConfig::from_value(v), Err(ConfigError::Layout(_))));
    }

    #[test]
    fn missing_default_tileset_is_rejected() {
        let mut v = config_json();
        v["tilesets"][0]["default"] = json!(false);
        assert!(matches!(GameConfig::from_value(v), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn shipped_config_directory_is_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(crate::constants::CONFIG_DIR);
        let c = GameConfig::load_dir(&dir).unwrap();
        assert!(c.world.depth >= 2);
        assert!(!c.terrain.is_empty());
    }

    #[test]
    fn atlas_index_is_row_major() {
        let c = config();
        let t = c.default_tileset().unwrap();
        assert_eq!(t.atlas_index(TileImage { x: 3, y: 2 }), 19);
    }
}
