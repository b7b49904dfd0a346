use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::config::{TileDefConfig, TilesConfig};
use super::types::{TileClass, TileDef, TileId};

#[derive(Debug, Error)]
pub enum TileRegistryError {
    #[error("failed to read tile catalogue: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tile catalogue: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("tile `{0}` is defined twice")]
    DuplicateName(String),
    #[error("tile id {id} is assigned to both `{first}` and `{second}`")]
    DuplicateId {
        id: u16,
        first: String,
        second: String,
    },
    #[error("tile id 0 is reserved for `air`, found `{0}`")]
    ReservedAir(String),
}

/// Terrain tiles every registry carries unless a catalogue redefines them by name.
const BUILTIN_TERRAIN: [(TileId, &str, TileClass); 3] = [
    (TileId::SOIL, "soil", TileClass::Solid),
    (TileId::ROCK, "rock", TileClass::Solid),
    (TileId::BEDROCK, "bedrock", TileClass::Unbreakable),
];

/// Name/id/class lookup for every tile the world can hold.
#[derive(Clone, Debug)]
pub struct TileRegistry {
    by_id: HashMap<TileId, TileDef>,
    by_name: HashMap<String, TileId>,
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TileRegistry {
    fn empty() -> Self {
        Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// The four tiles terrain fill needs: air, soil, rock, and the unbreakable floor.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        reg.insert(TileDef {
            id: TileId::AIR,
            name: "air".to_string(),
            class: TileClass::Empty,
        });
        for (id, name, class) in BUILTIN_TERRAIN {
            reg.insert(TileDef {
                id,
                name: name.to_string(),
                class,
            });
        }
        reg
    }

    fn insert(&mut self, def: TileDef) {
        self.by_name.insert(def.name.clone(), def.id);
        self.by_id.insert(def.id, def);
    }

    fn next_free_id(&self) -> TileId {
        let mut id = self.by_id.len() as u16;
        while self.by_id.contains_key(&TileId(id)) {
            id = id.wrapping_add(1);
        }
        TileId(id)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, TileRegistryError> {
        let cfg: TilesConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TileRegistryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_config(cfg: TilesConfig) -> Result<Self, TileRegistryError> {
        let mut reg = Self::empty();
        // Air always owns id 0, whether or not the catalogue mentions it.
        let air_cfg = cfg.tiles.iter().find(|d| d.name == "air");
        if air_cfg.and_then(|d| d.id).is_some_and(|id| id != 0) {
            return Err(TileRegistryError::ReservedAir("air".to_string()));
        }
        reg.insert(TileDef {
            id: TileId::AIR,
            name: "air".to_string(),
            class: TileClass::Empty,
        });
        // Built-in terrain keeps its usual id unless the catalogue claims it;
        // displaced entries are numbered after the catalogue.
        let mut displaced = Vec::new();
        for (id, name, class) in BUILTIN_TERRAIN {
            if cfg.tiles.iter().any(|d| d.name == name) {
                continue;
            }
            if cfg.tiles.iter().any(|d| d.id == Some(id.0)) {
                displaced.push((name, class));
                continue;
            }
            reg.insert(TileDef {
                id,
                name: name.to_string(),
                class,
            });
        }
        for TileDefConfig { name, id, class } in cfg.tiles.into_iter() {
            if name == "air" {
                continue;
            }
            if reg.by_name.contains_key(&name) {
                return Err(TileRegistryError::DuplicateName(name));
            }
            let id = match id {
                Some(0) => return Err(TileRegistryError::ReservedAir(name)),
                Some(raw) => TileId(raw),
                None => reg.next_free_id(),
            };
            if let Some(existing) = reg.by_id.get(&id) {
                return Err(TileRegistryError::DuplicateId {
                    id: id.0,
                    first: existing.name.clone(),
                    second: name,
                });
            }
            reg.insert(TileDef {
                id,
                name,
                class: class.unwrap_or_default(),
            });
        }
        for (name, class) in displaced {
            let id = reg.next_free_id();
            reg.insert(TileDef {
                id,
                name: name.to_string(),
                class,
            });
        }
        Ok(reg)
    }

    #[inline]
    pub fn get(&self, id: TileId) -> Option<&TileDef> {
        self.by_id.get(&id)
    }

    pub fn id_by_name(&self, name: &str) -> Option<TileId> {
        self.by_name.get(name).copied()
    }

    /// Unknown ids are treated as ordinary breakable solids.
    pub fn class_of(&self, id: TileId) -> TileClass {
        self.by_id.get(&id).map(|d| d.class).unwrap_or(TileClass::Solid)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Definitions ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &TileDef> {
        let mut defs: Vec<&TileDef> = self.by_id.values().collect();
        defs.sort_by_key(|d| d.id);
        defs.into_iter()
    }
}
