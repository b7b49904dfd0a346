use serde::{Deserialize, Serialize};

/// 16-bit terrain material id stored per cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u16);

impl TileId {
    pub const AIR: TileId = TileId(0);
    pub const SOIL: TileId = TileId(1);
    pub const ROCK: TileId = TileId(2);
    pub const BEDROCK: TileId = TileId(3);

    #[inline]
    pub fn is_air(self) -> bool {
        self == TileId::AIR
    }
}

impl From<u16> for TileId {
    fn from(value: u16) -> Self {
        TileId(value)
    }
}

/// Edit-facing behaviour of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileClass {
    Empty,
    #[default]
    Solid,
    Unbreakable,
}

impl TileClass {
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, TileClass::Empty)
    }

    #[inline]
    pub fn is_breakable(self) -> bool {
        matches!(self, TileClass::Solid)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileDef {
    pub id: TileId,
    pub name: String,
    pub class: TileClass,
}
