use wrapworld_tiles::{TileClass, TileId, TileRegistry};
use wrapworld_world::WorldStore;

use crate::config::TerrainMaterials;
use crate::error::GenError;
use crate::scale::HeightmapParams;

/// Tile ids used for the filled layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainPalette {
    pub soil: TileId,
    pub rock: TileId,
    pub floor: TileId,
}

impl Default for TerrainPalette {
    fn default() -> Self {
        Self {
            soil: TileId::SOIL,
            rock: TileId::ROCK,
            floor: TileId::BEDROCK,
        }
    }
}

impl TerrainPalette {
    /// Looks each material up by name. Unknown names fall back to the registry's
    /// built-in tile of the same role. The floor must be unbreakable.
    pub fn resolve(reg: &TileRegistry, materials: &TerrainMaterials) -> Result<Self, GenError> {
        let defaults = Self::default();
        let palette = Self {
            soil: lookup(reg, &materials.soil, "soil", defaults.soil),
            rock: lookup(reg, &materials.rock, "rock", defaults.rock),
            floor: lookup(reg, &materials.floor, "bedrock", defaults.floor),
        };
        if reg.class_of(palette.floor) != TileClass::Unbreakable {
            return Err(GenError::BreakableFloor(materials.floor.clone()));
        }
        Ok(palette)
    }
}

fn lookup(reg: &TileRegistry, name: &str, builtin_name: &str, fallback: TileId) -> TileId {
    if let Some(id) = reg.id_by_name(name).filter(|id| !id.is_air()) {
        return id;
    }
    let id = reg.id_by_name(builtin_name).unwrap_or(fallback);
    log::warn!(target: "gen", "unknown terrain material '{}', using '{}' (tile {})", name, builtin_name, id.0);
    id
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillStats {
    pub columns: usize,
    pub solid_cells: usize,
}

/// Tile for row `y` of a column whose surface sits at `surface`.
#[inline]
pub fn tile_for_row(
    y: i32,
    surface: i32,
    map_height: i32,
    params: &HeightmapParams,
    palette: &TerrainPalette,
) -> TileId {
    if y >= map_height - params.floor_thickness {
        palette.floor
    } else if y < surface {
        TileId::AIR
    } else if y < surface + params.soil_depth {
        palette.soil
    } else {
        palette.rock
    }
}

pub fn fill_terrain(
    store: &mut WorldStore,
    heights: &[i32],
    params: &HeightmapParams,
    palette: &TerrainPalette,
) -> Result<FillStats, GenError> {
    let width = store.width() as usize;
    if heights.len() != width {
        return Err(GenError::HeightmapWidthMismatch {
            expected: width,
            actual: heights.len(),
        });
    }
    let map_height = store.height();
    let mut stats = FillStats::default();
    for (x, &surface) in heights.iter().enumerate() {
        for y in 0..map_height {
            let id = tile_for_row(y, surface, map_height, params, palette);
            if !id.is_air() {
                stats.solid_cells += 1;
            }
            store.set_terrain(x as i32, y, id);
        }
        stats.columns += 1;
    }
    log::debug!(
        target: "gen",
        "terrain filled columns={} solid={} chunks={}",
        stats.columns,
        stats.solid_cells,
        store.stats().loaded_chunks
    );
    Ok(stats)
}
