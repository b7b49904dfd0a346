//! Orchestration: config scaling, highway planning and terrain fill in a fixed phase order.

use wrapworld_world::WorldStore;

use crate::config::WorldGenConfig;
use crate::error::GenError;
use crate::heightmap::generate_heightmap;
use crate::highway::{HighwayIntent, plan};
use crate::rng::{Phase, PhaseRng};
use crate::scale::{ScaledConfig, scale};
use crate::terrain::{FillStats, TerrainPalette, fill_terrain};

/// Seed 0 is passed through as-is; picking a random seed is the caller's job.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub width: i32,
    pub height: i32,
    pub seed: i32,
    pub config: WorldGenConfig,
}

impl GenerationRequest {
    pub fn new(width: i32, height: i32, seed: i32) -> Self {
        Self {
            width,
            height,
            seed,
            config: WorldGenConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WorldGenConfig) -> Self {
        self.config = config;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationResult {
    pub seed: i32,
    pub width: i32,
    pub height: i32,
    pub scaled: ScaledConfig,
    pub highways: Vec<HighwayIntent>,
}

pub struct TerrainResult {
    pub store: WorldStore,
    pub heights: Vec<i32>,
    pub stats: FillStats,
}

pub fn generate(req: &GenerationRequest) -> Result<GenerationResult, GenError> {
    let scaled = scale(&req.config, req.width, req.height)?;
    let highways = plan_highways(&scaled, req.seed)?;
    log::info!(
        target: "gen",
        "generated seed={} size={}x{} highways={}",
        req.seed,
        req.width,
        req.height,
        highways.len()
    );
    Ok(GenerationResult {
        seed: req.seed,
        width: req.width,
        height: req.height,
        scaled,
        highways,
    })
}

fn plan_highways(scaled: &ScaledConfig, seed: i32) -> Result<Vec<HighwayIntent>, GenError> {
    let class = scaled.highway()?;
    let mut rng = PhaseRng::for_phase(seed, Phase::Highways);
    plan(scaled.width, scaled.height, class, &mut rng)
}

/// Builds a fresh store and fills it from the heightmap phase.
pub fn fill_world(
    req: &GenerationRequest,
    palette: &TerrainPalette,
) -> Result<TerrainResult, GenError> {
    let scaled = scale(&req.config, req.width, req.height)?;
    let mut store = WorldStore::new(req.width, req.height)?;
    let (heights, stats) = fill_world_into(&mut store, &scaled, req.seed, palette)?;
    Ok(TerrainResult {
        store,
        heights,
        stats,
    })
}

/// Fills an existing store sized to match `scaled`.
pub fn fill_world_into(
    store: &mut WorldStore,
    scaled: &ScaledConfig,
    seed: i32,
    palette: &TerrainPalette,
) -> Result<(Vec<i32>, FillStats), GenError> {
    let mut rng = PhaseRng::for_phase(seed, Phase::Heightmap);
    let heights = generate_heightmap(store.width(), &scaled.heightmap, &mut rng)?;
    let stats = fill_terrain(store, &heights, &scaled.heightmap, palette)?;
    Ok((heights, stats))
}

/// Holds a configuration across regenerations, rescaling only when the map size changes.
pub struct WorldGenerator {
    config: WorldGenConfig,
    scaled: Option<ScaledConfig>,
    seed: i32,
    highways: Vec<HighwayIntent>,
}

impl WorldGenerator {
    pub fn new(config: WorldGenConfig) -> Self {
        Self {
            config,
            scaled: None,
            seed: 0,
            highways: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// Swaps the configuration; the next regeneration rescales.
    pub fn set_config(&mut self, config: WorldGenConfig) {
        self.config = config;
        self.scaled = None;
    }

    pub fn scaled(&self) -> Option<&ScaledConfig> {
        self.scaled.as_ref()
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn highways(&self) -> &[HighwayIntent] {
        &self.highways
    }

    /// Replaces the previous intents entirely. On error the previous state is kept.
    pub fn regenerate(
        &mut self,
        width: i32,
        height: i32,
        seed: i32,
    ) -> Result<&[HighwayIntent], GenError> {
        let stale = self
            .scaled
            .as_ref()
            .is_none_or(|s| s.width != width || s.height != height);
        if stale {
            self.scaled = Some(scale(&self.config, width, height)?);
        }
        let Some(scaled) = self.scaled.as_ref() else {
            return Ok(&self.highways);
        };
        let highways = plan_highways(scaled, seed)?;
        self.seed = seed;
        self.highways = highways;
        Ok(&self.highways)
    }

    /// Fills `store` using the cached scale; the store must match its size.
    pub fn fill(&self, store: &mut WorldStore, palette: &TerrainPalette) -> Result<FillStats, GenError> {
        let scaled = match self.scaled.as_ref() {
            Some(s) if s.width == store.width() && s.height == store.height() => s.clone(),
            _ => scale(&self.config, store.width(), store.height())?,
        };
        let (_, stats) = fill_world_into(store, &scaled, self.seed, palette)?;
        Ok(stats)
    }
}
