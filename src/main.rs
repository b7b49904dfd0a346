use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use wrapworld_gen::{
    GenerationRequest, GenerationResult, TerrainPalette, TerrainResult, WorldGenConfig,
    fill_world, generate, load_config_from_path,
};
use wrapworld_tiles::TileRegistry;
use wrapworld_world::WorldStore;

#[derive(Parser, Debug)]
#[command(name = "wrapworld")]
#[command(about = "Generate a horizontally wrapping tile world from a seed")]
struct Args {
    /// Worldgen config (TOML). Built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tile catalogue (TOML). Built-in tiles when omitted.
    #[arg(long)]
    tiles: Option<PathBuf>,

    /// World width in tiles
    #[arg(short = 'W', long, default_value = "512")]
    width: i32,

    /// World height in tiles
    #[arg(short = 'H', long, default_value = "256")]
    height: i32,

    /// Root seed; 0 picks a random one
    #[arg(short, long, default_value = "0")]
    seed: i32,

    /// Print an ASCII preview of the terrain and highways
    #[arg(long)]
    preview: bool,

    /// Preview width in characters
    #[arg(long, default_value = "128")]
    preview_cols: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            log::info!("loading worldgen config from {}", path.display());
            load_config_from_path(path)?
        }
        None => WorldGenConfig::default(),
    };
    let registry = match &args.tiles {
        Some(path) => TileRegistry::from_path(path)?,
        None => TileRegistry::builtin(),
    };
    let palette = TerrainPalette::resolve(&registry, &config.heightmap.materials)?;

    let seed = if args.seed == 0 {
        // Zero is reserved; never hand it to the generator.
        loop {
            let s: i32 = rand::random();
            if s != 0 {
                break s;
            }
        }
    } else {
        args.seed
    };
    println!("Generating {}x{} world with seed {}", args.width, args.height, seed);

    let req = GenerationRequest {
        width: args.width,
        height: args.height,
        seed,
        config,
    };
    let result = generate(&req)?;
    print_highways(&result);

    let terrain = fill_world(&req, &palette)?;
    print_terrain_stats(&terrain);

    if args.preview {
        print_preview(&terrain.store, &result, &palette, args.preview_cols.max(8));
    }
    Ok(())
}

fn print_highways(result: &GenerationResult) {
    println!("{} highways:", result.highways.len());
    for it in &result.highways {
        println!(
            "  #{:<2} ({:7.1},{:4}) -> ({:7.1},{:4})  {:<5}  {:5.1} deg",
            it.id,
            it.start.x,
            it.start.y,
            it.end.x,
            it.end.y,
            it.side.label(),
            it.angle_deg()
        );
    }
}

fn print_terrain_stats(terrain: &TerrainResult) {
    let stats = terrain.store.stats();
    let (min_h, max_h) = terrain
        .heights
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)));
    println!(
        "Terrain: {} columns, {} solid cells, surface y {}..={}",
        terrain.stats.columns, terrain.stats.solid_cells, min_h, max_h
    );
    println!(
        "Chunks: {}x{} grid, {} of {} loaded, {} dirty",
        terrain.store.chunks_x(),
        terrain.store.chunks_y(),
        stats.loaded_chunks,
        stats.chunk_slots,
        stats.dirty_chunks
    );
}

fn print_preview(
    store: &WorldStore,
    result: &GenerationResult,
    palette: &TerrainPalette,
    cols: usize,
) {
    let cols = cols.min(store.width() as usize);
    let step = store.width() as f32 / cols as f32;
    let rows = ((store.height() as f32 / (step * 2.0)).ceil() as usize).max(1);
    let row_step = store.height() as f32 / rows as f32;

    let mut grid: Vec<Vec<char>> = (0..rows)
        .map(|r| {
            let y = (r as f32 * row_step) as i32;
            (0..cols)
                .map(|c| {
                    let id = store.get_terrain((c as f32 * step) as i32, y);
                    if id.is_air() {
                        ' '
                    } else if id == palette.floor {
                        '='
                    } else if id == palette.soil {
                        '.'
                    } else {
                        '#'
                    }
                })
                .collect()
        })
        .collect();

    let mut mark = |x: f32, y: f32, ch: char| {
        let c = (store.wrap_x(x.round() as i32) as f32 / step) as usize;
        let r = (y / row_step) as usize;
        if r < rows && c < cols {
            grid[r][c] = ch;
        }
    };
    for it in &result.highways {
        mark(it.start.x, it.start.y, 'S');
        mark(it.end.x, it.end.y, 'E');
    }

    println!("+{}+", "-".repeat(cols));
    for row in grid {
        println!("|{}|", row.into_iter().collect::<String>());
    }
    println!("+{}+", "-".repeat(cols));
}
