use wrapworld_edit::{EditController, EditOutcome, RefuseReason};
use wrapworld_gen::{
    GenerationRequest, TerrainPalette, WorldGenConfig, WorldGenerator, fill_world, generate,
};
use wrapworld_tiles::{TileClass, TileId, TileRegistry};

fn example_config() -> WorldGenConfig {
    WorldGenConfig::from_toml_str(
        r#"
        [tunnels.highway]
        count_per_width_tiles = 140
        min_count = 4
        max_count = 8
        "#,
    )
    .unwrap()
}

#[test]
fn seed_12345_on_512_by_256() {
    let req = GenerationRequest::new(512, 256, 12345).with_config(example_config());
    let first = generate(&req).unwrap();
    assert!((4..=8).contains(&first.highways.len()));
    let again = generate(&req).unwrap();
    assert_eq!(first.highways, again.highways);

    let other = generate(&GenerationRequest::new(512, 256, 12346).with_config(example_config()))
        .unwrap();
    assert!((4..=8).contains(&other.highways.len()));
    assert_ne!(first.highways, other.highways);
}

#[test]
fn generator_and_free_functions_agree() {
    let mut generator = WorldGenerator::new(example_config());
    let planned = generator.regenerate(512, 256, 12345).unwrap().to_vec();
    let req = GenerationRequest::new(512, 256, 12345).with_config(example_config());
    assert_eq!(planned, generate(&req).unwrap().highways);
}

#[test]
fn filled_world_is_layered_and_seamless() {
    let req = GenerationRequest::new(200, 96, 99);
    let palette = TerrainPalette::default();
    let result = fill_world(&req, &palette).unwrap();
    let heights = &result.heights;
    assert_eq!(heights.len(), 200);
    assert_eq!(heights[0], heights[199]);

    let store = &result.store;
    for (x, &surface) in heights.iter().enumerate() {
        let x = x as i32;
        assert_eq!(store.get_terrain(x, surface - 1), TileId::AIR);
        assert_eq!(store.get_terrain(x, surface), palette.soil);
        assert_eq!(store.get_terrain(x, 95), palette.floor);
    }
    // The wrapped neighbour of the last column reads the first column.
    assert_eq!(
        store.get_terrain(200, heights[0]),
        store.get_terrain(0, heights[0])
    );
    assert_eq!(result.stats.columns, 200);
}

#[test]
fn custom_catalogue_keeps_floor_unbreakable() {
    let reg = TileRegistry::from_toml_str(
        r#"
        [[tiles]]
        name = "granite"
        "#,
    )
    .unwrap();
    let mut config = WorldGenConfig::default();
    config.heightmap.materials.rock = "granite".into();
    let palette = TerrainPalette::resolve(&reg, &config.heightmap.materials).unwrap();
    assert_ne!(palette.soil, palette.rock);
    assert_eq!(reg.class_of(palette.floor), TileClass::Unbreakable);

    let req = GenerationRequest::new(64, 64, 5).with_config(config);
    let mut world = fill_world(&req, &palette).unwrap();
    let mut edits = EditController::new();
    for x in [0, 3, 63] {
        assert_eq!(world.store.get_terrain(x, 63), palette.floor);
        assert_eq!(
            edits.dig(&mut world.store, &reg, x, 63),
            EditOutcome::Refused(RefuseReason::Unbreakable)
        );
        assert_eq!(world.store.get_terrain(x, 63), palette.floor);
    }
    let rock_y = world.heights[3] + 20;
    assert_eq!(world.store.get_terrain(3, rock_y), palette.rock);
    assert!(edits.dig(&mut world.store, &reg, 3, rock_y).is_applied());
}
