//! Property tests for level generation and entity placement.

use descent::{
    create_rng, select_archetype, EntityPlacer, GameSettings, GameState, GenerationConfig,
    ItemKind, Position, RoomCorridorGenerator, TileType,
};
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_rooms_are_disjoint_and_carved(seed in any::<u64>()) {
        let config = GenerationConfig::default();
        let generated = RoomCorridorGenerator::new()
            .generate_with_rooms(&config, &mut create_rng(seed))
            .unwrap();

        prop_assert!(!generated.rooms.is_empty());
        prop_assert!(generated.level.floor_count() > 0);

        for (i, room) in generated.rooms.iter().enumerate() {
            for y in room.top_left.y..room.top_left.y + room.height as i32 {
                for x in room.top_left.x..room.top_left.x + room.width as i32 {
                    prop_assert_eq!(
                        generated.level.get_tile(Position::new(x, y)),
                        Some(TileType::Floor)
                    );
                }
            }
            for other in &generated.rooms[i + 1..] {
                prop_assert!(!room.overlaps(other));
            }
        }

        // Outer border stays solid
        let (w, h) = (config.width as i32, config.height as i32);
        for x in 0..w {
            prop_assert_eq!(generated.level.get_tile(Position::new(x, 0)), Some(TileType::Wall));
            prop_assert_eq!(generated.level.get_tile(Position::new(x, h - 1)), Some(TileType::Wall));
        }
    }

    #[test]
    fn placements_use_distinct_floor_tiles(seed in any::<u64>(), floor in 1u32..12) {
        let mut rng = create_rng(seed);
        let config = GenerationConfig::default();
        let mut state = GameState::new(GameSettings::default());
        state.floor = floor;
        state.level = RoomCorridorGenerator::new()
            .generate_with_rooms(&config, &mut rng)
            .unwrap()
            .level;

        EntityPlacer::new(&config).populate_floor(&mut state, &mut rng).unwrap();

        let mut occupied = HashSet::new();
        prop_assert!(state.level.is_floor(state.player.position));
        occupied.insert(state.player.position);
        for monster in &state.monsters {
            prop_assert!(state.level.is_floor(monster.position));
            prop_assert!(occupied.insert(monster.position));
            prop_assert!(monster.kind.archetype().min_floor <= floor);
        }
        for item in &state.items {
            prop_assert!(state.level.is_floor(item.position));
            prop_assert!(occupied.insert(item.position));
        }
        prop_assert_eq!(
            state.items.iter().filter(|i| i.kind == ItemKind::Stairs).count(),
            1
        );
    }

    #[test]
    fn archetypes_respect_min_floor(seed in any::<u64>(), floor in 1u32..20) {
        let mut rng = create_rng(seed);
        for _ in 0..50 {
            prop_assert!(select_archetype(floor, &mut rng).min_floor <= floor);
        }
    }
}

#[test]
fn test_same_seed_same_level() {
    let config = GenerationConfig::default();
    let a = RoomCorridorGenerator::new()
        .generate_with_rooms(&config, &mut create_rng(31))
        .unwrap();
    let b = RoomCorridorGenerator::new()
        .generate_with_rooms(&config, &mut create_rng(31))
        .unwrap();
    assert_eq!(a.level, b.level);
}
