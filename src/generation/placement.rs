//! # Entity Placement
//!
//! Scatters the player, monsters, potions and the staircase onto a freshly
//! generated level.
//!
//! Everything goes through one bounded-retry primitive,
//! [`EntityPlacer::find_open_position`]. Optional entities (monsters and
//! potions) are skipped when it gives up; required ones (the player and the
//! stairs) fall back to a row-major scan and only fail when the level has no
//! free floor left.

use super::encounters::select_archetype;
use crate::{
    DescentError, DescentResult, GameState, GenerationConfig, Item, ItemKind, Position,
    RandomSource,
};
use log::{debug, warn};

/// Optional entities the placer scatters in bulk.
///
/// The staircase is not one of them; it always goes through
/// [`EntityPlacer::place_stairs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    Monster,
    Potion,
}

/// Places entities on free floor tiles.
#[derive(Debug, Clone)]
pub struct EntityPlacer {
    /// Random draws per optional entity
    pub max_attempts: u32,
    /// Random draws per required entity before falling back to a scan
    pub required_attempts: u32,
}

impl EntityPlacer {
    /// Creates a placer with the attempt limits from `config`.
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            max_attempts: config.placement_attempts,
            required_attempts: config.required_placement_attempts,
        }
    }

    /// Draws up to `attempts` random cells and returns the first free floor
    /// tile, i.e. floor not occupied by the player, a monster or an item.
    pub fn find_open_position<R: RandomSource + ?Sized>(
        state: &GameState,
        attempts: u32,
        rng: &mut R,
    ) -> Option<Position> {
        for _ in 0..attempts {
            let x = rng.gen_index(state.level.width) as i32;
            let y = rng.gen_index(state.level.height) as i32;
            let pos = Position::new(x, y);
            if state.is_free_floor(pos) {
                return Some(pos);
            }
        }
        None
    }

    /// Finds a position for an entity that must be placed.
    fn find_required_position<R: RandomSource + ?Sized>(
        &self,
        state: &GameState,
        what: &str,
        rng: &mut R,
    ) -> DescentResult<Position> {
        if let Some(pos) = Self::find_open_position(state, self.required_attempts, rng) {
            return Ok(pos);
        }

        debug!(
            "Random placement of {} failed after {} attempts, scanning",
            what, self.required_attempts
        );
        state
            .level
            .floor_positions()
            .into_iter()
            .find(|&pos| state.is_free_floor(pos))
            .ok_or_else(|| {
                DescentError::GenerationFailed(format!("No free floor tile left for the {}", what))
            })
    }

    /// Moves the player onto a random floor tile.
    ///
    /// Call before any monsters or items are placed; the player's current
    /// position is ignored.
    pub fn place_player<R: RandomSource + ?Sized>(
        &self,
        state: &mut GameState,
        rng: &mut R,
    ) -> DescentResult<Position> {
        // Park the player off-grid so its stale position does not block itself.
        state.player.position = Position::new(-1, -1);
        let pos = self.find_required_position(state, "player", rng)?;
        state.player.position = pos;
        Ok(pos)
    }

    /// Places the single staircase for the floor.
    pub fn place_stairs<R: RandomSource + ?Sized>(
        &self,
        state: &mut GameState,
        rng: &mut R,
    ) -> DescentResult<Position> {
        let pos = self.find_required_position(state, "stairs", rng)?;
        state.items.push(Item::new(ItemKind::Stairs, pos));
        Ok(pos)
    }

    /// Places up to `count` entities of `kind`, returning how many landed.
    ///
    /// An entity whose attempts run out is skipped; that is not an error.
    /// Monster archetypes are chosen for the state's current floor.
    pub fn place_many<R: RandomSource + ?Sized>(
        &self,
        count: u32,
        kind: PlacementKind,
        state: &mut GameState,
        rng: &mut R,
    ) -> u32 {
        let mut placed = 0;

        for _ in 0..count {
            let Some(pos) = Self::find_open_position(state, self.max_attempts, rng) else {
                continue;
            };

            match kind {
                PlacementKind::Monster => {
                    let archetype = select_archetype(state.floor, rng);
                    state.spawn_monster(archetype.kind, pos);
                }
                PlacementKind::Potion => state.items.push(Item::new(ItemKind::Potion, pos)),
            }
            placed += 1;
        }

        if placed < count {
            warn!(
                "Placed {}/{} {:?} entities on floor {}",
                placed, count, kind, state.floor
            );
        }
        placed
    }

    /// Clears the floor's entities and scatters a fresh set: the player, then
    /// monsters, potions and finally the staircase.
    pub fn populate_floor<R: RandomSource + ?Sized>(
        &self,
        state: &mut GameState,
        rng: &mut R,
    ) -> DescentResult<()> {
        state.monsters.clear();
        state.items.clear();

        self.place_player(state, rng)?;

        let monster_target = state.settings.monster_count_for_floor(state.floor);
        let monsters = self.place_many(monster_target, PlacementKind::Monster, state, rng);
        let potions = self.place_many(
            state.settings.potion_count,
            PlacementKind::Potion,
            state,
            rng,
        );
        self.place_stairs(state, rng)?;

        debug!(
            "Floor {} populated: player at {:?}, {} monsters, {} potions",
            state.floor, state.player.position, monsters, potions
        );
        Ok(())
    }
}

impl Default for EntityPlacer {
    fn default() -> Self {
        Self::new(&GenerationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_rng, GameSettings, Level, ScriptedRandom};

    fn open_state(settings: GameSettings) -> GameState {
        let mut level = Level::new(35, 20);
        level.carve_rect(Position::new(1, 1), 33, 18).unwrap();
        let mut state = GameState::new_with_level(level, settings);
        state.floor = 1;
        state
    }

    #[test]
    fn test_find_open_position_skips_occupied() {
        let mut level = Level::new(3, 1);
        level.carve_rect(Position::new(0, 0), 2, 1).unwrap();
        let mut state = GameState::new_with_level(level, GameSettings::default());
        state.player.position = Position::new(0, 0);

        // First draw lands on the player, second on the wall, third on free floor.
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.9, 0.0, 0.5, 0.0]);
        let pos = EntityPlacer::find_open_position(&state, 10, &mut rng);
        assert_eq!(pos, Some(Position::new(1, 0)));
    }

    #[test]
    fn test_ample_space_places_every_monster() {
        let mut state = open_state(GameSettings {
            base_monster_count: 10,
            potion_count: 0,
        });
        let placer = EntityPlacer::default();
        let mut rng = create_rng(5);

        placer.populate_floor(&mut state, &mut rng).unwrap();
        assert_eq!(state.monsters.len(), 10);
        assert_eq!(state.stairs_count(), 1);
    }

    #[test]
    fn test_under_placement_is_not_an_error() {
        // Two floor tiles: one for the player, one for a single monster.
        let mut level = Level::new(4, 1);
        level.carve_rect(Position::new(0, 0), 2, 1).unwrap();
        let mut state = GameState::new_with_level(level, GameSettings::default());
        state.floor = 1;
        let placer = EntityPlacer::default();
        let mut rng = create_rng(9);

        placer.place_player(&mut state, &mut rng).unwrap();
        let placed = placer.place_many(5, PlacementKind::Monster, &mut state, &mut rng);
        assert_eq!(placed, 1);
        assert_eq!(state.monsters.len(), 1);
    }

    #[test]
    fn test_required_placement_falls_back_to_scan() {
        let mut level = Level::new(10, 10);
        level.carve_rect(Position::new(9, 9), 1, 1).unwrap();
        let mut state = GameState::new_with_level(level, GameSettings::default());
        let placer = EntityPlacer::default();
        // Always draws (0, 0), which is wall.
        let mut rng = ScriptedRandom::constant(0.0);

        let pos = placer.place_player(&mut state, &mut rng).unwrap();
        assert_eq!(pos, Position::new(9, 9));
    }

    #[test]
    fn test_required_placement_fails_without_floor() {
        let mut state = GameState::new_with_level(Level::new(5, 5), GameSettings::default());
        let placer = EntityPlacer::default();
        let result = placer.place_player(&mut state, &mut create_rng(1));
        assert!(matches!(result, Err(DescentError::GenerationFailed(_))));
    }

    #[test]
    fn test_populate_floor_positions_are_distinct_floor() {
        let mut state = open_state(GameSettings::default());
        let placer = EntityPlacer::default();
        placer.populate_floor(&mut state, &mut create_rng(21)).unwrap();

        let mut seen = vec![state.player.position];
        seen.extend(state.monsters.iter().map(|m| m.position));
        seen.extend(state.items.iter().map(|i| i.position));
        for (i, pos) in seen.iter().enumerate() {
            assert!(state.level.is_floor(*pos));
            assert!(!seen[i + 1..].contains(pos));
        }
    }

    #[test]
    fn test_bulk_placement_never_adds_stairs() {
        let mut state = open_state(GameSettings::default());
        let placer = EntityPlacer::default();
        let mut rng = create_rng(4);

        placer.place_player(&mut state, &mut rng).unwrap();
        placer.place_many(10, PlacementKind::Potion, &mut state, &mut rng);
        assert_eq!(state.stairs_count(), 0);

        placer.place_stairs(&mut state, &mut rng).unwrap();
        assert_eq!(state.stairs_count(), 1);
        assert_eq!(state.items.len(), 11);
    }
}
