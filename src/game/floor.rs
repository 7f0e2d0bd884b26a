//! # Floor Transitions
//!
//! Builds a fresh floor into an existing [`GameState`]: new level, new
//! entities, counters reset. Used both when a game starts and when the player
//! takes the stairs.

use crate::{
    DescentResult, EntityPlacer, GameEvent, GameState, GenerationConfig, Generator,
    RandomSource, RoomCorridorGenerator, TurnPhase,
};
use log::{debug, info};

/// Generates levels and populates them.
#[derive(Debug, Clone)]
pub struct FloorBuilder {
    config: GenerationConfig,
    generator: RoomCorridorGenerator,
    placer: EntityPlacer,
}

impl FloorBuilder {
    pub fn new(config: GenerationConfig) -> Self {
        let placer = EntityPlacer::new(&config);
        Self {
            config,
            generator: RoomCorridorGenerator::new(),
            placer,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Moves the state to the next floor.
    ///
    /// Increments the floor, records the deepest floor, resets the turn
    /// counter to 1, fully heals the player, then regenerates the level and
    /// replaces every monster and item. Nothing from the previous floor
    /// survives except the player and the statistics.
    ///
    /// The new floor is built on a copy and only committed once generation
    /// and placement succeed; on error `state` is left as it was.
    pub fn advance_floor<R: RandomSource + ?Sized>(
        &self,
        state: &mut GameState,
        rng: &mut R,
    ) -> DescentResult<Vec<GameEvent>> {
        let mut next = state.clone();
        next.floor += 1;
        next.max_floor_reached = next.max_floor_reached.max(next.floor);
        next.turn_number = 1;
        next.player.hp = next.player.max_hp;

        next.level = self.generator.generate(&self.config, rng)?;
        self.generator.validate(&next.level, &self.config)?;
        debug!(
            "{} built floor {}",
            self.generator.generator_type(),
            next.floor
        );
        self.placer.populate_floor(&mut next, rng)?;
        next.phase = TurnPhase::AwaitingAction;

        *state = next;

        let mut events = Vec::new();
        if state.floor > 1 {
            events.push(GameEvent::FloorDescended { floor: state.floor });
        }

        info!(
            "Entered floor {} ({} monsters, {} items)",
            state.floor,
            state.monsters.len(),
            state.items.len()
        );
        Ok(events)
    }
}

impl Default for FloorBuilder {
    fn default() -> Self {
        Self::new(GenerationConfig::default())
    }
}
