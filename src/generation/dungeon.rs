//! # Dungeon Generation
//!
//! Procedural level layout using a room-and-corridor algorithm.
//!
//! Candidate rooms are dropped at random; any candidate that overlaps an
//! already accepted room is discarded without a retry, so a level usually ends
//! up with fewer rooms than were rolled. Each accepted room is joined to the
//! previously accepted one by a jagged corridor.

use super::utils;
use crate::{
    DescentError, DescentResult, GenerationConfig, Generator, Level, Position, RandomSource, Room,
    TileType,
};
use log::{debug, warn};

/// A generated level together with the rooms that were carved into it.
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    pub level: Level,
    pub rooms: Vec<Room>,
}

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates levels by:
/// 1. Rolling a room count and dropping that many candidate rooms
/// 2. Rejecting candidates that overlap an accepted room
/// 3. Connecting each accepted room to its predecessor with a corridor
#[derive(Debug, Clone, Default)]
pub struct RoomCorridorGenerator;

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::{create_rng, GenerationConfig, Generator, RoomCorridorGenerator};
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// let level = generator.generate(&GenerationConfig::new(), &mut create_rng(1)).unwrap();
    /// assert!(level.floor_count() > 0);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Generates a level and keeps the accepted rooms.
    ///
    /// A pass that accepts no room at all is thrown away and rerolled, up to
    /// `config.max_generation_attempts` times.
    pub fn generate_with_rooms<R: RandomSource + ?Sized>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> DescentResult<GeneratedLevel> {
        for attempt in 1..=config.max_generation_attempts {
            let mut level = Level::new(config.width, config.height);
            let rooms = self.place_rooms(&mut level, config, rng)?;

            if rooms.is_empty() {
                warn!(
                    "Generation attempt {}/{} placed no rooms, retrying",
                    attempt, config.max_generation_attempts
                );
                continue;
            }

            utils::validate_level(&level)?;
            debug!(
                "Generated {}x{} level with {} rooms and {} floor tiles",
                level.width,
                level.height,
                rooms.len(),
                level.floor_count()
            );
            return Ok(GeneratedLevel { level, rooms });
        }

        Err(DescentError::GenerationFailed(format!(
            "Failed to place any rooms after {} attempts",
            config.max_generation_attempts
        )))
    }

    /// Rolls candidate rooms, carving and connecting the ones that fit.
    fn place_rooms<R: RandomSource + ?Sized>(
        &self,
        level: &mut Level,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> DescentResult<Vec<Room>> {
        let mut rooms: Vec<Room> = Vec::new();
        let room_count = rng.gen_inclusive(config.min_rooms as i32, config.max_rooms as i32);

        for _ in 0..room_count {
            let Some(room) = self.generate_room_candidate(level, config, rng) else {
                continue;
            };

            if rooms.iter().any(|existing| room.overlaps(existing)) {
                continue;
            }

            self.carve_room(level, &room)?;
            if let Some(previous) = rooms.last() {
                self.carve_corridor(level, previous.center(), room.center(), rng)?;
            }
            rooms.push(room);
        }

        Ok(rooms)
    }

    /// Rolls a candidate room that leaves a one-tile border around the level.
    ///
    /// Returns None when the level is too small to hold a room of the rolled
    /// size.
    fn generate_room_candidate<R: RandomSource + ?Sized>(
        &self,
        level: &Level,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> Option<Room> {
        let width = rng.gen_inclusive(config.min_room_size as i32, config.max_room_size as i32);
        let height = rng.gen_inclusive(config.min_room_size as i32, config.max_room_size as i32);

        let x_span = level.width as i32 - width - 2;
        let y_span = level.height as i32 - height - 2;
        if x_span < 0 || y_span < 0 {
            return None;
        }

        // A zero span still draws, and pins the room against the border.
        let x = 1 + rng.gen_index(x_span.max(1) as u32) as i32;
        let y = 1 + rng.gen_index(y_span.max(1) as u32) as i32;

        Some(Room::new(Position::new(x, y), width as u32, height as u32))
    }

    /// Carves out a room in the level by setting tiles to floor.
    fn carve_room(&self, level: &mut Level, room: &Room) -> DescentResult<()> {
        level.carve_rect(room.top_left, room.width, room.height)
    }

    /// Carves a jagged corridor from `start` to `end`.
    ///
    /// While both axes differ the axis to advance is picked by a coin flip;
    /// once one axis lines up the walk finishes along the other.
    pub fn carve_corridor<R: RandomSource + ?Sized>(
        &self,
        level: &mut Level,
        start: Position,
        end: Position,
        rng: &mut R,
    ) -> DescentResult<()> {
        let mut current = start;

        while current != end {
            level.set_tile(current, TileType::Floor)?;

            let step = current.step_toward(end);
            let advance_x = match (step.x != 0, step.y != 0) {
                (true, true) => rng.chance(0.5),
                (true, false) => true,
                _ => false,
            };

            if advance_x {
                current.x += step.x;
            } else {
                current.y += step.y;
            }
        }

        level.set_tile(end, TileType::Floor)
    }
}

impl Generator<Level> for RoomCorridorGenerator {
    fn generate<R: RandomSource + ?Sized>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> DescentResult<Level> {
        Ok(self.generate_with_rooms(config, rng)?.level)
    }

    fn validate(&self, level: &Level, config: &GenerationConfig) -> DescentResult<()> {
        if level.width != config.width || level.height != config.height {
            return Err(DescentError::GenerationFailed(format!(
                "Level is {}x{}, expected {}x{}",
                level.width, level.height, config.width, config.height
            )));
        }
        utils::validate_level(level)
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}
