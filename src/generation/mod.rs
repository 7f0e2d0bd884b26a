//! # Generation Module
//!
//! Procedural content generation for dungeon floors.
//!
//! This module provides the level generator (rooms and corridors), the entity
//! placer that scatters the player, monsters, potions and stairs, and the
//! floor-gated monster selection used by the placer.

pub mod dungeon;
pub mod encounters;
pub mod placement;

pub use dungeon::*;
pub use encounters::*;
pub use placement::*;

use crate::game::{Level, Position};
use crate::{config, DescentError, DescentResult, RandomSource};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// The defaults reproduce the classic 35x20 layout; tests shrink or stretch
/// individual knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Level width in tiles
    pub width: u32,
    /// Level height in tiles
    pub height: u32,
    /// Minimum room size
    pub min_room_size: u32,
    /// Maximum room size
    pub max_room_size: u32,
    /// Minimum number of candidate rooms per level
    pub min_rooms: u32,
    /// Maximum number of candidate rooms per level
    pub max_rooms: u32,
    /// Whole-level retries when no room could be placed
    pub max_generation_attempts: u32,
    /// Random draws per optional entity (monster, potion) before skipping it
    pub placement_attempts: u32,
    /// Random draws for required entities (player, stairs) before scanning
    pub required_placement_attempts: u32,
}

impl GenerationConfig {
    /// Creates the default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::GenerationConfig;
    ///
    /// let config = GenerationConfig::new();
    /// assert_eq!(config.width, 35);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// ```
    pub fn new() -> Self {
        Self {
            width: config::MAP_WIDTH,
            height: config::MAP_HEIGHT,
            min_room_size: 4,
            max_room_size: 9,
            min_rooms: 5,
            max_rooms: 9,
            max_generation_attempts: 10,
            placement_attempts: config::PLACEMENT_ATTEMPTS,
            required_placement_attempts: 10_000,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A rectangular room used while carving a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room
    pub width: u32,
    /// Height of the room
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::{Room, Position};
    ///
    /// let room = Room::new(Position::new(5, 5), 10, 8);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// ```
    pub fn new(top_left: Position, width: u32, height: u32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Checks if this room overlaps with another room.
    ///
    /// Rooms that merely touch edge to edge do not overlap.
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.top_left.x >= other.top_left.x + other.width as i32
            || other.top_left.x >= self.top_left.x + self.width as i32
            || self.top_left.y >= other.top_left.y + other.height as i32
            || other.top_left.y >= self.top_left.y + self.height as i32)
    }
}

/// Trait for procedural generators.
///
/// Generators receive their randomness from the caller so that a fixed seed
/// reproduces the same output.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random source.
    fn generate<R: RandomSource + ?Sized>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> DescentResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DescentResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Validates that a level meets basic requirements.
    pub fn validate_level(level: &Level) -> DescentResult<()> {
        if level.floor_count() == 0 {
            return Err(DescentError::GenerationFailed(
                "Level has no floor tiles".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new();
        assert_eq!(config.width, 35);
        assert_eq!(config.height, 20);
        assert_eq!((config.min_room_size, config.max_room_size), (4, 9));
        assert_eq!((config.min_rooms, config.max_rooms), (5, 9));
        assert_eq!(config.placement_attempts, 100);
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(Position::new(5, 5), 10, 8);

        assert_eq!(room.center(), Position::new(10, 9));
        // Odd sizes round the center down
        assert_eq!(
            Room::new(Position::new(1, 1), 5, 7).center(),
            Position::new(3, 4)
        );
    }

    #[test]
    fn test_room_overlap() {
        let room1 = Room::new(Position::new(5, 5), 10, 8);
        let room2 = Room::new(Position::new(10, 10), 8, 6);
        let room3 = Room::new(Position::new(20, 20), 5, 5);
        // Shares no cell with room1: starts exactly at its right edge
        let touching = Room::new(Position::new(15, 5), 4, 4);

        assert!(room1.overlaps(&room2));
        assert!(room2.overlaps(&room1));
        assert!(!room1.overlaps(&room3));
        assert!(!room1.overlaps(&touching));
    }

    #[test]
    fn test_validate_level() {
        let mut level = Level::new(10, 10);
        assert!(utils::validate_level(&level).is_err());
        level.carve_rect(Position::new(2, 2), 1, 1).unwrap();
        assert!(utils::validate_level(&level).is_ok());
    }
}
