//! # Game Module
//!
//! Core game state, world representation, entities and turn resolution.
//!
//! This module contains the fundamental building blocks of a running game:
//! - Level representation (the tile grid)
//! - Player, monster and item records
//! - Narrative events emitted by each resolved turn
//! - The turn engine and the controller that owns the state across floors

pub mod controller;
pub mod entities;
pub mod events;
pub mod floor;
pub mod state;
pub mod turn;
pub mod world;

pub use controller::*;
pub use entities::*;
pub use events::*;
pub use floor::*;
pub use state::*;
pub use turn::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on a level.
///
/// # Examples
///
/// ```
/// use descent::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns the per-axis sign of the step from `self` toward `target`.
    pub fn step_toward(self, target: Position) -> Position {
        Position::new((target.x - self.x).signum(), (target.y - self.y).signum())
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Cardinal directions the player can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// A discrete request from the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Step (or attack) one tile in the given direction
    Move(Direction),
}

/// Identifier for monsters, unique within one game.
pub type EntityId = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
        assert_eq!(Position::origin(), Position::new(0, 0));
    }

    #[test]
    fn test_position_manhattan_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(pos2), 7);
    }

    #[test]
    fn test_position_step_toward() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.step_toward(Position::new(9, 1)), Position::new(1, -1));
        assert_eq!(pos.step_toward(Position::new(5, 8)), Position::new(0, 1));
        assert_eq!(pos.step_toward(pos), Position::origin());
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_direction_deltas_are_unit_steps() {
        for direction in Direction::all() {
            assert_eq!(Position::origin().manhattan_distance(direction.to_delta()), 1);
        }
        assert_eq!(Direction::East.to_delta() + Direction::West.to_delta(), Position::origin());
    }
}
