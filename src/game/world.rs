//! # World Representation
//!
//! The tile grid for a single dungeon floor.

use crate::{DescentError, DescentResult, Position};
use serde::{Deserialize, Serialize};

/// The two kinds of map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Impassable rock
    Wall,
    /// Walkable ground
    Floor,
}

impl TileType {
    /// Whether entities may stand on this tile.
    pub fn is_passable(self) -> bool {
        matches!(self, TileType::Floor)
    }

    /// Plain-text glyph for this tile.
    pub fn glyph(self) -> char {
        match self {
            TileType::Wall => '#',
            TileType::Floor => '.',
        }
    }
}

/// A single floor of the dungeon.
///
/// Tiles are stored row-major (`tiles[y][x]`). A freshly created level is solid
/// wall; generators carve floor into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Tile rows
    pub tiles: Vec<Vec<TileType>>,
}

impl Level {
    /// Creates a level of the given size filled with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::{Level, Position, TileType};
    ///
    /// let level = Level::new(10, 8);
    /// assert_eq!(level.get_tile(Position::new(3, 3)), Some(TileType::Wall));
    /// assert_eq!(level.get_tile(Position::new(10, 0)), None);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![TileType::Wall; width as usize]; height as usize],
        }
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Gets the tile at a position, or None when out of bounds.
    pub fn get_tile(&self, pos: Position) -> Option<TileType> {
        if !self.is_valid_position(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Sets the tile at a position.
    pub fn set_tile(&mut self, pos: Position, tile: TileType) -> DescentResult<()> {
        if !self.is_valid_position(pos) {
            return Err(DescentError::InvalidState(format!(
                "Position ({}, {}) is outside the {}x{} level",
                pos.x, pos.y, self.width, self.height
            )));
        }
        self.tiles[pos.y as usize][pos.x as usize] = tile;
        Ok(())
    }

    /// Whether the tile at `pos` exists and is floor.
    pub fn is_floor(&self, pos: Position) -> bool {
        self.get_tile(pos) == Some(TileType::Floor)
    }

    /// Carves an axis-aligned rectangle of floor.
    pub fn carve_rect(&mut self, top_left: Position, width: u32, height: u32) -> DescentResult<()> {
        for y in top_left.y..top_left.y + height as i32 {
            for x in top_left.x..top_left.x + width as i32 {
                self.set_tile(Position::new(x, y), TileType::Floor)?;
            }
        }
        Ok(())
    }

    /// Number of floor tiles on the level.
    pub fn floor_count(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| **tile == TileType::Floor)
            .count()
    }

    /// All floor positions in row-major order.
    pub fn floor_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if *tile == TileType::Floor {
                    positions.push(Position::new(x as i32, y as i32));
                }
            }
        }
        positions
    }
}
