//! # Text Display
//!
//! Renders a [`GameSnapshot`] as plain text: the tile grid with entities drawn
//! on top, followed by a status block.

use crate::{GameSnapshot, Position};

/// Renders snapshots as plain text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Glyph for a filled heart in the HP bar
    pub heart_full: char,
    /// Glyph for an empty heart in the HP bar
    pub heart_empty: char,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            heart_full: '♥',
            heart_empty: '·',
        }
    }

    /// Renders the map and status block.
    pub fn render(&self, snapshot: &GameSnapshot) -> String {
        let mut out = self.render_map(snapshot);
        out.push_str(&self.render_status(snapshot));
        out
    }

    /// Renders the tile grid, one line per row.
    ///
    /// Draw priority is player, then monsters, then items, then terrain.
    pub fn render_map(&self, snapshot: &GameSnapshot) -> String {
        let mut out = String::with_capacity(((snapshot.width + 1) * snapshot.height) as usize);

        for (y, row) in snapshot.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                out.push(self.glyph_at(snapshot, Position::new(x as i32, y as i32), tile.glyph()));
            }
            out.push('\n');
        }

        out
    }

    fn glyph_at(&self, snapshot: &GameSnapshot, pos: Position, terrain: char) -> char {
        if snapshot.player.position == pos {
            return '@';
        }
        if let Some(monster) = snapshot.monsters.iter().find(|m| m.position == pos) {
            return monster.symbol;
        }
        if let Some(item) = snapshot.items.iter().find(|i| i.position == pos) {
            return item.kind.symbol();
        }
        terrain
    }

    /// Renders floor, HP with a heart bar, and turn number.
    pub fn render_status(&self, snapshot: &GameSnapshot) -> String {
        let hp = snapshot.player.hp.clamp(0, snapshot.player.max_hp);
        let missing = snapshot.player.max_hp - hp;
        let bar: String = std::iter::repeat(self.heart_full)
            .take(hp as usize)
            .chain(std::iter::repeat(self.heart_empty).take(missing as usize))
            .collect();

        let mut out = format!(
            "Floor: B{}F\nHP: {} / {}\n[{}]\nTurn: {}\n",
            snapshot.floor, hp, snapshot.player.max_hp, bar, snapshot.turn_number
        );
        if snapshot.game_over {
            out.push_str(&format!(
                "GAME OVER (deepest floor B{}F)\n",
                snapshot.max_floor_reached
            ));
        }
        out
    }
}
