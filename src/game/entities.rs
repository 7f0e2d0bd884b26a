//! # Entities
//!
//! Player, monster and item records, plus the static monster catalog.
//!
//! Every record carries its own [`Position`]; there is no shared entity trait
//! object. Monsters refer to their archetype by [`MonsterKind`] and only store
//! the state that changes during play.

use crate::{config, EntityId, Position};
use serde::{Deserialize, Serialize};

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
}

impl Player {
    /// Creates a player at full health.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            hp: config::PLAYER_MAX_HEALTH,
            max_hp: config::PLAYER_MAX_HEALTH,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Restores health, capped at `max_hp`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Applies damage, saturating at zero. Returns the damage taken.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount).max(0);
        before - self.hp
    }
}

/// Keys into the monster catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Slime,
    Goblin,
    Orc,
    Dragon,
}

impl MonsterKind {
    /// The catalog entry for this kind.
    pub fn archetype(self) -> &'static MonsterArchetype {
        match self {
            MonsterKind::Slime => &MONSTER_CATALOG[0],
            MonsterKind::Goblin => &MONSTER_CATALOG[1],
            MonsterKind::Orc => &MONSTER_CATALOG[2],
            MonsterKind::Dragon => &MONSTER_CATALOG[3],
        }
    }
}

/// Static template for a monster kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterArchetype {
    pub kind: MonsterKind,
    pub name: &'static str,
    pub symbol: char,
    pub max_hp: i32,
    pub damage: i32,
    /// Shallowest floor this archetype can spawn on
    pub min_floor: u32,
}

/// All monster archetypes, ordered by ascending `min_floor`.
pub static MONSTER_CATALOG: [MonsterArchetype; 4] = [
    MonsterArchetype {
        kind: MonsterKind::Slime,
        name: "Slime",
        symbol: 's',
        max_hp: 2,
        damage: 1,
        min_floor: 1,
    },
    MonsterArchetype {
        kind: MonsterKind::Goblin,
        name: "Goblin",
        symbol: 'g',
        max_hp: 3,
        damage: 1,
        min_floor: 2,
    },
    MonsterArchetype {
        kind: MonsterKind::Orc,
        name: "Orc",
        symbol: 'o',
        max_hp: 5,
        damage: 2,
        min_floor: 4,
    },
    MonsterArchetype {
        kind: MonsterKind::Dragon,
        name: "Dragon",
        symbol: 'D',
        max_hp: 10,
        damage: 3,
        min_floor: 7,
    },
];

/// A live monster on the current floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: EntityId,
    pub kind: MonsterKind,
    pub position: Position,
    pub hp: i32,
}

impl Monster {
    /// Spawns a monster of `kind` at full health.
    pub fn new(id: EntityId, kind: MonsterKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            hp: kind.archetype().max_hp,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.archetype().name
    }

    pub fn symbol(&self) -> char {
        self.kind.archetype().symbol
    }

    pub fn damage(&self) -> i32 {
        self.kind.archetype().damage
    }

    pub fn max_hp(&self) -> i32 {
        self.kind.archetype().max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies damage, saturating at zero. Returns the damage taken.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount).max(0);
        before - self.hp
    }
}

/// What a floor item does when stepped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Instantly heals the player
    Potion,
    /// Descends to the next floor
    Stairs,
}

impl ItemKind {
    pub fn symbol(self) -> char {
        match self {
            ItemKind::Potion => 'p',
            ItemKind::Stairs => '>',
        }
    }
}

/// An item lying on the current floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub position: Position,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(kind: ItemKind, position: Position) -> Self {
        Self { position, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_ordered_by_min_floor() {
        let floors: Vec<u32> = MONSTER_CATALOG.iter().map(|a| a.min_floor).collect();
        let mut sorted = floors.clone();
        sorted.sort_unstable();
        assert_eq!(floors, sorted);
        assert_eq!(MONSTER_CATALOG[0].min_floor, 1);
    }

    #[test]
    fn test_kind_lookup_matches_catalog() {
        for archetype in MONSTER_CATALOG.iter() {
            assert_eq!(archetype.kind.archetype(), archetype);
        }
    }

    #[test]
    fn test_monster_spawns_at_full_health() {
        let orc = Monster::new(1, MonsterKind::Orc, Position::new(3, 3));
        assert_eq!(orc.hp, 5);
        assert_eq!(orc.damage(), 2);
        assert_eq!(orc.symbol(), 'o');
        assert_eq!(orc.name(), "Orc");
    }

    #[test]
    fn test_player_heal_is_capped() {
        let mut player = Player::new(Position::origin());
        player.hp = 7;
        assert_eq!(player.heal(5), 3);
        assert_eq!(player.hp, 10);
        assert_eq!(player.heal(5), 0);
    }

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut player = Player::new(Position::origin());
        player.hp = 2;
        assert_eq!(player.take_damage(3), 2);
        assert_eq!(player.hp, 0);
        assert!(!player.is_alive());

        let mut slime = Monster::new(1, MonsterKind::Slime, Position::origin());
        slime.take_damage(1);
        assert!(slime.is_alive());
        slime.take_damage(1);
        assert!(!slime.is_alive());
    }
}
