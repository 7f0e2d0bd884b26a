//! # Game Events
//!
//! Narrative events emitted while resolving a turn or setting up a floor.
//!
//! Events are plain data. Their [`std::fmt::Display`] implementation produces
//! the message text a presentation layer shows in its log.

use crate::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who took part in an attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combatant {
    Player,
    Monster { name: String },
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combatant::Player => write!(f, "Player"),
            Combatant::Monster { name } => write!(f, "{}", name),
        }
    }
}

/// Importance level for narrative messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageImportance {
    Low,
    Normal,
    High,
    Critical,
}

/// Something that happened in the dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game has started
    Welcome,
    /// The player walked into a wall
    BumpedWall { position: Position },
    /// One combatant hit another
    Attacked {
        attacker: Combatant,
        defender: Combatant,
        damage: i32,
    },
    /// A combatant's health reached zero
    Defeated { combatant: Combatant },
    /// The player drank a potion
    PotionConsumed { healed: i32, hp: i32 },
    /// The player took the stairs to a deeper floor
    FloorDescended { floor: u32 },
    /// The player died
    PlayerDied,
    /// End-of-game summary of the deepest floor reached
    DeepestFloor { floor: u32 },
}

impl GameEvent {
    /// How prominently a presentation layer should show this event.
    pub fn importance(&self) -> MessageImportance {
        match self {
            GameEvent::BumpedWall { .. } => MessageImportance::Low,
            GameEvent::Welcome | GameEvent::Attacked { .. } => MessageImportance::Normal,
            GameEvent::Defeated { .. }
            | GameEvent::PotionConsumed { .. }
            | GameEvent::FloorDescended { .. } => MessageImportance::High,
            GameEvent::PlayerDied | GameEvent::DeepestFloor { .. } => MessageImportance::Critical,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Welcome => write!(f, "Welcome to the dungeon!"),
            GameEvent::BumpedWall { .. } => write!(f, "You bumped into a wall."),
            GameEvent::Attacked {
                attacker,
                defender,
                damage,
            } => write!(f, "{} hits {} for {} damage!", attacker, defender, damage),
            GameEvent::Defeated { combatant } => write!(f, "{} was defeated!", combatant),
            GameEvent::PotionConsumed { healed, .. } => {
                write!(f, "You drank a potion and recovered {} HP!", healed)
            }
            GameEvent::FloorDescended { floor } => {
                write!(f, "You descended to B{}F. HP fully restored.", floor)
            }
            GameEvent::PlayerDied => write!(f, "You have fallen... Game over."),
            GameEvent::DeepestFloor { floor } => write!(f, "Deepest floor reached: B{}F", floor),
        }
    }
}
