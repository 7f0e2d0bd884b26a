//! # Descent
//!
//! Simulation core of a turn-based, grid-based dungeon crawler.
//!
//! ## Architecture Overview
//!
//! The crate is split along the same lines a turn is resolved:
//!
//! - **Generation**: room-and-corridor levels and entity placement
//! - **Game State**: the single owned state value for one running game
//! - **Turn Engine**: resolves one player action into a complete turn
//! - **Controller**: owns the state across floors and exposes the action surface
//! - **Rendering / Input**: thin adapters that turn snapshots into text and key
//!   names into actions
//!
//! Every random decision goes through an injected [`RandomSource`], so a fixed
//! seed reproduces a whole game.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Descent engine.
#[derive(thiserror::Error, Debug)]
pub enum DescentError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Descent codebase.
pub type DescentResult<T> = Result<T, DescentError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Dungeon width in tiles
    pub const MAP_WIDTH: u32 = 35;

    /// Dungeon height in tiles
    pub const MAP_HEIGHT: u32 = 20;

    /// Player starting (and maximum) health
    pub const PLAYER_MAX_HEALTH: i32 = 10;

    /// Health restored by a single potion
    pub const POTION_HEAL_AMOUNT: i32 = 5;

    /// Damage dealt by every player attack
    pub const PLAYER_ATTACK_DAMAGE: i32 = 1;

    /// Monster count used when none (or garbage) is configured
    pub const DEFAULT_MONSTER_COUNT: u32 = 10;

    /// Upper clamp for the configured monster count
    pub const MAX_MONSTER_COUNT: u32 = 20;

    /// Potion count used when none (or garbage) is configured
    pub const DEFAULT_POTION_COUNT: u32 = 10;

    /// Upper clamp for the configured potion count
    pub const MAX_POTION_COUNT: u32 = 10;

    /// Random attempts per optional entity before it is skipped
    pub const PLACEMENT_ATTEMPTS: u32 = 100;

    /// Number of narrative messages a presentation layer keeps
    pub const MESSAGE_LOG_CAPACITY: usize = 50;
}
