//! # Input Module
//!
//! Translates key names from a front end into player actions.
//!
//! Only the four cardinal moves reach the game. Everything else is either a
//! front-end command (new game, quit, help) or ignored.

use crate::game::{Direction, PlayerAction};

/// Input handler for processing player commands.
///
/// Key names follow the browser `KeyboardEvent.key` convention for arrows
/// (`ArrowUp`, ...), plus WASD and optionally Vi-style hjkl.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.parse_key("ArrowUp"), Some(PlayerInput::Move(Direction::North)));
    /// assert_eq!(input_handler.parse_key("Tab"), None);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses a key name. Returns None for keys with no binding.
    pub fn parse_key(&self, key: &str) -> Option<PlayerInput> {
        let key = key.trim();

        let direction = match key {
            "ArrowUp" | "up" | "w" | "W" => Some(Direction::North),
            "ArrowDown" | "down" | "s" | "S" => Some(Direction::South),
            "ArrowLeft" | "left" | "a" | "A" => Some(Direction::West),
            "ArrowRight" | "right" | "d" | "D" => Some(Direction::East),
            "k" if self.vi_keys_enabled => Some(Direction::North),
            "j" if self.vi_keys_enabled => Some(Direction::South),
            "h" if self.vi_keys_enabled => Some(Direction::West),
            "l" if self.vi_keys_enabled => Some(Direction::East),
            _ => None,
        };
        if let Some(direction) = direction {
            return Some(PlayerInput::Move(direction));
        }

        match key {
            "n" | "new" => Some(PlayerInput::NewGame),
            "q" | "quit" | "Escape" => Some(PlayerInput::Quit),
            "?" | "help" | "F1" => Some(PlayerInput::Help),
            _ => None,
        }
    }

    /// Converts player input to a game action, if it is one.
    pub fn input_to_action(&self, input: &PlayerInput) -> Option<PlayerAction> {
        match input {
            PlayerInput::Move(direction) => Some(PlayerAction::Move(*direction)),
            // Other inputs are handled by the front end
            _ => None,
        }
    }
}

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move in a given direction
    Move(Direction),
    /// Quit the game
    Quit,
    /// Show help information
    Help,
    /// Start a new game
    NewGame,
}
