//! # Game Controller
//!
//! Owns the game state across floors and exposes the action and query surface
//! to a front end.
//!
//! The controller is the sole writer of its [`GameState`]. Every mutating call
//! takes `&mut self`, so one action is always fully resolved before the next
//! can be submitted.

use crate::{
    DescentResult, GameConfig, GameEvent, GameSettings, GameSnapshot, GameState,
    GenerationConfig, Level, PlayerAction, RandomSource, TurnEngine, TurnReport,
};
use log::{debug, info};

/// Runs games with an injected random source.
///
/// # Examples
///
/// ```
/// use descent::{create_rng, Direction, GameConfig, GameController, PlayerAction};
///
/// let mut controller = GameController::new(create_rng(42));
/// controller.new_game(&GameConfig::default()).unwrap();
/// assert_eq!(controller.state().unwrap().floor, 1);
///
/// controller.handle_action(PlayerAction::Move(Direction::East)).unwrap();
/// ```
#[derive(Debug)]
pub struct GameController<R: RandomSource> {
    engine: TurnEngine,
    rng: R,
    state: Option<GameState>,
}

impl<R: RandomSource> GameController<R> {
    /// Creates a controller with the default level layout. No game is running
    /// until [`GameController::new_game`] is called.
    pub fn new(rng: R) -> Self {
        Self::with_generation_config(rng, GenerationConfig::default())
    }

    /// Creates a controller with custom generation settings.
    pub fn with_generation_config(rng: R, config: GenerationConfig) -> Self {
        Self {
            engine: TurnEngine::new(config),
            rng,
            state: None,
        }
    }

    /// Starts a new game, discarding any game in progress.
    ///
    /// Counts in `config` are clamped; the player starts at full health on
    /// floor 1.
    pub fn new_game(&mut self, config: &GameConfig) -> DescentResult<Vec<GameEvent>> {
        let settings = GameSettings::from_config(config);
        let generation = self.engine.floors().config();
        let level = Level::new(generation.width, generation.height);
        let mut state = GameState::new_with_level(level, settings);

        let mut events = vec![GameEvent::Welcome];
        events.extend(self.engine.floors().advance_floor(&mut state, &mut self.rng)?);

        info!(
            "New game: {} base monsters, {} potions per floor",
            settings.base_monster_count, settings.potion_count
        );
        self.state = Some(state);
        Ok(events)
    }

    /// Resolves one player action.
    ///
    /// Returns an ignored report when no game is running or the game is over.
    pub fn handle_action(&mut self, action: PlayerAction) -> DescentResult<TurnReport> {
        let Some(state) = self.state.as_mut() else {
            debug!("Ignoring {:?}: no game running", action);
            return Ok(TurnReport::ignored());
        };

        if state.is_game_over() {
            debug!("Ignoring {:?}: game over", action);
            return Ok(TurnReport::ignored());
        }

        match action {
            PlayerAction::Move(direction) => self.engine.resolve(state, direction, &mut self.rng),
        }
    }

    /// The current game state, if a game has been started.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// An immutable view for rendering, if a game has been started.
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.state.as_ref().map(GameState::snapshot)
    }

    /// Whether a game is currently accepting actions.
    pub fn is_running(&self) -> bool {
        self.state.as_ref().is_some_and(|s| !s.is_game_over())
    }
}
