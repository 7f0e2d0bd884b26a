//! # Turn Engine
//!
//! Resolves one player action into a complete turn.
//!
//! A turn is: the player's move or attack, an optional item effect, the
//! monster phase and the game-over check. Two actions are absorbed without
//! advancing the world: stepping off the map (silently ignored) and walking
//! into a wall (a message, nothing else). Taking the stairs ends the turn
//! early; monsters do not act on that turn.

use crate::{
    config, Combatant, DescentResult, Direction, FloorBuilder, GameEvent, GameState,
    GenerationConfig, ItemKind, RandomSource, TileType, TurnPhase,
};
use log::{debug, info};

/// How a player action was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing happened: no game running, game over, or off-map target
    Ignored,
    /// The player walked into a wall; no turn passed
    BumpedWall,
    /// A full turn was played
    Advanced,
    /// The player took the stairs; a new floor is ready
    FloorComplete,
    /// The player died during this turn
    GameOver,
}

/// The result of resolving one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub outcome: TurnOutcome,
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
}

impl TurnReport {
    pub fn new(outcome: TurnOutcome, events: Vec<GameEvent>) -> Self {
        Self { outcome, events }
    }

    /// A report for an action that had no effect.
    pub fn ignored() -> Self {
        Self::new(TurnOutcome::Ignored, Vec::new())
    }
}

/// Resolves player actions against a [`GameState`].
#[derive(Debug, Clone, Default)]
pub struct TurnEngine {
    floors: FloorBuilder,
}

impl TurnEngine {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            floors: FloorBuilder::new(config),
        }
    }

    /// The floor builder used for stairs transitions.
    pub fn floors(&self) -> &FloorBuilder {
        &self.floors
    }

    /// Resolves a move in `direction`.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::{create_rng, Direction, GameSettings, GameState, Level, Position, TurnEngine, TurnOutcome};
    ///
    /// let mut level = Level::new(5, 5);
    /// level.carve_rect(Position::new(1, 1), 3, 3).unwrap();
    /// let mut state = GameState::new_with_level(level, GameSettings::default());
    /// state.player.position = Position::new(1, 1);
    ///
    /// let engine = TurnEngine::default();
    /// let report = engine.resolve(&mut state, Direction::North, &mut create_rng(1)).unwrap();
    /// assert_eq!(report.outcome, TurnOutcome::BumpedWall);
    /// assert_eq!(state.turn_number, 1);
    /// ```
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        state: &mut GameState,
        direction: Direction,
        rng: &mut R,
    ) -> DescentResult<TurnReport> {
        if state.is_game_over() {
            return Ok(TurnReport::ignored());
        }

        let target = state.player.position + direction.to_delta();
        let Some(tile) = state.level.get_tile(target) else {
            return Ok(TurnReport::ignored());
        };

        if tile == TileType::Wall {
            return Ok(TurnReport::new(
                TurnOutcome::BumpedWall,
                vec![GameEvent::BumpedWall { position: target }],
            ));
        }

        state.phase = TurnPhase::Resolving;
        let mut events = Vec::new();

        if let Some(index) = state.monster_index_at(target) {
            Self::player_attack(state, index, &mut events);
        } else {
            let origin = state.player.position;
            state.player.position = target;

            if let Some(item_index) = state.item_index_at(target) {
                match state.items[item_index].kind {
                    ItemKind::Potion => {
                        state.items.remove(item_index);
                        let healed = state.player.heal(config::POTION_HEAL_AMOUNT);
                        events.push(GameEvent::PotionConsumed {
                            healed,
                            hp: state.player.hp,
                        });
                    }
                    ItemKind::Stairs => {
                        state.phase = TurnPhase::FloorComplete;
                        match self.floors.advance_floor(state, rng) {
                            Ok(floor_events) => events.extend(floor_events),
                            Err(err) => {
                                // Step back off the stairs so the old floor stays playable.
                                state.player.position = origin;
                                state.phase = TurnPhase::AwaitingAction;
                                return Err(err);
                            }
                        }
                        state.record_events(&events);
                        return Ok(TurnReport::new(TurnOutcome::FloorComplete, events));
                    }
                }
            }
        }

        state.turn_number += 1;
        Self::run_monster_phase(state, rng, &mut events);

        let outcome = if Self::check_game_over(state, &mut events) {
            TurnOutcome::GameOver
        } else {
            state.phase = TurnPhase::AwaitingAction;
            TurnOutcome::Advanced
        };

        state.record_events(&events);
        Ok(TurnReport::new(outcome, events))
    }

    /// The player hits the monster at `index` for a fixed amount.
    fn player_attack(state: &mut GameState, index: usize, events: &mut Vec<GameEvent>) {
        let monster = &mut state.monsters[index];
        let damage = config::PLAYER_ATTACK_DAMAGE;
        monster.take_damage(damage);

        let defender = Combatant::Monster {
            name: monster.name().to_string(),
        };
        events.push(GameEvent::Attacked {
            attacker: Combatant::Player,
            defender: defender.clone(),
            damage,
        });

        if !monster.is_alive() {
            debug!("{} {} defeated at {:?}", monster.name(), monster.id, monster.position);
            events.push(GameEvent::Defeated {
                combatant: defender,
            });
            state.monsters.remove(index);
        }
    }

    /// Every living monster steps one tile toward the player, or attacks when
    /// that step would land on the player.
    ///
    /// Monsters act in list order. A monster that is blocked by a wall or by
    /// another monster waits this tick.
    fn run_monster_phase<R: RandomSource + ?Sized>(
        state: &mut GameState,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        for index in 0..state.monsters.len() {
            if !state.monsters[index].is_alive() {
                continue;
            }

            let from = state.monsters[index].position;
            let player_pos = state.player.position;
            let step = from.step_toward(player_pos);

            let mut target = from;
            match (step.x != 0, step.y != 0) {
                (true, true) => {
                    if rng.chance(0.5) {
                        target.x += step.x;
                    } else {
                        target.y += step.y;
                    }
                }
                (true, false) => target.x += step.x,
                (false, true) => target.y += step.y,
                (false, false) => continue,
            }

            if target == player_pos {
                Self::monster_attack(state, index, events);
            } else if state.level.is_floor(target)
                && !state
                    .monsters
                    .iter()
                    .enumerate()
                    .any(|(other, m)| other != index && m.is_alive() && m.position == target)
            {
                state.monsters[index].position = target;
            }
        }

        state.remove_dead_monsters();
    }

    /// The monster at `index` hits the player for its archetype's damage.
    fn monster_attack(state: &mut GameState, index: usize, events: &mut Vec<GameEvent>) {
        let monster = &state.monsters[index];
        let damage = monster.damage();
        let attacker = Combatant::Monster {
            name: monster.name().to_string(),
        };

        let was_alive = state.player.is_alive();
        state.player.take_damage(damage);
        events.push(GameEvent::Attacked {
            attacker,
            defender: Combatant::Player,
            damage,
        });

        if was_alive && !state.player.is_alive() {
            events.push(GameEvent::Defeated {
                combatant: Combatant::Player,
            });
        }
    }

    /// Moves the state to game over the first time the player's health hits
    /// zero. Returns whether the game is over.
    fn check_game_over(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
        if state.player.hp <= 0 && !state.is_game_over() {
            state.phase = TurnPhase::GameOver;
            events.push(GameEvent::PlayerDied);
            events.push(GameEvent::DeepestFloor {
                floor: state.max_floor_reached,
            });
            info!(
                "Player died on floor {} (deepest {})",
                state.floor, state.max_floor_reached
            );
        }
        state.is_game_over()
    }
}
