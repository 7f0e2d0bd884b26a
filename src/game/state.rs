//! # Game State Module
//!
//! The single owned state value for a running game.
//!
//! This module contains the main GameState struct that holds the level, the
//! player, monsters and items for the current floor, along with the turn and
//! floor counters. Only the controller and the turn engine mutate it; the
//! outside world sees immutable [`GameSnapshot`]s.

use crate::{
    config, DescentResult, EntityId, GameEvent, Item, ItemKind, Level, Monster, Player, Position,
    TileType,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the turn state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Ready for the next player action
    AwaitingAction,
    /// A player action is being resolved
    Resolving,
    /// The player reached the stairs; the next floor is being set up
    FloorComplete,
    /// The player died. Terminal until a new game is started
    GameOver,
}

/// Raw setup request as supplied by a front end.
///
/// Missing values fall back to the defaults and out-of-range values are
/// clamped when converted into [`GameSettings`].
///
/// # Examples
///
/// ```
/// use descent::{GameConfig, GameSettings};
///
/// let settings = GameSettings::from_config(&GameConfig {
///     monster_count: Some(99),
///     potion_count: None,
/// });
/// assert_eq!(settings.base_monster_count, 20);
/// assert_eq!(settings.potion_count, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Monsters on the first floor
    #[serde(default)]
    pub monster_count: Option<i64>,
    /// Potions on every floor
    #[serde(default)]
    pub potion_count: Option<i64>,
}

impl GameConfig {
    /// Builds a config from raw text fields.
    ///
    /// Each field is read up to its first non-digit, so `"7abc"` is 7 and
    /// `"3.9"` is 3. Values beyond the `i64` range saturate. Text without a
    /// leading integer counts as missing.
    pub fn from_fields(monster_count: &str, potion_count: &str) -> Self {
        Self {
            monster_count: parse_leading_int(monster_count),
            potion_count: parse_leading_int(potion_count),
        }
    }

    /// Parses a JSON config document.
    pub fn from_json_str(json: &str) -> DescentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> DescentResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Reads an optionally signed run of leading digits, saturating on overflow.
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for digit in digits.bytes().map_while(|b| (b as char).to_digit(10)) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(digit as i64);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { value.saturating_neg() } else { value })
}

/// Validated per-game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Monsters on floor 1; each deeper floor adds one
    pub base_monster_count: u32,
    /// Potions placed on every floor
    pub potion_count: u32,
}

impl GameSettings {
    /// Clamps a raw config into range.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            base_monster_count: clamp_count(
                config.monster_count,
                config::DEFAULT_MONSTER_COUNT,
                config::MAX_MONSTER_COUNT,
            ),
            potion_count: clamp_count(
                config.potion_count,
                config::DEFAULT_POTION_COUNT,
                config::MAX_POTION_COUNT,
            ),
        }
    }

    /// Monsters to place on the given floor.
    pub fn monster_count_for_floor(&self, floor: u32) -> u32 {
        self.base_monster_count + floor.saturating_sub(1)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

fn clamp_count(value: Option<i64>, default: u32, max: u32) -> u32 {
    match value {
        Some(v) => v.clamp(0, max as i64) as u32,
        None => default,
    }
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Number of monsters the player killed
    pub monsters_defeated: u32,
    /// Number of potions drunk
    pub potions_consumed: u32,
    /// Total damage dealt by the player
    pub damage_dealt: u64,
    /// Total damage taken by the player
    pub damage_taken: u64,
    /// Stairs taken
    pub floors_descended: u32,
}

impl GameStatistics {
    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        use crate::Combatant;

        match event {
            GameEvent::Attacked {
                attacker: Combatant::Player,
                damage,
                ..
            } => {
                self.damage_dealt += *damage as u64;
            }
            GameEvent::Attacked {
                defender: Combatant::Player,
                damage,
                ..
            } => {
                self.damage_taken += *damage as u64;
            }
            GameEvent::Defeated {
                combatant: Combatant::Monster { .. },
            } => {
                self.monsters_defeated += 1;
            }
            GameEvent::PotionConsumed { .. } => {
                self.potions_consumed += 1;
            }
            GameEvent::FloorDescended { .. } => {
                self.floors_descended += 1;
            }
            _ => {}
        }
    }
}

/// Central game state for one running game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The current floor's tile grid
    pub level: Level,
    /// The player character
    pub player: Player,
    /// Live monsters, in spawn order
    pub monsters: Vec<Monster>,
    /// Items on the floor, in placement order
    pub items: Vec<Item>,
    /// Current floor number (1 once a game is running)
    pub floor: u32,
    /// Deepest floor reached this game
    pub max_floor_reached: u32,
    /// Turn counter for the current floor, starting at 1
    pub turn_number: u32,
    /// Turn state machine phase
    pub phase: TurnPhase,
    /// Clamped setup values
    pub settings: GameSettings,
    /// Progress counters
    pub statistics: GameStatistics,
    next_entity_id: EntityId,
}

impl GameState {
    /// Creates a pre-game state: an all-wall level, floor 0, a fresh player.
    ///
    /// # Examples
    ///
    /// ```
    /// use descent::{GameSettings, GameState};
    ///
    /// let state = GameState::new(GameSettings::default());
    /// assert_eq!(state.floor, 0);
    /// assert_eq!(state.player.hp, 10);
    /// assert!(!state.is_game_over());
    /// ```
    pub fn new(settings: GameSettings) -> Self {
        Self::new_with_level(
            Level::new(config::MAP_WIDTH, config::MAP_HEIGHT),
            settings,
        )
    }

    /// Creates a state around a pre-built level.
    ///
    /// Used when you have a hand-made level, typically in tests; the player
    /// starts at the origin and should be moved onto floor.
    pub fn new_with_level(level: Level, settings: GameSettings) -> Self {
        Self {
            level,
            player: Player::new(Position::origin()),
            monsters: Vec::new(),
            items: Vec::new(),
            floor: 0,
            max_floor_reached: 0,
            turn_number: 1,
            phase: TurnPhase::AwaitingAction,
            settings,
            statistics: GameStatistics::default(),
            next_entity_id: 1,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Hands out the next monster id.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Spawns a monster and returns its id.
    pub fn spawn_monster(&mut self, kind: crate::MonsterKind, position: Position) -> EntityId {
        let id = self.allocate_entity_id();
        self.monsters.push(Monster::new(id, kind, position));
        id
    }

    /// Index of the living monster standing on `pos`, if any.
    pub fn monster_index_at(&self, pos: Position) -> Option<usize> {
        self.monsters
            .iter()
            .position(|m| m.is_alive() && m.position == pos)
    }

    /// Index of the item lying on `pos`, if any.
    pub fn item_index_at(&self, pos: Position) -> Option<usize> {
        self.items.iter().position(|i| i.position == pos)
    }

    /// Whether the player, a monster or an item already occupies `pos`.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.player.position == pos
            || self.monsters.iter().any(|m| m.position == pos)
            || self.items.iter().any(|i| i.position == pos)
    }

    /// Whether `pos` is a floor tile nothing occupies.
    pub fn is_free_floor(&self, pos: Position) -> bool {
        self.level.get_tile(pos) == Some(TileType::Floor) && !self.is_occupied(pos)
    }

    /// Drops monsters whose health has reached zero.
    pub fn remove_dead_monsters(&mut self) {
        self.monsters.retain(Monster::is_alive);
    }

    /// Number of stairs items on the floor.
    pub fn stairs_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.kind == ItemKind::Stairs)
            .count()
    }

    /// Records events in the statistics.
    pub fn record_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.statistics.update_from_event(event);
        }
    }

    /// Builds an immutable view for a presentation layer.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.level.width,
            height: self.level.height,
            tiles: self.level.tiles.clone(),
            player: PlayerView {
                position: self.player.position,
                hp: self.player.hp,
                max_hp: self.player.max_hp,
            },
            monsters: self
                .monsters
                .iter()
                .filter(|m| m.is_alive())
                .map(|m| MonsterView {
                    position: m.position,
                    symbol: m.symbol(),
                    name: m.name().to_string(),
                })
                .collect(),
            items: self
                .items
                .iter()
                .map(|i| ItemView {
                    position: i.position,
                    kind: i.kind,
                })
                .collect(),
            floor: self.floor,
            max_floor_reached: self.max_floor_reached,
            turn_number: self.turn_number,
            game_over: self.is_game_over(),
        }
    }
}

/// Player fields visible to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
}

/// Monster fields visible to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonsterView {
    pub position: Position,
    pub symbol: char,
    pub name: String,
}

/// Item fields visible to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub position: Position,
    pub kind: ItemKind,
}

/// Immutable copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Vec<TileType>>,
    pub player: PlayerView,
    pub monsters: Vec<MonsterView>,
    pub items: Vec<ItemView>,
    pub floor: u32,
    pub max_floor_reached: u32,
    pub turn_number: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Serializes the snapshot as JSON.
    pub fn to_json(&self) -> DescentResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Combatant, MonsterKind};

    #[test]
    fn test_settings_clamp_and_default() {
        let settings = GameSettings::from_config(&GameConfig {
            monster_count: Some(-4),
            potion_count: Some(42),
        });
        assert_eq!(settings.base_monster_count, 0);
        assert_eq!(settings.potion_count, 10);

        let defaults = GameSettings::default();
        assert_eq!(defaults.base_monster_count, 10);
        assert_eq!(defaults.potion_count, 10);
    }

    #[test]
    fn test_config_from_fields() {
        let config = GameConfig::from_fields(" 7 ", "lots");
        assert_eq!(config.monster_count, Some(7));
        assert_eq!(config.potion_count, None);
        let settings = GameSettings::from_config(&config);
        assert_eq!(settings.potion_count, 10);
    }

    #[test]
    fn test_config_fields_use_leading_integer() {
        let config = GameConfig::from_fields("7abc", "3.9");
        assert_eq!(config.monster_count, Some(7));
        assert_eq!(config.potion_count, Some(3));

        let config = GameConfig::from_fields("-4", "+2");
        assert_eq!(config.monster_count, Some(-4));
        assert_eq!(config.potion_count, Some(2));
        assert_eq!(GameSettings::from_config(&config).base_monster_count, 0);

        assert_eq!(GameConfig::from_fields("-", "").monster_count, None);
        assert_eq!(GameConfig::from_fields("abc7", "").monster_count, None);
    }

    #[test]
    fn test_oversized_fields_clamp_to_maximum() {
        let config = GameConfig::from_fields("99999999999999999999", "1e3");
        assert_eq!(config.monster_count, Some(i64::MAX));
        assert_eq!(config.potion_count, Some(1));

        let settings = GameSettings::from_config(&config);
        assert_eq!(settings.base_monster_count, 20);
        assert_eq!(settings.potion_count, 1);

        let config = GameConfig::from_fields("-99999999999999999999", "");
        assert_eq!(config.monster_count, Some(i64::MIN + 1));
        assert_eq!(GameSettings::from_config(&config).base_monster_count, 0);
    }

    #[test]
    fn test_config_from_json() {
        let config = GameConfig::from_json_str(r#"{"monster_count": 3}"#).unwrap();
        assert_eq!(config.monster_count, Some(3));
        assert_eq!(config.potion_count, None);
        assert!(GameConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_monster_count_scales_with_floor() {
        let settings = GameSettings {
            base_monster_count: 10,
            potion_count: 0,
        };
        assert_eq!(settings.monster_count_for_floor(1), 10);
        assert_eq!(settings.monster_count_for_floor(5), 14);
    }

    #[test]
    fn test_occupancy_queries() {
        let mut level = Level::new(10, 10);
        level.carve_rect(Position::new(1, 1), 5, 5).unwrap();
        let mut state = GameState::new_with_level(level, GameSettings::default());
        state.player.position = Position::new(1, 1);
        let id = state.spawn_monster(MonsterKind::Slime, Position::new(2, 2));
        state.items.push(Item::new(ItemKind::Potion, Position::new(3, 3)));

        assert_eq!(id, 1);
        assert!(!state.is_free_floor(Position::new(1, 1)));
        assert!(!state.is_free_floor(Position::new(2, 2)));
        assert!(!state.is_free_floor(Position::new(3, 3)));
        assert!(!state.is_free_floor(Position::new(0, 0)));
        assert!(state.is_free_floor(Position::new(4, 4)));
        assert_eq!(state.monster_index_at(Position::new(2, 2)), Some(0));
        assert_eq!(state.item_index_at(Position::new(3, 3)), Some(0));
    }

    #[test]
    fn test_snapshot_hides_dead_monsters() {
        let mut state = GameState::new(GameSettings::default());
        state.spawn_monster(MonsterKind::Goblin, Position::new(4, 4));
        state.spawn_monster(MonsterKind::Slime, Position::new(5, 4));
        state.monsters[1].hp = 0;

        let snapshot = state.snapshot();
        assert_eq!(snapshot.monsters.len(), 1);
        assert_eq!(snapshot.monsters[0].symbol, 'g');
        assert!(!snapshot.game_over);
        assert!(snapshot.to_json().unwrap().contains("\"turn_number\":1"));

        state.remove_dead_monsters();
        assert_eq!(state.monsters.len(), 1);
    }

    #[test]
    fn test_statistics_from_events() {
        let mut stats = GameStatistics::default();
        stats.update_from_event(&GameEvent::Attacked {
            attacker: Combatant::Player,
            defender: Combatant::Monster {
                name: "Slime".to_string(),
            },
            damage: 1,
        });
        stats.update_from_event(&GameEvent::Attacked {
            attacker: Combatant::Monster {
                name: "Orc".to_string(),
            },
            defender: Combatant::Player,
            damage: 2,
        });
        stats.update_from_event(&GameEvent::Defeated {
            combatant: Combatant::Monster {
                name: "Slime".to_string(),
            },
        });
        stats.update_from_event(&GameEvent::Defeated {
            combatant: Combatant::Player,
        });
        assert_eq!(stats.damage_dealt, 1);
        assert_eq!(stats.damage_taken, 2);
        assert_eq!(stats.monsters_defeated, 1);
    }
}
