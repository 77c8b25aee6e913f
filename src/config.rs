//! Game configuration: grid extents, per-kind stat tables, and economy
//! tunables.
//!
//! The config is an immutable value constructed once and handed to
//! `Game::new`. Persistence belongs to the surrounding layer: it can load
//! a tuned table from JSON with [`GameConfig::from_json`] and save one by
//! serializing the value back; the core never touches files.

use serde::{Deserialize, Serialize};

use crate::board::grid::Pos;
use crate::board::piece::PieceKind;

/// Base stat line for one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStats {
    pub hp: i32,
    pub attack: i32,
    pub cost: u32,
    pub vision: i32,
    pub move_range: i32,
    pub attack_range: i32,
}

/// Errors from validating a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("grid dimensions must be positive, got {width}x{height}")]
    BadDimensions { width: i32, height: i32 },

    #[error("setup position {0} is outside the grid")]
    PositionOutOfBounds(Pos),

    #[error("setup positions collide at {0}")]
    PositionCollision(Pos),
}

/// Immutable tunables for one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub starting_gold: u32,
    /// Maximum Manhattan distance from a player's base at which new
    /// pieces may be placed. Earlier variants of the game used 2.
    pub placement_radius: i32,
    /// Flat price of any upgrade, independent of kind. Documented as a
    /// constant in the original balance tables.
    pub upgrade_cost: u32,
    /// Added to both current and max hp by an hp upgrade.
    pub upgrade_hp_bonus: i32,
    /// Added to attack power by an attack upgrade.
    pub upgrade_attack_bonus: i32,
    pub player_names: [String; 2],
    /// Home positions, one per player.
    pub bases: [Pos; 2],
    /// Starting King positions, one per player.
    pub kings: [Pos; 2],
    /// Neutral Ore deposits.
    pub ore_positions: Vec<Pos>,
    pub king: KindStats,
    pub doctor: KindStats,
    pub bow: KindStats,
    pub sword: KindStats,
    pub home: KindStats,
    pub ore: KindStats,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 10,
            height: 10,
            starting_gold: 10,
            placement_radius: 1,
            upgrade_cost: 2,
            upgrade_hp_bonus: 20,
            upgrade_attack_bonus: 5,
            player_names: ["North".to_string(), "South".to_string()],
            bases: [Pos::new(1, 1), Pos::new(8, 8)],
            kings: [Pos::new(2, 1), Pos::new(7, 8)],
            ore_positions: vec![Pos::new(4, 5), Pos::new(5, 4)],
            king: KindStats { hp: 150, attack: 20, cost: 0, vision: 2, move_range: 1, attack_range: 1 },
            doctor: KindStats { hp: 120, attack: 10, cost: 5, vision: 2, move_range: 1, attack_range: 0 },
            bow: KindStats { hp: 100, attack: 15, cost: 3, vision: 3, move_range: 1, attack_range: 3 },
            sword: KindStats { hp: 110, attack: 18, cost: 4, vision: 2, move_range: 2, attack_range: 1 },
            home: KindStats { hp: 250, attack: 25, cost: 0, vision: 2, move_range: 0, attack_range: 2 },
            ore: KindStats { hp: 40, attack: 0, cost: 0, vision: 0, move_range: 0, attack_range: 0 },
        }
    }
}

impl GameConfig {
    /// Stat line for a kind.
    pub fn stats(&self, kind: PieceKind) -> &KindStats {
        match kind {
            PieceKind::King => &self.king,
            PieceKind::Doctor => &self.doctor,
            PieceKind::Bow => &self.bow,
            PieceKind::Sword => &self.sword,
            PieceKind::Home => &self.home,
            PieceKind::Ore => &self.ore,
        }
    }

    /// Parses a config from a JSON document. Missing fields fall back to
    /// the defaults, so a tunables file only needs to list overrides.
    pub fn from_json(json: &str) -> Result<GameConfig, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks dimensions and the setup layout: every starting position in
    /// bounds and no two on the same cell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::BadDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let mut seen: Vec<Pos> = Vec::new();
        let setup = self
            .bases
            .iter()
            .chain(self.kings.iter())
            .chain(self.ore_positions.iter());
        for &pos in setup {
            if pos.x < 0 || pos.x >= self.width || pos.y < 0 || pos.y >= self.height {
                return Err(ConfigError::PositionOutOfBounds(pos));
            }
            if seen.contains(&pos) {
                return Err(ConfigError::PositionCollision(pos));
            }
            seen.push(pos);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn from_json_applies_overrides_over_defaults() {
        let config = GameConfig::from_json(
            r#"{"starting_gold": 25, "sword": {"hp": 90, "attack": 22, "cost": 5, "vision": 2, "move_range": 2, "attack_range": 1}}"#,
        )
        .unwrap();
        assert_eq!(config.starting_gold, 25);
        assert_eq!(config.sword.attack, 22);
        // Untouched fields keep their defaults.
        assert_eq!(config.width, 10);
        assert_eq!(config.bow.cost, 3);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(GameConfig::from_json("not json").is_err());
    }

    #[test]
    fn validate_rejects_bad_dimensions() {
        let mut config = GameConfig::default();
        config.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadDimensions { .. })
        ));
    }

    #[test]
    fn validate_rejects_out_of_bounds_setup() {
        let mut config = GameConfig::default();
        config.ore_positions.push(Pos::new(10, 3));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PositionOutOfBounds(_))
        ));
    }

    #[test]
    fn validate_rejects_colliding_setup() {
        let mut config = GameConfig::default();
        config.ore_positions.push(config.bases[0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PositionCollision(_))
        ));
    }

    #[test]
    fn purchase_costs_sit_in_documented_band() {
        let config = GameConfig::default();
        for kind in [PieceKind::Doctor, PieceKind::Bow, PieceKind::Sword] {
            let cost = config.stats(kind).cost;
            assert!((3..=5).contains(&cost), "{kind} cost {cost} outside 3-5");
        }
    }
}
