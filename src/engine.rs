//! The game facade.
//!
//! `Game` owns the state and the seedable rng, and exposes the structured
//! operation set the session layer drives: purchases, moves, attacks,
//! upgrades, phase advances, and the fog-filtered state query. Every
//! mutating operation is validate-then-apply: a rejection leaves the
//! state exactly as it was.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::grid::Pos;
use crate::board::piece::{PieceId, PieceKind, UpgradeAttribute};
use crate::board::player::{Player, PlayerId, ALL_PLAYERS};
use crate::board::state::{GameState, TurnPhase};
use crate::config::{ConfigError, GameConfig};
use crate::error::ActionError;
use crate::event::GameEvent;
use crate::resolve::{advance_turn, apply_win_check, resolve_attack, run_heal_phase};
use crate::visibility::{player_view, PlayerView};

/// A running match.
pub struct Game {
    state: GameState,
    config: GameConfig,
    rng: SmallRng,
}

impl Game {
    /// Starts a new game with an entropy-seeded rng.
    pub fn new(config: GameConfig) -> Result<Game, ConfigError> {
        Self::build(config, SmallRng::from_entropy())
    }

    /// Starts a new game with a fixed seed. Given the same config, seed,
    /// and action sequence, the match replays identically.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Game, ConfigError> {
        Self::build(config, SmallRng::seed_from_u64(seed))
    }

    fn build(config: GameConfig, rng: SmallRng) -> Result<Game, ConfigError> {
        config.validate()?;

        let players = [
            Player::new(
                PlayerId::North,
                config.player_names[0].clone(),
                config.starting_gold,
                config.bases[0],
            ),
            Player::new(
                PlayerId::South,
                config.player_names[1].clone(),
                config.starting_gold,
                config.bases[1],
            ),
        ];
        let mut state = GameState::new(config.width, config.height, players);

        for (i, player) in ALL_PLAYERS.into_iter().enumerate() {
            // validate() guaranteed these cells are free and in bounds.
            state
                .spawn(
                    Some(player),
                    PieceKind::Home,
                    config.stats(PieceKind::Home),
                    config.bases[i],
                )
                .map_err(|_| ConfigError::PositionCollision(config.bases[i]))?;
            state
                .spawn(
                    Some(player),
                    PieceKind::King,
                    config.stats(PieceKind::King),
                    config.kings[i],
                )
                .map_err(|_| ConfigError::PositionCollision(config.kings[i]))?;
        }
        for &pos in &config.ore_positions {
            state
                .spawn(None, PieceKind::Ore, config.stats(PieceKind::Ore), pos)
                .map_err(|_| ConfigError::PositionCollision(pos))?;
        }

        Ok(Game { state, config, rng })
    }

    // ---- queries ----

    /// Raw state, read-only. For the session layer and tests; agents must
    /// only receive [`visible_state`](Self::visible_state).
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn active_player(&self) -> PlayerId {
        self.state.active
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.state.phase {
            TurnPhase::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    /// The fog-filtered snapshot for `player`. Pure: may be called at any
    /// time, any number of times, for either side.
    pub fn visible_state(&self, player: PlayerId) -> PlayerView {
        player_view(&self.state, player)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    // ---- operations ----

    /// Buys a piece for `player` and places it near their base.
    ///
    /// Issued during `StructureAttack`, it implicitly declines the
    /// structure attack and opens the purchase phase.
    pub fn purchase(
        &mut self,
        player: PlayerId,
        kind: PieceKind,
        pos: Pos,
    ) -> Result<PieceId, ActionError> {
        self.ensure_active(player)?;
        match self.state.phase {
            TurnPhase::StructureAttack | TurnPhase::Purchases => {}
            _ => return Err(ActionError::WrongPhase),
        }
        if !kind.purchasable() {
            return Err(ActionError::KindNotAllowed(kind));
        }

        let need = self.config.stats(kind).cost;
        let have = self.state.player(player).gold;
        if have < need {
            return Err(ActionError::InsufficientGold { have, need });
        }
        if !self.state.grid.in_bounds(pos) {
            return Err(ActionError::OutOfBounds(pos));
        }
        let distance = pos.manhattan(self.state.player(player).base);
        if distance > self.config.placement_radius {
            return Err(ActionError::OutOfRange {
                distance,
                range: self.config.placement_radius,
            });
        }
        if self.state.grid.piece_at(pos).is_some() {
            return Err(ActionError::CellOccupied(pos));
        }

        // All checks passed; apply, including the implicit decline.
        self.state.phase = TurnPhase::Purchases;
        self.state.player_mut(player).gold -= need;
        let stats = *self.config.stats(kind);
        self.state.spawn(Some(player), kind, &stats, pos)
    }

    /// Moves one of `player`'s pieces during the piece-action phase.
    pub fn move_action(
        &mut self,
        player: PlayerId,
        piece: PieceId,
        pos: Pos,
    ) -> Result<(), ActionError> {
        self.ensure_active(player)?;
        self.ensure_piece_action_phase()?;
        let (from, move_range) = {
            let p = self.owned_actor(player, piece)?;
            (p.pos, p.move_range)
        };

        let distance = from.manhattan(pos);
        if distance > move_range {
            return Err(ActionError::OutOfRange { distance, range: move_range });
        }
        self.state.relocate(piece, pos)?;
        self.state.acted.insert(piece);
        Ok(())
    }

    /// Attacks the occupant of `target_pos`.
    ///
    /// During `StructureAttack` the attacker must be the player's own
    /// Home; success advances to the purchase phase. During
    /// `PieceActions` any owned non-Doctor, non-Home piece may attack
    /// once. The win check runs immediately after resolution, so a
    /// Home or King kill ends the game mid-turn.
    pub fn attack_action(
        &mut self,
        player: PlayerId,
        piece: PieceId,
        target_pos: Pos,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.ensure_active(player)?;

        match self.state.phase {
            TurnPhase::StructureAttack => {
                if self.state.player(player).home != Some(piece) {
                    return Err(ActionError::WrongPhase);
                }
                let mut events = resolve_attack(&mut self.state, &mut self.rng, piece, target_pos)?;
                self.state.phase = TurnPhase::Purchases;
                if let Some(over) = apply_win_check(&mut self.state) {
                    events.push(over);
                }
                Ok(events)
            }
            TurnPhase::PieceActions => {
                let kind = self.owned_actor(player, piece)?.kind;
                if !kind.can_attack() {
                    return Err(ActionError::KindNotAllowed(kind));
                }
                let mut events = resolve_attack(&mut self.state, &mut self.rng, piece, target_pos)?;
                self.state.acted.insert(piece);
                if let Some(over) = apply_win_check(&mut self.state) {
                    events.push(over);
                }
                Ok(events)
            }
            _ => Err(ActionError::WrongPhase),
        }
    }

    /// Spends gold to improve one attribute of an owned piece. Repeatable
    /// across turns; each invocation pays the flat price again.
    pub fn upgrade_action(
        &mut self,
        player: PlayerId,
        piece: PieceId,
        attribute: UpgradeAttribute,
    ) -> Result<(), ActionError> {
        self.ensure_active(player)?;
        self.ensure_piece_action_phase()?;
        self.owned_actor(player, piece)?;

        let need = self.config.upgrade_cost;
        let have = self.state.player(player).gold;
        if have < need {
            return Err(ActionError::InsufficientGold { have, need });
        }

        self.state.player_mut(player).gold -= need;
        let hp_bonus = self.config.upgrade_hp_bonus;
        let attack_bonus = self.config.upgrade_attack_bonus;
        let target = self.state.piece_mut(piece)?;
        match attribute {
            UpgradeAttribute::Hp => {
                target.hp += hp_bonus;
                target.max_hp += hp_bonus;
            }
            UpgradeAttribute::Attack => target.attack += attack_bonus,
            UpgradeAttribute::AttackRange => target.attack_range += 1,
        }
        self.state.acted.insert(piece);
        Ok(())
    }

    /// Explicitly resolves a piece's action as doing nothing.
    pub fn skip_action(&mut self, player: PlayerId, piece: PieceId) -> Result<(), ActionError> {
        self.ensure_active(player)?;
        self.ensure_piece_action_phase()?;
        self.owned_actor(player, piece)?;
        self.state.acted.insert(piece);
        Ok(())
    }

    /// Closes the purchase window and opens piece actions. Issued during
    /// `StructureAttack`, it also implicitly declines the structure
    /// attack.
    pub fn end_purchase_phase(&mut self, player: PlayerId) -> Result<(), ActionError> {
        self.ensure_active(player)?;
        match self.state.phase {
            TurnPhase::StructureAttack | TurnPhase::Purchases => {
                self.state.phase = TurnPhase::PieceActions;
                self.state.acted.clear();
                Ok(())
            }
            _ => Err(ActionError::WrongPhase),
        }
    }

    /// Ends the turn: any piece that has not acted is resolved as a skip,
    /// the heal phase runs, the win check runs, and play passes to the
    /// opponent (or the game ends).
    pub fn end_piece_actions(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, ActionError> {
        self.ensure_active(player)?;
        if self.state.phase != TurnPhase::PieceActions {
            return Err(ActionError::WrongPhase);
        }

        let mut events = run_heal_phase(&mut self.state, player);
        match apply_win_check(&mut self.state) {
            Some(over) => events.push(over),
            None => advance_turn(&mut self.state),
        }
        Ok(events)
    }

    // ---- validation helpers ----

    fn ensure_active(&self, player: PlayerId) -> Result<(), ActionError> {
        if matches!(self.state.phase, TurnPhase::GameOver(_)) {
            return Err(ActionError::WrongPhase);
        }
        if self.state.active != player {
            return Err(ActionError::NotYourTurn(player));
        }
        Ok(())
    }

    fn ensure_piece_action_phase(&self) -> Result<(), ActionError> {
        if self.state.phase != TurnPhase::PieceActions {
            return Err(ActionError::WrongPhase);
        }
        Ok(())
    }

    /// Resolves a piece the active player may act with this phase: owned,
    /// not a structure, and not yet acted. Unowned ids reject as invalid
    /// references so a player cannot probe for unseen enemies.
    fn owned_actor(
        &self,
        player: PlayerId,
        piece: PieceId,
    ) -> Result<&crate::board::piece::Piece, ActionError> {
        let p = self.state.piece(piece)?;
        if p.owner != Some(player) {
            return Err(ActionError::InvalidPieceReference(piece));
        }
        if p.kind.is_structure() {
            return Err(ActionError::KindNotAllowed(p.kind));
        }
        if self.state.acted.contains(&piece) {
            return Err(ActionError::PieceAlreadyActed(piece));
        }
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::with_seed(GameConfig::default(), 1).unwrap()
    }

    /// Advances North past the structure-attack and purchase windows.
    fn to_piece_actions(game: &mut Game) {
        game.end_purchase_phase(PlayerId::North).unwrap();
    }

    #[test]
    fn new_game_sets_up_both_sides() {
        let game = game();
        assert_eq!(game.active_player(), PlayerId::North);
        assert_eq!(game.phase(), TurnPhase::StructureAttack);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.winner(), None);
        for player in ALL_PLAYERS {
            let side = game.state().player(player);
            assert!(side.home.is_some());
            assert!(side.king.is_some());
            assert_eq!(side.gold, 10);
            assert_eq!(side.pieces.len(), 2);
        }
        // Two homes, two kings, two ores.
        assert_eq!(game.state().pieces().count(), 6);
    }

    #[test]
    fn new_game_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.kings[0] = config.bases[0];
        assert!(Game::with_seed(config, 1).is_err());
    }

    #[test]
    fn purchase_deducts_gold_and_places_piece() {
        let mut game = game();
        let id = game
            .purchase(PlayerId::North, PieceKind::Bow, Pos::new(2, 1))
            .unwrap();
        assert_eq!(game.state().player(PlayerId::North).gold, 7);
        assert_eq!(game.state().grid.piece_at(Pos::new(2, 1)), Some(id));
        assert_eq!(game.phase(), TurnPhase::Purchases);
    }

    #[test]
    fn purchase_rejects_insufficient_gold_without_mutation() {
        let mut config = GameConfig::default();
        config.starting_gold = 2;
        let mut game = Game::with_seed(config, 1).unwrap();

        let err = game
            .purchase(PlayerId::North, PieceKind::Sword, Pos::new(2, 1))
            .unwrap_err();
        assert_eq!(err, ActionError::InsufficientGold { have: 2, need: 4 });
        assert_eq!(game.state().player(PlayerId::North).gold, 2);
        assert_eq!(game.state().grid.piece_at(Pos::new(2, 1)), None);
        // The rejection did not implicitly open the purchase phase either.
        assert_eq!(game.phase(), TurnPhase::StructureAttack);
    }

    #[test]
    fn purchase_enforces_placement_radius() {
        let mut game = game();
        let err = game
            .purchase(PlayerId::North, PieceKind::Bow, Pos::new(4, 1))
            .unwrap_err();
        assert_eq!(err, ActionError::OutOfRange { distance: 3, range: 1 });
    }

    #[test]
    fn purchase_rejects_non_purchasable_kinds() {
        let mut game = game();
        for kind in [PieceKind::King, PieceKind::Home, PieceKind::Ore] {
            let err = game
                .purchase(PlayerId::North, kind, Pos::new(2, 1))
                .unwrap_err();
            assert_eq!(err, ActionError::KindNotAllowed(kind));
        }
    }

    #[test]
    fn operations_reject_the_inactive_player() {
        let mut game = game();
        let err = game
            .purchase(PlayerId::South, PieceKind::Bow, Pos::new(8, 7))
            .unwrap_err();
        assert_eq!(err, ActionError::NotYourTurn(PlayerId::South));
    }

    #[test]
    fn move_respects_move_range_and_occupancy() {
        let mut game = game();
        let sword = game
            .purchase(PlayerId::North, PieceKind::Sword, Pos::new(1, 2))
            .unwrap();
        to_piece_actions(&mut game);

        let err = game
            .move_action(PlayerId::North, sword, Pos::new(1, 5))
            .unwrap_err();
        assert_eq!(err, ActionError::OutOfRange { distance: 3, range: 2 });

        game.move_action(PlayerId::North, sword, Pos::new(1, 4)).unwrap();
        assert_eq!(game.state().piece(sword).unwrap().pos, Pos::new(1, 4));
    }

    #[test]
    fn a_piece_acts_at_most_once_per_turn() {
        let mut game = game();
        let sword = game
            .purchase(PlayerId::North, PieceKind::Sword, Pos::new(1, 2))
            .unwrap();
        to_piece_actions(&mut game);

        game.move_action(PlayerId::North, sword, Pos::new(1, 3)).unwrap();
        let err = game
            .move_action(PlayerId::North, sword, Pos::new(1, 4))
            .unwrap_err();
        assert_eq!(err, ActionError::PieceAlreadyActed(sword));
    }

    #[test]
    fn acting_on_an_enemy_piece_is_an_invalid_reference() {
        let mut game = game();
        let south_king = game.state().player(PlayerId::South).king.unwrap();
        to_piece_actions(&mut game);
        let err = game
            .move_action(PlayerId::North, south_king, Pos::new(7, 7))
            .unwrap_err();
        assert_eq!(err, ActionError::InvalidPieceReference(south_king));
    }

    #[test]
    fn doctors_cannot_declare_attack() {
        let mut game = game();
        let doctor = game
            .purchase(PlayerId::North, PieceKind::Doctor, Pos::new(1, 2))
            .unwrap();
        to_piece_actions(&mut game);
        let err = game
            .attack_action(PlayerId::North, doctor, Pos::new(1, 3))
            .unwrap_err();
        assert_eq!(err, ActionError::KindNotAllowed(PieceKind::Doctor));
    }

    #[test]
    fn upgrade_spends_flat_price_and_applies_one_attribute() {
        let mut game = game();
        let sword = game
            .purchase(PlayerId::North, PieceKind::Sword, Pos::new(1, 2))
            .unwrap();
        to_piece_actions(&mut game);

        game.upgrade_action(PlayerId::North, sword, UpgradeAttribute::Hp)
            .unwrap();
        let piece = game.state().piece(sword).unwrap();
        assert_eq!(piece.hp, 130);
        assert_eq!(piece.max_hp, 130);
        assert_eq!(piece.attack, 18);
        // Sword cost 4 + upgrade 2.
        assert_eq!(game.state().player(PlayerId::North).gold, 4);
    }

    #[test]
    fn upgrade_attack_range_adds_one_cell() {
        let mut game = game();
        let bow = game
            .purchase(PlayerId::North, PieceKind::Bow, Pos::new(1, 2))
            .unwrap();
        to_piece_actions(&mut game);
        game.upgrade_action(PlayerId::North, bow, UpgradeAttribute::AttackRange)
            .unwrap();
        assert_eq!(game.state().piece(bow).unwrap().attack_range, 4);
    }

    #[test]
    fn structure_attack_requires_the_home_and_advances_the_phase() {
        let mut game = game();
        let north_king = game.state().player(PlayerId::North).king.unwrap();
        // A normal piece cannot fire during the structure window.
        let err = game
            .attack_action(PlayerId::North, north_king, Pos::new(8, 8))
            .unwrap_err();
        assert_eq!(err, ActionError::WrongPhase);

        // An empty cell rejects, and the window stays open.
        let home = game.state().player(PlayerId::North).home.unwrap();
        let err = game
            .attack_action(PlayerId::North, home, Pos::new(5, 1))
            .unwrap_err();
        assert_eq!(err, ActionError::NoTarget(Pos::new(5, 1)));
        assert_eq!(game.phase(), TurnPhase::StructureAttack);
    }

    #[test]
    fn end_piece_actions_heals_and_passes_the_turn() {
        let mut game = game();
        to_piece_actions(&mut game);
        let events = game.end_piece_actions(PlayerId::North).unwrap();
        assert!(events.is_empty());
        assert_eq!(game.active_player(), PlayerId::South);
        assert_eq!(game.phase(), TurnPhase::StructureAttack);
    }

    #[test]
    fn game_over_rejects_all_further_operations() {
        let mut game = game();
        let south_king = game.state().player(PlayerId::South).king.unwrap();
        // Force the terminal state directly through the state machine.
        game.state.destroy(south_king).unwrap();
        to_piece_actions(&mut game);
        let events = game.end_piece_actions(PlayerId::North).unwrap();
        assert_eq!(events, vec![GameEvent::GameOver { winner: PlayerId::North }]);
        assert_eq!(game.winner(), Some(PlayerId::North));

        let err = game
            .purchase(PlayerId::North, PieceKind::Bow, Pos::new(2, 1))
            .unwrap_err();
        assert_eq!(err, ActionError::WrongPhase);
    }
}
