//! Main game state structure

use crate::core::{CardType, Player, PlayerId};
use crate::game::compound::CompoundAction;
use crate::game::sequence::ExtendedSequence;
use crate::game::{Action, GameLogger};
use crate::zones::{CardZone, DeckType, PlayerZones, Supply};
use crate::{DominionError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Log through `$logger.$method`, formatting only when the line would be emitted
macro_rules! log_sequence_event {
    ($logger:expr, $method:ident, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            if $logger.verbosity() >= $crate::game::VerbosityLevel::Normal {
                $logger.$method(&format!($($arg)*));
            }
        }
    };
}

/// Complete game state
///
/// Designed to be cheap to clone: search forks a state, together with its
/// pending compound actions, for every branch it explores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Players in turn order; a player's id is their index
    pub players: Vec<Player>,

    /// Zones for each player
    pub player_zones: Vec<(PlayerId, PlayerZones)>,

    /// Shared supply piles
    pub supply: Supply,

    /// Shared trash
    pub trash: CardZone,

    /// Whose turn it is
    pub turn_player: PlayerId,

    pub turn_number: u32,

    /// Compound actions awaiting input; the last one is the active owner
    actions_in_progress: Vec<CompoundAction>,

    /// RNG for shuffling (serializable for deterministic replay)
    pub rng: ChaCha12Rng,

    /// Centralized logger for game events
    #[serde(skip)]
    pub logger: GameLogger,
}

impl GameState {
    /// Create a game with one player per name, player 0 to act
    pub fn new(player_names: &[&str]) -> Self {
        let players: Vec<Player> = player_names
            .iter()
            .enumerate()
            .map(|(idx, &name)| Player::new(PlayerId::from(idx), name))
            .collect();
        let player_zones = players
            .iter()
            .map(|p| (p.id, PlayerZones::new(p.id)))
            .collect();

        GameState {
            players,
            player_zones,
            supply: Supply::new(),
            trash: CardZone::new(DeckType::Trash, None),
            turn_player: PlayerId::new(0),
            turn_number: 1,
            actions_in_progress: Vec::new(),
            rng: ChaCha12Rng::seed_from_u64(0),
            logger: GameLogger::new(),
        }
    }

    pub fn new_two_player(player1_name: &str, player2_name: &str) -> Self {
        Self::new(&[player1_name, player2_name])
    }

    /// Set the RNG seed for deterministic shuffles
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(DominionError::PlayerNotFound(id))
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DominionError::PlayerNotFound(id))
    }

    /// Name for log output, falling back to the numeric id
    pub fn player_name(&self, id: PlayerId) -> String {
        self.get_player(id)
            .map(|p| p.name.to_string())
            .unwrap_or_else(|_| format!("Player {id}"))
    }

    /// Every other player, starting to the left of `player`
    pub fn opponents_in_turn_order(&self, player: PlayerId) -> Vec<PlayerId> {
        let count = self.players.len();
        (1..count)
            .map(|offset| self.players[(player.index() + offset) % count].id)
            .collect()
    }

    pub fn get_player_zones(&self, player_id: PlayerId) -> Option<&PlayerZones> {
        self.player_zones
            .iter()
            .find(|(id, _)| *id == player_id)
            .map(|(_, zones)| zones)
    }

    pub fn get_player_zones_mut(&mut self, player_id: PlayerId) -> Option<&mut PlayerZones> {
        self.player_zones
            .iter_mut()
            .find(|(id, _)| *id == player_id)
            .map(|(_, zones)| zones)
    }

    fn zone_mut(&mut self, deck: DeckType, player: PlayerId) -> Result<&mut CardZone> {
        if deck == DeckType::Trash {
            return Ok(&mut self.trash);
        }
        self.get_player_zones_mut(player)
            .and_then(|zones| zones.get_zone_mut(deck))
            .ok_or(DominionError::PlayerNotFound(player))
    }

    /// Cards in a zone; the trash ignores `player`, unknown players have none
    pub fn zone_contents(&self, deck: DeckType, player: PlayerId) -> &[CardType] {
        if deck == DeckType::Trash {
            return &self.trash.cards;
        }
        self.get_player_zones(player)
            .and_then(|zones| zones.get_zone(deck))
            .map(|zone| zone.cards.as_slice())
            .unwrap_or(&[])
    }

    pub fn remove_card(&mut self, deck: DeckType, player: PlayerId, card: CardType) -> Result<()> {
        if self.zone_mut(deck, player)?.remove(card) {
            Ok(())
        } else {
            Err(DominionError::CardNotInZone {
                card,
                zone: deck,
                player,
            })
        }
    }

    pub fn add_card(&mut self, deck: DeckType, player: PlayerId, card: CardType) -> Result<()> {
        self.zone_mut(deck, player)?.add(card);
        Ok(())
    }

    pub fn move_card(
        &mut self,
        card: CardType,
        from: DeckType,
        to: DeckType,
        player: PlayerId,
    ) -> Result<()> {
        // Check the destination first so a failed move leaves state untouched
        self.zone_mut(to, player)?;
        self.remove_card(from, player, card)?;
        self.add_card(to, player, card)
    }

    /// Supply card kinds with cards left that satisfy `predicate`, in supply order
    pub fn candidate_gains(&self, predicate: impl Fn(CardType) -> bool) -> Vec<CardType> {
        self.supply.available().filter(|&card| predicate(card)).collect()
    }

    /// Take a card from the supply into one of `player`'s zones
    pub fn gain_card(
        &mut self,
        player: PlayerId,
        card: CardType,
        destination: DeckType,
    ) -> Result<()> {
        self.zone_mut(destination, player)?;
        if !self.supply.take(card) {
            return Err(DominionError::SupplyExhausted(card));
        }
        self.add_card(destination, player, card)
    }

    /// Move an action card from hand to the table, spending an action
    pub fn play_card(&mut self, player: PlayerId, card: CardType) -> Result<()> {
        if !self.get_player(player)?.can_play_action() {
            return Err(DominionError::InvalidAction(format!(
                "player {player} has no actions left to play {card}"
            )));
        }
        self.move_card(card, DeckType::Hand, DeckType::Table, player)?;
        self.get_player_mut(player)?.spend_action();
        Ok(())
    }

    /// Draw up to `count` cards, reshuffling the discard pile when the draw
    /// pile runs out; returns the number drawn
    pub fn draw_cards(&mut self, player: PlayerId, count: usize) -> Result<usize> {
        let mut drawn = 0;
        while drawn < count {
            let zones = self
                .get_player_zones_mut(player)
                .ok_or(DominionError::PlayerNotFound(player))?;
            if zones.draw.is_empty() {
                if zones.discard.is_empty() {
                    break;
                }
                let discard = std::mem::take(&mut zones.discard.cards);
                zones.draw.cards = discard;
                self.shuffle_draw_pile(player);
                continue;
            }
            if let Some(card) = zones.draw.draw_top() {
                zones.hand.add(card);
                drawn += 1;
            }
        }
        Ok(drawn)
    }

    /// Shuffle a player's draw pile using the game's RNG
    pub fn shuffle_draw_pile(&mut self, player: PlayerId) {
        if let Some(zones) = self
            .player_zones
            .iter_mut()
            .find(|(id, _)| *id == player)
            .map(|(_, z)| z)
        {
            zones.draw.shuffle(&mut self.rng);
        }
    }

    /// Register `owner` as the active sequence owner
    pub fn set_action_in_progress(&mut self, owner: CompoundAction) {
        log_sequence_event!(
            self.logger,
            sequence,
            "{} starts resolving {}",
            self.player_name(owner.player()),
            owner.kind()
        );
        self.actions_in_progress.push(owner);
    }

    pub fn is_action_in_progress(&self) -> bool {
        !self.actions_in_progress.is_empty()
    }

    /// The active sequence owner, if any
    pub fn active_sequence(&self) -> Option<&CompoundAction> {
        self.actions_in_progress.last()
    }

    /// Every pending compound action, bottom of the stack first
    pub fn actions_in_progress(&self) -> &[CompoundAction] {
        &self.actions_in_progress
    }

    /// The player who must choose next
    pub fn current_player(&self) -> PlayerId {
        match self.active_sequence() {
            Some(owner) => owner.current_player(self),
            None => self.turn_player,
        }
    }

    /// Menu published by the active sequence owner
    ///
    /// # Panics
    /// If no sequence is in progress.
    pub fn follow_on_actions(&self) -> Vec<Action> {
        match self.active_sequence() {
            Some(owner) => owner.follow_on_actions(self),
            None => panic!("follow-on actions requested with no active sequence owner"),
        }
    }

    /// Every action the current player may take right now
    ///
    /// With a sequence in progress this is its menu. Otherwise it is one
    /// `PlayCard` per distinct playable card in the turn player's hand
    /// (when they have an action left), followed by `DoNothing` to end the
    /// action phase.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_action_in_progress() {
            return self.follow_on_actions();
        }
        let player = self.turn_player;
        let can_play = self
            .get_player(player)
            .map(|p| p.can_play_action())
            .unwrap_or(false);
        let mut actions = Vec::new();
        if can_play {
            for &card in self.zone_contents(DeckType::Hand, player) {
                if let Some(compound) = CompoundAction::for_card(card, player) {
                    let play = Action::PlayCard(compound);
                    if !actions.contains(&play) {
                        actions.push(play);
                    }
                }
            }
        }
        actions.push(Action::DoNothing);
        actions
    }

    /// Execute `action` and notify the active owner it was chosen from
    ///
    /// The owner is the sequence that was on top before the action ran; an
    /// action that starts a nested sequence lands above it. Completed
    /// sequences are then popped from the top.
    pub fn apply_action(&mut self, action: &Action) -> Result<()> {
        let owner_depth = self.actions_in_progress.len();
        log_sequence_event!(self.logger, normal, "{}", action);

        action.execute(self)?;

        if owner_depth > 0 {
            let idx = owner_depth - 1;
            let mut owner = self.actions_in_progress.remove(idx);
            owner.register_action_taken(self, action);
            self.actions_in_progress.insert(idx, owner);
        }
        self.pop_completed_sequences();
        Ok(())
    }

    fn pop_completed_sequences(&mut self) {
        while let Some(owner) = self.actions_in_progress.last() {
            if !owner.execution_complete() {
                break;
            }
            log_sequence_event!(
                self.logger,
                sequence,
                "{} finished resolving {}",
                self.player_name(owner.player()),
                owner.kind()
            );
            self.actions_in_progress.pop();
        }
    }

    /// Start the next player's turn
    pub fn advance_turn(&mut self) -> Result<()> {
        if self.is_action_in_progress() {
            return Err(DominionError::InvalidAction(
                "cannot end the turn while a sequence is in progress".to_string(),
            ));
        }
        let next = (self.turn_player.index() + 1) % self.players.len();
        self.turn_player = PlayerId::from(next);
        self.turn_number += 1;
        self.get_player_mut(self.turn_player)?.reset_turn();
        Ok(())
    }
}
