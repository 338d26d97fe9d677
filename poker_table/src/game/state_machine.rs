//! Betting round engine.
//!
//! One [`BettingRound`] carries a hand's betting from the blinds through
//! the river. Each street it sits in [`RoundState::AwaitingAction`] until
//! the street settles or all but one player has folded. Settlement is
//! tracked with two counters ([`PlayerCounts`]): players still able to act
//! and players that have matched the current required bet since the last
//! raise. Once the second reaches the first, and nobody able to act still
//! owes chips, the street is over.
//!
//! The engine never deals cards. Revealing the board and the showdown are
//! the session's job; it calls [`BettingRound::start_street`] once a street
//! settles.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt};

use super::{
    constants::{DEFAULT_BIG_BLIND, DEFAULT_MIN_RAISE, DEFAULT_SMALL_BLIND, FLOP_SIZE},
    entities::{
        Action, ActionChoice, ActionChoices, Blinds, Player, PlayerId, Pot, SeatIndex, SeatRole,
        Usd,
    },
    errors::{ActionError, ConfigError, SessionError},
    events::GameEvent,
};

/// One betting phase, bounded by a shared set of visible community cards.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Self; 4] = [Self::PreFlop, Self::Flop, Self::Turn, Self::River];

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::PreFlop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => None,
        }
    }

    /// Community cards revealed as this street begins.
    #[must_use]
    pub const fn cards_revealed(self) -> usize {
        match self {
            Self::PreFlop => 0,
            Self::Flop => FLOP_SIZE,
            Self::Turn | Self::River => 1,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PreFlop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum HandOverReason {
    /// Everyone else folded.
    LastPlayerStanding(PlayerId),
    /// The river settled (or the board ran out) and hands were compared.
    Showdown,
}

impl fmt::Display for HandOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastPlayerStanding(player) => write!(f, "{player} is the last player standing"),
            Self::Showdown => write!(f, "showdown"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RoundState {
    AwaitingAction(SeatIndex),
    StreetSettled,
    HandOver(HandOverReason),
}

/// Engine-level settings. Table-level configuration wraps these.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSettings {
    pub small_blind: Usd,
    pub big_blind: Usd,
    /// A raise must lift the required bet by at least this much.
    pub min_raise: Usd,
    /// Shuffle the seat order at the start of each hand.
    pub shuffle_seats: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(DEFAULT_SMALL_BLIND, DEFAULT_BIG_BLIND, DEFAULT_MIN_RAISE)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(small_blind: Usd, big_blind: Usd, min_raise: Usd) -> Self {
        Self {
            small_blind,
            big_blind,
            min_raise,
            shuffle_seats: true,
        }
    }

    #[must_use]
    pub const fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 {
            return Err(ConfigError::NotPositive {
                field: "small_blind".to_string(),
            });
        }
        if self.min_raise == 0 {
            return Err(ConfigError::NotPositive {
                field: "min_raise".to_string(),
            });
        }
        if self.big_blind <= self.small_blind {
            return Err(ConfigError::BlindsOutOfOrder {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerCounts {
    /// Players that can still make decisions this hand. All-in and
    /// folded players are inactive.
    pub num_active: usize,
    /// Players that have matched the required bet since the street began
    /// or since the last raise.
    pub num_called: usize,
}

/// Seats of the small and big blind. Heads-up the dealer posts the small
/// blind.
#[must_use]
pub const fn blind_seats(num_players: usize) -> (SeatIndex, SeatIndex) {
    if num_players == 2 { (0, 1) } else { (1, 2) }
}

#[derive(Clone, Debug)]
pub struct BettingRound {
    settings: GameSettings,
    players: Vec<Player>,
    pot: Pot,
    street: Street,
    required_bet: Usd,
    counts: PlayerCounts,
    state: RoundState,
    /// Actions applied during the current street.
    turn: usize,
    starting_balances: Vec<Usd>,
    events: VecDeque<GameEvent>,
}

impl BettingRound {
    /// Seat `players` in the given order (seat 0 deals), assign roles,
    /// post the blinds and wait on the first pre-flop decision.
    pub fn new(players: Vec<Player>, settings: GameSettings) -> Result<Self, SessionError> {
        if players.len() < 2 {
            return Err(SessionError::NotEnoughPlayers);
        }
        // Every pot, bet and award is bounded by the chips at the table.
        let total: u64 = players.iter().map(|p| u64::from(p.balance)).sum();
        if total > u64::from(Usd::MAX) {
            return Err(SessionError::TooManyChips {
                total,
                max: Usd::MAX,
            });
        }
        let num_players = players.len();
        let mut round = Self {
            starting_balances: players.iter().map(|p| p.balance).collect(),
            pot: Pot::new(num_players),
            street: Street::PreFlop,
            required_bet: settings.big_blind,
            counts: PlayerCounts::default(),
            state: RoundState::StreetSettled,
            turn: 0,
            events: VecDeque::new(),
            players,
            settings,
        };

        let (small, big) = blind_seats(num_players);
        for player in &mut round.players {
            player.role = SeatRole::Normal;
        }
        round.players[0].role = SeatRole::Dealer;
        round.players[small].role = SeatRole::SmallBlind;
        round.players[big].role = SeatRole::BigBlind;
        round.events.push_back(GameEvent::Dealt {
            dealer: round.players[0].id.clone(),
        });
        round.post_blind(small, round.settings.small_blind);
        round.post_blind(big, round.settings.big_blind);

        round.counts = PlayerCounts {
            num_active: round.num_can_act(),
            num_called: 0,
        };
        let first = if num_players == 2 { small } else { big + 1 };
        round.state = round.next_state(first);
        Ok(round)
    }

    fn post_blind(&mut self, seat: SeatIndex, blind: Usd) {
        let player = &mut self.players[seat];
        let amount = blind.min(player.balance);
        player.balance -= amount;
        if player.balance == 0 {
            player.all_in = true;
        }
        self.pot.bet(seat, amount);
        self.events.push_back(GameEvent::PostedBlind {
            player: player.id.clone(),
            role: player.role,
            amount,
        });
    }

    fn commit(&mut self, seat: SeatIndex, amount: Usd) -> bool {
        let player = &mut self.players[seat];
        player.balance -= amount;
        if player.balance == 0 {
            player.all_in = true;
        }
        self.pot.bet(seat, amount);
        player.all_in
    }

    fn num_can_act(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    fn others_can_act(&self, seat: SeatIndex) -> bool {
        self.players
            .iter()
            .enumerate()
            .any(|(other, p)| other != seat && p.can_act())
    }

    fn owed(&self, seat: SeatIndex) -> Usd {
        self.required_bet
            .saturating_sub(self.pot.street_contribution(seat))
    }

    fn is_settled(&self) -> bool {
        let someone_owes = self
            .players
            .iter()
            .enumerate()
            .any(|(seat, p)| p.can_act() && self.owed(seat) > 0);
        !someone_owes
            && (self.counts.num_active < 2 || self.counts.num_called >= self.counts.num_active)
    }

    /// State after an action, with the turn passing to the first seat at or
    /// after `from` that can still act.
    fn next_state(&self, from: SeatIndex) -> RoundState {
        let mut live = self.players.iter().filter(|p| p.is_live());
        if let (Some(last), None) = (live.next(), live.next()) {
            return RoundState::HandOver(HandOverReason::LastPlayerStanding(last.id.clone()));
        }
        if self.is_settled() {
            return RoundState::StreetSettled;
        }
        let num_players = self.players.len();
        (0..num_players)
            .map(|offset| (from + offset) % num_players)
            .find(|seat| self.players[*seat].can_act())
            .map_or(RoundState::StreetSettled, RoundState::AwaitingAction)
    }

    /// Legal choices for the seat that is up, if any.
    #[must_use]
    pub fn choices(&self) -> Option<ActionChoices> {
        match self.state {
            RoundState::AwaitingAction(seat) => Some(self.choices_for(seat)),
            _ => None,
        }
    }

    fn choices_for(&self, seat: SeatIndex) -> ActionChoices {
        let balance = self.players[seat].balance;
        let owed = self.owed(seat);
        let mut choices = vec![ActionChoice::Fold];
        choices.push(if owed == 0 {
            ActionChoice::Check
        } else {
            ActionChoice::Call(owed.min(balance))
        });
        let min = self.min_raise_to();
        let max = self.pot.street_contribution(seat) + balance;
        if max >= min && self.others_can_act(seat) {
            choices.push(ActionChoice::Raise { min, max });
        }
        choices.into()
    }

    /// Smallest legal "raise to" target on this street.
    #[must_use]
    pub fn min_raise_to(&self) -> Usd {
        self.required_bet.saturating_add(self.settings.min_raise)
    }

    /// Apply `action` for `player`. Nothing changes when the action is
    /// rejected and the same player stays up.
    pub fn apply(&mut self, player: &PlayerId, action: Action) -> Result<(), ActionError> {
        let result = self.try_apply(player, action);
        if let Err(error) = &result {
            warn!("rejected {player} on the {}: {error}", self.street);
        }
        result
    }

    fn try_apply(&mut self, player: &PlayerId, action: Action) -> Result<(), ActionError> {
        let seat = match self.state {
            RoundState::AwaitingAction(seat) => seat,
            RoundState::HandOver(_) => return Err(ActionError::HandOver),
            RoundState::StreetSettled => return Err(ActionError::NotAllowed { action }),
        };
        let expected = &self.players[seat].id;
        if expected != player {
            return Err(ActionError::NotYourTurn {
                expected: expected.clone(),
                got: player.clone(),
            });
        }

        let balance = self.players[seat].balance;
        let owed = self.owed(seat);
        let all_in = match action {
            Action::Fold => {
                self.players[seat].folded = true;
                self.counts.num_active = self.counts.num_active.saturating_sub(1);
                false
            }
            Action::Check => {
                if owed > 0 {
                    return Err(ActionError::NotAllowed { action });
                }
                self.counts.num_called += 1;
                false
            }
            Action::Call => {
                if owed == 0 {
                    return Err(ActionError::NotAllowed { action });
                }
                let all_in = self.commit(seat, owed.min(balance));
                if all_in {
                    self.counts.num_active = self.counts.num_active.saturating_sub(1);
                } else {
                    self.counts.num_called += 1;
                }
                all_in
            }
            Action::Raise(to) => {
                let min = self.min_raise_to();
                if to < min {
                    return Err(ActionError::RaiseTooSmall { min, got: to });
                }
                let cost = to - self.pot.street_contribution(seat);
                if cost > balance {
                    return Err(ActionError::InsufficientFunds {
                        needed: cost,
                        available: balance,
                    });
                }
                if !self.others_can_act(seat) {
                    return Err(ActionError::NotAllowed { action });
                }
                let all_in = self.commit(seat, cost);
                self.required_bet = to;
                if all_in {
                    self.counts.num_active = self.counts.num_active.saturating_sub(1);
                    self.counts.num_called = 0;
                } else {
                    self.counts.num_called = 1;
                }
                all_in
            }
        };

        debug!(
            "{player} {action} on the {} (pot {}, {}/{} called)",
            self.street,
            self.pot.size(),
            self.counts.num_called,
            self.counts.num_active
        );
        self.events.push_back(GameEvent::Acted {
            player: player.clone(),
            action,
            all_in,
        });
        self.turn += 1;
        self.state = self.next_state(seat + 1);
        Ok(())
    }

    /// Begin `street` once the previous one settled. The required bet
    /// resets and the first able player after the dealer is up.
    pub fn start_street(&mut self, street: Street) {
        self.street = street;
        self.required_bet = 0;
        self.turn = 0;
        self.pot.new_street();
        self.counts = PlayerCounts {
            num_active: self.num_can_act(),
            num_called: 0,
        };
        self.state = self.next_state(1 % self.players.len());
        debug!(
            "{street} begins with {} players able to act",
            self.counts.num_active
        );
    }

    pub(crate) fn finish_showdown(&mut self) {
        self.state = RoundState::HandOver(HandOverReason::Showdown);
    }

    pub(crate) fn award(&mut self, seat: SeatIndex, amount: Usd) {
        if let Some(player) = self.players.get_mut(seat) {
            player.balance += amount;
        }
    }

    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Player who must act next, if the engine is waiting on one.
    #[must_use]
    pub fn acting(&self) -> Option<&Player> {
        match self.state {
            RoundState::AwaitingAction(seat) => self.players.get(seat),
            _ => None,
        }
    }

    #[must_use]
    pub fn seat_of(&self, player: &PlayerId) -> Option<SeatIndex> {
        self.players.iter().position(|p| &p.id == player)
    }

    /// Chips needed by `seat` to match the required bet, capped at its
    /// balance.
    #[must_use]
    pub fn to_call(&self, seat: SeatIndex) -> Usd {
        self.players
            .get(seat)
            .map_or(0, |p| self.owed(seat).min(p.balance))
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    #[must_use]
    pub fn street(&self) -> Street {
        self.street
    }

    #[must_use]
    pub fn required_bet(&self) -> Usd {
        self.required_bet
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn counts(&self) -> PlayerCounts {
        self.counts
    }

    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn starting_balances(&self) -> &[Usd] {
        &self.starting_balances
    }

    /// Chips taken out of balances this hand. Equals the pot size until
    /// the pot is paid out.
    #[must_use]
    pub fn total_invested(&self) -> Usd {
        self.starting_balances
            .iter()
            .zip(&self.players)
            .map(|(start, p)| start.saturating_sub(p.balance))
            .sum()
    }
}
