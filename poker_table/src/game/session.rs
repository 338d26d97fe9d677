//! One hand of poker, from the deal to the showdown.
//!
//! A [`GameSession`] owns the deck, the board, the betting engine and the
//! action log. It never waits on anyone: callers ask [`GameSession::awaiting`]
//! who is up and feed decisions to [`GameSession::apply`]. Streets are
//! revealed and the pot paid out as soon as betting allows.

use log::{debug, info};
use rand::{Rng, rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};
use uuid::Uuid;

use super::{
    constants::{MAX_PLAYERS, MIN_PLAYERS, PLAYER_HAND_SIZE, TABLE_SIZE},
    entities::{
        Action, ActionChoices, Card, Deck, Player, PlayerId, SeatIndex, SeatRole, Usd,
    },
    errors::SessionError,
    events::{GameEvent, LogEntry},
    functional::{Evaluation, argmax, best_hand, evaluate},
    state_machine::{BettingRound, GameSettings, HandOverReason, RoundState, Street},
};

pub type SessionId = Uuid;

/// Everything a transport needs to solicit one decision.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ActionRequest {
    pub session: SessionId,
    pub player: PlayerId,
    pub street: Street,
    /// Actions already taken on this street.
    pub turn: usize,
    pub choices: ActionChoices,
    pub to_call: Usd,
    pub min_raise_to: Option<Usd>,
    pub balance: Usd,
    pub pot: Usd,
    pub hole_cards: Vec<Card>,
    pub board: Vec<Card>,
}

impl fmt::Display for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, you're up on the {} (pot {}, balance {}): {}",
            self.player, self.street, self.pot, self.balance, self.choices
        )
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub balance: Usd,
    pub role: SeatRole,
    pub folded: bool,
    pub all_in: bool,
    /// Chips put in on the current street.
    pub street_bet: Usd,
    /// Only the viewer's own cards, plus every live hand after a showdown.
    pub cards: Option<Vec<Card>>,
}

/// A snapshot of the session as one player may see it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameView {
    pub session: SessionId,
    pub street: Street,
    pub board: Vec<Card>,
    pub pot: Usd,
    pub required_bet: Usd,
    pub players: Vec<PlayerView>,
    pub acting: Option<PlayerId>,
    /// The viewer's best hand from the cards they can see.
    pub best_hand: Option<Evaluation>,
    pub log: Vec<LogEntry>,
    pub is_over: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Award {
    pub player: PlayerId,
    pub amount: Usd,
    /// Index of the side pot, 0 being the main pot.
    pub pot: usize,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ShownHand {
    pub player: PlayerId,
    pub evaluation: Evaluation,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerResult {
    pub player: PlayerId,
    pub starting_balance: Usd,
    pub final_balance: Usd,
}

impl PlayerResult {
    #[must_use]
    pub fn net(&self) -> i64 {
        i64::from(self.final_balance) - i64::from(self.starting_balance)
    }
}

/// How a finished hand turned out. Callers that keep balances between
/// hands read them back from `results`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HandOutcome {
    pub reason: HandOverReason,
    pub awards: Vec<Award>,
    pub shown: Vec<ShownHand>,
    pub results: Vec<PlayerResult>,
}

impl HandOutcome {
    /// Players that won any chips, in award order.
    #[must_use]
    pub fn winners(&self) -> Vec<&PlayerId> {
        let mut winners: Vec<&PlayerId> = Vec::new();
        for award in &self.awards {
            if !winners.contains(&&award.player) {
                winners.push(&award.player);
            }
        }
        winners
    }

    #[must_use]
    pub fn final_balances(&self) -> Vec<(PlayerId, Usd)> {
        self.results
            .iter()
            .map(|r| (r.player.clone(), r.final_balance))
            .collect()
    }
}

#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    deck: Deck,
    board: Vec<Card>,
    round: BettingRound,
    log: Vec<LogEntry>,
    outcome: Option<HandOutcome>,
}

impl GameSession {
    pub fn new(seats: Vec<(PlayerId, Usd)>, settings: GameSettings) -> Result<Self, SessionError> {
        Self::with_rng(seats, settings, &mut rng())
    }

    /// Shuffle the deck (and the seats, if the settings ask for it) with
    /// `rng`, then deal.
    pub fn with_rng<R: Rng + ?Sized>(
        mut seats: Vec<(PlayerId, Usd)>,
        settings: GameSettings,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if settings.shuffle_seats {
            seats.shuffle(rng);
        }
        let mut deck = Deck::default();
        deck.shuffle_with(rng);
        Self::with_deck(seats, settings, deck)
    }

    /// Deal from `deck` as is, with seats in the given order. Seat 0 deals.
    /// Each seat takes two consecutive cards starting from seat 0, and the
    /// board comes off the deck after that.
    pub fn with_deck(
        seats: Vec<(PlayerId, Usd)>,
        settings: GameSettings,
        mut deck: Deck,
    ) -> Result<Self, SessionError> {
        settings.validate()?;
        if seats.len() < MIN_PLAYERS {
            return Err(SessionError::NotEnoughPlayers);
        }
        if seats.len() > MAX_PLAYERS {
            return Err(SessionError::TooManyPlayers { max: MAX_PLAYERS });
        }
        {
            let mut unique = HashSet::with_capacity(seats.len());
            if let Some((dup, _)) = seats.iter().find(|(id, _)| !unique.insert(id)) {
                return Err(SessionError::DuplicatePlayer(dup.clone()));
            }
        }
        let needed = seats.len() * PLAYER_HAND_SIZE + TABLE_SIZE;
        if deck.len() < needed {
            return Err(SessionError::DeckExhausted {
                needed,
                available: deck.len(),
            });
        }

        let mut players = Vec::with_capacity(seats.len());
        for (id, balance) in seats {
            let mut player = Player::new(id, balance);
            player.cards = deck
                .deal_many(PLAYER_HAND_SIZE)
                .ok_or(SessionError::DeckExhausted {
                    needed,
                    available: deck.len(),
                })?;
            players.push(player);
        }

        let round = BettingRound::new(players, settings)?;
        let mut session = Self {
            id: Uuid::new_v4(),
            deck,
            board: Vec::with_capacity(TABLE_SIZE),
            round,
            log: Vec::new(),
            outcome: None,
        };
        info!(
            "session {} dealt to {} players, blinds {}",
            session.id,
            session.round.players().len(),
            session.round.settings().blinds()
        );
        session.flush_events();
        session.advance()?;
        Ok(session)
    }

    fn record(&mut self, event: GameEvent) {
        let entry = LogEntry::new(self.log.len(), event);
        self.log.push(entry);
    }

    fn flush_events(&mut self) {
        for event in self.round.drain_events() {
            self.record(event);
        }
    }

    /// Reveal streets and settle the hand until someone has to act.
    fn advance(&mut self) -> Result<(), SessionError> {
        loop {
            match self.round.state().clone() {
                RoundState::AwaitingAction(_) => return Ok(()),
                RoundState::HandOver(HandOverReason::LastPlayerStanding(winner)) => {
                    if self.outcome.is_none() {
                        self.settle_uncontested(&winner);
                    }
                    return Ok(());
                }
                RoundState::HandOver(HandOverReason::Showdown) => return Ok(()),
                RoundState::StreetSettled => match self.round.street().next() {
                    Some(street) => self.reveal(street)?,
                    None => return self.showdown(),
                },
            }
        }
    }

    fn reveal(&mut self, street: Street) -> Result<(), SessionError> {
        let count = street.cards_revealed();
        let cards = self
            .deck
            .deal_many(count)
            .ok_or(SessionError::DeckExhausted {
                needed: count,
                available: self.deck.len(),
            })?;
        debug!("session {} reveals the {street}", self.id);
        self.board.extend_from_slice(&cards);
        self.record(GameEvent::Revealed { street, cards });
        self.round.start_street(street);
        self.flush_events();
        Ok(())
    }

    fn settle_uncontested(&mut self, winner: &PlayerId) {
        let amount = self.round.pot().size();
        let mut awards = Vec::with_capacity(1);
        if let Some(seat) = self.round.seat_of(winner) {
            self.round.award(seat, amount);
            awards.push(Award {
                player: winner.clone(),
                amount,
                pot: 0,
            });
            self.record(GameEvent::WonPot {
                player: winner.clone(),
                amount,
            });
        }
        self.conclude(
            HandOverReason::LastPlayerStanding(winner.clone()),
            awards,
            Vec::new(),
        );
    }

    fn showdown(&mut self) -> Result<(), SessionError> {
        let num_players = self.round.players().len();
        let mut evaluations: Vec<Option<Evaluation>> = vec![None; num_players];
        let mut shown = Vec::new();
        for (seat, player) in self.round.players().iter().enumerate() {
            if !player.is_live() {
                continue;
            }
            let mut cards = player.cards.clone();
            cards.extend_from_slice(&self.board);
            let evaluation = evaluate(&cards)?;
            shown.push(ShownHand {
                player: player.id.clone(),
                evaluation: evaluation.clone(),
            });
            evaluations[seat] = Some(evaluation);
        }
        for hand in &shown {
            self.record(GameEvent::ShowedHand {
                player: hand.player.clone(),
                evaluation: hand.evaluation.clone(),
            });
        }

        let folded: Vec<bool> = self.round.players().iter().map(|p| p.folded).collect();
        let mut awards = Vec::new();
        for (index, side_pot) in self.round.pot().side_pots(&folded).into_iter().enumerate() {
            let contenders: Vec<(SeatIndex, Evaluation)> = side_pot
                .eligible
                .iter()
                .filter_map(|seat| evaluations[*seat].clone().map(|e| (*seat, e)))
                .collect();
            let hands: Vec<Evaluation> = contenders.iter().map(|(_, e)| e.clone()).collect();
            let mut winners: Vec<SeatIndex> = argmax(&hands)
                .into_iter()
                .map(|i| contenders[i].0)
                .collect();
            if winners.is_empty() {
                continue;
            }
            // Odd chips go to the first winner after the dealer.
            winners.sort_by_key(|seat| (seat + num_players - 1) % num_players);
            let num_winners = Usd::try_from(winners.len()).unwrap_or(Usd::MAX);
            let share = side_pot.amount / num_winners;
            let odd = side_pot.amount % num_winners;
            for (i, seat) in winners.into_iter().enumerate() {
                let amount = if i == 0 { share + odd } else { share };
                let player = self.round.players()[seat].id.clone();
                self.round.award(seat, amount);
                self.record(GameEvent::WonPot {
                    player: player.clone(),
                    amount,
                });
                awards.push(Award {
                    player,
                    amount,
                    pot: index,
                });
            }
        }

        self.round.finish_showdown();
        self.conclude(HandOverReason::Showdown, awards, shown);
        Ok(())
    }

    fn conclude(&mut self, reason: HandOverReason, awards: Vec<Award>, shown: Vec<ShownHand>) {
        let results = self
            .round
            .players()
            .iter()
            .zip(self.round.starting_balances())
            .map(|(p, start)| PlayerResult {
                player: p.id.clone(),
                starting_balance: *start,
                final_balance: p.balance,
            })
            .collect();
        info!("session {} is over: {reason}", self.id);
        self.outcome = Some(HandOutcome {
            reason,
            awards,
            shown,
            results,
        });
    }

    /// Apply `player`'s decision and return the log entries it produced,
    /// including any reveals and payouts that followed. A rejected action
    /// leaves the session untouched.
    pub fn apply(
        &mut self,
        player: &PlayerId,
        action: Action,
    ) -> Result<Vec<LogEntry>, SessionError> {
        let start = self.log.len();
        self.round.apply(player, action)?;
        self.flush_events();
        self.advance()?;
        Ok(self.log[start..].to_vec())
    }

    /// The decision the session is waiting on, if any.
    #[must_use]
    pub fn awaiting(&self) -> Option<ActionRequest> {
        let RoundState::AwaitingAction(seat) = self.round.state() else {
            return None;
        };
        let seat = *seat;
        let player = self.round.players().get(seat)?;
        let choices = self.round.choices()?;
        Some(ActionRequest {
            session: self.id,
            player: player.id.clone(),
            street: self.round.street(),
            turn: self.round.turn(),
            to_call: self.round.to_call(seat),
            min_raise_to: choices.raise_range().map(|(min, _)| min),
            balance: player.balance,
            pot: self.round.pot().size(),
            hole_cards: player.cards.clone(),
            board: self.board.clone(),
            choices,
        })
    }

    #[must_use]
    pub fn view(&self, viewer: &PlayerId) -> GameView {
        let showdown = matches!(
            self.round.state(),
            RoundState::HandOver(HandOverReason::Showdown)
        );
        let players = self
            .round
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerView {
                id: p.id.clone(),
                balance: p.balance,
                role: p.role,
                folded: p.folded,
                all_in: p.all_in,
                street_bet: self.round.pot().street_contribution(seat),
                cards: (&p.id == viewer || (showdown && p.is_live())).then(|| p.cards.clone()),
            })
            .collect();
        let best_hand = self
            .round
            .players()
            .iter()
            .find(|p| &p.id == viewer)
            .and_then(|p| {
                let mut cards = p.cards.clone();
                cards.extend_from_slice(&self.board);
                best_hand(&cards).ok()
            });
        GameView {
            session: self.id,
            street: self.round.street(),
            board: self.board.clone(),
            pot: self.round.pot().size(),
            required_bet: self.round.required_bet(),
            players,
            acting: self.round.acting().map(|p| p.id.clone()),
            best_hand,
            log: self.log.clone(),
            is_over: self.is_over(),
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&HandOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.round.state(), RoundState::HandOver(_))
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    #[must_use]
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    #[must_use]
    pub fn round(&self) -> &BettingRound {
        &self.round
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.round.players()
    }

    #[must_use]
    pub fn street(&self) -> Street {
        self.round.street()
    }

    #[must_use]
    pub fn pot_size(&self) -> Usd {
        self.round.pot().size()
    }

    #[must_use]
    pub fn balances(&self) -> Vec<(PlayerId, Usd)> {
        self.round
            .players()
            .iter()
            .map(|p| (p.id.clone(), p.balance))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{HandCategory, Rank::*, Suit::*};
    use crate::game::errors::ActionError;

    fn seats(balances: &[Usd]) -> Vec<(PlayerId, Usd)> {
        balances
            .iter()
            .enumerate()
            .map(|(i, b)| (PlayerId::new(&format!("p{i}")), *b))
            .collect()
    }

    fn id(seat: usize) -> PlayerId {
        PlayerId::new(&format!("p{seat}"))
    }

    fn session(balances: &[Usd], top: &[Card]) -> GameSession {
        let deck = Deck::stacked(top).unwrap();
        GameSession::with_deck(seats(balances), GameSettings::default(), deck).unwrap()
    }

    /// Play the passive line (call or check) until the hand ends.
    fn check_down(session: &mut GameSession) {
        while let Some(request) = session.awaiting() {
            let action = if request.to_call > 0 {
                Action::Call
            } else {
                Action::Check
            };
            session.apply(&request.player, action).unwrap();
        }
    }

    fn balance(session: &GameSession, seat: usize) -> Usd {
        session.players()[seat].balance
    }

    #[test]
    fn test_heads_up_check_down_pot_is_twenty() {
        let mut session = session(
            &[1000, 1000],
            &[
                Card(Ace, Spade),
                Card(Ace, Heart),
                Card(Two, Club),
                Card(Seven, Diamond),
                Card(King, Spade),
                Card(Nine, Diamond),
                Card(Five, Club),
                Card(Three, Heart),
                Card(Jack, Diamond),
            ],
        );
        check_down(&mut session);
        assert!(session.is_over());
        assert_eq!(session.pot_size(), 20);
        assert_eq!(session.board().len(), 5);
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.reason, HandOverReason::Showdown);
        assert_eq!(outcome.winners(), vec![&id(0)]);
        assert_eq!(balance(&session, 0), 1010);
        assert_eq!(balance(&session, 1), 990);
        assert_eq!(outcome.results[0].net(), 10);
        assert_eq!(outcome.shown[0].evaluation.category, HandCategory::Pair);
    }

    #[test]
    fn test_log_records_deal_blinds_and_reveals() {
        let mut session = session(&[1000, 1000], &[]);
        let lines: Vec<String> = session.log().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "p0 deals.",
                "p0 places 5 as the small blind.",
                "p1 places 10 as the big blind."
            ]
        );
        let entries = session.apply(&id(0), Action::Call).unwrap();
        assert_eq!(entries.len(), 1);
        let entries = session.apply(&id(1), Action::Check).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(matches!(
            entries[1].event,
            GameEvent::Revealed {
                street: Street::Flop,
                ..
            }
        ));
        let seqs: Vec<usize> = session.log().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, (0..session.log().len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_raise_below_minimum_leaves_session_untouched() {
        let mut session = session(&[1000, 1000], &[]);
        let before = session.awaiting().unwrap();
        let log_len = session.log().len();
        let err = session.apply(&id(0), Action::Raise(15)).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidAction(ActionError::RaiseTooSmall { min: 20, got: 15 })
        );
        assert_eq!(session.awaiting().unwrap(), before);
        assert_eq!(session.log().len(), log_len);
    }

    #[test]
    fn test_fold_out_awards_pot_without_showdown() {
        let mut session = session(&[1000, 1000, 1000], &[]);
        session.apply(&id(0), Action::Fold).unwrap();
        session.apply(&id(1), Action::Fold).unwrap();
        assert!(session.is_over());
        assert!(session.board().is_empty());
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.reason, HandOverReason::LastPlayerStanding(id(2)));
        assert!(outcome.shown.is_empty());
        assert_eq!(balance(&session, 2), 1005);
        assert_eq!(balance(&session, 1), 995);
        assert_eq!(balance(&session, 0), 1000);
        assert_eq!(
            session.log().last().map(ToString::to_string),
            Some("p2 wins 15.".to_string())
        );
    }

    #[test]
    fn test_split_pot_odd_chip_goes_left_of_dealer() {
        let mut session = session(
            &[1000, 1000, 1000],
            &[
                Card(Two, Diamond),
                Card(Three, Diamond),
                Card(Four, Club),
                Card(Four, Heart),
                Card(Two, Club),
                Card(Three, Club),
                Card(Ten, Spade),
                Card(Jack, Heart),
                Card(Queen, Diamond),
                Card(King, Club),
                Card(Ace, Spade),
            ],
        );
        session.apply(&id(0), Action::Call).unwrap();
        session.apply(&id(1), Action::Fold).unwrap();
        check_down(&mut session);
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.winners(), vec![&id(2), &id(0)]);
        assert_eq!(balance(&session, 2), 990 + 13);
        assert_eq!(balance(&session, 0), 990 + 12);
        assert_eq!(balance(&session, 1), 995);
    }

    #[test]
    fn test_side_pot_for_short_all_in() {
        let mut session = session(
            &[1000, 1000, 50],
            &[
                Card(King, Spade),
                Card(King, Heart),
                Card(Two, Club),
                Card(Seven, Diamond),
                Card(Ace, Spade),
                Card(Ace, Heart),
                Card(Ace, Diamond),
                Card(Nine, Diamond),
                Card(Five, Club),
                Card(Three, Heart),
                Card(Jack, Spade),
            ],
        );
        session.apply(&id(0), Action::Raise(200)).unwrap();
        session.apply(&id(1), Action::Call).unwrap();
        session.apply(&id(2), Action::Call).unwrap();
        assert!(session.players()[2].all_in);
        check_down(&mut session);

        let outcome = session.outcome().unwrap();
        assert_eq!(
            outcome.awards,
            vec![
                Award {
                    player: id(2),
                    amount: 150,
                    pot: 0
                },
                Award {
                    player: id(0),
                    amount: 300,
                    pot: 1
                },
            ]
        );
        assert_eq!(balance(&session, 0), 1100);
        assert_eq!(balance(&session, 1), 800);
        assert_eq!(balance(&session, 2), 150);
    }

    #[test]
    fn test_all_in_preflop_runs_out_the_board() {
        let mut session = session(&[1000, 10], &[]);
        assert!(session.players()[1].all_in);
        session.apply(&id(0), Action::Call).unwrap();
        assert!(session.is_over());
        assert_eq!(session.board().len(), 5);
        let total: Usd = session.balances().iter().map(|(_, b)| b).sum();
        assert_eq!(total, 1010);
    }

    #[test]
    fn test_construction_errors() {
        let settings = GameSettings::default();
        assert_eq!(
            GameSession::with_deck(seats(&[100]), settings.clone(), Deck::default()).unwrap_err(),
            SessionError::NotEnoughPlayers
        );
        assert_eq!(
            GameSession::with_deck(seats(&[100; 12]), settings.clone(), Deck::default())
                .unwrap_err(),
            SessionError::TooManyPlayers { max: MAX_PLAYERS }
        );
        let dup = vec![(id(0), 100), (id(0), 100)];
        assert_eq!(
            GameSession::with_deck(dup, settings.clone(), Deck::default()).unwrap_err(),
            SessionError::DuplicatePlayer(id(0))
        );
        let mut short = Deck::default();
        short.deal_many(40).unwrap();
        assert_eq!(
            GameSession::with_deck(seats(&[100; 4]), settings, short).unwrap_err(),
            SessionError::DeckExhausted {
                needed: 13,
                available: 12
            }
        );
        let bad = GameSettings::new(10, 5, 10);
        assert!(matches!(
            GameSession::with_deck(seats(&[100, 100]), bad, Deck::default()).unwrap_err(),
            SessionError::Config(_)
        ));
        assert!(matches!(
            GameSession::with_deck(
                seats(&[3_000_000_000, 3_000_000_000]),
                GameSettings::default(),
                Deck::default()
            )
            .unwrap_err(),
            SessionError::TooManyChips { .. }
        ));
    }

    #[test]
    fn test_view_hides_other_hole_cards_until_showdown() {
        let mut session = session(&[1000, 1000], &[]);
        let view = session.view(&id(0));
        assert!(view.players[0].cards.is_some());
        assert!(view.players[1].cards.is_none());
        assert_eq!(view.acting, Some(id(0)));
        assert!(view.best_hand.is_some());

        let spectator = session.view(&PlayerId::from("someone"));
        assert!(spectator.players.iter().all(|p| p.cards.is_none()));
        assert!(spectator.best_hand.is_none());

        check_down(&mut session);
        let view = session.view(&id(0));
        assert!(view.is_over);
        assert!(view.players.iter().all(|p| p.cards.is_some()));
        assert_eq!(view.acting, None);
    }

    #[test]
    fn test_view_ships_as_json() {
        let session = session(&[1000, 1000], &[]);
        let view = session.view(&id(1));
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["players"][0]["cards"].is_null());
        assert_eq!(json["players"][1]["cards"].as_array().map(Vec::len), Some(2));

        let back: GameView = serde_json::from_value(json).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn test_request_context() {
        let session = session(&[1000, 1000, 1000], &[]);
        let request = session.awaiting().unwrap();
        assert_eq!(request.player, id(0));
        assert_eq!(request.street, Street::PreFlop);
        assert_eq!(request.turn, 0);
        assert_eq!(request.to_call, 10);
        assert_eq!(request.min_raise_to, Some(20));
        assert_eq!(request.pot, 15);
        assert_eq!(request.hole_cards.len(), 2);
        assert!(request.board.is_empty());
    }

    #[test]
    fn test_seeded_sessions_match() {
        use rand::{SeedableRng, rngs::StdRng};
        let a = GameSession::with_rng(
            seats(&[100, 100, 100]),
            GameSettings::default(),
            &mut StdRng::seed_from_u64(11),
        )
        .unwrap();
        let b = GameSession::with_rng(
            seats(&[100, 100, 100]),
            GameSettings::default(),
            &mut StdRng::seed_from_u64(11),
        )
        .unwrap();
        assert_eq!(a.players(), b.players());
    }
}
