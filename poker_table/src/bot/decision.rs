//! Bot decision-making with a few distinct play styles.

use enum_dispatch::enum_dispatch;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::game::{
    ActionRequest,
    entities::{Action, ActionChoice, Card, HandCategory, Usd},
    functional::best_hand,
};

// === Hand Strength Base Values ===
// Baseline strength for each category of the best hand seen so far

/// Hand strength for high card (weakest hand: 10%)
const STRENGTH_HIGH_CARD: f32 = 0.1;

/// Hand strength for one pair (25% = beats high card)
const STRENGTH_PAIR: f32 = 0.25;

const STRENGTH_TWO_PAIR: f32 = 0.40;

const STRENGTH_THREE_OF_A_KIND: f32 = 0.55;

const STRENGTH_STRAIGHT: f32 = 0.70;

const STRENGTH_FLUSH: f32 = 0.75;

const STRENGTH_FULL_HOUSE: f32 = 0.85;

const STRENGTH_FOUR_OF_A_KIND: f32 = 0.95;

/// Straight and royal flushes are nearly unbeatable
const STRENGTH_STRAIGHT_FLUSH: f32 = 0.99;

/// Estimate hand strength in `[0.0, 1.0]` from the best hand the cards
/// make so far, plus a small bonus for the highest card in it.
#[must_use]
pub fn estimate_strength(hole_cards: &[Card], board: &[Card]) -> f32 {
    let mut cards = Vec::with_capacity(hole_cards.len() + board.len());
    cards.extend_from_slice(hole_cards);
    cards.extend_from_slice(board);

    let Ok(hand) = best_hand(&cards) else {
        return 0.0;
    };

    let base_strength = match hand.category {
        HandCategory::HighCard => STRENGTH_HIGH_CARD,
        HandCategory::Pair => STRENGTH_PAIR,
        HandCategory::TwoPair => STRENGTH_TWO_PAIR,
        HandCategory::ThreeOfAKind => STRENGTH_THREE_OF_A_KIND,
        HandCategory::Straight => STRENGTH_STRAIGHT,
        HandCategory::Flush => STRENGTH_FLUSH,
        HandCategory::FullHouse => STRENGTH_FULL_HOUSE,
        HandCategory::FourOfAKind => STRENGTH_FOUR_OF_A_KIND,
        HandCategory::StraightFlush | HandCategory::RoyalFlush => STRENGTH_STRAIGHT_FLUSH,
    };

    // Normalize the top value (2-14) to a 0.0-0.1 kicker bonus
    let top = hand
        .cards
        .iter()
        .map(|card| card.rank().high_value())
        .max()
        .unwrap_or(0);
    let kicker_bonus = f32::from(top) / 14.0 * 0.1;

    (base_strength + kicker_bonus).min(1.0)
}

/// Pot odds as the share of the final pot a call wins, e.g. 100 in the pot
/// and 50 to call gives 0.67.
#[must_use]
pub fn pot_odds(pot: Usd, to_call: Usd) -> f32 {
    if to_call == 0 {
        return 1.0;
    }
    pot as f32 / (pot + to_call) as f32
}

/// Turn whatever a bot would like to do into an action the request allows.
/// Raises are clamped to the legal range; a bot never folds when it could
/// check for free.
#[must_use]
pub fn legalize(request: &ActionRequest, wanted: Action) -> Action {
    let choices = &request.choices;
    match wanted {
        Action::Raise(to) => match choices.raise_range() {
            Some((min, max)) => Action::Raise(to.clamp(min, max)),
            None => legalize(request, Action::Call),
        },
        Action::Call if choices.contains(&Action::Call) => Action::Call,
        Action::Call | Action::Check | Action::Fold if choices.contains(&Action::Check) => {
            Action::Check
        }
        _ => Action::Fold,
    }
}

/// A play style. Decisions are always legal for the request.
#[enum_dispatch]
pub trait BotStrategy {
    fn decide(&mut self, request: &ActionRequest) -> Action;
}

/// Calls a lot and only raises monsters.
#[derive(Clone, Debug)]
pub struct Passive {
    /// Strength needed to call a bet
    pub call_threshold: f32,
    /// Strength needed to raise
    pub raise_threshold: f32,
}

impl Default for Passive {
    fn default() -> Self {
        Self {
            call_threshold: 0.15,
            raise_threshold: STRENGTH_FULL_HOUSE,
        }
    }
}

impl BotStrategy for Passive {
    fn decide(&mut self, request: &ActionRequest) -> Action {
        let strength = estimate_strength(&request.hole_cards, &request.board);
        let wanted = if strength >= self.raise_threshold {
            Action::Raise(request.min_raise_to.unwrap_or_default())
        } else if strength >= self.call_threshold || pot_odds(request.pot, request.to_call) > 0.75
        {
            Action::Call
        } else {
            Action::Fold
        };
        legalize(request, wanted)
    }
}

/// Raises anything decent, sized to the pot.
#[derive(Clone, Debug)]
pub struct Aggressive {
    pub call_threshold: f32,
    pub raise_threshold: f32,
    /// Raise size on top of the minimum, as a share of the pot
    pub pot_multiplier: f32,
}

impl Default for Aggressive {
    fn default() -> Self {
        Self {
            call_threshold: 0.15,
            raise_threshold: STRENGTH_PAIR,
            pot_multiplier: 0.5,
        }
    }
}

impl BotStrategy for Aggressive {
    fn decide(&mut self, request: &ActionRequest) -> Action {
        let strength = estimate_strength(&request.hole_cards, &request.board);
        let wanted = match request.min_raise_to {
            Some(min) if strength >= self.raise_threshold => {
                let extra = (request.pot as f32 * self.pot_multiplier) as Usd;
                Action::Raise(min.saturating_add(extra))
            }
            _ if strength >= self.call_threshold => Action::Call,
            _ => Action::Fold,
        };
        legalize(request, wanted)
    }
}

/// Picks uniformly among the legal choices. Raises land anywhere in the
/// legal range.
#[derive(Clone, Debug)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible decisions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for Random {
    fn decide(&mut self, request: &ActionRequest) -> Action {
        let mut choices: Vec<ActionChoice> = request.choices.0.iter().copied().collect();
        // HashSet order isn't stable across runs; keep seeded bots reproducible.
        choices.sort_by_key(|choice| match choice {
            ActionChoice::Check => 0,
            ActionChoice::Call(_) => 1,
            ActionChoice::Raise { .. } => 2,
            ActionChoice::Fold => 3,
        });
        let wanted = match choices.choose(&mut self.rng) {
            Some(ActionChoice::Check) => Action::Check,
            Some(ActionChoice::Call(_)) => Action::Call,
            Some(ActionChoice::Raise { min, max }) => {
                Action::Raise(self.rng.random_range(*min..=*max))
            }
            Some(ActionChoice::Fold) | None => Action::Fold,
        };
        legalize(request, wanted)
    }
}

/// Any bot, dispatched without boxing.
#[enum_dispatch(BotStrategy)]
#[derive(Clone, Debug)]
pub enum Bot {
    Passive,
    Aggressive,
    Random,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        GameSession, GameSettings, Street,
        entities::{ActionChoices, Deck, PlayerId, Rank, Suit},
    };
    use uuid::Uuid;

    fn request(
        hole_cards: Vec<Card>,
        board: Vec<Card>,
        choices: Vec<ActionChoice>,
        to_call: Usd,
    ) -> ActionRequest {
        let choices = ActionChoices::from(choices);
        ActionRequest {
            session: Uuid::nil(),
            player: PlayerId::from("bot"),
            street: Street::PreFlop,
            turn: 0,
            min_raise_to: choices.raise_range().map(|(min, _)| min),
            choices,
            to_call,
            balance: 1000,
            pot: 100,
            hole_cards,
            board,
        }
    }

    fn facing_bet(hole_cards: Vec<Card>) -> ActionRequest {
        request(
            hole_cards,
            vec![],
            vec![
                ActionChoice::Fold,
                ActionChoice::Call(10),
                ActionChoice::Raise { min: 20, max: 1000 },
            ],
            10,
        )
    }

    #[test]
    fn test_strength_orders_categories() {
        let aces = [Card(Rank::Ace, Suit::Spade), Card(Rank::Ace, Suit::Heart)];
        let junk = [Card(Rank::Seven, Suit::Club), Card(Rank::Two, Suit::Diamond)];
        assert!(estimate_strength(&aces, &[]) > estimate_strength(&junk, &[]));

        let board = [
            Card(Rank::Ace, Suit::Club),
            Card(Rank::Ace, Suit::Diamond),
            Card(Rank::King, Suit::Spade),
        ];
        let quads = estimate_strength(&aces, &board);
        assert!(quads > STRENGTH_FOUR_OF_A_KIND);
        assert!(quads <= 1.0);
        assert_eq!(estimate_strength(&[], &[]), 0.0);
    }

    #[test]
    fn test_pot_odds_calculation() {
        assert!((pot_odds(100, 20) - 0.833).abs() < 0.01);
        assert!((pot_odds(100, 50) - 0.667).abs() < 0.01);
        assert!((pot_odds(50, 100) - 0.333).abs() < 0.01);
        assert_eq!(pot_odds(100, 0), 1.0);
    }

    #[test]
    fn test_legalize() {
        let checkable = request(
            vec![],
            vec![],
            vec![ActionChoice::Fold, ActionChoice::Check],
            0,
        );
        assert_eq!(legalize(&checkable, Action::Fold), Action::Check);
        assert_eq!(legalize(&checkable, Action::Call), Action::Check);
        assert_eq!(legalize(&checkable, Action::Raise(50)), Action::Check);

        let bet = facing_bet(vec![]);
        assert_eq!(legalize(&bet, Action::Raise(5)), Action::Raise(20));
        assert_eq!(legalize(&bet, Action::Raise(5000)), Action::Raise(1000));
        assert_eq!(legalize(&bet, Action::Check), Action::Fold);
    }

    #[test]
    fn test_passive_calls_and_folds() {
        let mut bot = Passive::default();
        let aces = facing_bet(vec![Card(Rank::Ace, Suit::Spade), Card(Rank::Ace, Suit::Heart)]);
        assert_eq!(bot.decide(&aces), Action::Call);

        let mut junk = facing_bet(vec![Card(Rank::Two, Suit::Spade), Card(Rank::Three, Suit::Heart)]);
        junk.pot = 10;
        junk.to_call = 100;
        assert_eq!(bot.decide(&junk), Action::Fold);
    }

    #[test]
    fn test_aggressive_raises_pairs() {
        let mut bot = Aggressive::default();
        let kings = facing_bet(vec![Card(Rank::King, Suit::Spade), Card(Rank::King, Suit::Heart)]);
        assert_eq!(bot.decide(&kings), Action::Raise(70));
    }

    #[test]
    fn test_random_is_always_legal() {
        let mut bot = Bot::from(Random::seeded(7));
        let req = facing_bet(vec![]);
        for _ in 0..200 {
            match bot.decide(&req) {
                Action::Raise(to) => assert!((20..=1000).contains(&to)),
                Action::Check => panic!("check isn't allowed facing a bet"),
                Action::Fold | Action::Call => {}
            }
        }
    }

    #[test]
    fn test_bots_finish_a_hand() {
        let mut bots: Vec<Bot> = vec![
            Passive::default().into(),
            Aggressive::default().into(),
            Random::seeded(3).into(),
        ];
        let seats = ["p", "a", "r"].map(|id| (PlayerId::from(id), 500)).to_vec();
        let mut session = GameSession::with_deck(
            seats,
            GameSettings {
                shuffle_seats: false,
                ..GameSettings::default()
            },
            Deck::default(),
        )
        .unwrap();
        let mut steps = 0;
        while let Some(request) = session.awaiting() {
            let seat = session.round().seat_of(&request.player).unwrap();
            let action = bots[seat].decide(&request);
            session.apply(&request.player, action).unwrap();
            steps += 1;
            assert!(steps < 100);
        }
        let total: Usd = session.balances().iter().map(|(_, b)| b).sum();
        assert_eq!(total, 1500);
    }
}
