use rand::{Rng, rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashSet},
    fmt::{self},
    hash::{Hash, Hasher},
    mem::discriminant,
};

use super::{
    constants::{CARDS_IN_DECK, NUM_RANKS, NUM_SUITS},
    errors::DeckError,
};

/// Suits in their fixed tie-break order, lowest first.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Diamond,
    Heart,
    Club,
    Spade,
}

impl Suit {
    pub const ALL: [Self; NUM_SUITS] = [Self::Diamond, Self::Heart, Self::Club, Self::Spade];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Diamond => "Diamonds",
            Self::Heart => "Hearts",
            Self::Club => "Clubs",
            Self::Spade => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Diamond => "♦",
            Self::Heart => "♥",
            Self::Club => "♣",
            Self::Spade => "♠",
        };
        write!(f, "{repr}")
    }
}

/// Card ranks. The derived order puts the ace lowest; use
/// [`Rank::high_value`] wherever the ace plays high.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Self; NUM_RANKS] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Position in the standard order (ace = 0 ... king = 12).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Face value with the ace counted high (2 ... 14).
    #[must_use]
    pub const fn high_value(self) -> u8 {
        match self {
            Self::Ace => 14,
            other => other as u8 + 1,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ace => "Ace",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
            Self::Six => "Six",
            Self::Seven => "Seven",
            Self::Eight => "Eight",
            Self::Nine => "Nine",
            Self::Ten => "Ten",
            Self::Jack => "Jack",
            Self::Queen => "Queen",
            Self::King => "King",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ace => write!(f, "A"),
            Self::Jack => write!(f, "J"),
            Self::Queen => write!(f, "Q"),
            Self::King => write!(f, "K"),
            other => write!(f, "{}", other.index() + 1),
        }
    }
}

/// A card is a (rank, suit) pair. Cards compare by rank first and suit
/// second.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Rank, pub Suit);

impl Card {
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.0
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        self.1
    }

    /// Long form, e.g. "Ace of Spades".
    #[must_use]
    pub fn name(self) -> String {
        format!("{} of {}", self.0.name(), self.1.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// The draw pile. Cards are dealt from the end of the vector.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a full deck whose first dealt cards are `top`, in order.
    /// The remaining cards follow in the unshuffled order.
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut seen = BTreeSet::new();
        for card in top {
            if !seen.insert(*card) {
                return Err(DeckError::DuplicateCard(*card));
            }
        }
        let mut cards: Vec<Card> = Self::default()
            .cards
            .into_iter()
            .filter(|card| !seen.contains(card))
            .collect();
        cards.extend(top.iter().rev());
        Ok(Self { cards })
    }

    /// Remove and return the top card, or `None` once the deck is empty.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deal `n` cards, or nothing if fewer than `n` remain.
    pub fn deal_many(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.cards.len() < n {
            return None;
        }
        Some((0..n).filter_map(|_| self.cards.pop()).collect())
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = Vec::with_capacity(CARDS_IN_DECK);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card(rank, suit));
            }
        }
        Self { cards }
    }
}

/// Poker hand categories, weakest first.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::Pair => "pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
            Self::RoyalFlush => "royal flush",
        };
        write!(f, "{repr}")
    }
}

/// Whole chips. Balances, bets and pots are never fractional.
pub type Usd = u32;

/// Opaque handle for a player, supplied by the transport (a chat user id,
/// a mention string, a socket name).
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Type alias for seat positions in the hand's turn order.
pub type SeatIndex = usize;

/// A player's role for the current hand. Heads-up, the dealer posts the
/// small blind and is marked as such.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SeatRole {
    Dealer,
    SmallBlind,
    BigBlind,
    #[default]
    Normal,
}

impl fmt::Display for SeatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Dealer => "dealer",
            Self::SmallBlind => "small blind",
            Self::BigBlind => "big blind",
            Self::Normal => "",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Usd,
    pub big: Usd,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.small, self.big)
    }
}

/// A typed player decision handed to the engine by the transport.
/// `Raise` carries the new required bet for the street ("raise to").
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(Usd),
}

impl Action {
    /// Bare verb, e.g. "raise".
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Raise(_) => "raise",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "folds"),
            Self::Check => write!(f, "checks"),
            Self::Call => write!(f, "calls"),
            Self::Raise(amount) => write!(f, "raises to {amount}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ActionChoice {
    Check,
    /// Chips needed to call.
    Call(Usd),
    /// Smallest and largest legal "raise to" targets.
    Raise { min: Usd, max: Usd },
    Fold,
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Call(amount) => write!(f, "call ({amount})"),
            Self::Raise { min, max } if min == max => write!(f, "raise (to {min})"),
            Self::Raise { min, max } => write!(f, "raise (to {min}..={max})"),
            Self::Fold => write!(f, "fold"),
        }
    }
}

// Choices are compared by variant only; the amounts are advisory and bets
// are validated when applied.
impl Eq for ActionChoice {}

impl Hash for ActionChoice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
    }
}

impl PartialEq for ActionChoice {
    fn eq(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }
}

/// The set of actions a player may take right now.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ActionChoices(pub HashSet<ActionChoice>);

impl ActionChoices {
    #[must_use]
    pub fn contains(&self, action: &Action) -> bool {
        let action_choice = match action {
            Action::Check => ActionChoice::Check,
            Action::Call => ActionChoice::Call(0),
            Action::Raise(_) => ActionChoice::Raise { min: 0, max: 0 },
            Action::Fold => ActionChoice::Fold,
        };
        self.0.contains(&action_choice)
    }

    /// Legal "raise to" range, if raising is allowed.
    #[must_use]
    pub fn raise_range(&self) -> Option<(Usd, Usd)> {
        self.0.iter().find_map(|choice| match choice {
            ActionChoice::Raise { min, max } => Some((*min, *max)),
            _ => None,
        })
    }

    fn ordered(&self) -> Vec<ActionChoice> {
        let mut choices: Vec<_> = self.0.iter().copied().collect();
        choices.sort_by_key(|choice| match choice {
            ActionChoice::Check => 0,
            ActionChoice::Call(_) => 1,
            ActionChoice::Raise { .. } => 2,
            ActionChoice::Fold => 3,
        });
        choices
    }
}

impl fmt::Display for ActionChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let choices: Vec<String> = self.ordered().iter().map(ToString::to_string).collect();
        write!(f, "{}", english_list(choices.as_slice()))
    }
}

impl<I> From<I> for ActionChoices
where
    I: IntoIterator<Item = ActionChoice>,
{
    fn from(iter: I) -> Self {
        Self(iter.into_iter().collect::<HashSet<_>>())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub balance: Usd,
    pub cards: Vec<Card>,
    pub role: SeatRole,
    /// Set once per hand, never cleared.
    pub folded: bool,
    /// Put their whole balance in; no further decisions this hand.
    pub all_in: bool,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, balance: Usd) -> Self {
        Self {
            id,
            balance,
            cards: Vec::with_capacity(super::constants::PLAYER_HAND_SIZE),
            role: SeatRole::Normal,
            folded: false,
            all_in: false,
        }
    }

    /// Still contesting the pot.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.folded
    }

    /// Still able to make decisions.
    #[must_use]
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }
}

/// A slice of the pot and the seats that can win it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SidePot {
    pub amount: Usd,
    pub eligible: Vec<SeatIndex>,
}

/// Chips committed to the current hand, per seat.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Pot {
    total: Usd,
    /// Contribution per seat in the current street.
    street: Vec<Usd>,
    /// Contribution per seat across the whole hand.
    invested: Vec<Usd>,
}

impl Pot {
    #[must_use]
    pub fn new(num_seats: usize) -> Self {
        Self {
            total: 0,
            street: vec![0; num_seats],
            invested: vec![0; num_seats],
        }
    }

    pub fn bet(&mut self, seat: SeatIndex, amount: Usd) {
        self.total += amount;
        self.street[seat] += amount;
        self.invested[seat] += amount;
    }

    /// Clear the per-street contributions; chips stay in the pot.
    pub fn new_street(&mut self) {
        self.street.iter_mut().for_each(|amount| *amount = 0);
    }

    #[must_use]
    pub fn size(&self) -> Usd {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[must_use]
    pub fn street_contribution(&self, seat: SeatIndex) -> Usd {
        self.street.get(seat).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn investment(&self, seat: SeatIndex) -> Usd {
        self.invested.get(seat).copied().unwrap_or(0)
    }

    /// Split the pot into layers by investment level. Chips from seats that
    /// can no longer win a layer (folded) stay in the layer they reached;
    /// a layer nobody live reached is folded into the one below it.
    #[must_use]
    pub fn side_pots(&self, folded: &[bool]) -> Vec<SidePot> {
        let mut levels: Vec<Usd> = self.invested.iter().copied().filter(|x| *x > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<SidePot> = Vec::new();
        let mut carry = 0;
        let mut prev = 0;
        for level in levels {
            let amount: Usd = self
                .invested
                .iter()
                .map(|inv| (*inv).min(level) - (*inv).min(prev))
                .sum::<Usd>()
                + carry;
            prev = level;
            let eligible: Vec<SeatIndex> = self
                .invested
                .iter()
                .enumerate()
                .filter(|(seat, inv)| **inv >= level && !folded.get(*seat).copied().unwrap_or(true))
                .map(|(seat, _)| seat)
                .collect();

            if eligible.is_empty() {
                match pots.last_mut() {
                    Some(last) => {
                        last.amount += amount;
                        carry = 0;
                    }
                    None => carry = amount,
                }
                continue;
            }
            carry = 0;
            match pots.last_mut() {
                Some(last) if last.eligible == eligible => last.amount += amount,
                _ => pots.push(SidePot { amount, eligible }),
            }
        }
        pots
    }
}

/// Join items as "a", "a and b", or "a, b and c".
pub(crate) fn english_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}
