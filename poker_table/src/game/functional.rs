//! Hand evaluation.
//!
//! Categories are checked strongest first and the first match wins, so a
//! straight flush is never reported as a plain flush or straight. Input is
//! put into a canonical order (ace-high value descending, then suit
//! descending) before any detector runs, which makes results independent of
//! the order cards were passed in.

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeSet};

use super::{
    constants::{MAX_EVAL_CARDS, MIN_EVAL_CARDS, NUM_RANKS, NUM_SUITS},
    entities::{Card, HandCategory, Rank, Suit},
    errors::EvalError,
};

/// A hand category together with exactly the cards that make it.
///
/// Card counts per category: 1 for high card, 2 for a pair, 3 for three of
/// a kind, 4 for two pair (top pair first), 4 for four of a kind, and 5 for
/// everything else. Straights are listed low to high with the ace last in
/// a ten-to-ace run and first in an ace-to-five run.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Evaluation {
    pub category: HandCategory,
    pub cards: Vec<Card>,
}

impl Evaluation {
    fn is_straight(&self) -> bool {
        matches!(
            self.category,
            HandCategory::Straight | HandCategory::StraightFlush | HandCategory::RoyalFlush
        )
    }

    /// Winning cards most significant first, as (ace-high values, suits).
    fn strength(&self) -> (Vec<u8>, Vec<Suit>) {
        let ordered: Vec<Card> = if self.is_straight() {
            self.cards.iter().rev().copied().collect()
        } else {
            self.cards.clone()
        };
        let wheel = self.is_straight() && ordered.first().is_some_and(|c| c.rank() == Rank::Five);
        let values = ordered
            .iter()
            .map(|c| match c.rank() {
                Rank::Ace if wheel => 1,
                rank => rank.high_value(),
            })
            .collect();
        let suits = ordered.iter().map(|c| c.suit()).collect();
        (values, suits)
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.strength().cmp(&other.strength()))
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Score a 5 to 7 card set.
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if !(MIN_EVAL_CARDS..=MAX_EVAL_CARDS).contains(&cards.len()) {
        return Err(EvalError::MalformedCardSet { len: cards.len() });
    }
    best_hand(cards)
}

/// Score any 1 to 7 card set. Categories needing more cards than are
/// present simply never match, so two hole cards report a pair or a high
/// card.
pub fn best_hand(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if cards.is_empty() || cards.len() > MAX_EVAL_CARDS {
        return Err(EvalError::MalformedCardSet { len: cards.len() });
    }
    let mut seen = BTreeSet::new();
    if let Some(dup) = cards.iter().find(|card| !seen.insert(**card)) {
        return Err(EvalError::DuplicateCard(*dup));
    }

    let mut hand = cards.to_vec();
    prepare_hand(&mut hand);
    Ok(detect(&hand))
}

/// Indices of every evaluation tied for best.
#[must_use]
pub fn argmax(evaluations: &[Evaluation]) -> Vec<usize> {
    let Some(best) = evaluations.iter().max() else {
        return Vec::new();
    };
    evaluations
        .iter()
        .enumerate()
        .filter(|(_, evaluation)| *evaluation == best)
        .map(|(idx, _)| idx)
        .collect()
}

/// Sort into canonical order: ace-high value descending, then suit
/// descending.
pub fn prepare_hand(hand: &mut [Card]) {
    hand.sort_unstable_by(|a, b| {
        b.rank()
            .high_value()
            .cmp(&a.rank().high_value())
            .then(b.suit().cmp(&a.suit()))
    });
}

type Detector = fn(&[Card]) -> Option<Vec<Card>>;

fn detect(hand: &[Card]) -> Evaluation {
    let detectors: [(HandCategory, Detector); 9] = [
        (HandCategory::RoyalFlush, royal_flush),
        (HandCategory::StraightFlush, straight_flush),
        (HandCategory::FourOfAKind, four_of_a_kind),
        (HandCategory::FullHouse, full_house),
        (HandCategory::Flush, flush),
        (HandCategory::Straight, straight),
        (HandCategory::ThreeOfAKind, three_of_a_kind),
        (HandCategory::TwoPair, two_pair),
        (HandCategory::Pair, pair),
    ];
    for (category, detector) in detectors {
        if let Some(cards) = detector(hand) {
            return Evaluation { category, cards };
        }
    }
    // Canonical order puts an ace, or else the highest card, first.
    Evaluation {
        category: HandCategory::HighCard,
        cards: hand.iter().take(1).copied().collect(),
    }
}

fn count_rank(hand: &[Card], rank: Rank) -> usize {
    hand.iter().filter(|c| c.rank() == rank).count()
}

fn royal_flush(hand: &[Card]) -> Option<Vec<Card>> {
    let cards = straight_flush(hand)?;
    let has = |rank| cards.iter().any(|c: &Card| c.rank() == rank);
    (has(Rank::King) && has(Rank::Ace)).then_some(cards)
}

fn straight_flush(hand: &[Card]) -> Option<Vec<Card>> {
    let suit = flush(hand)?.first()?.suit();
    let suited: Vec<Card> = hand.iter().filter(|c| c.suit() == suit).copied().collect();
    straight(&suited)
}

fn four_of_a_kind(hand: &[Card]) -> Option<Vec<Card>> {
    of_a_kind(hand, 4)
}

fn full_house(hand: &[Card]) -> Option<Vec<Card>> {
    if hand.len() < 5 {
        return None;
    }
    let mut cards = of_a_kind(hand, 3)?;
    let trips = cards.first()?.rank();
    let rest: Vec<Card> = hand.iter().filter(|c| c.rank() != trips).copied().collect();
    cards.extend(of_a_kind(&rest, 2)?);
    Some(cards)
}

/// Top five cards of the suit holding five or more. When several suits
/// qualify the suit of the highest such card wins.
fn flush(hand: &[Card]) -> Option<Vec<Card>> {
    if hand.len() < 5 {
        return None;
    }
    let mut counts = [0usize; NUM_SUITS];
    for card in hand {
        counts[card.suit() as usize] += 1;
    }
    let suit = hand
        .iter()
        .map(|c| c.suit())
        .find(|suit| counts[*suit as usize] >= 5)?;
    Some(
        hand.iter()
            .filter(|c| c.suit() == suit)
            .take(5)
            .copied()
            .collect(),
    )
}

/// Highest run of five distinct ranks. Ten-jack-queen-king-ace is the top
/// run; otherwise runs use the standard order, so ace-to-five also counts.
fn straight(hand: &[Card]) -> Option<Vec<Card>> {
    if hand.len() < 5 {
        return None;
    }
    let mut by_rank: [Option<Card>; NUM_RANKS] = [None; NUM_RANKS];
    for card in hand {
        by_rank[card.rank().index()].get_or_insert(*card);
    }

    let broadway = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];
    if let Some(run) = broadway
        .iter()
        .map(|rank| by_rank[rank.index()])
        .collect::<Option<Vec<Card>>>()
    {
        return Some(run);
    }

    (0..=NUM_RANKS - 5).rev().find_map(|start| {
        by_rank[start..start + 5]
            .iter()
            .copied()
            .collect::<Option<Vec<Card>>>()
    })
}

fn three_of_a_kind(hand: &[Card]) -> Option<Vec<Card>> {
    of_a_kind(hand, 3)
}

fn two_pair(hand: &[Card]) -> Option<Vec<Card>> {
    if hand.len() < 4 {
        return None;
    }
    let mut ranks: Vec<Rank> = Vec::with_capacity(2);
    for card in hand {
        let rank = card.rank();
        if !ranks.contains(&rank) && count_rank(hand, rank) >= 2 {
            ranks.push(rank);
        }
    }
    let [high, low, ..] = ranks.as_slice() else {
        return None;
    };
    let take_two = |rank: Rank| hand.iter().filter(move |c| c.rank() == rank).take(2).copied();
    Some(take_two(*high).chain(take_two(*low)).collect())
}

fn pair(hand: &[Card]) -> Option<Vec<Card>> {
    of_a_kind(hand, 2)
}

/// `n` cards of the highest rank appearing at least `n` times.
fn of_a_kind(hand: &[Card], n: usize) -> Option<Vec<Card>> {
    if hand.len() < n {
        return None;
    }
    // Canonical order visits ranks from the highest down.
    let rank = hand
        .iter()
        .map(|c| c.rank())
        .find(|rank| count_rank(hand, *rank) >= n)?;
    Some(
        hand.iter()
            .filter(|c| c.rank() == rank)
            .take(n)
            .copied()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use Rank::*;
    use Suit::*;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card(rank, suit)
    }

    fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
        cards.sort();
        cards
    }

    #[test]
    fn test_royal_flush() {
        let hand = [
            c(Ten, Spade),
            c(Jack, Spade),
            c(Queen, Spade),
            c(King, Spade),
            c(Ace, Spade),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::RoyalFlush);
        assert_eq!(eval.cards, hand.to_vec());
    }

    #[test]
    fn test_full_house_twos_over_nines() {
        let hand = [
            c(Two, Diamond),
            c(Two, Club),
            c(Two, Spade),
            c(Five, Heart),
            c(Nine, Diamond),
            c(Nine, Spade),
            c(King, Club),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::FullHouse);
        assert_eq!(eval.cards.len(), 5);
        assert!(eval.cards[..3].iter().all(|card| card.rank() == Two));
        assert!(eval.cards[3..].iter().all(|card| card.rank() == Nine));
    }

    #[test]
    fn test_straight_flush_beats_flush_and_straight() {
        let hand = [
            c(Five, Heart),
            c(Six, Heart),
            c(Seven, Heart),
            c(Eight, Heart),
            c(Nine, Heart),
            c(Two, Heart),
            c(Ten, Club),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::StraightFlush);
        assert_eq!(
            eval.cards,
            vec![
                c(Five, Heart),
                c(Six, Heart),
                c(Seven, Heart),
                c(Eight, Heart),
                c(Nine, Heart)
            ]
        );
    }

    #[test]
    fn test_four_of_a_kind() {
        let hand = [
            c(Seven, Diamond),
            c(Seven, Club),
            c(Seven, Heart),
            c(Seven, Spade),
            c(Ace, Spade),
            c(Ace, Heart),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::FourOfAKind);
        assert_eq!(eval.cards.len(), 4);
    }

    #[test]
    fn test_flush_takes_top_five_ace_high() {
        let hand = [
            c(Ace, Club),
            c(Three, Club),
            c(Six, Club),
            c(Nine, Club),
            c(Jack, Club),
            c(King, Club),
            c(Queen, Diamond),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::Flush);
        assert_eq!(
            eval.cards,
            vec![
                c(Ace, Club),
                c(King, Club),
                c(Jack, Club),
                c(Nine, Club),
                c(Six, Club)
            ]
        );
    }

    #[test]
    fn test_broadway_straight_puts_ace_last() {
        let hand = [
            c(Ace, Diamond),
            c(King, Club),
            c(Queen, Heart),
            c(Jack, Spade),
            c(Ten, Diamond),
            c(Two, Club),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::Straight);
        let ranks: Vec<Rank> = eval.cards.iter().map(|card| card.rank()).collect();
        assert_eq!(ranks, vec![Ten, Jack, Queen, King, Ace]);
    }

    #[test]
    fn test_wheel_straight_puts_ace_first() {
        let hand = [
            c(Ace, Diamond),
            c(Two, Club),
            c(Three, Heart),
            c(Four, Spade),
            c(Five, Diamond),
            c(King, Club),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::Straight);
        let ranks: Vec<Rank> = eval.cards.iter().map(|card| card.rank()).collect();
        assert_eq!(ranks, vec![Ace, Two, Three, Four, Five]);
    }

    #[test]
    fn test_highest_straight_wins_within_hand() {
        let hand = [
            c(Four, Diamond),
            c(Five, Club),
            c(Six, Heart),
            c(Seven, Spade),
            c(Eight, Diamond),
            c(Nine, Club),
            c(Ten, Club),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.cards.first().map(|card| card.rank()), Some(Six));
        assert_eq!(eval.cards.last().map(|card| card.rank()), Some(Ten));
    }

    #[test]
    fn test_no_wraparound_straight() {
        let hand = [
            c(Queen, Diamond),
            c(King, Club),
            c(Ace, Heart),
            c(Two, Spade),
            c(Three, Diamond),
        ];
        assert_eq!(evaluate(&hand).unwrap().category, HandCategory::HighCard);
    }

    #[test]
    fn test_three_of_a_kind() {
        let hand = [
            c(Queen, Diamond),
            c(Queen, Club),
            c(Queen, Heart),
            c(Two, Spade),
            c(Nine, Diamond),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::ThreeOfAKind);
        assert_eq!(eval.cards.len(), 3);
    }

    #[test]
    fn test_two_pair_takes_two_highest_with_ace_high() {
        let hand = [
            c(Ace, Diamond),
            c(Ace, Club),
            c(Four, Heart),
            c(Four, Spade),
            c(King, Diamond),
            c(King, Heart),
            c(Nine, Club),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::TwoPair);
        let ranks: Vec<Rank> = eval.cards.iter().map(|card| card.rank()).collect();
        assert_eq!(ranks, vec![Ace, Ace, King, King]);
    }

    #[test]
    fn test_pair_prefers_aces() {
        let hand = [
            c(Ace, Diamond),
            c(Ace, Club),
            c(Four, Heart),
            c(Ten, Spade),
            c(King, Diamond),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::Pair);
        assert_eq!(eval.cards, vec![c(Ace, Club), c(Ace, Diamond)]);
    }

    #[test]
    fn test_high_card_is_ace_when_present() {
        let hand = [
            c(Ace, Diamond),
            c(Three, Club),
            c(Seven, Heart),
            c(Ten, Spade),
            c(King, Diamond),
        ];
        let eval = evaluate(&hand).unwrap();
        assert_eq!(eval.category, HandCategory::HighCard);
        assert_eq!(eval.cards, vec![c(Ace, Diamond)]);
    }

    #[test]
    fn test_high_card_without_ace() {
        let hand = [
            c(Two, Diamond),
            c(Three, Club),
            c(Seven, Heart),
            c(Ten, Spade),
            c(Queen, Diamond),
        ];
        assert_eq!(evaluate(&hand).unwrap().cards, vec![c(Queen, Diamond)]);
    }

    #[test]
    fn test_malformed_card_sets() {
        let four = [
            c(Two, Diamond),
            c(Three, Club),
            c(Seven, Heart),
            c(Ten, Spade),
        ];
        assert_eq!(
            evaluate(&four).unwrap_err(),
            EvalError::MalformedCardSet { len: 4 }
        );
        let eight: Vec<Card> = Rank::ALL[..8].iter().map(|r| c(*r, Heart)).collect();
        assert_eq!(
            evaluate(&eight).unwrap_err(),
            EvalError::MalformedCardSet { len: 8 }
        );
        let dup = [
            c(Two, Diamond),
            c(Two, Diamond),
            c(Seven, Heart),
            c(Ten, Spade),
            c(Ace, Spade),
        ];
        assert_eq!(
            evaluate(&dup).unwrap_err(),
            EvalError::DuplicateCard(c(Two, Diamond))
        );
    }

    #[test]
    fn test_best_hand_with_hole_cards_only() {
        let eval = best_hand(&[c(Nine, Club), c(Nine, Heart)]).unwrap();
        assert_eq!(eval.category, HandCategory::Pair);
        let eval = best_hand(&[c(Nine, Club), c(Ace, Heart)]).unwrap();
        assert_eq!(eval.category, HandCategory::HighCard);
        assert!(best_hand(&[]).is_err());
    }

    #[test]
    fn test_order_independence() {
        let hand = vec![
            c(Two, Diamond),
            c(Two, Club),
            c(Two, Spade),
            c(Five, Heart),
            c(Nine, Diamond),
            c(Nine, Spade),
            c(King, Club),
        ];
        let mut reversed = hand.clone();
        reversed.reverse();
        assert_eq!(evaluate(&hand).unwrap(), evaluate(&reversed).unwrap());
        assert_eq!(
            sorted(evaluate(&hand).unwrap().cards),
            sorted(evaluate(&reversed).unwrap().cards)
        );
    }

    #[test]
    fn test_evaluation_ordering() {
        let wheel = Evaluation {
            category: HandCategory::Straight,
            cards: vec![
                c(Ace, Club),
                c(Two, Club),
                c(Three, Heart),
                c(Four, Club),
                c(Five, Club),
            ],
        };
        let six_high = Evaluation {
            category: HandCategory::Straight,
            cards: vec![
                c(Two, Diamond),
                c(Three, Club),
                c(Four, Heart),
                c(Five, Spade),
                c(Six, Club),
            ],
        };
        assert!(six_high > wheel);

        let aces = Evaluation {
            category: HandCategory::Pair,
            cards: vec![c(Ace, Club), c(Ace, Diamond)],
        };
        let kings = Evaluation {
            category: HandCategory::Pair,
            cards: vec![c(King, Spade), c(King, Heart)],
        };
        assert!(aces > kings);

        let twos_full = Evaluation {
            category: HandCategory::FullHouse,
            cards: vec![
                c(Three, Spade),
                c(Three, Club),
                c(Three, Diamond),
                c(Nine, Spade),
                c(Nine, Diamond),
            ],
        };
        let fours_full = Evaluation {
            category: HandCategory::FullHouse,
            cards: vec![
                c(Four, Spade),
                c(Four, Club),
                c(Four, Diamond),
                c(Two, Spade),
                c(Two, Diamond),
            ],
        };
        assert!(fours_full > twos_full);
        assert!(twos_full > aces);
    }

    #[test]
    fn test_argmax() {
        let pair = Evaluation {
            category: HandCategory::Pair,
            cards: vec![c(Ten, Club), c(Ten, Diamond)],
        };
        let high = Evaluation {
            category: HandCategory::HighCard,
            cards: vec![c(Ace, Club)],
        };
        assert_eq!(argmax(&[high.clone(), pair.clone(), high.clone()]), vec![1]);
        assert_eq!(argmax(&[pair.clone(), high, pair]), vec![0, 2]);
        assert!(argmax(&[]).is_empty());
    }
}
