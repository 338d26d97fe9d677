//! Fixed table constants.

use super::entities::Usd;

pub const NUM_SUITS: usize = 4;
pub const NUM_RANKS: usize = 13;
pub const CARDS_IN_DECK: usize = NUM_SUITS * NUM_RANKS;

/// Hole cards dealt to each player.
pub const PLAYER_HAND_SIZE: usize = 2;
/// Community cards revealed on the flop.
pub const FLOP_SIZE: usize = 3;
/// Community cards on the table once the river is out.
pub const TABLE_SIZE: usize = 5;

/// Minimum and maximum number of cards the evaluator accepts.
pub const MIN_EVAL_CARDS: usize = 5;
pub const MAX_EVAL_CARDS: usize = PLAYER_HAND_SIZE + TABLE_SIZE;

pub const DEFAULT_SMALL_BLIND: Usd = 5;
pub const DEFAULT_BIG_BLIND: Usd = 10;
/// A raise must lift the required bet by at least this much.
pub const DEFAULT_MIN_RAISE: Usd = 10;
pub const DEFAULT_STARTING_BALANCE: Usd = 1000;

pub const MIN_PLAYERS: usize = 2;
/// Largest table a single deck supports (2 × players × 2 + 5 <= 52).
pub const MAX_PLAYERS: usize = (CARDS_IN_DECK - TABLE_SIZE) / (2 * PLAYER_HAND_SIZE);
