//! Engine error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{Action, Card, PlayerId, Usd};

/// A player action that can't be applied. The engine state is untouched
/// and the same player is asked again.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ActionError {
    #[error("not your turn ({expected} is acting, not {got})")]
    NotYourTurn { expected: PlayerId, got: PlayerId },
    #[error("can't {} right now", .action.verb())]
    NotAllowed { action: Action },
    #[error("raise must be to at least {min}, got {got}")]
    RaiseTooSmall { min: Usd, got: Usd },
    #[error("need {needed} chips, only {available} left")]
    InsufficientFunds { needed: Usd, available: Usd },
    #[error("the hand is over")]
    HandOver,
}

/// A card set the evaluator refuses to score.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum EvalError {
    #[error("need between 5 and 7 cards, got {len}")]
    MalformedCardSet { len: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum DeckError {
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ConfigError {
    #[error("big blind ({big}) must be greater than small blind ({small})")]
    BlindsOutOfOrder { small: Usd, big: Usd },
    #[error("{field} must be positive")]
    NotPositive { field: String },
    #[error("max players must be between {min} and {max}, got {got}")]
    TableSize { min: usize, max: usize, got: usize },
    #[error("{seats} seats of {balance} chips can't share one pot")]
    TableTooRich { seats: usize, balance: Usd },
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: String, value: String },
}

/// Errors that end or prevent a session.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SessionError {
    #[error("need 2+ players")]
    NotEnoughPlayers,
    #[error("at most {max} players fit at one table")]
    TooManyPlayers { max: usize },
    #[error("{0} is seated twice")]
    DuplicatePlayer(PlayerId),
    #[error("deck exhausted: need {needed} cards, {available} available")]
    DeckExhausted { needed: usize, available: usize },
    #[error("nobody can act but the hand isn't over")]
    Stalled,
    #[error("{total} chips at the table, at most {max} fit in one pot")]
    TooManyChips { total: u64, max: Usd },
    #[error(transparent)]
    InvalidAction(#[from] ActionError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
