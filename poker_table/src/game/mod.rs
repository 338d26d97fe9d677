//! Poker game engine: cards, hand evaluation, betting rounds and sessions.
//!
//! - [`entities`]: cards, deck, players, actions and the pot
//! - [`functional`]: hand evaluation and comparison
//! - [`state_machine`]: one hand's betting, street by street
//! - [`session`]: a whole hand from deal to payout, with views and the log

pub mod constants;
pub mod entities;
pub mod errors;
pub mod events;
pub mod functional;
pub mod session;
pub mod state_machine;

pub use events::{GameEvent, LogEntry};
pub use functional::Evaluation;
pub use session::{
    ActionRequest, Award, GameSession, GameView, HandOutcome, PlayerResult, PlayerView,
    SessionId, ShownHand,
};
pub use state_machine::{
    BettingRound, GameSettings, HandOverReason, PlayerCounts, RoundState, Street,
};
