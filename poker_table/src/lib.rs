//! # Poker Table
//!
//! A Texas Hold'em engine: deck and cards, hand evaluation, betting rounds,
//! side pots and showdown, plus the async plumbing to run hands against
//! humans and bots.
//!
//! ## Architecture
//!
//! A hand moves through four streets:
//!
//! - **Pre-flop**: blinds are posted and two hole cards dealt to everyone
//! - **Flop**: three community cards
//! - **Turn**: a fourth community card
//! - **River**: the fifth and last, followed by the showdown
//!
//! [`GameSession`] owns one hand. It never blocks; callers ask who is up and
//! feed decisions back. [`table::run_hand`] and [`table::TableActor`] do the
//! waiting, with optional timeouts.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, evaluator, betting engine and sessions
//! - [`table`]: decision sources, event sinks, the table actor and manager
//! - [`bot`]: automatic players
//!
//! ## Example
//!
//! ```
//! use poker_table::{Action, GameSession, GameSettings};
//!
//! let seats = vec![("alice".into(), 1000), ("bob".into(), 1000)];
//! let mut session = GameSession::new(seats, GameSettings::default()).unwrap();
//!
//! while let Some(request) = session.awaiting() {
//!     let action = if request.choices.contains(&Action::Check) {
//!         Action::Check
//!     } else {
//!         Action::Call
//!     };
//!     session.apply(&request.player, action).unwrap();
//! }
//! assert_eq!(session.pot_size(), 20);
//! ```

/// Automatic players.
pub mod bot;

/// Core game logic, entities, and the betting state machine.
pub mod game;
pub use game::{
    ActionRequest, GameSession, GameSettings, GameView, HandOutcome, Street,
    constants::{self, MAX_PLAYERS, MIN_PLAYERS},
    entities::{self, Action, Card, Deck, HandCategory, PlayerId, Rank, Suit, Usd},
    errors::{self, ActionError, SessionError},
    functional::{self, Evaluation, best_hand, evaluate},
};

/// Tables running consecutive hands.
pub mod table;
