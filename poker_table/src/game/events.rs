//! Loggable hand events and the append-only log built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    entities::{Action, Card, PlayerId, SeatRole, Usd, english_list},
    functional::Evaluation,
    state_machine::Street,
};

/// Something that happened during a hand, in a form the transport can
/// render however it likes. `Display` gives a plain sentence.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    Dealt {
        dealer: PlayerId,
    },
    PostedBlind {
        player: PlayerId,
        role: SeatRole,
        amount: Usd,
    },
    Acted {
        player: PlayerId,
        action: Action,
        all_in: bool,
    },
    Revealed {
        street: Street,
        cards: Vec<Card>,
    },
    ShowedHand {
        player: PlayerId,
        evaluation: Evaluation,
    },
    WonPot {
        player: PlayerId,
        amount: Usd,
    },
}

fn card_list(cards: &[Card]) -> String {
    let cards: Vec<String> = cards.iter().map(ToString::to_string).collect();
    english_list(cards.as_slice())
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dealt { dealer } => write!(f, "{dealer} deals."),
            Self::PostedBlind {
                player,
                role,
                amount,
            } => write!(f, "{player} places {amount} as the {role}."),
            Self::Acted {
                player,
                action,
                all_in: false,
            } => write!(f, "{player} {action}."),
            Self::Acted {
                player,
                action,
                all_in: true,
            } => write!(f, "{player} {action} and is all in."),
            Self::Revealed { cards, .. } => write!(f, "{} revealed.", card_list(cards)),
            Self::ShowedHand { player, evaluation } => write!(
                f,
                "{player} shows {}: {}.",
                evaluation.category,
                card_list(&evaluation.cards)
            ),
            Self::WonPot { player, amount } => write!(f, "{player} wins {amount}."),
        }
    }
}

/// One line of a session's action log. Entries are numbered from zero in
/// the order they were appended.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LogEntry {
    pub seq: usize,
    pub at: DateTime<Utc>,
    pub event: GameEvent,
}

impl LogEntry {
    #[must_use]
    pub fn new(seq: usize, event: GameEvent) -> Self {
        Self {
            seq,
            at: Utc::now(),
            event,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.event.fmt(f)
    }
}
