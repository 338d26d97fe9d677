//! Table actor message types.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use super::{TableId, errors::TableError};
use crate::game::{
    GameView, SessionId,
    entities::{Action, PlayerId, Usd},
    events::LogEntry,
};

/// Messages that can be sent to a TableActor
#[derive(Debug)]
pub enum TableMessage {
    /// Take a seat; play starts with the next hand
    Join {
        player: PlayerId,
        response: oneshot::Sender<TableResponse>,
    },

    /// Leave the table. A player in the middle of a hand leaves once it ends.
    Leave {
        player: PlayerId,
        response: oneshot::Sender<TableResponse>,
    },

    /// Deal a new hand to everyone seated with chips
    StartHand {
        response: oneshot::Sender<TableResponse>,
    },

    /// Player decision for the current hand
    TakeAction {
        player: PlayerId,
        action: Action,
        response: oneshot::Sender<TableResponse>,
    },

    /// Snapshot of the current (or last) hand as `player` sees it
    GetView {
        player: PlayerId,
        response: oneshot::Sender<Option<GameView>>,
    },

    /// Balances of everyone seated
    GetBalances {
        response: oneshot::Sender<Vec<(PlayerId, Usd)>>,
    },

    /// Receive every log entry from now on
    Subscribe { sender: mpsc::Sender<LogEntry> },

    Close {
        response: oneshot::Sender<TableResponse>,
    },
}

/// Response from table operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableResponse {
    Success,

    /// A hand was dealt
    HandStarted(SessionId),

    /// The last action ended the hand
    HandOver,

    Error(TableError),
}

/// Table summary for discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub id: TableId,
    pub name: String,
    pub max_players: usize,
    pub small_blind: Usd,
    pub big_blind: Usd,
}

impl TableResponse {
    pub fn is_success(&self) -> bool {
        !matches!(self, TableResponse::Error(_))
    }

    pub fn error(&self) -> Option<&TableError> {
        match self {
            TableResponse::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Result<(), TableError>> for TableResponse {
    fn from(value: Result<(), TableError>) -> Self {
        match value {
            Ok(()) => TableResponse::Success,
            Err(error) => TableResponse::Error(error),
        }
    }
}
