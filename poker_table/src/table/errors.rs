use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{
    entities::PlayerId,
    errors::{ConfigError, SessionError},
};

use super::TableId;

#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum TableError {
    #[error("table is full")]
    TableFull,
    #[error("{0} is already seated")]
    AlreadySeated(PlayerId),
    #[error("{0} isn't seated at this table")]
    NotSeated(PlayerId),
    #[error("a hand is already in progress")]
    HandInProgress,
    #[error("no hand in progress")]
    NoHandInProgress,
    #[error("table {0} not found")]
    NotFound(TableId),
    #[error("table is closed")]
    Closed,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
