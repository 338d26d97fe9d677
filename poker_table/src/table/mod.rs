//! Table module running hands with an async actor model.
//!
//! This module implements:
//! - TableActor: async actor seating players and dealing consecutive hands
//! - TableManager: registry spawning and closing table actors
//! - `run_hand`: drives one session against an [`ActionSource`]
//!
//! ## Architecture
//!
//! Each table runs in a separate Tokio task with an mpsc message inbox.
//! Decisions arrive as messages; log entries go out to subscribers.
//!
//! ## Example
//!
//! ```no_run
//! use poker_table::table::{TableActor, TableConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = TableActor::new(TableConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     handle.join("alice".into()).await.unwrap();
//!     handle.join("bob".into()).await.unwrap();
//!     handle.start_hand().await.unwrap();
//! }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod manager;
pub mod messages;
pub mod runner;
pub mod transport;

/// Tables are identified by a random UUID.
pub type TableId = uuid::Uuid;

pub use actor::{TableActor, TableHandle};
pub use config::{TableConfig, TimeoutPolicy};
pub use errors::TableError;
pub use manager::TableManager;
pub use messages::{TableMessage, TableMetadata, TableResponse};
pub use runner::{ActionTimeout, run_hand};
pub use transport::{ActionSource, ChannelSink, ChannelSource, EventSink, LogSink};
