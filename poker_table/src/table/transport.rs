//! Contracts with whatever delivers decisions and renders events.

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::mpsc;

use crate::game::{
    ActionRequest, Street,
    entities::{Action, Card, PlayerId},
    errors::ActionError,
    events::LogEntry,
};

/// Solicits one decision at a time.
#[async_trait]
pub trait ActionSource: Send {
    /// Wait for the requested player's decision. `None` means the source
    /// has nothing more to give and is treated like a timeout.
    async fn request_action(&mut self, request: &ActionRequest) -> Option<Action>;

    /// Called when a decision was rejected, right before the same player
    /// is asked again.
    async fn on_rejected(&mut self, _request: &ActionRequest, _error: &ActionError) {}
}

/// Receives engine output. Delivery is fire-and-forget.
pub trait EventSink: Send {
    fn on_event(&mut self, entry: &LogEntry);

    /// Newly revealed community cards.
    fn on_street_advance(&mut self, _street: Street, _cards: &[Card]) {}
}

/// Decisions arriving over a channel as `(player, action)` pairs. Anything
/// from a player other than the one being asked is dropped.
#[derive(Debug)]
pub struct ChannelSource {
    inbox: mpsc::Receiver<(PlayerId, Action)>,
}

impl ChannelSource {
    #[must_use]
    pub fn new(inbox: mpsc::Receiver<(PlayerId, Action)>) -> Self {
        Self { inbox }
    }

    /// A source and the sender that feeds it.
    #[must_use]
    pub fn channel(buffer: usize) -> (mpsc::Sender<(PlayerId, Action)>, Self) {
        let (sender, inbox) = mpsc::channel(buffer);
        (sender, Self::new(inbox))
    }
}

#[async_trait]
impl ActionSource for ChannelSource {
    async fn request_action(&mut self, request: &ActionRequest) -> Option<Action> {
        while let Some((player, action)) = self.inbox.recv().await {
            if player == request.player {
                return Some(action);
            }
            debug!(
                "ignoring {player}'s {} while waiting on {}",
                action.verb(),
                request.player
            );
        }
        None
    }
}

/// Writes every entry to the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_event(&mut self, entry: &LogEntry) {
        info!("{entry}");
    }
}

/// Forwards entries to an unbounded channel.
#[derive(Debug)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<LogEntry>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(sender: mpsc::UnboundedSender<LogEntry>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn on_event(&mut self, entry: &LogEntry) {
        if self.sender.send(entry.clone()).is_err() {
            debug!("event receiver dropped");
        }
    }
}
