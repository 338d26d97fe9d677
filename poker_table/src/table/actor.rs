//! Table actor implementation with async message handling.

use log::{debug, info, warn};
use std::future::pending;
use tokio::{
    sync::{
        mpsc::{self, error::TrySendError},
        oneshot,
    },
    time::{Instant, sleep_until},
};
use uuid::Uuid;

use super::{
    TableId,
    config::TableConfig,
    errors::TableError,
    messages::{TableMessage, TableResponse},
};
use crate::game::{
    GameSession, GameSettings, GameView, SessionId,
    entities::{Action, PlayerId, Usd},
    errors::SessionError,
    events::LogEntry,
};

/// Table actor handle for sending messages
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    table_id: TableId,
}

impl TableHandle {
    pub fn new(sender: mpsc::Sender<TableMessage>, table_id: TableId) -> Self {
        Self { sender, table_id }
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub async fn send(&self, message: TableMessage) -> Result<(), TableError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableError::Closed)
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> TableMessage,
    ) -> Result<T, TableError> {
        let (response, receiver) = oneshot::channel();
        self.send(message(response)).await?;
        receiver.await.map_err(|_| TableError::Closed)
    }

    pub async fn join(&self, player: PlayerId) -> Result<TableResponse, TableError> {
        self.request(|response| TableMessage::Join { player, response })
            .await
    }

    pub async fn leave(&self, player: PlayerId) -> Result<TableResponse, TableError> {
        self.request(|response| TableMessage::Leave { player, response })
            .await
    }

    pub async fn start_hand(&self) -> Result<TableResponse, TableError> {
        self.request(|response| TableMessage::StartHand { response })
            .await
    }

    pub async fn take_action(
        &self,
        player: PlayerId,
        action: Action,
    ) -> Result<TableResponse, TableError> {
        self.request(|response| TableMessage::TakeAction {
            player,
            action,
            response,
        })
        .await
    }

    pub async fn view(&self, player: PlayerId) -> Result<Option<GameView>, TableError> {
        self.request(|response| TableMessage::GetView { player, response })
            .await
    }

    pub async fn balances(&self) -> Result<Vec<(PlayerId, Usd)>, TableError> {
        self.request(|response| TableMessage::GetBalances { response })
            .await
    }

    /// Receive every log entry the table produces from now on.
    pub async fn subscribe(&self, buffer: usize) -> Result<mpsc::Receiver<LogEntry>, TableError> {
        let (sender, receiver) = mpsc::channel(buffer);
        self.send(TableMessage::Subscribe { sender }).await?;
        Ok(receiver)
    }

    pub async fn close(&self) -> Result<TableResponse, TableError> {
        self.request(|response| TableMessage::Close { response })
            .await
    }
}

/// Table actor running consecutive hands at one table
pub struct TableActor {
    id: TableId,

    config: TableConfig,

    inbox: mpsc::Receiver<TableMessage>,

    /// Seated players in seating order with their balance between hands
    seats: Vec<(PlayerId, Usd)>,

    /// Index into `seats` where the search for the next dealer starts
    button: usize,

    /// Current hand, or the last one once it's over
    session: Option<GameSession>,

    /// Log entries of the current session already broadcast
    published: usize,

    /// When the awaited player runs out of time
    deadline: Option<Instant>,

    /// Players that asked to leave during a hand
    leaving: Vec<PlayerId>,

    subscribers: Vec<mpsc::Sender<LogEntry>>,

    hands_played: usize,

    is_closed: bool,
}

impl TableActor {
    pub fn new(config: TableConfig) -> (Self, TableHandle) {
        Self::with_id(Uuid::new_v4(), config)
    }

    pub fn with_id(id: TableId, config: TableConfig) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let actor = Self {
            id,
            seats: Vec::with_capacity(config.max_players),
            config,
            inbox,
            button: 0,
            session: None,
            published: 0,
            deadline: None,
            leaving: Vec::new(),
            subscribers: Vec::new(),
            hands_played: 0,
            is_closed: false,
        };
        let handle = TableHandle::new(sender, id);
        (actor, handle)
    }

    /// Run the table actor event loop
    pub async fn run(mut self) {
        info!("table {} '{}' starting", self.id, self.config.name);

        loop {
            let deadline = self.deadline;
            let expired = async move {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => pending::<()>().await,
                }
            };

            tokio::select! {
                message = self.inbox.recv() => match message {
                    Some(message) => self.handle_message(message),
                    None => break,
                },
                () = expired => self.handle_timeout(),
            }

            if self.is_closed {
                break;
            }
        }

        info!(
            "table {} '{}' closed after {} hands",
            self.id, self.config.name, self.hands_played
        );
    }

    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Join { player, response } => {
                let _ = response.send(self.handle_join(player).into());
            }
            TableMessage::Leave { player, response } => {
                let _ = response.send(self.handle_leave(player).into());
            }
            TableMessage::StartHand { response } => {
                let result = match self.start_hand() {
                    Ok(id) => TableResponse::HandStarted(id),
                    Err(error) => TableResponse::Error(error),
                };
                let _ = response.send(result);
            }
            TableMessage::TakeAction {
                player,
                action,
                response,
            } => {
                let _ = response.send(self.handle_action(&player, action));
            }
            TableMessage::GetView { player, response } => {
                let _ = response.send(self.session.as_ref().map(|s| s.view(&player)));
            }
            TableMessage::GetBalances { response } => {
                let _ = response.send(self.balances());
            }
            TableMessage::Subscribe { sender } => {
                self.subscribers.push(sender);
                debug!("table {} has {} subscribers", self.id, self.subscribers.len());
            }
            TableMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(TableResponse::Success);
            }
        }
    }

    fn hand_in_progress(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.is_over())
    }

    fn in_current_hand(&self, player: &PlayerId) -> bool {
        self.hand_in_progress()
            && self
                .session
                .as_ref()
                .is_some_and(|s| s.players().iter().any(|p| &p.id == player))
    }

    fn handle_join(&mut self, player: PlayerId) -> Result<(), TableError> {
        if self.seats.iter().any(|(id, _)| id == &player) {
            return Err(TableError::AlreadySeated(player));
        }
        if self.seats.len() >= self.config.max_players {
            return Err(TableError::TableFull);
        }
        info!(
            "{player} sat down at table {} with {}",
            self.id, self.config.starting_balance
        );
        self.seats.push((player, self.config.starting_balance));
        Ok(())
    }

    fn handle_leave(&mut self, player: PlayerId) -> Result<(), TableError> {
        if !self.seats.iter().any(|(id, _)| id == &player) {
            return Err(TableError::NotSeated(player));
        }
        if self.in_current_hand(&player) {
            info!("{player} will leave table {} after the hand", self.id);
            self.leaving.push(player);
        } else {
            self.remove_seat(&player);
        }
        Ok(())
    }

    fn remove_seat(&mut self, player: &PlayerId) {
        if let Some(idx) = self.seats.iter().position(|(id, _)| id == player) {
            self.seats.remove(idx);
            if idx < self.button {
                self.button -= 1;
            }
            info!("{player} left table {}", self.id);
        }
    }

    fn start_hand(&mut self) -> Result<SessionId, TableError> {
        if self.hand_in_progress() {
            return Err(TableError::HandInProgress);
        }
        // The first funded seat at or after the button deals.
        let num_seats = self.seats.len();
        let Some(dealer) = (0..num_seats)
            .map(|offset| (self.button + offset) % num_seats)
            .find(|&idx| self.seats[idx].1 > 0)
        else {
            return Err(SessionError::NotEnoughPlayers.into());
        };
        let order: Vec<(PlayerId, Usd)> = (0..num_seats)
            .map(|offset| &self.seats[(dealer + offset) % num_seats])
            .filter(|(_, balance)| *balance > 0)
            .cloned()
            .collect();

        let settings = GameSettings {
            shuffle_seats: false,
            ..self.config.settings.clone()
        };
        let session = GameSession::new(order, settings)?;
        let id = session.id();
        info!("table {} deals hand {} ({id})", self.id, self.hands_played + 1);
        self.session = Some(session);
        self.published = 0;
        self.button = dealer + 1;
        self.after_update();
        Ok(id)
    }

    fn handle_action(&mut self, player: &PlayerId, action: Action) -> TableResponse {
        let Some(session) = self.session.as_mut() else {
            return TableResponse::Error(TableError::NoHandInProgress);
        };
        if session.is_over() {
            return TableResponse::Error(TableError::NoHandInProgress);
        }
        if let Err(error) = session.apply(player, action) {
            return TableResponse::Error(error.into());
        }
        self.after_update();
        if self.hand_in_progress() {
            TableResponse::Success
        } else {
            TableResponse::HandOver
        }
    }

    fn handle_timeout(&mut self) {
        self.deadline = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(request) = session.awaiting() else {
            return;
        };
        let action = self.config.timeout_policy.action_for(&request);
        warn!(
            "{} timed out at table {}, applying {}",
            request.player, self.id, self.config.timeout_policy
        );
        match session.apply(&request.player, action) {
            Ok(_) => self.after_update(),
            Err(error) => warn!("timeout {} rejected: {error}", action.verb()),
        }
    }

    /// Broadcast new log entries, reset the decision deadline and settle
    /// balances once the hand is over.
    fn after_update(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let fresh: Vec<LogEntry> = session.log()[self.published..].to_vec();
        self.published = session.log().len();
        for entry in &fresh {
            self.broadcast(entry);
        }

        let Some(session) = self.session.as_ref() else {
            return;
        };
        if let Some(outcome) = session.outcome() {
            for (player, balance) in outcome.final_balances() {
                if let Some(seat) = self.seats.iter_mut().find(|(id, _)| *id == player) {
                    seat.1 = balance;
                }
            }
            self.deadline = None;
            self.hands_played += 1;
            for player in std::mem::take(&mut self.leaving) {
                self.remove_seat(&player);
            }
            info!("table {} finished hand {}", self.id, self.hands_played);
        } else {
            self.deadline = self
                .config
                .action_timeout
                .map(|limit| Instant::now() + limit);
        }
    }

    fn broadcast(&mut self, entry: &LogEntry) {
        let id = self.id;
        self.subscribers
            .retain(|sender| match sender.try_send(entry.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    warn!("table {id} subscriber is full, dropping an entry");
                    true
                }
                Err(TrySendError::Closed(_)) => false,
            });
    }

    /// Balances between hands, or live balances for players in a hand.
    fn balances(&self) -> Vec<(PlayerId, Usd)> {
        let live = self.session.as_ref().filter(|s| !s.is_over());
        self.seats
            .iter()
            .map(|(id, balance)| {
                let current = live
                    .and_then(|s| s.players().iter().find(|p| &p.id == id))
                    .map_or(*balance, |p| p.balance);
                (id.clone(), current)
            })
            .collect()
    }
}
