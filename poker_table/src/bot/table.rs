//! Bots seated at one table, answering decision requests.

use async_trait::async_trait;
use log::{debug, warn};
use rand::Rng;
use std::{collections::HashMap, time::Duration};

use super::{
    decision::BotStrategy,
    models::{BotDifficulty, BotPlayer},
};
use crate::{
    game::{
        ActionRequest,
        entities::{Action, PlayerId},
        errors::ActionError,
    },
    table::transport::ActionSource,
};

/// Routes each request to the bot seated for that player.
#[derive(Debug, Default)]
pub struct BotTable {
    bots: HashMap<PlayerId, BotPlayer>,

    /// Delay before each decision (for pacing)
    think_time: Option<Duration>,

    next_bot_id: usize,
}

impl BotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = Some(think_time);
        self
    }

    /// Seat a bot under `id`, replacing any bot already there.
    pub fn seat(&mut self, player: BotPlayer) {
        debug!("seated {} bot {}", player.difficulty, player.id);
        self.bots.insert(player.id.clone(), player);
    }

    /// Create `count` bots with generated names and return their ids.
    pub fn spawn(&mut self, count: usize, difficulty: BotDifficulty) -> Vec<PlayerId> {
        (0..count)
            .map(|_| {
                self.next_bot_id += 1;
                let id = PlayerId::from(generate_bot_name(self.next_bot_id));
                self.seat(BotPlayer::new(id.clone(), difficulty));
                id
            })
            .collect()
    }

    pub fn remove(&mut self, player: &PlayerId) -> Option<BotPlayer> {
        self.bots.remove(player)
    }

    pub fn get(&self, player: &PlayerId) -> Option<&BotPlayer> {
        self.bots.get(player)
    }

    pub fn is_bot(&self, player: &PlayerId) -> bool {
        self.bots.contains_key(player)
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    /// Decide for `request.player` right away, without pacing.
    pub fn decide(&mut self, request: &ActionRequest) -> Option<Action> {
        let player = self.bots.get_mut(&request.player)?;
        let action = player.bot.decide(request);
        player.stats.record(action);
        Some(action)
    }
}

#[async_trait]
impl ActionSource for BotTable {
    async fn request_action(&mut self, request: &ActionRequest) -> Option<Action> {
        if !self.is_bot(&request.player) {
            warn!("no bot seated for {}", request.player);
            return None;
        }
        if let Some(think_time) = self.think_time {
            tokio::time::sleep(think_time).await;
        }
        self.decide(request)
    }

    async fn on_rejected(&mut self, request: &ActionRequest, error: &ActionError) {
        warn!("bot {} made an illegal decision: {error}", request.player);
    }
}

fn generate_bot_name(bot_id: usize) -> String {
    let prefixes = [
        "Bot", "Chip", "Card", "Stack", "River", "Flop", "Turn", "Dealer",
    ];
    let suffixes = ["Pro", "King", "Queen", "Ace", "Jack", "Shark", "Fish", "Whale"];

    let mut rng = rand::rng();
    let prefix = prefixes[rng.random_range(0..prefixes.len())];
    let suffix = suffixes[rng.random_range(0..suffixes.len())];

    format!("{prefix}{suffix}_{bot_id}")
}
