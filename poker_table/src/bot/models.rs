//! Bot player models and configuration.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::decision::{Aggressive, Bot, Passive, Random};
use crate::game::entities::{Action, PlayerId};

/// Difficulty preset, picked by name from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    /// Loose-passive: calls a lot, rarely raises
    Passive,
    /// Raises anything decent
    #[default]
    Aggressive,
    /// Uniformly random legal actions
    Random,
}

impl BotDifficulty {
    pub const ALL: [Self; 3] = [Self::Passive, Self::Aggressive, Self::Random];

    /// A fresh bot playing this style
    pub fn bot(self) -> Bot {
        match self {
            Self::Passive => Passive::default().into(),
            Self::Aggressive => Aggressive::default().into(),
            Self::Random => Random::new().into(),
        }
    }
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Passive => "passive",
            Self::Aggressive => "aggressive",
            Self::Random => "random",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for BotDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passive" | "easy" => Ok(Self::Passive),
            "aggressive" | "hard" => Ok(Self::Aggressive),
            "random" => Ok(Self::Random),
            other => Err(format!(
                "unknown difficulty '{other}', expected passive, aggressive or random"
            )),
        }
    }
}

/// Bot statistics tracker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStats {
    pub decisions: u32,

    pub folds: u32,

    /// Checks and calls
    pub passive_actions: u32,

    /// Raises
    pub aggressive_actions: u32,
}

impl BotStats {
    pub fn record(&mut self, action: Action) {
        self.decisions += 1;
        match action {
            Action::Fold => self.folds += 1,
            Action::Check | Action::Call => self.passive_actions += 1,
            Action::Raise(_) => self.aggressive_actions += 1,
        }
    }

    /// Ratio of raises to checks and calls
    pub fn aggression_factor(&self) -> f32 {
        if self.passive_actions == 0 {
            self.aggressive_actions as f32
        } else {
            self.aggressive_actions as f32 / self.passive_actions as f32
        }
    }
}

/// Bot player state
#[derive(Debug, Clone)]
pub struct BotPlayer {
    pub id: PlayerId,

    pub difficulty: BotDifficulty,

    pub bot: Bot,

    pub stats: BotStats,
}

impl BotPlayer {
    pub fn new(id: PlayerId, difficulty: BotDifficulty) -> Self {
        Self {
            id,
            difficulty,
            bot: difficulty.bot(),
            stats: BotStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parsing() {
        for difficulty in BotDifficulty::ALL {
            assert_eq!(difficulty.to_string().parse(), Ok(difficulty));
        }
        assert_eq!(" Easy ".parse(), Ok(BotDifficulty::Passive));
        assert!("nightmare".parse::<BotDifficulty>().is_err());
    }

    #[test]
    fn test_stats_aggression_factor() {
        let mut stats = BotStats::default();
        assert_eq!(stats.aggression_factor(), 0.0);
        stats.record(Action::Raise(20));
        assert_eq!(stats.aggression_factor(), 1.0);
        stats.record(Action::Call);
        stats.record(Action::Check);
        stats.record(Action::Fold);
        assert_eq!(stats.aggression_factor(), 0.5);
        assert_eq!(stats.decisions, 4);
        assert_eq!(stats.folds, 1);
    }
}
