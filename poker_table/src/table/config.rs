//! Table configuration models.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

use crate::game::{
    ActionRequest, GameSettings,
    constants::{DEFAULT_STARTING_BALANCE, MAX_PLAYERS, MIN_PLAYERS},
    entities::{Action, Usd},
    errors::ConfigError,
};

/// What to do with a player whose decision doesn't arrive in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutPolicy {
    #[default]
    Fold,
    /// Check when checking is free, otherwise fold.
    CheckOrFold,
}

impl TimeoutPolicy {
    /// The decision made on behalf of a player who ran out of time.
    #[must_use]
    pub fn action_for(self, request: &ActionRequest) -> Action {
        match self {
            Self::CheckOrFold if request.choices.contains(&Action::Check) => Action::Check,
            _ => Action::Fold,
        }
    }
}

impl fmt::Display for TimeoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::CheckOrFold => write!(f, "check-or-fold"),
        }
    }
}

impl FromStr for TimeoutPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(Self::Fold),
            "check-or-fold" | "checkorfold" | "check" => Ok(Self::CheckOrFold),
            _ => Err(()),
        }
    }
}

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,

    /// Seats at the table (2 to 11)
    pub max_players: usize,

    /// Balance a player sits down with
    pub starting_balance: Usd,

    /// Blinds and raise rules
    pub settings: GameSettings,

    /// How long to wait for a decision. `None` waits forever.
    pub action_timeout: Option<Duration>,

    pub timeout_policy: TimeoutPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Table".to_string(),
            max_players: MAX_PLAYERS,
            starting_balance: DEFAULT_STARTING_BALANCE,
            settings: GameSettings::default(),
            action_timeout: None,
            timeout_policy: TimeoutPolicy::default(),
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.validate()?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(ConfigError::TableSize {
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
                got: self.max_players,
            });
        }
        if self.starting_balance == 0 {
            return Err(ConfigError::NotPositive {
                field: "starting_balance".to_string(),
            });
        }
        // Chips only move between seats, so a full table bounds every pot.
        let total = u64::from(self.starting_balance) * self.max_players as u64;
        if total > u64::from(Usd::MAX) {
            return Err(ConfigError::TableTooRich {
                seats: self.max_players,
                balance: self.starting_balance,
            });
        }
        if self.action_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::NotPositive {
                field: "action_timeout".to_string(),
            });
        }
        Ok(())
    }

    /// Load from `TABLE_*` environment variables. Unset variables keep
    /// their defaults; a variable that doesn't parse is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TableConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let settings = GameSettings {
            small_blind: parse_var(&lookup, "TABLE_SMALL_BLIND", defaults.settings.small_blind)?,
            big_blind: parse_var(&lookup, "TABLE_BIG_BLIND", defaults.settings.big_blind)?,
            min_raise: parse_var(&lookup, "TABLE_MIN_RAISE", defaults.settings.min_raise)?,
            shuffle_seats: defaults.settings.shuffle_seats,
        };
        let action_timeout = match lookup("TABLE_ACTION_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(parse_value(
                "TABLE_ACTION_TIMEOUT_SECS",
                &value,
            )?)),
            None => defaults.action_timeout,
        };
        let timeout_policy = match lookup("TABLE_TIMEOUT_POLICY") {
            Some(value) => value.parse().map_err(|()| ConfigError::InvalidEnv {
                var: "TABLE_TIMEOUT_POLICY".to_string(),
                value,
            })?,
            None => defaults.timeout_policy,
        };

        let config = Self {
            name: lookup("TABLE_NAME").unwrap_or(defaults.name),
            max_players: parse_var(&lookup, "TABLE_MAX_PLAYERS", defaults.max_players)?,
            starting_balance: parse_var(
                &lookup,
                "TABLE_STARTING_BALANCE",
                defaults.starting_balance,
            )?,
            settings,
            action_timeout,
            timeout_policy,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_value<T: FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}

fn parse_var<T, F>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => parse_value(var, &value),
        None => Ok(default),
    }
}
