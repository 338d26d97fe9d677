//! Bot module providing automatic players with a few play styles.
//!
//! This module implements:
//! - [`BotStrategy`]: one decision per [`ActionRequest`](crate::game::ActionRequest)
//! - [`Bot`]: the styles (Passive, Aggressive, Random) behind `enum_dispatch`
//! - [`BotTable`]: an [`ActionSource`](crate::table::ActionSource) answering for
//!   every bot seated at a table
//!
//! ## Styles
//!
//! ### Passive
//! - Calls with anything better than weak high cards
//! - Raises only a full house or better
//!
//! ### Aggressive
//! - Raises any pair or better, half the pot on top of the minimum
//!
//! ### Random
//! - Uniform over the legal choices
//!
//! Strength is estimated from the category of the best hand the bot can
//! see, so bots play the same whether five cards are known or two.

pub mod decision;
pub mod models;
pub mod table;

pub use decision::{Aggressive, Bot, BotStrategy, Passive, Random, estimate_strength};
pub use models::{BotDifficulty, BotPlayer, BotStats};
pub use table::BotTable;
