//! Progression engine for Summan Data Clicker.
//!
//! Clicks, purchases and elapsed time feed a persistent economy of "data".
//! Everything is plain functions over an explicitly passed [`GameState`];
//! [`Game`] wires them into a fixed-tick loop with autosave.

pub mod achievements;
pub mod catalog;
pub mod config;
pub mod economy;
pub mod eligibility;
pub mod error;
pub mod game;
pub mod prestige;
pub mod production;
pub mod progression;
pub mod save;
pub mod state;
pub mod time;

mod simulator;

pub use catalog::Catalog;
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use game::{Command, Game, Outcome};
pub use save::{OfflineReport, SavePhase, SaveStateManager, SaveStorage};
pub use state::{BuyAmount, GameState};
