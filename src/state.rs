//! The single mutable game state and its persisted shape.
//!
//! `GameState` is serialized as-is (camelCase JSON), so field names here are
//! the on-disk save format.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EngineError, Result};

/// Current save schema version.
pub const SAVE_VERSION: u32 = 2;

/// Purchase quantity mode for building buys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum BuyAmount {
    #[default]
    One,
    Ten,
    Hundred,
    Max,
}

impl BuyAmount {
    /// Strict parse used by commands. Saves go through the lenient `From`.
    pub fn try_from_setting(value: i64) -> Result<Self> {
        match value {
            1 => Ok(BuyAmount::One),
            10 => Ok(BuyAmount::Ten),
            100 => Ok(BuyAmount::Hundred),
            -1 => Ok(BuyAmount::Max),
            other => Err(EngineError::InvalidBuyAmount(other)),
        }
    }

    /// Fixed quantity, or `None` for Max.
    pub fn fixed_quantity(self) -> Option<u64> {
        match self {
            BuyAmount::One => Some(1),
            BuyAmount::Ten => Some(10),
            BuyAmount::Hundred => Some(100),
            BuyAmount::Max => None,
        }
    }
}

impl From<i64> for BuyAmount {
    fn from(value: i64) -> Self {
        BuyAmount::try_from_setting(value).unwrap_or_default()
    }
}

impl From<BuyAmount> for i64 {
    fn from(value: BuyAmount) -> Self {
        match value {
            BuyAmount::One => 1,
            BuyAmount::Ten => 10,
            BuyAmount::Hundred => 100,
            BuyAmount::Max => -1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    /// Data earned this run. Drives unlocks; reset by prestige.
    pub total_data_earned: f64,
    /// Data earned across every run. Never reset.
    pub total_data_all_time: f64,
    pub total_clicks: u64,
    pub total_clicks_all_time: u64,
    pub times_prestiged: u32,
    pub highest_dps: f64,
    pub play_time_seconds: f64,
    /// Stats this engine does not track (e.g. `events`), kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_data_earned: 0.0,
            total_data_all_time: 0.0,
            total_clicks: 0,
            total_clicks_all_time: 0,
            times_prestiged: 0,
            highest_dps: 0.0,
            play_time_seconds: 0.0,
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub language: String,
    pub buy_amount: BuyAmount,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "es".to_string(),
            buy_amount: BuyAmount::One,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameState {
    pub version: u32,
    pub data_points: f64,
    pub stats: Stats,
    pub buildings: BTreeMap<String, u64>,
    pub upgrades: BTreeSet<String>,
    pub achievements: BTreeSet<String>,
    pub innovation_points: u64,
    pub total_innovation_earned: u64,
    #[serde(rename = "prestigeUpgrades")]
    pub innovation_upgrades: BTreeSet<String>,
    pub settings: Settings,
    /// Milliseconds since the Unix epoch at the last save.
    pub last_seen_timestamp: Option<f64>,
    /// Fields written by other clients (`activeEffects`, `gameStartTime`, ...).
    /// Carried through load and save untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            data_points: 0.0,
            stats: Stats::default(),
            buildings: BTreeMap::new(),
            upgrades: BTreeSet::new(),
            achievements: BTreeSet::new(),
            innovation_points: 0,
            total_innovation_earned: 0,
            innovation_upgrades: BTreeSet::new(),
            settings: Settings::default(),
            last_seen_timestamp: None,
            extra: Map::new(),
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owned(&self, building: &str) -> u64 {
        self.buildings.get(building).copied().unwrap_or(0)
    }

    pub fn total_buildings(&self) -> u64 {
        self.buildings.values().sum()
    }

    /// Credits earned data to spendable, run and all-time totals.
    pub fn earn(&mut self, amount: f64) {
        if !(amount > 0.0) {
            return;
        }
        self.data_points += amount;
        self.stats.total_data_earned += amount;
        self.stats.total_data_all_time += amount;
    }
}
