//! Player actions and their results.
//!
//! Commands use the same JSON shape the browser front end sends, e.g.
//! `{"type": "BUY_BUILDING", "buildingId": "intern"}`.

use serde::{Deserialize, Serialize};

use crate::economy::Quote;
use crate::error::{EngineError, Result};
use crate::save::OfflineReport;
use crate::state::BuyAmount;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Screen position is accepted for effects and otherwise ignored.
    Click {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    BuyBuilding {
        #[serde(rename = "buildingId")]
        building_id: String,
    },
    BuyUpgrade {
        #[serde(rename = "upgradeId")]
        upgrade_id: String,
    },
    BuyPrestigeUpgrade {
        #[serde(rename = "upgradeId")]
        upgrade_id: String,
    },
    /// 1, 10, 100 or -1 for max.
    SetBuyAmount { amount: i64 },
    SetLanguage { language: String },
    Prestige,
    Save,
    Reset,
    Export,
    Import { data: String },
    /// Presentation passthrough; the engine only echoes it back.
    ShowOfflineModal {
        #[serde(rename = "dataEarned", default)]
        data_earned: f64,
        #[serde(rename = "secondsAway", default)]
        seconds_away: f64,
    },
}

impl Command {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| EngineError::InvalidCommand(e.to_string()))
    }

    pub fn click() -> Self {
        Command::Click { x: 0.0, y: 0.0 }
    }

    pub fn buy_building(id: impl Into<String>) -> Self {
        Command::BuyBuilding {
            building_id: id.into(),
        }
    }

    pub fn buy_upgrade(id: impl Into<String>) -> Self {
        Command::BuyUpgrade {
            upgrade_id: id.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Clicked { earned: f64 },
    /// `quantity` may be 0 when buying max with nothing affordable.
    BuildingsBought { building_id: String, quote: Quote },
    UpgradeBought { upgrade_id: String },
    PrestigeUpgradeBought { upgrade_id: String },
    BuyAmountSet(BuyAmount),
    LanguageSet(String),
    Prestiged { points: u64 },
    /// `false` when the storage write failed (already logged).
    Saved(bool),
    Reset,
    Exported(String),
    Imported,
    OfflineModal(OfflineReport),
}
