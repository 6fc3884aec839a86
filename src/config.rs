//! Engine tuning knobs.
//!
//! Every field has a default matching the shipped game, so a config file only
//! needs to list what it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed game ticks per real-time second.
    pub ticks_per_second: u32,
    /// Upper bound on a single live tick, so a stalled tab can't dump hours of
    /// production in one frame.
    pub max_tick_seconds: f64,
    /// Autosave cadence in seconds of game time.
    pub autosave_seconds: f64,
    /// Longest absence credited by one offline catch-up.
    pub offline_cap_seconds: f64,
    /// Absences shorter than this are ignored.
    pub offline_min_seconds: f64,
    /// Lifetime data required for the first innovation point.
    pub prestige_floor: f64,
    /// Production bonus per innovation point ever earned.
    pub prestige_bonus_per_point: f64,
    /// Whether unlocked achievements add their bonus to production.
    pub achievement_bonus: bool,
    /// Key (or file stem) the save blob is stored under.
    pub storage_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 10,
            max_tick_seconds: 1.0,
            autosave_seconds: 30.0,
            offline_cap_seconds: 4.0 * 60.0 * 60.0,
            offline_min_seconds: 10.0,
            prestige_floor: 1e9,
            prestige_bonus_per_point: 0.05,
            achievement_bonus: false,
            storage_key: "summan_clicker_save".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(text)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_second == 0 {
            return Err(EngineError::InvalidConfig(
                "ticks_per_second must be at least 1".to_string(),
            ));
        }
        let positive = [
            ("max_tick_seconds", self.max_tick_seconds),
            ("autosave_seconds", self.autosave_seconds),
            ("offline_cap_seconds", self.offline_cap_seconds),
            ("prestige_floor", self.prestige_floor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "{field} must be a positive number (got {value})"
                )));
            }
        }
        if !(self.offline_min_seconds >= 0.0 && self.offline_min_seconds <= self.offline_cap_seconds)
        {
            return Err(EngineError::InvalidConfig(format!(
                "offline_min_seconds must be between 0 and {} (got {})",
                self.offline_cap_seconds, self.offline_min_seconds
            )));
        }
        if !(self.prestige_bonus_per_point >= 0.0) {
            return Err(EngineError::InvalidConfig(
                "prestige_bonus_per_point must not be negative".to_string(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Seconds of game time per fixed tick.
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.ticks_per_second as f64
    }

    /// Autosave cadence in ticks (10 ticks/sec × 30 s = 300).
    pub fn autosave_ticks(&self) -> u32 {
        ((self.autosave_seconds * self.ticks_per_second as f64).round() as u32).max(1)
    }
}
