//! Achievement unlocking.

use crate::catalog::{AchievementDef, AchievementStat, Catalog};
use crate::config::EngineConfig;
use crate::production;
use crate::state::GameState;

/// Current value of `stat`. `dps` is passed in since it is the only costly one.
fn stat_value(stat: &AchievementStat, state: &GameState, dps: f64) -> f64 {
    match stat {
        AchievementStat::LifetimeData => state.stats.total_data_earned,
        AchievementStat::Clicks => state.stats.total_clicks as f64,
        AchievementStat::AnyBuilding => state.buildings.values().copied().max().unwrap_or(0) as f64,
        AchievementStat::TotalBuildings => state.total_buildings() as f64,
        AchievementStat::Building(id) => state.owned(id) as f64,
        AchievementStat::Dps => dps,
        AchievementStat::TimesPrestiged => state.stats.times_prestiged as f64,
    }
}

pub fn is_met(achievement: &AchievementDef, state: &GameState, dps: f64) -> bool {
    stat_value(&achievement.stat, state, dps) >= achievement.threshold
}

/// Unlocks every achievement whose threshold now holds and returns the ids
/// unlocked by this call, in catalog order.
pub fn evaluate(catalog: &Catalog, config: &EngineConfig, state: &mut GameState) -> Vec<&'static str> {
    let dps = production::compute_dps(catalog, config, state);
    let mut unlocked = Vec::new();
    for achievement in catalog.achievements() {
        if state.achievements.contains(achievement.id) || !is_met(achievement, state, dps) {
            continue;
        }
        if state.achievements.insert(achievement.id.to_string()) {
            log::debug!("achievement unlocked: {}", achievement.id);
            unlocked.push(achievement.id);
        }
    }
    unlocked
}

/// `(unlocked, total)` for a progress display.
pub fn progress(catalog: &Catalog, state: &GameState) -> (usize, usize) {
    let unlocked = catalog
        .achievements()
        .iter()
        .filter(|a| state.achievements.contains(a.id))
        .count();
    (unlocked, catalog.achievements().len())
}
