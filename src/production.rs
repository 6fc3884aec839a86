//! Production (DPS) and click power as pure functions over `GameState`.

use crate::catalog::{Catalog, InnovationEffect, UpgradeEffect};
use crate::config::EngineConfig;
use crate::state::GameState;

fn owned_upgrade_effects<'a>(
    catalog: &'a Catalog,
    state: &'a GameState,
) -> impl Iterator<Item = &'a UpgradeEffect> + 'a {
    state
        .upgrades
        .iter()
        .filter_map(|id| catalog.upgrade(id))
        .map(|u| &u.effect)
}

fn owned_innovation_effects<'a>(
    catalog: &'a Catalog,
    state: &'a GameState,
) -> impl Iterator<Item = &'a InnovationEffect> + 'a {
    state
        .innovation_upgrades
        .iter()
        .filter_map(|id| catalog.innovation_upgrade(id))
        .map(|u| &u.effect)
}

/// Product of owned building-multiplier and synergy upgrades affecting `building`.
pub fn building_multiplier(catalog: &Catalog, state: &GameState, building: &str) -> f64 {
    owned_upgrade_effects(catalog, state)
        .filter_map(|effect| match effect {
            UpgradeEffect::BuildingMultiplier { target, multiplier } if *target == building => {
                Some(*multiplier)
            }
            UpgradeEffect::Synergy { targets, multiplier } if targets.iter().any(|t| *t == building) => {
                Some(*multiplier)
            }
            UpgradeEffect::SynergyPer { target, per, value } if *target == building => {
                Some(1.0 + value * state.owned(per) as f64)
            }
            _ => None,
        })
        .product()
}

/// `1 + earned * bonus_per_point`. Uses points ever earned, so spending
/// innovation points never lowers production.
pub fn prestige_multiplier(config: &EngineConfig, state: &GameState) -> f64 {
    1.0 + state.total_innovation_earned as f64 * config.prestige_bonus_per_point
}

/// `1 + sum of unlocked achievement bonuses`.
pub fn achievement_multiplier(catalog: &Catalog, state: &GameState) -> f64 {
    1.0 + catalog
        .achievements()
        .iter()
        .filter(|a| state.achievements.contains(a.id))
        .map(|a| a.bonus)
        .sum::<f64>()
}

pub fn global_multiplier(catalog: &Catalog, config: &EngineConfig, state: &GameState) -> f64 {
    let upgrades: f64 = owned_upgrade_effects(catalog, state)
        .filter_map(|effect| match effect {
            UpgradeEffect::GlobalMultiplier(m) => Some(*m),
            _ => None,
        })
        .product();
    let innovation: f64 = owned_innovation_effects(catalog, state)
        .filter_map(|effect| match effect {
            InnovationEffect::ProductionMultiplier(m) => Some(*m),
            _ => None,
        })
        .product();
    let achievements = if config.achievement_bonus {
        achievement_multiplier(catalog, state)
    } else {
        1.0
    };
    upgrades * prestige_multiplier(config, state) * innovation * achievements
}

/// Data per second of one building type, including its own multipliers but
/// not the global one.
pub fn building_dps(catalog: &Catalog, state: &GameState, building: &str) -> f64 {
    match catalog.building(building) {
        Some(def) => {
            state.owned(building) as f64
                * def.base_production
                * building_multiplier(catalog, state, building)
        }
        None => 0.0,
    }
}

pub fn compute_dps(catalog: &Catalog, config: &EngineConfig, state: &GameState) -> f64 {
    let base: f64 = catalog
        .buildings()
        .iter()
        .map(|b| building_dps(catalog, state, b.id))
        .sum();
    base * global_multiplier(catalog, config, state)
}

/// How a click's value is put together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickBreakdown {
    /// `1 + sum of additive bonuses`.
    pub base: f64,
    /// Product of click-multiplier upgrades.
    pub multiplier: f64,
    /// Product of innovation click multipliers.
    pub innovation_multiplier: f64,
    /// Owned share of DPS per click. Reported only; not part of `power`.
    pub dps_percent: f64,
    pub power: f64,
}

pub fn click_breakdown(catalog: &Catalog, state: &GameState) -> ClickBreakdown {
    let mut base = 1.0;
    let mut multiplier = 1.0;
    let mut dps_percent = 0.0;
    for effect in owned_upgrade_effects(catalog, state) {
        match effect {
            UpgradeEffect::ClickAdditive(a) => base += a,
            UpgradeEffect::ClickMultiplier(m) => multiplier *= m,
            UpgradeEffect::ClickDpsPercent(p) => dps_percent += p,
            UpgradeEffect::BuildingMultiplier { .. }
            | UpgradeEffect::Synergy { .. }
            | UpgradeEffect::SynergyPer { .. }
            | UpgradeEffect::GlobalMultiplier(_) => {}
        }
    }
    let innovation_multiplier: f64 = owned_innovation_effects(catalog, state)
        .filter_map(|effect| match effect {
            InnovationEffect::ClickMultiplier(m) => Some(*m),
            _ => None,
        })
        .product();
    ClickBreakdown {
        base,
        multiplier,
        innovation_multiplier,
        dps_percent,
        power: base * multiplier * innovation_multiplier,
    }
}

/// Data granted per click. `_dps` is accepted for the DPS-percent effect,
/// which is not credited yet.
pub fn compute_click_power(catalog: &Catalog, state: &GameState, _dps: f64) -> f64 {
    click_breakdown(catalog, state).power
}

/// Live tick: `dt` is clamped to `max_tick_seconds`. Returns data earned.
pub fn apply_tick(catalog: &Catalog, config: &EngineConfig, state: &mut GameState, dt: f64) -> f64 {
    let dt = dt.clamp(0.0, config.max_tick_seconds);
    state.stats.play_time_seconds += dt;
    apply_elapsed(catalog, config, state, dt)
}

/// Unclamped production for `seconds` of elapsed time (offline catch-up).
pub fn apply_elapsed(
    catalog: &Catalog,
    config: &EngineConfig,
    state: &mut GameState,
    seconds: f64,
) -> f64 {
    if !(seconds > 0.0) {
        return 0.0;
    }
    let dps = compute_dps(catalog, config, state);
    if dps > state.stats.highest_dps {
        state.stats.highest_dps = dps;
    }
    let earned = dps * seconds;
    state.earn(earned);
    earned
}

/// One click. Returns data earned.
pub fn apply_click(catalog: &Catalog, config: &EngineConfig, state: &mut GameState) -> f64 {
    let dps = compute_dps(catalog, config, state);
    let power = compute_click_power(catalog, state, dps);
    state.earn(power);
    state.stats.total_clicks += 1;
    state.stats.total_clicks_all_time += 1;
    power
}
