//! Innovation (prestige) points and the soft reset.

use crate::catalog::{Catalog, InnovationEffect};
use crate::config::EngineConfig;
use crate::state::{GameState, Stats};

/// Total innovation points justified by `all_time` lifetime data.
pub fn compute_innovation_points(config: &EngineConfig, all_time: f64) -> u64 {
    if !(all_time >= config.prestige_floor) {
        return 0;
    }
    (all_time / config.prestige_floor).sqrt().floor() as u64
}

/// Points a prestige right now would award. Points already earned in
/// previous runs are not paid out again.
pub fn pending_points(config: &EngineConfig, state: &GameState) -> u64 {
    compute_innovation_points(config, state.stats.total_data_all_time)
        .saturating_sub(state.total_innovation_earned)
}

/// Lifetime data needed to be worth `points + 1` points in total.
pub fn data_for_next_point(config: &EngineConfig, points: u64) -> f64 {
    let next = (points + 1) as f64;
    next * next * config.prestige_floor
}

/// Data a fresh run starts with. The largest owned start bonus wins.
pub fn start_bonus(catalog: &Catalog, state: &GameState) -> f64 {
    state
        .innovation_upgrades
        .iter()
        .filter_map(|id| catalog.innovation_upgrade(id))
        .filter_map(|u| match u.effect {
            InnovationEffect::StartBonus(amount) => Some(amount),
            _ => None,
        })
        .fold(0.0, f64::max)
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrestigeOutcome {
    pub state: GameState,
    pub points: u64,
}

/// Builds the next run's state, or `None` when there is nothing to gain.
///
/// Innovation points, owned innovation upgrades, achievements, settings and
/// all-time totals carry over. Everything else starts fresh.
pub fn perform_prestige(catalog: &Catalog, config: &EngineConfig, state: &GameState) -> Option<PrestigeOutcome> {
    let points = pending_points(config, state);
    if points == 0 {
        return None;
    }

    let bonus = start_bonus(catalog, state);
    let next = GameState {
        data_points: bonus,
        stats: Stats {
            total_data_earned: bonus,
            total_data_all_time: state.stats.total_data_all_time,
            total_clicks_all_time: state.stats.total_clicks_all_time,
            times_prestiged: state.stats.times_prestiged + 1,
            extra: state.stats.extra.clone(),
            ..Stats::default()
        },
        achievements: state.achievements.clone(),
        innovation_points: state.innovation_points + points,
        total_innovation_earned: state.total_innovation_earned + points,
        innovation_upgrades: state.innovation_upgrades.clone(),
        settings: state.settings.clone(),
        last_seen_timestamp: state.last_seen_timestamp,
        extra: state.extra.clone(),
        ..GameState::default()
    };
    log::info!(
        "prestige #{}: +{} innovation points",
        next.stats.times_prestiged,
        points
    );
    Some(PrestigeOutcome {
        state: next,
        points,
    })
}
