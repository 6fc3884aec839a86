//! Upgrade unlock and purchase preconditions.

use crate::catalog::UpgradeDef;
use crate::error::{EngineError, IneligibleReason, Result};
use crate::state::GameState;

/// First unmet unlock precondition, ignoring price and ownership.
pub fn unmet_requirement(upgrade: &UpgradeDef, state: &GameState) -> Option<IneligibleReason> {
    let req = &upgrade.requirements;
    if let Some(required) = req.min_clicks {
        if state.stats.total_clicks < required {
            return Some(IneligibleReason::NeedsClicks {
                required,
                current: state.stats.total_clicks,
            });
        }
    }
    if let Some(required) = req.min_lifetime_data {
        if state.stats.total_data_earned < required {
            return Some(IneligibleReason::NeedsLifetimeData {
                required,
                current: state.stats.total_data_earned,
            });
        }
    }
    for &(building, required) in &req.min_buildings {
        let current = state.owned(building);
        if current < required {
            return Some(IneligibleReason::NeedsBuilding {
                building,
                required,
                current,
            });
        }
    }
    None
}

/// Whether the upgrade should be shown to the player at all.
pub fn is_unlocked(upgrade: &UpgradeDef, state: &GameState) -> bool {
    !state.upgrades.contains(upgrade.id) && unmet_requirement(upgrade, state).is_none()
}

/// Full purchase check: not owned, every precondition met, and affordable.
pub fn check_purchasable(upgrade: &UpgradeDef, state: &GameState) -> Result<()> {
    if state.upgrades.contains(upgrade.id) {
        return Err(EngineError::Ineligible {
            id: upgrade.id.to_string(),
            reason: IneligibleReason::AlreadyOwned,
        });
    }
    if let Some(reason) = unmet_requirement(upgrade, state) {
        return Err(EngineError::Ineligible {
            id: upgrade.id.to_string(),
            reason,
        });
    }
    if state.data_points < upgrade.cost {
        return Err(EngineError::InsufficientFunds {
            needed: upgrade.cost,
            available: state.data_points,
        });
    }
    Ok(())
}

pub fn is_purchasable(upgrade: &UpgradeDef, state: &GameState) -> bool {
    check_purchasable(upgrade, state).is_ok()
}
