//! Purchases. Every function here either applies in full or leaves the
//! state untouched.

use crate::catalog::Catalog;
use crate::economy::{self, Quote};
use crate::eligibility;
use crate::error::{EngineError, IdKind, IneligibleReason, Result};
use crate::state::{BuyAmount, GameState};

/// Buys `building` using the player's current buy-amount setting.
pub fn buy_building(catalog: &Catalog, state: &mut GameState, building: &str) -> Result<Quote> {
    let amount = state.settings.buy_amount;
    buy_building_amount(catalog, state, building, amount)
}

pub fn buy_building_amount(
    catalog: &Catalog,
    state: &mut GameState,
    building: &str,
    amount: BuyAmount,
) -> Result<Quote> {
    let def = catalog.building(building).ok_or_else(|| EngineError::UnknownId {
        kind: IdKind::Building,
        id: building.to_string(),
    })?;
    let owned = state.owned(building);
    let curve = economy::effective_curve(catalog, state, def);
    let quote = economy::resolve_quantity(amount, &curve, owned, state.data_points)?;
    if quote.quantity > 0 {
        state.data_points -= quote.cost;
        *state.buildings.entry(def.id.to_string()).or_insert(0) += quote.quantity;
        log::debug!("bought {} x{} for {}", def.id, quote.quantity, quote.cost);
    }
    Ok(quote)
}

/// Price of the next `amount` units, for display. `None` for unknown ids.
pub fn quote_building(catalog: &Catalog, state: &GameState, building: &str, amount: BuyAmount) -> Option<Quote> {
    let def = catalog.building(building)?;
    let curve = economy::effective_curve(catalog, state, def);
    let owned = state.owned(building);
    Some(match amount.fixed_quantity() {
        Some(quantity) => Quote {
            quantity,
            cost: curve.bulk_cost(owned, quantity),
        },
        None => {
            let quantity = curve.max_affordable(owned, state.data_points);
            Quote {
                quantity,
                cost: curve.bulk_cost(owned, quantity),
            }
        }
    })
}

pub fn buy_upgrade(catalog: &Catalog, state: &mut GameState, upgrade: &str) -> Result<()> {
    let def = catalog.upgrade(upgrade).ok_or_else(|| EngineError::UnknownId {
        kind: IdKind::Upgrade,
        id: upgrade.to_string(),
    })?;
    eligibility::check_purchasable(def, state)?;
    state.data_points -= def.cost;
    state.upgrades.insert(def.id.to_string());
    log::debug!("bought upgrade {}", def.id);
    Ok(())
}

/// Spends innovation points on a permanent upgrade.
pub fn buy_innovation_upgrade(catalog: &Catalog, state: &mut GameState, upgrade: &str) -> Result<()> {
    let def = catalog
        .innovation_upgrade(upgrade)
        .ok_or_else(|| EngineError::UnknownId {
            kind: IdKind::InnovationUpgrade,
            id: upgrade.to_string(),
        })?;
    if state.innovation_upgrades.contains(def.id) {
        return Err(EngineError::Ineligible {
            id: def.id.to_string(),
            reason: IneligibleReason::AlreadyOwned,
        });
    }
    if state.innovation_points < def.cost {
        return Err(EngineError::InsufficientFunds {
            needed: def.cost as f64,
            available: state.innovation_points as f64,
        });
    }
    state.innovation_points -= def.cost;
    state.innovation_upgrades.insert(def.id.to_string());
    Ok(())
}
