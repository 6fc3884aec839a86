//! Building cost math. Pure functions over catalog definitions.
//!
//! Prices follow a geometric curve `base * growth^owned`. Bulk prices use the
//! closed-form series sum and are rounded up once, so a bulk purchase can be a
//! little cheaper than buying the same units one at a time.

use crate::catalog::{BuildingDef, Catalog, InnovationEffect};
use crate::error::{EngineError, Result};
use crate::state::{BuyAmount, GameState};

/// Correction steps allowed around the analytic estimate in `max_affordable`.
const MAX_CORRECTION_STEPS: u32 = 64;

/// Rounds a price up to a whole unit. A value within two ULPs of an integer
/// (e.g. `20.000000000000004`) is float noise and snaps to that integer.
fn round_price(raw: f64) -> f64 {
    let nearest = raw.round();
    if (raw - nearest).abs() <= raw.abs() * 2.0 * f64::EPSILON {
        nearest
    } else {
        raw.ceil()
    }
}

/// Price curve of one building, optionally discounted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostCurve {
    base: f64,
    growth: f64,
}

impl CostCurve {
    pub fn of(building: &BuildingDef) -> Self {
        Self {
            base: building.base_cost,
            growth: building.growth_rate,
        }
    }

    /// Scales every price by `factor` (0.9 = 10% off).
    pub fn discounted(self, factor: f64) -> Self {
        Self {
            base: self.base * factor,
            ..self
        }
    }

    fn raw_unit(&self, owned: u64) -> f64 {
        self.base * self.growth.powf(owned as f64)
    }

    pub fn unit_cost(&self, owned: u64) -> f64 {
        round_price(self.raw_unit(owned))
    }

    pub fn bulk_cost(&self, owned: u64, quantity: u64) -> f64 {
        match quantity {
            0 => 0.0,
            1 => self.unit_cost(owned),
            k => {
                let g = self.growth;
                round_price(self.raw_unit(owned) * (g.powf(k as f64) - 1.0) / (g - 1.0))
            }
        }
    }

    /// Largest quantity whose bulk cost fits in `budget`.
    pub fn max_affordable(&self, owned: u64, budget: f64) -> u64 {
        if !(budget >= self.unit_cost(owned)) {
            return 0;
        }
        let g = self.growth;
        let first = self.raw_unit(owned);
        let estimate = ((1.0 + budget * (g - 1.0) / first).ln() / g.ln()).floor();
        if !estimate.is_finite() {
            return 0;
        }

        let mut k = (estimate as u64).max(1);
        let mut steps = 0;
        while k > 1 && self.bulk_cost(owned, k) > budget && steps < MAX_CORRECTION_STEPS {
            k -= 1;
            steps += 1;
        }
        steps = 0;
        while self.bulk_cost(owned, k + 1) <= budget && steps < MAX_CORRECTION_STEPS {
            k += 1;
            steps += 1;
        }
        k
    }
}

pub fn unit_cost(building: &BuildingDef, owned: u64) -> f64 {
    CostCurve::of(building).unit_cost(owned)
}

pub fn bulk_cost(building: &BuildingDef, owned: u64, quantity: u64) -> f64 {
    CostCurve::of(building).bulk_cost(owned, quantity)
}

pub fn max_affordable(building: &BuildingDef, owned: u64, budget: f64) -> u64 {
    CostCurve::of(building).max_affordable(owned, budget)
}

/// Product of every owned innovation discount (1.0 when none).
pub fn building_discount(catalog: &Catalog, state: &GameState) -> f64 {
    state
        .innovation_upgrades
        .iter()
        .filter_map(|id| catalog.innovation_upgrade(id))
        .map(|u| match u.effect {
            InnovationEffect::BuildingDiscount(factor) => factor,
            _ => 1.0,
        })
        .product()
}

/// The price curve the player actually pays for `building`.
pub fn effective_curve(catalog: &Catalog, state: &GameState, building: &BuildingDef) -> CostCurve {
    CostCurve::of(building).discounted(building_discount(catalog, state))
}

/// A resolved building purchase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quote {
    pub quantity: u64,
    pub cost: f64,
}

/// Turns a buy-amount setting into a concrete quantity and price.
///
/// Fixed amounts fail with `InsufficientFunds` when unaffordable. `Max`
/// never fails; a zero quantity is a valid quote.
pub fn resolve_quantity(
    amount: BuyAmount,
    curve: &CostCurve,
    owned: u64,
    budget: f64,
) -> Result<Quote> {
    match amount.fixed_quantity() {
        Some(quantity) => {
            let cost = curve.bulk_cost(owned, quantity);
            if cost > budget {
                return Err(EngineError::InsufficientFunds {
                    needed: cost,
                    available: budget,
                });
            }
            Ok(Quote { quantity, cost })
        }
        None => {
            let quantity = curve.max_affordable(owned, budget);
            Ok(Quote {
                quantity,
                cost: curve.bulk_cost(owned, quantity),
            })
        }
    }
}
