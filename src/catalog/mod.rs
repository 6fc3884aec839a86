//! Static game content: buildings, upgrades, achievements and innovation
//! upgrades. Tables are immutable once built and indexed by id.

mod content;

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{EngineError, Result};

pub use content::{
    create_achievements, create_buildings, create_innovation_upgrades, create_upgrades,
};

/// A purchasable producer.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Price of the first unit.
    pub base_cost: f64,
    /// Data per second per unit, before multipliers.
    pub base_production: f64,
    /// Geometric cost multiplier per unit owned.
    pub growth_rate: f64,
    /// Lifetime data at which the building is shown to the player.
    pub unlock_at: f64,
}

/// What an upgrade does once owned.
#[derive(Clone, Debug, PartialEq)]
pub enum UpgradeEffect {
    ClickMultiplier(f64),
    ClickAdditive(f64),
    BuildingMultiplier { target: &'static str, multiplier: f64 },
    GlobalMultiplier(f64),
    /// Multiplies every building in `targets`.
    Synergy { targets: &'static [&'static str], multiplier: f64 },
    /// Multiplies `target` by `1 + value * owned(per)`.
    SynergyPer { target: &'static str, per: &'static str, value: f64 },
    /// Adds a share of DPS to each click. Catalogued but not yet credited by
    /// `production::compute_click_power`.
    ClickDpsPercent(f64),
}

impl UpgradeEffect {
    /// Buildings this effect reads or boosts.
    pub fn buildings(&self) -> Vec<&'static str> {
        match self {
            UpgradeEffect::BuildingMultiplier { target, .. } => vec![*target],
            UpgradeEffect::Synergy { targets, .. } => targets.to_vec(),
            UpgradeEffect::SynergyPer { target, per, .. } => vec![*target, *per],
            _ => Vec::new(),
        }
    }

    pub fn magnitude(&self) -> f64 {
        match self {
            UpgradeEffect::ClickMultiplier(m)
            | UpgradeEffect::ClickAdditive(m)
            | UpgradeEffect::GlobalMultiplier(m)
            | UpgradeEffect::ClickDpsPercent(m) => *m,
            UpgradeEffect::BuildingMultiplier { multiplier, .. }
            | UpgradeEffect::Synergy { multiplier, .. } => *multiplier,
            UpgradeEffect::SynergyPer { value, .. } => *value,
        }
    }
}

/// Unlock preconditions. All present conditions must hold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Requirements {
    pub min_clicks: Option<u64>,
    pub min_lifetime_data: Option<f64>,
    /// `(building, count)` pairs, all of which must be owned.
    pub min_buildings: Vec<(&'static str, u64)>,
}

impl Requirements {
    pub fn clicks(n: u64) -> Self {
        Self {
            min_clicks: Some(n),
            ..Self::default()
        }
    }

    pub fn lifetime_data(amount: f64) -> Self {
        Self {
            min_lifetime_data: Some(amount),
            ..Self::default()
        }
    }

    pub fn building(id: &'static str, count: u64) -> Self {
        Self::buildings(&[(id, count)])
    }

    pub fn buildings(pairs: &[(&'static str, u64)]) -> Self {
        Self {
            min_buildings: pairs.to_vec(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: f64,
    pub effect: UpgradeEffect,
    pub requirements: Requirements,
}

/// The stat an achievement threshold is measured against.
#[derive(Clone, Debug, PartialEq)]
pub enum AchievementStat {
    /// Data earned this run.
    LifetimeData,
    /// Clicks this run.
    Clicks,
    /// Highest count of any single building.
    AnyBuilding,
    TotalBuildings,
    Building(&'static str),
    Dps,
    TimesPrestiged,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub stat: AchievementStat,
    pub threshold: f64,
    /// Production bonus fraction (0.01 = +1%) when achievement bonuses are on.
    pub bonus: f64,
}

/// Permanent effects bought with innovation points.
#[derive(Clone, Debug, PartialEq)]
pub enum InnovationEffect {
    /// Data granted at the start of every run. The largest owned value wins.
    StartBonus(f64),
    ClickMultiplier(f64),
    ProductionMultiplier(f64),
    /// Factor applied to building prices (0.9 = 10% off).
    BuildingDiscount(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct InnovationUpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u64,
    pub effect: InnovationEffect,
}

/// Immutable content tables with id lookups.
#[derive(Debug)]
pub struct Catalog {
    buildings: Vec<BuildingDef>,
    upgrades: Vec<UpgradeDef>,
    achievements: Vec<AchievementDef>,
    innovation_upgrades: Vec<InnovationUpgradeDef>,
    building_index: HashMap<&'static str, usize>,
    upgrade_index: HashMap<&'static str, usize>,
    innovation_index: HashMap<&'static str, usize>,
}

fn index_by_id<T>(
    items: &[T],
    id: impl Fn(&T) -> &'static str,
    what: &str,
) -> Result<HashMap<&'static str, usize>> {
    let mut index = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if index.insert(id(item), i).is_some() {
            return Err(EngineError::InvalidCatalog(format!(
                "duplicate {what} id `{}`",
                id(item)
            )));
        }
    }
    Ok(index)
}

impl Catalog {
    pub fn new(
        buildings: Vec<BuildingDef>,
        upgrades: Vec<UpgradeDef>,
        achievements: Vec<AchievementDef>,
        innovation_upgrades: Vec<InnovationUpgradeDef>,
    ) -> Result<Self> {
        let building_index = index_by_id(&buildings, |b| b.id, "building")?;
        let upgrade_index = index_by_id(&upgrades, |u| u.id, "upgrade")?;
        let innovation_index =
            index_by_id(&innovation_upgrades, |u| u.id, "innovation upgrade")?;
        index_by_id(&achievements, |a| a.id, "achievement")?;

        for b in &buildings {
            if !(b.growth_rate > 1.0 && b.growth_rate.is_finite()) {
                return Err(EngineError::InvalidCatalog(format!(
                    "building `{}` growth rate must be > 1 (got {})",
                    b.id, b.growth_rate
                )));
            }
            if !(b.base_cost > 0.0 && b.base_cost.is_finite()) {
                return Err(EngineError::InvalidCatalog(format!(
                    "building `{}` base cost must be > 0 (got {})",
                    b.id, b.base_cost
                )));
            }
            if !(b.base_production >= 0.0) {
                return Err(EngineError::InvalidCatalog(format!(
                    "building `{}` production must not be negative",
                    b.id
                )));
            }
        }

        let known_building = |id: &str, owner: &str| -> Result<()> {
            if building_index.contains_key(id) {
                Ok(())
            } else {
                Err(EngineError::InvalidCatalog(format!(
                    "`{owner}` references unknown building `{id}`"
                )))
            }
        };

        for u in &upgrades {
            if !(u.cost >= 0.0 && u.effect.magnitude().is_finite()) {
                return Err(EngineError::InvalidCatalog(format!(
                    "upgrade `{}` has an invalid cost or magnitude",
                    u.id
                )));
            }
            for building in u.effect.buildings() {
                known_building(building, u.id)?;
            }
            for &(building, _) in &u.requirements.min_buildings {
                known_building(building, u.id)?;
            }
        }
        for a in &achievements {
            if let AchievementStat::Building(building) = a.stat {
                known_building(building, a.id)?;
            }
        }

        Ok(Self {
            buildings,
            upgrades,
            achievements,
            innovation_upgrades,
            building_index,
            upgrade_index,
            innovation_index,
        })
    }

    /// The shipped game content, built on first use.
    pub fn standard() -> &'static Catalog {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Catalog::new(
                create_buildings(),
                create_upgrades(),
                create_achievements(),
                create_innovation_upgrades(),
            )
            .expect("built-in catalog must be valid")
        })
    }

    pub fn buildings(&self) -> &[BuildingDef] {
        &self.buildings
    }

    pub fn upgrades(&self) -> &[UpgradeDef] {
        &self.upgrades
    }

    pub fn achievements(&self) -> &[AchievementDef] {
        &self.achievements
    }

    pub fn innovation_upgrades(&self) -> &[InnovationUpgradeDef] {
        &self.innovation_upgrades
    }

    pub fn building(&self, id: &str) -> Option<&BuildingDef> {
        self.building_index.get(id).map(|&i| &self.buildings[i])
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeDef> {
        self.upgrade_index.get(id).map(|&i| &self.upgrades[i])
    }

    pub fn innovation_upgrade(&self, id: &str) -> Option<&InnovationUpgradeDef> {
        self.innovation_index
            .get(id)
            .map(|&i| &self.innovation_upgrades[i])
    }

    /// Buildings the player can see given their lifetime data this run.
    pub fn visible_buildings(&self, lifetime_data: f64) -> impl Iterator<Item = &BuildingDef> {
        self.buildings
            .iter()
            .filter(move |b| lifetime_data >= b.unlock_at)
    }
}
