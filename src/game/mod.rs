//! The game driver: fixed ticks, player commands and autosave.

pub mod command;

use crate::achievements;
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::economy::Quote;
use crate::eligibility;
use crate::error::{EngineError, IneligibleReason, Result};
use crate::prestige;
use crate::production::{self, ClickBreakdown};
use crate::progression;
use crate::save::{OfflineReport, SavePhase, SaveStateManager, SaveStorage};
use crate::state::{BuyAmount, GameState};
use crate::time::{Clock, GameTime, SystemClock};

pub use command::{Command, Outcome};

/// What a prestige would yield right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InnovationPreview {
    /// Points a prestige would award now.
    pub pending: u64,
    /// Points justified by all-time data.
    pub total: u64,
    /// All-time data at which `total` goes up by one.
    pub next_point_at: f64,
}

pub struct Game<'c, S: SaveStorage, C: Clock = SystemClock> {
    catalog: &'c Catalog,
    config: EngineConfig,
    saves: SaveStateManager<S>,
    clock: C,
    time: GameTime,
    /// Ticks since the last autosave.
    since_autosave: u32,
    offline_report: Option<OfflineReport>,
    unlocked: Vec<&'static str>,
}

impl<'c, S: SaveStorage, C: Clock> Game<'c, S, C> {
    pub fn new(catalog: &'c Catalog, config: EngineConfig, storage: S, clock: C) -> Result<Self> {
        config.validate()?;
        let time = GameTime::new(config.ticks_per_second, config.max_tick_seconds);
        let saves = SaveStateManager::new(storage, &config);
        Ok(Self {
            catalog,
            config,
            saves,
            clock,
            time,
            since_autosave: 0,
            offline_report: None,
            unlocked: Vec::new(),
        })
    }

    /// Loads the save (with offline catch-up) and makes the game playable.
    pub fn start(&mut self) -> Option<OfflineReport> {
        let now = self.clock.now_ms();
        let report = self.saves.load(self.catalog, &self.config, now);
        self.evaluate_achievements();
        self.time.resync();
        self.since_autosave = 0;
        self.offline_report = report;
        report
    }

    // ── Read-only queries ─────────────────────────────────

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        self.saves.state()
    }

    pub fn phase(&self) -> SavePhase {
        self.saves.phase()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn storage(&self) -> &S {
        self.saves.storage()
    }

    pub fn total_ticks(&self) -> u64 {
        self.time.total_ticks
    }

    pub fn dps(&self) -> f64 {
        production::compute_dps(self.catalog, &self.config, self.state())
    }

    pub fn click_power(&self) -> f64 {
        production::compute_click_power(self.catalog, self.state(), self.dps())
    }

    pub fn click_breakdown(&self) -> ClickBreakdown {
        production::click_breakdown(self.catalog, self.state())
    }

    /// Price and quantity the current buy-amount setting would buy.
    pub fn building_quote(&self, building: &str) -> Option<Quote> {
        progression::quote_building(
            self.catalog,
            self.state(),
            building,
            self.state().settings.buy_amount,
        )
    }

    pub fn is_upgrade_purchasable(&self, upgrade: &str) -> bool {
        self.catalog
            .upgrade(upgrade)
            .is_some_and(|u| eligibility::is_purchasable(u, self.state()))
    }

    /// Upgrade ids whose preconditions are met and which are not owned yet.
    pub fn available_upgrades(&self) -> Vec<&'static str> {
        self.catalog
            .upgrades()
            .iter()
            .filter(|u| eligibility::is_unlocked(u, self.state()))
            .map(|u| u.id)
            .collect()
    }

    pub fn innovation_preview(&self) -> InnovationPreview {
        let state = self.state();
        let total = prestige::compute_innovation_points(&self.config, state.stats.total_data_all_time);
        InnovationPreview {
            pending: prestige::pending_points(&self.config, state),
            total,
            next_point_at: prestige::data_for_next_point(&self.config, total),
        }
    }

    /// The offline report from `start`, handed out once.
    pub fn take_offline_report(&mut self) -> Option<OfflineReport> {
        self.offline_report.take()
    }

    /// Achievements unlocked since the last call.
    pub fn drain_unlocked(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.unlocked)
    }

    // ── Time ──────────────────────────────────────────────

    /// Feed a frame timestamp (ms). Runs however many fixed ticks are due.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let ticks = self.time.update(now_ms);
        self.tick(ticks);
        ticks
    }

    /// Advance by `delta_ticks` fixed ticks.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        let dt = self.config.tick_seconds();
        let state = self.saves.state_mut();
        for _ in 0..delta_ticks {
            production::apply_tick(self.catalog, &self.config, state, dt);
        }
        self.evaluate_achievements();

        self.since_autosave += delta_ticks;
        if self.since_autosave >= self.config.autosave_ticks() {
            self.since_autosave = 0;
            let now = self.clock.now_ms();
            self.saves.save(now);
        }
    }

    fn evaluate_achievements(&mut self) {
        let newly = achievements::evaluate(self.catalog, &self.config, self.saves.state_mut());
        self.unlocked.extend(newly);
    }

    // ── Commands ──────────────────────────────────────────

    /// Applies one player command. Failed commands leave the state unchanged.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        let result = self.apply(command);
        match &result {
            Err(e @ EngineError::UnknownId { .. }) => log::error!("{e}"),
            Err(e) => log::debug!("command refused: {e}"),
            Ok(_) => {}
        }
        result
    }

    fn apply(&mut self, command: Command) -> Result<Outcome> {
        let catalog = self.catalog;
        let outcome = match command {
            Command::Click { .. } => {
                let earned = production::apply_click(catalog, &self.config, self.saves.state_mut());
                Outcome::Clicked { earned }
            }
            Command::BuyBuilding { building_id } => {
                let quote = progression::buy_building(catalog, self.saves.state_mut(), &building_id)?;
                Outcome::BuildingsBought { building_id, quote }
            }
            Command::BuyUpgrade { upgrade_id } => {
                progression::buy_upgrade(catalog, self.saves.state_mut(), &upgrade_id)?;
                Outcome::UpgradeBought { upgrade_id }
            }
            Command::BuyPrestigeUpgrade { upgrade_id } => {
                progression::buy_innovation_upgrade(catalog, self.saves.state_mut(), &upgrade_id)?;
                Outcome::PrestigeUpgradeBought { upgrade_id }
            }
            Command::SetBuyAmount { amount } => {
                let amount = BuyAmount::try_from_setting(amount)?;
                self.saves.state_mut().settings.buy_amount = amount;
                Outcome::BuyAmountSet(amount)
            }
            Command::SetLanguage { language } => {
                self.saves.state_mut().settings.language = language.clone();
                Outcome::LanguageSet(language)
            }
            Command::Prestige => return self.prestige(),
            Command::Save => {
                let now = self.clock.now_ms();
                Outcome::Saved(self.saves.save(now))
            }
            Command::Reset => {
                let now = self.clock.now_ms();
                self.saves.reset(now);
                self.since_autosave = 0;
                self.unlocked.clear();
                return Ok(Outcome::Reset);
            }
            Command::Export => Outcome::Exported(self.saves.export_save()?),
            Command::Import { data } => {
                let now = self.clock.now_ms();
                self.saves.import_save(&data, now)?;
                self.since_autosave = 0;
                Outcome::Imported
            }
            Command::ShowOfflineModal {
                data_earned,
                seconds_away,
            } => Outcome::OfflineModal(OfflineReport {
                data_earned,
                seconds_away,
                credited_seconds: seconds_away.min(self.config.offline_cap_seconds),
            }),
        };
        self.evaluate_achievements();
        Ok(outcome)
    }

    fn prestige(&mut self) -> Result<Outcome> {
        let outcome = prestige::perform_prestige(self.catalog, &self.config, self.state())
            .ok_or_else(|| EngineError::Ineligible {
                id: "prestige".to_string(),
                reason: IneligibleReason::NothingToPrestige,
            })?;
        self.saves.replace_state(outcome.state);
        self.evaluate_achievements();
        let now = self.clock.now_ms();
        self.saves.save(now);
        Ok(Outcome::Prestiged {
            points: outcome.points,
        })
    }
}
