//! セーブ/ロードとゲーム状態の所有。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。形式を変えたらインクリメントし、
//!   `migrate.rs` にステップを追加する。
//! - `MIN_COMPATIBLE_VERSION`: 読み込める最小バージョン。
//!
//! 壊れたセーブは破棄して新規ゲームを開始する。保存の失敗はログに出すだけで、
//! ゲーム進行は止めない。

pub mod migrate;
pub mod storage;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::production;
use crate::state::{GameState, SAVE_VERSION};

pub use migrate::{decode, decode_str, migrate, MIN_COMPATIBLE_VERSION};
pub use storage::{MemoryStorage, SaveStorage};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// `SaveStateManager` の状態遷移: `Loading → Ready → (Saving | OfflineCatchup) → Ready`。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SavePhase {
    Loading,
    Ready,
    Saving,
    OfflineCatchup,
}

/// オフライン中の生産結果。表示用に呼び出し元へ返す。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OfflineReport {
    pub data_earned: f64,
    /// 実際に離れていた秒数。
    pub seconds_away: f64,
    /// 生産に反映した秒数 (上限でカット済み)。
    pub credited_seconds: f64,
}

/// 最終セーブ時刻から `now_ms` までの生産を 1 回の tick で反映した新しい状態を返す。
///
/// 最終時刻が無い、`offline_min_seconds` 未満、または生産が 0 の場合はレポートなし。
pub fn offline_catch_up(
    catalog: &Catalog,
    config: &EngineConfig,
    mut state: GameState,
    now_ms: f64,
) -> (GameState, Option<OfflineReport>) {
    let Some(last_seen) = state.last_seen_timestamp else {
        return (state, None);
    };
    let seconds_away = (now_ms - last_seen) / 1000.0;
    if !(seconds_away >= config.offline_min_seconds) {
        return (state, None);
    }
    let credited_seconds = seconds_away.min(config.offline_cap_seconds);
    let data_earned = production::apply_elapsed(catalog, config, &mut state, credited_seconds);
    state.last_seen_timestamp = Some(now_ms);
    if data_earned <= 0.0 {
        return (state, None);
    }
    (
        state,
        Some(OfflineReport {
            data_earned,
            seconds_away,
            credited_seconds,
        }),
    )
}

/// エクスポート用文字列 (JSON の標準 Base64)。
pub fn encode_export(state: &GameState) -> Result<String> {
    let json = serde_json::to_string(state)?;
    Ok(BASE64.encode(json))
}

/// エクスポート文字列を復元する。マイグレーションも実行する。
pub fn decode_export(text: &str) -> Result<GameState> {
    let bytes = BASE64
        .decode(text.trim())
        .map_err(|e| EngineError::CorruptSave(format!("invalid base64: {e}")))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| EngineError::CorruptSave(format!("invalid utf-8: {e}")))?;
    decode_str(&json)
}

/// ゲーム状態の唯一の所有者。
pub struct SaveStateManager<S: SaveStorage> {
    storage: S,
    key: String,
    state: GameState,
    phase: SavePhase,
}

impl<S: SaveStorage> SaveStateManager<S> {
    /// `load()` を呼ぶまでは `Loading` のまま、新規状態を持つ。
    pub fn new(storage: S, config: &EngineConfig) -> Self {
        Self {
            storage,
            key: config.storage_key.clone(),
            state: GameState::new(),
            phase: SavePhase::Loading,
        }
    }

    pub fn phase(&self) -> SavePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 状態を丸ごと差し替える (転生など)。
    pub fn replace_state(&mut self, state: GameState) {
        self.state = state;
    }

    /// 保存先から読み込み、オフライン生産を反映して `Ready` にする。
    /// セーブが無い・壊れている場合は新規ゲームになる。
    pub fn load(&mut self, catalog: &Catalog, config: &EngineConfig, now_ms: f64) -> Option<OfflineReport> {
        self.phase = SavePhase::Loading;
        let loaded = match self.storage.read(&self.key) {
            Ok(Some(text)) => match decode_str(&text) {
                Ok(state) => Some(state),
                Err(e) => {
                    log::warn!("セーブデータの読み込みに失敗（破棄します）: {e}");
                    if let Err(e) = self.storage.clear(&self.key) {
                        log::warn!("壊れたセーブの削除に失敗: {e}");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("保存先を読めません。新規ゲームを開始します: {e}");
                None
            }
        };

        let Some(state) = loaded else {
            log::info!("新規ゲームを開始");
            let mut fresh = GameState::new();
            fresh.last_seen_timestamp = Some(now_ms);
            self.state = fresh;
            self.phase = SavePhase::Ready;
            return None;
        };

        self.phase = SavePhase::OfflineCatchup;
        let (state, report) = offline_catch_up(catalog, config, state, now_ms);
        if let Some(report) = &report {
            log::info!(
                "オフライン {:.0} 秒で {:.0} データを獲得",
                report.seconds_away,
                report.data_earned
            );
        }
        self.state = state;
        self.phase = SavePhase::Ready;
        report
    }

    /// 現在の状態を保存する。失敗はログに出して false を返すだけ。
    pub fn save(&mut self, now_ms: f64) -> bool {
        self.phase = SavePhase::Saving;
        self.state.version = SAVE_VERSION;
        self.state.last_seen_timestamp = Some(now_ms);
        let result = serde_json::to_string(&self.state)
            .map_err(EngineError::from)
            .and_then(|json| self.storage.write(&self.key, &json));
        self.phase = SavePhase::Ready;
        match result {
            Ok(()) => {
                log::debug!("セーブしました");
                true
            }
            Err(e) => {
                log::warn!("セーブに失敗: {e}");
                false
            }
        }
    }

    pub fn export_save(&self) -> Result<String> {
        encode_export(&self.state)
    }

    /// 取り込みに失敗した場合は現在の状態を変更しない。
    pub fn import_save(&mut self, text: &str, now_ms: f64) -> Result<()> {
        let mut imported = decode_export(text)?;
        imported.last_seen_timestamp = Some(now_ms);
        self.state = imported;
        log::info!("セーブデータを取り込みました");
        self.save(now_ms);
        Ok(())
    }

    /// セーブを削除して新規ゲームにする。
    pub fn reset(&mut self, now_ms: f64) {
        if let Err(e) = self.storage.clear(&self.key) {
            log::warn!("セーブの削除に失敗: {e}");
        }
        let mut fresh = GameState::new();
        fresh.last_seen_timestamp = Some(now_ms);
        self.state = fresh;
        self.phase = SavePhase::Ready;
        log::info!("ゲームをリセットしました");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BuyAmount;

    const NOW: f64 = 1_700_000_000_000.0;

    fn manager() -> SaveStateManager<MemoryStorage> {
        SaveStateManager::new(MemoryStorage::new(), &EngineConfig::default())
    }

    fn store(m: &SaveStateManager<MemoryStorage>, state: &GameState) {
        let json = serde_json::to_string(state).unwrap();
        m.storage().insert("summan_clicker_save", &json);
    }

    #[test]
    fn starts_loading_then_ready() {
        let mut m = manager();
        assert_eq!(m.phase(), SavePhase::Loading);
        assert!(m.load(Catalog::standard(), &EngineConfig::default(), NOW).is_none());
        assert_eq!(m.phase(), SavePhase::Ready);
        assert_eq!(m.state().data_points, 0.0);
        assert_eq!(m.state().last_seen_timestamp, Some(NOW));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let config = EngineConfig::default();
        let mut m = manager();
        m.load(Catalog::standard(), &config, NOW);
        m.state_mut().data_points = 500.0;
        m.state_mut().buildings.insert("intern".into(), 4);
        m.state_mut().settings.buy_amount = BuyAmount::Hundred;
        assert!(m.save(NOW));
        assert_eq!(m.phase(), SavePhase::Ready);

        let mut again = SaveStateManager::new(MemoryStorage::new(), &config);
        store(&again, m.state());
        // 5 秒後: オフライン最小時間未満なので生産なし
        assert!(again.load(Catalog::standard(), &config, NOW + 5_000.0).is_none());
        assert_eq!(again.state().data_points, 500.0);
        assert_eq!(again.state().owned("intern"), 4);
        assert_eq!(again.state().settings.buy_amount, BuyAmount::Hundred);
    }

    #[test]
    fn load_applies_offline_production() {
        let config = EngineConfig::default();
        let mut m = manager();
        let mut saved = GameState::new();
        saved.buildings.insert("laptop".into(), 1); // 4 DPS
        saved.last_seen_timestamp = Some(NOW);
        store(&m, &saved);

        let report = m.load(Catalog::standard(), &config, NOW + 100_000.0).unwrap();
        assert_eq!(report.seconds_away, 100.0);
        assert!((report.data_earned - 400.0).abs() < 1e-9);
        assert!((m.state().data_points - 400.0).abs() < 1e-9);
        assert!((m.state().stats.total_data_all_time - 400.0).abs() < 1e-9);
        assert_eq!(m.phase(), SavePhase::Ready);
    }

    #[test]
    fn browser_v2_save_gets_offline_production() {
        let config = EngineConfig::default();
        let mut m = manager();
        let doc = serde_json::json!({
            "version": 2,
            "dataPoints": 0,
            "buildings": { "laptop": 1 },
            "lastSaveTime": NOW,
            "lastTickTime": NOW
        });
        m.storage().insert("summan_clicker_save", &doc.to_string());

        // 1 時間後に再開
        let report = m.load(Catalog::standard(), &config, NOW + 3_600_000.0).unwrap();
        assert_eq!(report.seconds_away, 3_600.0);
        assert!((report.data_earned - 14_400.0).abs() < 1e-6);
        assert!((m.state().data_points - 14_400.0).abs() < 1e-6);
    }

    #[test]
    fn offline_is_capped() {
        let config = EngineConfig::default();
        let mut saved = GameState::new();
        saved.buildings.insert("laptop".into(), 1);
        saved.last_seen_timestamp = Some(NOW);
        let day = 24.0 * 3600.0 * 1000.0;
        let (state, report) = offline_catch_up(Catalog::standard(), &config, saved, NOW + day);
        let report = report.unwrap();
        assert_eq!(report.credited_seconds, config.offline_cap_seconds);
        assert_eq!(report.seconds_away, 86_400.0);
        assert!((state.data_points - 4.0 * config.offline_cap_seconds).abs() < 1e-6);
    }

    #[test]
    fn offline_without_production_reports_nothing() {
        let config = EngineConfig::default();
        let mut saved = GameState::new();
        saved.last_seen_timestamp = Some(NOW);
        let (_, report) = offline_catch_up(Catalog::standard(), &config, saved, NOW + 60_000.0);
        assert!(report.is_none());
    }

    #[test]
    fn corrupt_save_falls_back_to_fresh() {
        let config = EngineConfig::default();
        let mut m = manager();
        m.storage().insert("summan_clicker_save", "{ not json");
        assert!(m.load(Catalog::standard(), &config, NOW).is_none());
        assert_eq!(m.state().data_points, 0.0);
        assert_eq!(m.phase(), SavePhase::Ready);
        // 壊れたデータは削除される
        assert_eq!(m.storage().get("summan_clicker_save"), None);
    }

    #[test]
    fn v1_save_is_migrated_on_load() {
        let config = EngineConfig::default();
        let mut m = manager();
        m.storage()
            .insert("summan_clicker_save", r#"{"dataPoints": 77, "buildings": {"intern": 1}}"#);
        m.load(Catalog::standard(), &config, NOW);
        assert_eq!(m.state().data_points, 77.0);
        assert_eq!(m.state().version, SAVE_VERSION);
        assert_eq!(m.state().settings.language, "es");
    }

    #[test]
    fn save_failure_is_not_fatal() {
        let mut m = manager();
        m.load(Catalog::standard(), &EngineConfig::default(), NOW);
        m.storage().set_fail_writes(true);
        m.state_mut().data_points = 3.0;
        assert!(!m.save(NOW));
        assert_eq!(m.phase(), SavePhase::Ready);
        assert_eq!(m.state().data_points, 3.0);
    }

    #[test]
    fn export_import_roundtrip() {
        let mut m = manager();
        m.load(Catalog::standard(), &EngineConfig::default(), NOW);
        m.state_mut().data_points = 1234.5;
        m.state_mut().buildings.insert("junior".into(), 7);
        m.state_mut().achievements.insert("prod_1".into());
        let exported = m.export_save().unwrap();

        let mut other = manager();
        other.load(Catalog::standard(), &EngineConfig::default(), NOW);
        other.import_save(&format!("  {exported}\n"), NOW).unwrap();
        assert_eq!(other.state().data_points, 1234.5);
        assert_eq!(other.state().owned("junior"), 7);
        assert!(other.state().achievements.contains("prod_1"));
        // 取り込み後は保存される
        assert!(other.storage().get("summan_clicker_save").is_some());
    }

    #[test]
    fn failed_import_leaves_state_alone() {
        let mut m = manager();
        m.load(Catalog::standard(), &EngineConfig::default(), NOW);
        m.state_mut().data_points = 42.0;
        let before = m.state().clone();

        assert!(matches!(m.import_save("%%%not base64", NOW), Err(EngineError::CorruptSave(_))));
        let not_json = BASE64.encode("hello");
        assert!(matches!(m.import_save(&not_json, NOW), Err(EngineError::CorruptSave(_))));
        let newer = BASE64.encode(r#"{"version": 9}"#);
        assert!(matches!(m.import_save(&newer, NOW), Err(EngineError::CorruptSave(_))));
        assert_eq!(m.state(), &before);
    }

    #[test]
    fn import_accepts_v1_exports() {
        let mut m = manager();
        let legacy = BASE64.encode(r#"{"dataPoints": 10, "upgrades": ["click_1"]}"#);
        m.import_save(&legacy, NOW).unwrap();
        assert_eq!(m.state().data_points, 10.0);
        assert!(m.state().upgrades.contains("click_1"));
    }

    #[test]
    fn reset_clears_storage() {
        let mut m = manager();
        m.load(Catalog::standard(), &EngineConfig::default(), NOW);
        m.state_mut().data_points = 99.0;
        m.save(NOW);
        m.reset(NOW + 1.0);
        assert_eq!(m.state().data_points, 0.0);
        assert_eq!(m.storage().get("summan_clicker_save"), None);
    }
}
