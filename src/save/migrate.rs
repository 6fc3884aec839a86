//! セーブ形式のマイグレーション。
//!
//! 生の JSON (`serde_json::Value`) のまま 1 バージョンずつ順に引き上げ、
//! 最後に `GameState` へデコードする。各ステップはフィールドを追加するだけで、
//! プレイヤーのデータは削除しない。`version` が無いセーブは v1 とみなす。

use serde_json::{Map, Value};

use crate::error::{EngineError, Result};
use crate::state::{GameState, Settings, Stats, SAVE_VERSION};

/// 読み込める最小バージョン。
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

fn corrupt(msg: impl Into<String>) -> EngineError {
    EngineError::CorruptSave(msg.into())
}

fn version_of(doc: &Map<String, Value>) -> Result<u32> {
    match doc.get("version") {
        None | Some(Value::Null) => Ok(1),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| corrupt(format!("invalid version field: {v}"))),
    }
}

/// オブジェクトでなければデフォルト値で置き換える。
fn ensure_object(doc: &mut Map<String, Value>, key: &str, default: Value) {
    if !doc.get(key).is_some_and(Value::is_object) {
        doc.insert(key.to_string(), default);
    }
}

/// v1 → v2: `stats` と `settings` を補完する。
fn v1_to_v2(doc: &mut Map<String, Value>) -> Result<()> {
    ensure_object(doc, "stats", serde_json::to_value(Stats::default())?);
    ensure_object(doc, "settings", serde_json::to_value(Settings::default())?);
    Ok(())
}

/// ブラウザ版は最終時刻を `lastTickTime` / `lastSaveTime` に持ち、
/// `lastSeenTimestamp` を書かない。どのバージョンでも欠けていれば補う。
fn fill_last_seen(doc: &mut Map<String, Value>) {
    if doc.get("lastSeenTimestamp").is_some_and(|v| !v.is_null()) {
        return;
    }
    let legacy = ["lastTickTime", "lastSaveTime"]
        .into_iter()
        .find_map(|key| doc.get(key).filter(|v| v.is_number()).cloned());
    if let Some(t) = legacy {
        doc.insert("lastSeenTimestamp".to_string(), t);
    }
}

/// 現行バージョンまで引き上げた JSON を返す。現行バージョンのセーブには何もしない。
pub fn migrate(raw: Value) -> Result<Value> {
    let Value::Object(mut doc) = raw else {
        return Err(corrupt("save is not a JSON object"));
    };

    let mut version = version_of(&doc)?;
    if version < MIN_COMPATIBLE_VERSION {
        return Err(corrupt(format!(
            "save version {version} is older than {MIN_COMPATIBLE_VERSION}"
        )));
    }
    if version > SAVE_VERSION {
        return Err(corrupt(format!(
            "save version {version} is newer than supported {SAVE_VERSION}"
        )));
    }

    while version < SAVE_VERSION {
        match version {
            1 => v1_to_v2(&mut doc)?,
            other => return Err(corrupt(format!("no migration step from v{other}"))),
        }
        version += 1;
        log::debug!("migrated save to v{version}");
    }
    fill_last_seen(&mut doc);
    doc.insert("version".to_string(), Value::from(SAVE_VERSION));
    Ok(Value::Object(doc))
}

/// マイグレーションしてから `GameState` にデコードする。
pub fn decode(raw: Value) -> Result<GameState> {
    let migrated = migrate(raw)?;
    let state: GameState = serde_json::from_value(migrated)?;
    if !(state.data_points.is_finite() && state.stats.total_data_all_time.is_finite()) {
        return Err(corrupt("non-finite currency"));
    }
    Ok(state)
}

/// JSON 文字列をパースしてデコードする。
pub fn decode_str(text: &str) -> Result<GameState> {
    let raw: Value = serde_json::from_str(text)?;
    decode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn v1_gets_stats_and_settings() {
        let raw = json!({ "dataPoints": 42, "buildings": { "intern": 2 } });
        let migrated = migrate(raw).unwrap();
        assert_eq!(migrated["version"], 2);
        assert_eq!(migrated["settings"]["language"], "es");
        assert_eq!(migrated["settings"]["buyAmount"], 1);
        assert_eq!(migrated["stats"]["totalClicks"], 0);
        assert_eq!(migrated["dataPoints"], 42);
        assert_eq!(migrated["buildings"]["intern"], 2);
    }

    #[test]
    fn v1_keeps_existing_objects() {
        let raw = json!({
            "version": 1,
            "stats": { "totalClicks": 9 },
            "settings": { "language": "en", "buyAmount": 10 }
        });
        let state = decode(raw).unwrap();
        assert_eq!(state.stats.total_clicks, 9);
        assert_eq!(state.settings.language, "en");
    }

    #[test]
    fn legacy_save_time_becomes_last_seen() {
        let raw = json!({ "lastSaveTime": 1_700_000_000_000.0_f64 });
        let state = decode(raw).unwrap();
        assert_eq!(state.last_seen_timestamp, Some(1.7e12));
    }

    #[test]
    fn browser_v2_save_gets_last_seen() {
        let raw = json!({
            "version": 2,
            "lastSaveTime": 1_700_000_000_000.0_f64,
            "lastTickTime": 1_700_000_005_000.0_f64
        });
        let state = decode(raw).unwrap();
        assert_eq!(state.last_seen_timestamp, Some(1_700_000_005_000.0));

        let raw = json!({ "version": 2, "lastSaveTime": 1_700_000_000_000.0_f64 });
        assert_eq!(decode(raw).unwrap().last_seen_timestamp, Some(1.7e12));
    }

    #[test]
    fn own_last_seen_wins_over_legacy_fields() {
        let raw = json!({
            "version": 2,
            "lastSeenTimestamp": 2e12,
            "lastTickTime": 1e12
        });
        assert_eq!(decode(raw).unwrap().last_seen_timestamp, Some(2e12));
    }

    #[test]
    fn migration_is_idempotent() {
        let raw = json!({ "dataPoints": 5, "upgrades": ["click_1"] });
        let once = migrate(raw).unwrap();
        let twice = migrate(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn current_version_is_untouched() {
        let doc = serde_json::to_value(GameState::new()).unwrap();
        assert_eq!(migrate(doc.clone()).unwrap(), doc);
    }

    #[test]
    fn rejects_newer_version() {
        let err = migrate(json!({ "version": 99 })).unwrap_err();
        assert!(matches!(err, EngineError::CorruptSave(_)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_str("not json").is_err());
        assert!(decode(json!([1, 2, 3])).is_err());
        assert!(decode(json!({ "version": "two" })).is_err());
        assert!(decode(json!({ "dataPoints": "lots" })).is_err());
        assert!(decode(json!({ "version": 0 })).is_err());
    }

    #[test]
    fn keeps_unknown_fields() {
        let raw = json!({
            "version": 2,
            "dataPoints": 1,
            "activeEffects": [],
            "stats": { "events": { "golden_clicked": 3 } }
        });
        let state = decode(raw).unwrap();
        assert_eq!(state.data_points, 1.0);
        assert!(state.extra.contains_key("activeEffects"));
        assert!(state.stats.extra.contains_key("events"));
    }
}
