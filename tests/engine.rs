//! End-to-end checks through the public API: commands in, state and saves out.

use std::rc::Rc;

use data_clicker::catalog::Catalog;
use data_clicker::error::IneligibleReason;
use data_clicker::prestige;
use data_clicker::save::{self, FileStorage, MemoryStorage};
use data_clicker::time::ManualClock;
use data_clicker::{BuyAmount, Command, EngineConfig, EngineError, Game, GameState, Outcome};

const NOW: f64 = 1_700_000_000_000.0;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn new_game() -> Game<'static, MemoryStorage, ManualClock> {
    init_logger();
    let mut game = Game::new(
        Catalog::standard(),
        EngineConfig::default(),
        MemoryStorage::new(),
        ManualClock::new(NOW),
    )
    .unwrap();
    game.start();
    game
}

/// Seeds a game through the import path, the way a player would restore a save.
fn game_with(state: &GameState) -> Game<'static, MemoryStorage, ManualClock> {
    let mut game = new_game();
    let data = save::encode_export(state).unwrap();
    game.dispatch(Command::Import { data }).unwrap();
    game
}

fn with_data(data: f64) -> GameState {
    let mut state = GameState::new();
    state.data_points = data;
    state
}

#[test]
fn buy_one_intern_from_100() {
    let mut game = game_with(&with_data(100.0));
    game.dispatch(Command::buy_building("intern")).unwrap();
    assert_eq!(game.state().data_points, 80.0);
    assert_eq!(game.state().owned("intern"), 1);
}

#[test]
fn buy_max_interns_from_100() {
    let mut state = with_data(100.0);
    state.settings.buy_amount = BuyAmount::Max;
    let mut game = game_with(&state);
    game.dispatch(Command::buy_building("intern")).unwrap();
    assert_eq!(game.state().data_points, 28.0);
    assert_eq!(game.state().owned("intern"), 3);

    // Max with nothing affordable is a zero-quantity success.
    let outcome = game.dispatch(Command::buy_building("intern")).unwrap();
    assert!(matches!(outcome, Outcome::BuildingsBought { quote, .. } if quote.quantity == 0));

    game.dispatch(Command::SetBuyAmount { amount: 1 }).unwrap();
    let err = game.dispatch(Command::buy_building("intern")).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds { .. }));
    assert_eq!(game.state().owned("intern"), 3);
}

#[test]
fn max_buy_then_one_more_fails_at_scale() {
    let catalog = Catalog::standard();
    for building in catalog.buildings() {
        let mut state = with_data(building.base_cost * 1e4);
        state.buildings.insert(building.id.to_string(), 40);
        let mut game = game_with(&state);
        game.dispatch(Command::SetBuyAmount { amount: -1 }).unwrap();
        let Outcome::BuildingsBought { quote, .. } =
            game.dispatch(Command::buy_building(building.id)).unwrap()
        else {
            panic!("expected a building purchase");
        };
        assert_eq!(game.state().owned(building.id), 40 + quote.quantity);
        game.dispatch(Command::SetBuyAmount { amount: 1 }).unwrap();
        assert!(matches!(
            game.dispatch(Command::buy_building(building.id)),
            Err(EngineError::InsufficientFunds { .. })
        ));
    }
}

#[test]
fn upgrades_need_preconditions_and_funds() {
    let mut game = game_with(&with_data(1_000.0));
    let err = game.dispatch(Command::buy_upgrade("click_1")).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Ineligible {
            reason: IneligibleReason::NeedsClicks { .. },
            ..
        }
    ));
    for _ in 0..100 {
        game.dispatch(Command::click()).unwrap();
    }
    assert!(game.is_upgrade_purchasable("click_1"));
    game.dispatch(Command::buy_upgrade("click_1")).unwrap();
    assert_eq!(game.state().data_points, 1_000.0 + 100.0 - 250.0);
    assert_eq!(game.click_power(), 2.0);
    assert!(game.state().achievements.contains("click_1"));
}

#[test]
fn prestige_points_and_reset() {
    let config = EngineConfig::default();
    assert_eq!(prestige::compute_innovation_points(&config, 1e9), 1);
    assert_eq!(prestige::compute_innovation_points(&config, 25e9), 5);
    assert_eq!(prestige::compute_innovation_points(&config, 9.9e8), 0);

    let mut poor = GameState::new();
    poor.stats.total_data_all_time = 9.9e8;
    let mut game = game_with(&poor);
    assert!(game.dispatch(Command::Prestige).is_err());
    assert_eq!(game.state().stats.total_data_all_time, 9.9e8);

    let mut rich = with_data(5e9);
    rich.stats.total_data_all_time = 25e9;
    rich.stats.total_data_earned = 25e9;
    rich.buildings.insert("server".into(), 12);
    rich.upgrades.insert("server_1".into());
    rich.achievements.insert("prod_8".into());
    let mut game = game_with(&rich);
    assert_eq!(game.innovation_preview().pending, 5);
    assert_eq!(game.dispatch(Command::Prestige).unwrap(), Outcome::Prestiged { points: 5 });

    let state = game.state();
    assert_eq!(state.innovation_points, 5);
    assert_eq!(state.data_points, 0.0);
    assert!(state.buildings.is_empty());
    assert!(state.upgrades.is_empty());
    assert!(state.achievements.contains("prod_8"));
    assert_eq!(state.stats.total_data_all_time, 25e9);

    game.dispatch(Command::BuyPrestigeUpgrade {
        upgrade_id: "p_production_1".into(),
    })
    .unwrap();
    assert_eq!(game.state().innovation_points, 2);
}

#[test]
fn export_import_roundtrip_preserves_progress() {
    let mut game = new_game();
    for _ in 0..30 {
        game.dispatch(Command::click()).unwrap();
    }
    game.dispatch(Command::buy_building("intern")).unwrap();
    game.tick(100);
    let Outcome::Exported(data) = game.dispatch(Command::Export).unwrap() else {
        panic!("expected export");
    };
    let original = game.state().clone();

    let mut other = new_game();
    other.dispatch(Command::Import { data }).unwrap();
    assert_eq!(other.state().data_points, original.data_points);
    assert_eq!(other.state().buildings, original.buildings);
    assert_eq!(other.state().achievements, original.achievements);
}

#[test]
fn migration_is_idempotent() {
    let raw = serde_json::json!({ "dataPoints": 12, "buildings": { "laptop": 2 } });
    let once = save::migrate(raw).unwrap();
    assert_eq!(save::migrate(once.clone()).unwrap(), once);
}

#[test]
fn achievement_crosses_threshold_once() {
    let mut state = GameState::new();
    state.stats.total_data_earned = 99.0;
    let mut game = game_with(&state);
    game.drain_unlocked();
    game.dispatch(Command::click()).unwrap();
    assert_eq!(game.drain_unlocked(), vec!["prod_1"]);
    game.dispatch(Command::click()).unwrap();
    assert!(game.drain_unlocked().is_empty());
}

#[test]
fn commands_from_json_script() {
    let mut game = game_with(&with_data(500.0));
    let script = [
        r#"{"type":"SET_BUY_AMOUNT","amount":10}"#,
        r#"{"type":"BUY_BUILDING","buildingId":"intern"}"#,
        r#"{"type":"SET_LANGUAGE","language":"en"}"#,
        r#"{"type":"SAVE"}"#,
    ];
    for line in script {
        game.dispatch(Command::from_json(line).unwrap()).unwrap();
    }
    assert_eq!(game.state().owned("intern"), 10);
    assert_eq!(game.state().settings.language, "en");
    assert_eq!(game.state().settings.buy_amount, BuyAmount::Ten);
}

#[test]
fn file_backed_session_with_offline_progress() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let storage = Rc::new(FileStorage::new(dir.path()));
    let clock = ManualClock::new(NOW);

    let mut game = Game::new(Catalog::standard(), EngineConfig::default(), storage.clone(), &clock).unwrap();
    assert!(game.start().is_none());
    let mut seeded = with_data(200.0);
    seeded.buildings.insert("laptop".into(), 5); // 20 DPS
    game.dispatch(Command::Import {
        data: save::encode_export(&seeded).unwrap(),
    })
    .unwrap();
    drop(game);

    // Away for a whole day: only the cap is credited.
    clock.advance_secs(24.0 * 3600.0);
    let mut game = Game::new(Catalog::standard(), EngineConfig::default(), storage.clone(), &clock).unwrap();
    let report = game.start().unwrap();
    let cap = EngineConfig::default().offline_cap_seconds;
    assert_eq!(report.credited_seconds, cap);
    assert!((game.state().data_points - (200.0 + 20.0 * cap)).abs() < 1e-6);
    drop(game);

    // A corrupt file falls back to a fresh game.
    std::fs::write(dir.path().join("summan_clicker_save.json"), "{oops").unwrap();
    let mut game = Game::new(Catalog::standard(), EngineConfig::default(), storage, &clock).unwrap();
    assert!(game.start().is_none());
    assert_eq!(game.state().data_points, 0.0);
}
