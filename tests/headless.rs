//! Headless integration tests for Tinselworks.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI), and verify that the
//! core game loops work correctly.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use tinselworks::buffs::{handle_consume_cookie, tick_buff_durations};
use tinselworks::data;
use tinselworks::data::DataPlugin;
use tinselworks::economy::income::{credit_offline_income, tick_income, IncomeTick};
use tinselworks::grid::{GridPlugin, WorkshopGrid};
use tinselworks::research::{handle_purchase_research, production_speed_multiplier};
use tinselworks::save::SavePlugin;
use tinselworks::shared::*;
use tinselworks::trees::{handle_plant_tree, handle_shake_tree};
use tinselworks::workshop::{
    handle_purchase_building_spot, handle_repair_building, handle_upgrade_building,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or asset loading. Systems must be added
/// per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // Tests drive the clock with TimeUpdateStrategy::ManualDuration; lift
    // the virtual clock's max_delta clamp so those deltas arrive intact.
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .set_max_delta(Duration::MAX);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<Settings>()
        .init_resource::<PlayerInput>()
        .init_resource::<EconomyLedger>()
        .init_resource::<WorkshopState>()
        .init_resource::<ResearchState>()
        .init_resource::<ActiveBuffs>()
        .init_resource::<DecorationState>()
        .init_resource::<CoinSpawnQueue>()
        .init_resource::<BuildingRegistry>()
        .init_resource::<ResearchRegistry>()
        .init_resource::<CookieRegistry>()
        .init_resource::<DecorationRegistry>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<RepairBuildingEvent>()
        .add_event::<UpgradeBuildingEvent>()
        .add_event::<PlantTreeEvent>()
        .add_event::<ShakeTreeEvent>()
        .add_event::<PurchaseResearchEvent>()
        .add_event::<ConsumeCookieEvent>()
        .add_event::<PurchaseBuildingSpotEvent>()
        .add_event::<PurchaseTreeSpotEvent>()
        .add_event::<PlaceDecorationEvent>()
        .add_event::<RemoveDecorationEvent>()
        .add_event::<DragStartEvent>()
        .add_event::<DragMoveEvent>()
        .add_event::<DragEndEvent>()
        .add_event::<SaveRequestEvent>()
        .add_event::<SaveCompleteEvent>()
        .add_event::<ResetGameEvent>()
        .add_event::<OfflineIncomeEvent>()
        .add_event::<SpawnCoinEvent>()
        .add_event::<ToastEvent>()
        .add_event::<FloatingTextEvent>()
        .add_event::<PlaySfxEvent>();

    app
}

/// Fills the catalogs and seeds fresh session state the way the data layer
/// does, without routing through the Loading state.
fn seed_game_data(app: &mut App) {
    let world = app.world_mut();
    data::buildings::populate_buildings(&mut world.resource_mut::<BuildingRegistry>());
    data::research::populate_research(&mut world.resource_mut::<ResearchRegistry>());
    data::cookies::populate_cookies(&mut world.resource_mut::<CookieRegistry>());
    data::decorations::populate_decorations(&mut world.resource_mut::<DecorationRegistry>());

    let fresh_research = {
        let registry = world.resource::<ResearchRegistry>();
        data::fresh_research_state(registry)
    };
    *world.resource_mut::<ResearchState>() = fresh_research;
    *world.resource_mut::<WorkshopState>() = data::fresh_workshop_state();
}

/// Transitions the test app to Playing state and ticks once to process it.
fn enter_playing_state(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update(); // process state transition
}

fn set_coins(app: &mut App, coins: u64) {
    app.world_mut().resource_mut::<EconomyLedger>().coins = coins;
}

fn coins(app: &App) -> u64 {
    app.world().resource::<EconomyLedger>().coins
}

#[test]
fn test_headless_boot_smoke_transitions_and_ticks() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);

    // First update enters Loading and populates registries; second applies NextState.
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::Playing,
        "Expected to reach Playing after loading data"
    );

    assert_eq!(app.world().resource::<BuildingRegistry>().defs.len(), 10);
    assert_eq!(app.world().resource::<ResearchRegistry>().defs.len(), 10);
    assert_eq!(app.world().resource::<CookieRegistry>().cookies.len(), 5);
    assert_eq!(app.world().resource::<DecorationRegistry>().defs.len(), 6);

    let workshop = app.world().resource::<WorkshopState>();
    assert_eq!(workshop.buildings.len(), 11, "Seeded building slots");
    assert_eq!(workshop.trees.len(), 6, "Seeded tree slots");
    assert_eq!(coins(&app), STARTING_COINS);

    // Smoke: run a small frame budget in Playing without panic.
    for _ in 0..120 {
        app.update();
    }

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::Playing,
        "State should remain Playing after smoke ticks"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: Research purchases (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_research_purchases_escalate_cost_and_level() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    set_coins(&mut app, 1_000);

    app.add_systems(
        Update,
        handle_purchase_research
            .run_if(in_state(GameState::Playing).or(in_state(GameState::Research))),
    );

    enter_playing_state(&mut app);

    // The handler also runs while the research panel is open.
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Research);
    app.update();

    // Three purchases of the same upgrade in one frame.
    for _ in 0..3 {
        app.world_mut().send_event(PurchaseResearchEvent {
            upgrade_id: "prod_speed".to_string(),
        });
    }
    app.update();

    let research = app.world().resource::<ResearchState>();
    assert_eq!(research.level("prod_speed"), 3, "Three purchases = level 3");
    assert_eq!(
        research.cost("prod_speed"),
        Some(337),
        "Cost ladder: 100 -> 150 -> 225 -> 337"
    );
    // Paid 100 + 150 + 225 = 475.
    assert_eq!(coins(&app), 525);

    let registry = app.world().resource::<ResearchRegistry>();
    let research = app.world().resource::<ResearchState>();
    assert!(
        (production_speed_multiplier(research, registry) - 1.15).abs() < 1e-6,
        "Level 3 at 5% per level = ×1.15"
    );
}

#[test]
fn test_research_purchase_rejected_when_broke() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    set_coins(&mut app, 10);

    app.add_systems(
        Update,
        handle_purchase_research.run_if(in_state(GameState::Playing)),
    );

    enter_playing_state(&mut app);

    app.world_mut().send_event(PurchaseResearchEvent {
        upgrade_id: "prod_speed".to_string(),
    });
    app.update();

    let research = app.world().resource::<ResearchState>();
    assert_eq!(research.level("prod_speed"), 0, "Rejected purchase is a no-op");
    assert_eq!(research.cost("prod_speed"), Some(100), "Cost unchanged");
    assert_eq!(coins(&app), 10, "Nothing was charged");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: Cookie buffs replace, never stack (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_cookie_buff_of_same_type_replaces() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    set_coins(&mut app, 500);

    app.add_systems(
        Update,
        handle_consume_cookie
            .run_if(in_state(GameState::Playing).or(in_state(GameState::CookieShop))),
    );

    enter_playing_state(&mut app);

    app.world_mut().send_event(ConsumeCookieEvent {
        kind: CookieKind::Basic,
    });
    app.update();

    {
        let buffs = app.world().resource::<ActiveBuffs>();
        assert_eq!(buffs.multiplier(BuffType::Production), 1.25);
        assert_eq!(buffs.remaining(BuffType::Production), Some(60.0));
    }

    // A stronger production cookie replaces the running one outright.
    app.world_mut().send_event(ConsumeCookieEvent {
        kind: CookieKind::Gingerbread,
    });
    app.update();

    let buffs = app.world().resource::<ActiveBuffs>();
    assert_eq!(buffs.buffs.len(), 1, "Same type replaces, never stacks");
    assert_eq!(buffs.multiplier(BuffType::Production), 2.0);
    assert_eq!(buffs.remaining(BuffType::Production), Some(45.0));
    // 500 − 50 − 250.
    assert_eq!(coins(&app), 200);
}

#[test]
fn test_cookie_rejected_when_broke() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    set_coins(&mut app, 10);

    app.add_systems(
        Update,
        handle_consume_cookie.run_if(in_state(GameState::Playing)),
    );

    enter_playing_state(&mut app);

    app.world_mut().send_event(ConsumeCookieEvent {
        kind: CookieKind::Basic,
    });
    app.update();

    assert!(app.world().resource::<ActiveBuffs>().buffs.is_empty());
    assert_eq!(coins(&app), 10);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Building repair then upgrade (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_repair_then_upgrade_building() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    set_coins(&mut app, 1_000);

    app.add_systems(
        Update,
        (handle_repair_building, handle_upgrade_building)
            .chain()
            .run_if(in_state(GameState::Playing)),
    );

    enter_playing_state(&mut app);

    // Repair the starter toy maker: floor(100 × 1.15) = 115.
    app.world_mut().send_event(RepairBuildingEvent {
        spot_id: "toy_1".to_string(),
    });
    app.update();

    {
        let workshop = app.world().resource::<WorkshopState>();
        let spot = workshop.building("toy_1").unwrap();
        assert!(spot.is_active(), "Repaired slot should be active");
        assert_eq!(spot.level, 1);
    }
    assert_eq!(coins(&app), 885);

    // Upgrade it: floor(100 × 2.2) = 220 with no research discount.
    app.world_mut().send_event(UpgradeBuildingEvent {
        spot_id: "toy_1".to_string(),
    });
    app.update();

    let workshop = app.world().resource::<WorkshopState>();
    assert_eq!(workshop.building("toy_1").unwrap().level, 2);
    assert_eq!(coins(&app), 665);
}

#[test]
fn test_repair_rejected_when_broke_leaves_slot_broken() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    set_coins(&mut app, 10);

    app.add_systems(
        Update,
        handle_repair_building.run_if(in_state(GameState::Playing)),
    );

    enter_playing_state(&mut app);

    app.world_mut().send_event(RepairBuildingEvent {
        spot_id: "toy_1".to_string(),
    });
    app.update();

    let workshop = app.world().resource::<WorkshopState>();
    assert!(
        !workshop.building("toy_1").unwrap().is_active(),
        "Unaffordable repair must leave the slot broken"
    );
    assert_eq!(coins(&app), 10);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Purchasing a new building spot (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_purchase_building_spot_places_near_player() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    set_coins(&mut app, 150);
    app.add_plugins(GridPlugin);

    app.add_systems(
        Update,
        handle_purchase_building_spot.run_if(in_state(GameState::Playing)),
    );

    // Player stands in the open north-west corner, clear of the seeded
    // layout.
    app.world_mut()
        .spawn((Player, WorldPos::new(Vec2::new(120.0, 120.0), 10.0)));

    enter_playing_state(&mut app);

    app.world_mut().send_event(PurchaseBuildingSpotEvent {
        kind: BuildingKind::ToyMaker,
    });
    app.update();

    let spot_pos = {
        let workshop = app.world().resource::<WorkshopState>();
        assert_eq!(workshop.buildings.len(), 12, "One new slot purchased");
        let spot = workshop.building("toy_maker_p1").expect("purchased slot");
        assert!(spot.is_active(), "Purchased slots start working");
        assert_eq!(spot.level, 1);
        spot.pos()
    };
    assert_eq!(coins(&app), 50, "Toy Maker costs 100");

    // The spot sits on a cell center the grid now considers occupied.
    let grid = app.world().resource::<WorkshopGrid>();
    let cell = grid.world_to_cell(spot_pos);
    assert_eq!(grid.occupant(cell), Some("toy_maker_p1"));
    assert_eq!(grid.cell_center(cell), spot_pos);

    // A second purchase without the coins is rejected with no side effects.
    app.world_mut().send_event(PurchaseBuildingSpotEvent {
        kind: BuildingKind::ToyMaker,
    });
    app.update();

    let workshop = app.world().resource::<WorkshopState>();
    assert_eq!(workshop.buildings.len(), 12, "Rejected purchase adds nothing");
    assert_eq!(workshop.next_building_serial, 2, "Serial spent only on success");
    assert_eq!(coins(&app), 50);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Drag relocation protocol (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_drag_relocates_building_to_dropped_cell() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    app.add_plugins(GridPlugin);

    enter_playing_state(&mut app);

    // Lift toy_1 off its seeded cell.
    let origin = {
        let workshop = app.world().resource::<WorkshopState>();
        workshop.building("toy_1").unwrap().pos()
    };
    let origin_cell = app.world().resource::<WorkshopGrid>().world_to_cell(origin);

    app.world_mut().send_event(DragStartEvent {
        spot_id: "toy_1".to_string(),
        pointer: origin,
    });
    app.update();

    assert!(
        app.world().resource::<WorkshopGrid>().is_free(origin_cell),
        "Lift releases the origin cell immediately"
    );

    // Follow the pointer to open ground.
    app.world_mut().send_event(DragMoveEvent {
        pointer: Vec2::new(240.0, 240.0),
    });
    app.update();

    {
        let workshop = app.world().resource::<WorkshopState>();
        assert_eq!(
            workshop.building("toy_1").unwrap().pos(),
            Vec2::new(240.0, 240.0),
            "A lifted spot follows the pointer unsnapped"
        );
    }

    // Drop: snaps to the drop cell's center.
    app.world_mut().send_event(DragEndEvent);
    app.update();

    let landed = {
        let workshop = app.world().resource::<WorkshopState>();
        workshop.building("toy_1").unwrap().pos()
    };
    assert_eq!(landed, Vec2::new(280.0, 280.0), "Snapped to cell (3,3) center");

    let grid = app.world().resource::<WorkshopGrid>();
    assert_eq!(grid.occupant((3, 3)), Some("toy_1"));
    assert!(grid.is_free(origin_cell), "Old cell stays free after the move");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: Tree planting and shaking (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_plant_tree_pays_and_starts_cooldown() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    set_coins(&mut app, 100);

    app.add_systems(
        Update,
        handle_plant_tree.run_if(in_state(GameState::Playing)),
    );

    enter_playing_state(&mut app);

    app.world_mut().send_event(PlantTreeEvent {
        spot_id: "tree_2".to_string(),
    });
    app.update();

    let workshop = app.world().resource::<WorkshopState>();
    let tree = workshop.tree("tree_2").unwrap();
    assert!(tree.planted, "tree_2 costs 70 and should plant");
    assert!(
        !tree.ready(),
        "A fresh planting starts on full cooldown, no instant payout"
    );
    assert_eq!(coins(&app), 30);
}

#[test]
fn test_shake_schedules_staggered_batch_and_blocks_reshake() {
    let mut app = build_test_app();
    seed_game_data(&mut app);

    app.add_systems(
        Update,
        handle_shake_tree.run_if(in_state(GameState::Playing)),
    );

    enter_playing_state(&mut app);

    // Two shakes in one frame: the first consumes the ready state, the
    // second must see the fresh cooldown and do nothing.
    app.world_mut().send_event(ShakeTreeEvent {
        spot_id: "tree_1".to_string(),
    });
    app.world_mut().send_event(ShakeTreeEvent {
        spot_id: "tree_1".to_string(),
    });
    app.update();

    let queue = app.world().resource::<CoinSpawnQueue>();
    assert_eq!(queue.pending.len(), 2, "Base batch is two coins, shaken once");
    assert!(queue.pending.iter().all(|c| c.value == 1));
    let stagger = queue.pending[1].fire_at - queue.pending[0].fire_at;
    assert!(
        (stagger - COIN_STAGGER_SECS).abs() < 1e-9,
        "Batch coins drop staggered, not all at once"
    );

    let workshop = app.world().resource::<WorkshopState>();
    let tree = workshop.tree("tree_1").unwrap();
    assert!((tree.cooldown_ms - TREE_BASE_COOLDOWN_MS).abs() < 1e-3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Offline income credit (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_offline_income_credits_ledger() {
    let mut app = build_test_app();
    seed_game_data(&mut app);

    app.add_systems(Update, credit_offline_income);

    enter_playing_state(&mut app);

    app.world_mut().send_event(OfflineIncomeEvent {
        amount: 1_200,
        elapsed_secs: 120,
    });
    app.update();

    let ledger = app.world().resource::<EconomyLedger>();
    assert_eq!(ledger.coins, STARTING_COINS + 1_200);
    assert_eq!(ledger.total_earned, 1_200, "Offline earnings count as earned");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: Full game reset (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_reset_rewinds_to_fresh_workshop() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);
    app.add_plugins(SavePlugin);

    // Boot: Loading populates, then Playing.
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );

    // Play a while.
    set_coins(&mut app, 9_999);
    {
        let mut workshop = app.world_mut().resource_mut::<WorkshopState>();
        workshop.building_mut("toy_1").unwrap().state = BuildingState::Active;
    }
    {
        let mut research = app.world_mut().resource_mut::<ResearchState>();
        research.upgrades.get_mut("prod_speed").unwrap().level = 5;
    }

    // Reset routes back through Loading so the data layer reseeds.
    app.world_mut().send_event(ResetGameEvent);
    app.update(); // handle_reset fires, NextState = Loading
    app.update(); // OnEnter(Loading) reseeds, NextState = Playing
    app.update(); // back in Playing

    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
    assert_eq!(coins(&app), STARTING_COINS, "Ledger rewound to a fresh game");

    let workshop = app.world().resource::<WorkshopState>();
    assert!(
        !workshop.building("toy_1").unwrap().is_active(),
        "Slots are broken again"
    );
    assert_eq!(workshop.buildings.len(), 11);
    assert!(workshop.trees[0].planted, "Starter tree comes back pre-planted");

    let research = app.world().resource::<ResearchState>();
    assert_eq!(research.level("prod_speed"), 0, "Research progress wiped");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 9: Passive income over time (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_income_tick_credits_once_per_second() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    app.init_resource::<IncomeTick>();
    {
        let mut workshop = app.world_mut().resource_mut::<WorkshopState>();
        workshop.building_mut("toy_1").unwrap().state = BuildingState::Active;
    }

    enter_playing_state(&mut app);

    // Register the tick after the transition frame so the clock below
    // governs every tick the timer ever sees.
    app.add_systems(Update, tick_income.run_if(in_state(GameState::Playing)));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(1)));
    set_coins(&mut app, 0);

    for _ in 0..10 {
        app.update();
    }
    // One active Toy Maker pays 5 per one-second tick.
    assert_eq!(coins(&app), 50, "Ten seconds at +5/s");

    // A long frame hitch still pays for every elapsed second, at once.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(5)));
    app.update();
    assert_eq!(coins(&app), 75, "A 5s frame completes the timer five times");
    assert_eq!(app.world().resource::<EconomyLedger>().total_earned, 75);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 10: Buff countdown and expiry (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_buff_counts_down_and_expires_cleanly() {
    let mut app = build_test_app();
    seed_game_data(&mut app);

    enter_playing_state(&mut app);

    app.add_systems(
        Update,
        tick_buff_durations.run_if(in_state(GameState::Playing)),
    );
    app.world_mut()
        .resource_mut::<ActiveBuffs>()
        .buffs
        .push(ActiveBuff {
            buff_type: BuffType::Production,
            magnitude: 1.25,
            remaining_secs: 2.5,
        });
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(1)));

    app.update();
    let after_one = app
        .world()
        .resource::<ActiveBuffs>()
        .remaining(BuffType::Production)
        .expect("buff still running after 1s");
    assert!((after_one - 1.5).abs() < 1e-3);

    app.update();
    let after_two = app
        .world()
        .resource::<ActiveBuffs>()
        .remaining(BuffType::Production)
        .expect("buff still running after 2s");
    assert!(after_two < after_one, "Remaining time only ever shrinks");
    assert!((after_two - 0.5).abs() < 1e-3);

    // Crossing zero drops the buff that same frame; nothing negative stays.
    app.update();
    let buffs = app.world().resource::<ActiveBuffs>();
    assert!(buffs.buffs.is_empty(), "Expired buff is removed, not kept at negative time");
    assert_eq!(buffs.multiplier(BuffType::Production), 1.0, "Multiplier back to neutral");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 11: Drag survives a panel round-trip (ECS integration test)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_panel_round_trip_mid_drag_keeps_one_cell_per_spot() {
    let mut app = build_test_app();
    seed_game_data(&mut app);
    app.add_plugins(GridPlugin);

    enter_playing_state(&mut app);

    let origin = {
        let workshop = app.world().resource::<WorkshopState>();
        workshop.building("toy_1").unwrap().pos()
    };
    let origin_cell = app.world().resource::<WorkshopGrid>().world_to_cell(origin);

    app.world_mut().send_event(DragStartEvent {
        spot_id: "toy_1".to_string(),
        pointer: origin,
    });
    app.update();
    assert!(app.world().resource::<WorkshopGrid>().is_free(origin_cell));

    // Opening a panel and closing it re-enters Playing, which rebuilds
    // occupancy while the spot is still lifted.
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Research);
    app.update();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();
    assert_eq!(
        app.world().resource::<WorkshopGrid>().occupant(origin_cell),
        Some("toy_1"),
        "Rebuild re-occupies the lifted spot's cell"
    );

    // Dropping in place must settle on that same cell, not sidestep it.
    app.world_mut().send_event(DragEndEvent);
    app.update();

    let grid = app.world().resource::<WorkshopGrid>();
    assert_eq!(grid.occupant(origin_cell), Some("toy_1"));
    let workshop = app.world().resource::<WorkshopState>();
    assert_eq!(
        workshop.building("toy_1").unwrap().pos(),
        grid.cell_center(origin_cell),
        "Drop snaps to the cell the spot already sat on"
    );
    assert_eq!(
        grid.occupied_count(),
        workshop.buildings.len(),
        "Exactly one cell per building spot"
    );
}
