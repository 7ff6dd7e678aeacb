mod buffs;
mod coins;
mod data;
mod decorations;
mod economy;
mod grid;
mod input;
mod player;
mod research;
mod save;
mod shared;
mod trees;
mod ui;
mod workshop;
mod world;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Tinselworks".into(),
                        resolution: WindowResolution::new(WORLD_WIDTH, WORLD_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<Settings>()
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
        .init_resource::<DecorationRegistry>()
        // Events
        .add_event::<RepairBuildingEvent>()
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
        .add_event::<PlaySfxEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(grid::GridPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(research::ResearchPlugin)
        .add_plugins(buffs::BuffPlugin)
        .add_plugins(workshop::WorkshopPlugin)
        .add_plugins(trees::TreesPlugin)
        .add_plugins(coins::CoinsPlugin)
        .add_plugins(decorations::DecorationsPlugin)
        .add_plugins(ui::UiPlugin)
        .add_plugins(save::SavePlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        .run();
}
