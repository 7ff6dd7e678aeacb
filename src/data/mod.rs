//! Data layer — populates all catalogs at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills every registry
//! (BuildingRegistry, ResearchRegistry, CookieRegistry, DecorationRegistry),
//! seeds the workshop layout and research progress, then transitions the
//! game into GameState::Playing.
//!
//! Catalogs are immutable after this point; all runtime state (levels,
//! costs, activation flags) lives in per-instance records that reference a
//! catalog entry by id or kind.

pub mod buildings;
pub mod cookies;
pub mod decorations;
pub mod layout;
pub mod research;

use bevy::prelude::*;

use crate::shared::*;

pub use layout::{initial_building_spots, initial_tree_spots};

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Seeds fresh per-upgrade progress (level 0, catalog base cost) for every
/// catalog entry. Also used when resetting the game.
pub fn fresh_research_state(registry: &ResearchRegistry) -> ResearchState {
    let mut state = ResearchState::default();
    for def in &registry.defs {
        state.upgrades.insert(
            def.id.to_string(),
            UpgradeProgress {
                level: 0,
                cost: def.base_cost,
            },
        );
    }
    state
}

/// Seeds the initial workshop layout: eleven building slots (all broken)
/// and six tree slots (the starter tree pre-planted).
pub fn fresh_workshop_state() -> WorkshopState {
    WorkshopState {
        buildings: initial_building_spots(),
        trees: initial_tree_spots(),
        next_building_serial: 1,
        next_tree_serial: 1,
    }
}

/// Single system that populates every registry and then transitions to
/// Playing. The save plugin restores any existing snapshot on entry.
fn load_all_data(
    mut building_registry: ResMut<BuildingRegistry>,
    mut research_registry: ResMut<ResearchRegistry>,
    mut cookie_registry: ResMut<CookieRegistry>,
    mut decoration_registry: ResMut<DecorationRegistry>,
    mut research_state: ResMut<ResearchState>,
    mut workshop: ResMut<WorkshopState>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating registries…");

    buildings::populate_buildings(&mut building_registry);
    info!("  Building kinds loaded: {}", building_registry.defs.len());

    research::populate_research(&mut research_registry);
    info!("  Research upgrades loaded: {}", research_registry.defs.len());

    cookies::populate_cookies(&mut cookie_registry);
    info!("  Cookies loaded: {}", cookie_registry.cookies.len());

    decorations::populate_decorations(&mut decoration_registry);
    info!("  Decorations loaded: {}", decoration_registry.defs.len());

    *research_state = fresh_research_state(&research_registry);
    *workshop = fresh_workshop_state();
    info!(
        "  Workshop layout seeded: {} building slots, {} tree slots",
        workshop.buildings.len(),
        workshop.trees.len()
    );

    info!("DataPlugin: all registries populated. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}
