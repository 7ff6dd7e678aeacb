//! Workshop domain — building slot lifecycle.
//!
//! Slots start broken and are repaired into producers, upgraded per level,
//! and new slots are purchased at auto-found positions near the player.
//! Every mutation is check-then-spend: validation happens entirely before
//! the ledger debit, so a rejected intent leaves no trace.

use bevy::prelude::*;

use crate::grid::{find_free_position, SpotKind, WorkshopGrid};
use crate::research;
use crate::shared::*;

pub mod sprites;

pub struct WorkshopPlugin;

impl Plugin for WorkshopPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_repair_building,
                handle_upgrade_building,
                handle_purchase_building_spot,
                handle_purchase_tree_spot,
            )
                .run_if(in_state(GameState::Playing)),
        );
        app.add_systems(
            Update,
            (sprites::sync_building_sprites, sprites::sync_tree_sprites)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Stable id stem for purchased slots, e.g. `toy_maker_p3`.
fn kind_stem(kind: BuildingKind) -> &'static str {
    match kind {
        BuildingKind::ToyMaker => "toy_maker",
        BuildingKind::GiftWrapper => "gift_wrapper",
        BuildingKind::CookieFactory => "cookie_factory",
        BuildingKind::ElfHouse => "elf_house",
        BuildingKind::ReindeerStable => "reindeer_stable",
        BuildingKind::CandyCaneForge => "candy_cane_forge",
        BuildingKind::StockingStuffer => "stocking_stuffer",
        BuildingKind::SnowglobeFactory => "snowglobe_factory",
        BuildingKind::OrnamentWorkshop => "ornament_workshop",
        BuildingKind::SantasOffice => "santas_office",
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 1 — handle_repair_building
// ──────────────────────────────────────────────────────────────────────

pub fn handle_repair_building(
    mut events: EventReader<RepairBuildingEvent>,
    registry: Res<BuildingRegistry>,
    mut workshop: ResMut<WorkshopState>,
    mut ledger: ResMut<EconomyLedger>,
    mut toasts: EventWriter<ToastEvent>,
    mut floating: EventWriter<FloatingTextEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        let Some(spot) = workshop.building(&event.spot_id) else {
            warn!("[Workshop] Repair for unknown spot '{}'", event.spot_id);
            continue;
        };
        if spot.is_active() {
            continue;
        }
        let Some(def) = registry.get(spot.kind) else {
            warn!("[Workshop] Spot '{}' has no catalog entry", event.spot_id);
            continue;
        };

        let cost = spot.repair_cost(def);
        let pos = spot.pos();
        let name = def.name;
        if !ledger.spend_coins(cost) {
            floating.send(FloatingTextEvent {
                pos,
                text: format!("Need {} coins!", cost),
                color: Color::srgb(0.9, 0.3, 0.3),
            });
            continue;
        }

        if let Some(spot) = workshop.building_mut(&event.spot_id) {
            spot.state = BuildingState::Active;
        }
        info!("[Workshop] Repaired '{}' for {}", event.spot_id, cost);
        toasts.send(ToastEvent {
            message: format!("{} repaired!", name),
            duration_secs: 2.5,
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "repair".to_string(),
        });
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 2 — handle_upgrade_building
// ──────────────────────────────────────────────────────────────────────

/// Upgrades an active building one level. The catalog cost is discounted by
/// the Cheaper Upgrades research before the affordability check.
pub fn handle_upgrade_building(
    mut events: EventReader<UpgradeBuildingEvent>,
    registry: Res<BuildingRegistry>,
    research_state: Res<ResearchState>,
    research_registry: Res<ResearchRegistry>,
    mut workshop: ResMut<WorkshopState>,
    mut ledger: ResMut<EconomyLedger>,
    mut floating: EventWriter<FloatingTextEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        let Some(spot) = workshop.building(&event.spot_id) else {
            warn!("[Workshop] Upgrade for unknown spot '{}'", event.spot_id);
            continue;
        };
        if !spot.is_active() {
            continue;
        }
        let Some(def) = registry.get(spot.kind) else {
            continue;
        };

        let discount = research::upgrade_cost_multiplier(&research_state, &research_registry);
        let cost = (spot.upgrade_cost(def) as f64 * discount as f64).floor() as u64;
        let pos = spot.pos();
        if !ledger.spend_coins(cost) {
            floating.send(FloatingTextEvent {
                pos,
                text: format!("Need {} coins!", cost),
                color: Color::srgb(0.9, 0.3, 0.3),
            });
            continue;
        }

        let mut new_level = 0;
        if let Some(spot) = workshop.building_mut(&event.spot_id) {
            spot.level += 1;
            new_level = spot.level;
        }
        info!(
            "[Workshop] Upgraded '{}' to level {} for {}",
            event.spot_id, new_level, cost
        );
        floating.send(FloatingTextEvent {
            pos,
            text: format!("Level {}!", new_level),
            color: Color::srgb(0.4, 0.9, 0.4),
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "upgrade".to_string(),
        });
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 3 — handle_purchase_building_spot
// ──────────────────────────────────────────────────────────────────────

/// Buys a brand-new slot of the given kind, auto-placed by the ring search
/// around the player. Placement is resolved BEFORE the spend: if no valid
/// position exists inside the search bound, nothing is charged.
pub fn handle_purchase_building_spot(
    mut events: EventReader<PurchaseBuildingSpotEvent>,
    registry: Res<BuildingRegistry>,
    mut workshop: ResMut<WorkshopState>,
    mut grid: ResMut<WorkshopGrid>,
    mut ledger: ResMut<EconomyLedger>,
    player: Query<&WorldPos, With<Player>>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        let Some(def) = registry.get(event.kind) else {
            warn!("[Workshop] Purchase for unknown kind {:?}", event.kind);
            continue;
        };
        let near = player
            .get_single()
            .map(|p| p.pos)
            .unwrap_or(Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0));

        let Some(pos) = find_free_position(&grid, &workshop, near, SpotKind::Building) else {
            toasts.send(ToastEvent {
                message: "No room for a new building here!".to_string(),
                duration_secs: 2.5,
            });
            continue;
        };

        if !ledger.spend_coins(def.base_cost) {
            toasts.send(ToastEvent {
                message: format!("Need {} coins for a new {}", def.base_cost, def.name),
                duration_secs: 2.5,
            });
            continue;
        }

        let serial = workshop.next_building_serial;
        workshop.next_building_serial += 1;
        let id = format!("{}_p{}", kind_stem(event.kind), serial);
        let order = workshop.buildings.len() as u32 + 1;
        workshop.buildings.push(BuildingSpot {
            id: id.clone(),
            kind: event.kind,
            x: pos.x,
            y: pos.y,
            // A purchased slot is bought working; repair is for the
            // pre-seeded ruins.
            state: BuildingState::Active,
            level: 1,
            unlock_order: order,
        });
        if grid.occupy(pos, &id).is_none() {
            warn!("[Workshop] Grid rejected purchased spot '{}'", id);
        }

        info!(
            "[Workshop] Purchased '{}' at ({:.0}, {:.0}) for {}",
            id, pos.x, pos.y, def.base_cost
        );
        toasts.send(ToastEvent {
            message: format!("New {} built!", def.name),
            duration_secs: 2.5,
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "build".to_string(),
        });
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 4 — handle_purchase_tree_spot
// ──────────────────────────────────────────────────────────────────────

/// Buys a new pre-planted tree slot near the player. Cost doubles off the
/// most expensive existing slot.
pub fn handle_purchase_tree_spot(
    mut events: EventReader<PurchaseTreeSpotEvent>,
    mut workshop: ResMut<WorkshopState>,
    grid: Res<WorkshopGrid>,
    mut ledger: ResMut<EconomyLedger>,
    player: Query<&WorldPos, With<Player>>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for _event in events.read() {
        let near = player
            .get_single()
            .map(|p| p.pos)
            .unwrap_or(Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0));

        let Some(pos) = find_free_position(&grid, &workshop, near, SpotKind::Tree) else {
            toasts.send(ToastEvent {
                message: "No room for a new tree here!".to_string(),
                duration_secs: 2.5,
            });
            continue;
        };

        let cost = workshop.next_tree_cost();
        if !ledger.spend_coins(cost) {
            toasts.send(ToastEvent {
                message: format!("Need {} coins for a new tree", cost),
                duration_secs: 2.5,
            });
            continue;
        }

        let serial = workshop.next_tree_serial;
        workshop.next_tree_serial += 1;
        let id = format!("tree_p{}", serial);
        let order = workshop.trees.len() as u32 + 1;
        workshop.trees.push(TreeSpot {
            id: id.clone(),
            x: pos.x,
            y: pos.y,
            cost,
            planted: true,
            unlock_order: order,
            cooldown_ms: 0.0,
        });

        info!(
            "[Workshop] Purchased tree '{}' at ({:.0}, {:.0}) for {}",
            id, pos.x, pos.y, cost
        );
        toasts.send(ToastEvent {
            message: "A new tree takes root!".to_string(),
            duration_secs: 2.5,
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "plant".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[test]
    fn test_kind_stems_are_unique() {
        let kinds = [
            BuildingKind::ToyMaker,
            BuildingKind::GiftWrapper,
            BuildingKind::CookieFactory,
            BuildingKind::ElfHouse,
            BuildingKind::ReindeerStable,
            BuildingKind::CandyCaneForge,
            BuildingKind::StockingStuffer,
            BuildingKind::SnowglobeFactory,
            BuildingKind::OrnamentWorkshop,
            BuildingKind::SantasOffice,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(kind_stem(*a), kind_stem(*b));
            }
        }
    }

    #[test]
    fn test_next_tree_cost_doubles_off_the_most_expensive() {
        let mut workshop = data::fresh_workshop_state();
        assert_eq!(workshop.next_tree_cost(), 2_400); // 2 × 1200
        workshop.trees.push(TreeSpot {
            id: "tree_p1".into(),
            x: 0.0,
            y: 0.0,
            cost: 2_400,
            planted: true,
            unlock_order: 7,
            cooldown_ms: 0.0,
        });
        assert_eq!(workshop.next_tree_cost(), 4_800);
    }

    #[test]
    fn test_upgrade_cost_discount_applies_before_floor() {
        let mut registry = BuildingRegistry::default();
        data::buildings::populate_buildings(&mut registry);
        let def = registry.get(BuildingKind::ToyMaker).unwrap();
        let spot = BuildingSpot {
            id: "toy_1".into(),
            kind: BuildingKind::ToyMaker,
            x: 0.0,
            y: 0.0,
            state: BuildingState::Active,
            level: 1,
            unlock_order: 1,
        };
        // floor(100 × 2.2) = 220 at no discount.
        assert_eq!(spot.upgrade_cost(def), 220);
        let discounted = (spot.upgrade_cost(def) as f64 * 0.88).floor() as u64;
        assert_eq!(discounted, 193);
    }
}
