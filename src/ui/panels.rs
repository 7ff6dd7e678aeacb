//! Panel state transitions and the Playing-state placement keys.
//!
//! Digits 1-9 pick a catalog slot; B buys that building kind, T buys a
//! tree, G places the selected decoration at the player's feet. Santa's
//! Office stays unique to its pre-seeded slot and is not purchasable.

use bevy::prelude::*;

use crate::shared::*;

/// Purchasable kinds in digit order. Nine entries, one per digit key.
const PURCHASABLE_KINDS: [BuildingKind; 9] = [
    BuildingKind::ToyMaker,
    BuildingKind::GiftWrapper,
    BuildingKind::CookieFactory,
    BuildingKind::ElfHouse,
    BuildingKind::ReindeerStable,
    BuildingKind::CandyCaneForge,
    BuildingKind::StockingStuffer,
    BuildingKind::SnowglobeFactory,
    BuildingKind::OrnamentWorkshop,
];

/// Which catalog slot the digit keys last selected (1-based).
#[derive(Resource, Debug, Clone)]
pub struct PlacementSelection {
    pub slot: u8,
}

impl Default for PlacementSelection {
    fn default() -> Self {
        Self { slot: 1 }
    }
}

impl PlacementSelection {
    pub fn building_kind(&self) -> Option<BuildingKind> {
        PURCHASABLE_KINDS.get(self.slot as usize - 1).copied()
    }

    pub fn building_def<'a>(&self, registry: &'a BuildingRegistry) -> Option<&'a BuildingDef> {
        self.building_kind().and_then(|kind| registry.get(kind))
    }

    pub fn decoration_def<'a>(&self, registry: &'a DecorationRegistry) -> Option<&'a DecorationDef> {
        registry.defs.get(self.slot as usize - 1)
    }
}

/// R and C open their panels; the input plugin keeps feeding `PlayerInput`
/// in every state, so Esc closing is handled by the panel's own input
/// system.
pub fn open_panels(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.open_research {
        next_state.set(GameState::Research);
    } else if input.open_cookie_shop {
        next_state.set(GameState::CookieShop);
    }
}

pub fn handle_placement_keys(
    input: Res<PlayerInput>,
    mut selection: ResMut<PlacementSelection>,
    buildings: Res<BuildingRegistry>,
    decorations: Res<DecorationRegistry>,
    player: Query<&WorldPos, With<Player>>,
    mut buy_building: EventWriter<PurchaseBuildingSpotEvent>,
    mut buy_tree: EventWriter<PurchaseTreeSpotEvent>,
    mut place_decoration: EventWriter<PlaceDecorationEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if let Some(digit) = input.digit {
        selection.slot = digit;
        let building = selection
            .building_def(&buildings)
            .map(|d| format!("{} ({}c)", d.name, d.base_cost))
            .unwrap_or_else(|| "-".to_string());
        let decoration = selection
            .decoration_def(&decorations)
            .map(|d| format!("{} ({}c)", d.name, d.cost))
            .unwrap_or_else(|| "-".to_string());
        toasts.send(ToastEvent {
            message: format!("Slot {}: B = {} | G = {}", digit, building, decoration),
            duration_secs: 2.0,
        });
    }

    if input.place_building {
        if let Some(kind) = selection.building_kind() {
            buy_building.send(PurchaseBuildingSpotEvent { kind });
        }
    }

    if input.place_tree {
        buy_tree.send(PurchaseTreeSpotEvent);
    }

    if input.place_decoration {
        if let Some(def) = selection.decoration_def(&decorations) {
            let pos = player
                .get_single()
                .map(|p| p.pos)
                .unwrap_or(Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0));
            place_decoration.send(PlaceDecorationEvent {
                def_id: def.id.to_string(),
                pos,
            });
        } else {
            toasts.send(ToastEvent {
                message: format!("No decoration in slot {}", selection.slot),
                duration_secs: 2.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_maps_digits_to_kinds() {
        let selection = PlacementSelection { slot: 1 };
        assert_eq!(selection.building_kind(), Some(BuildingKind::ToyMaker));
        let selection = PlacementSelection { slot: 9 };
        assert_eq!(
            selection.building_kind(),
            Some(BuildingKind::OrnamentWorkshop)
        );
    }

    #[test]
    fn test_santas_office_not_purchasable() {
        assert!(!PURCHASABLE_KINDS.contains(&BuildingKind::SantasOffice));
    }
}
