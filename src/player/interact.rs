use bevy::prelude::*;

use crate::shared::*;

/// How close the avatar must stand to act on a slot.
const INTERACT_RADIUS: f32 = 80.0;

enum Target {
    Tree(String, bool),
    Building(String, BuildingState),
}

/// Turns an interact press into the right intent for the nearest slot:
/// plant an empty tree plot, shake a ready tree, repair a broken building,
/// upgrade an active one. Out of range or on-cooldown presses do nothing.
pub fn dispatch_interaction(
    input: Res<PlayerInput>,
    workshop: Res<WorkshopState>,
    player: Query<&WorldPos, With<Player>>,
    mut plant: EventWriter<PlantTreeEvent>,
    mut shake: EventWriter<ShakeTreeEvent>,
    mut repair: EventWriter<RepairBuildingEvent>,
    mut upgrade: EventWriter<UpgradeBuildingEvent>,
) {
    if !input.interact {
        return;
    }
    let Ok(player_pos) = player.get_single() else {
        return;
    };
    let origin = player_pos.pos;

    let mut nearest: Option<(f32, Target)> = None;
    for tree in &workshop.trees {
        let distance = origin.distance(tree.pos());
        if distance <= INTERACT_RADIUS
            && nearest.as_ref().is_none_or(|(d, _)| distance < *d)
        {
            nearest = Some((distance, Target::Tree(tree.id.clone(), tree.ready())));
        }
    }
    for building in &workshop.buildings {
        let distance = origin.distance(building.pos());
        if distance <= INTERACT_RADIUS
            && nearest.as_ref().is_none_or(|(d, _)| distance < *d)
        {
            nearest = Some((
                distance,
                Target::Building(building.id.clone(), building.state),
            ));
        }
    }

    match nearest {
        Some((_, Target::Tree(spot_id, ready))) => {
            let planted = workshop.tree(&spot_id).map(|t| t.planted).unwrap_or(false);
            if !planted {
                plant.send(PlantTreeEvent { spot_id });
            } else if ready {
                shake.send(ShakeTreeEvent { spot_id });
            }
        }
        Some((_, Target::Building(spot_id, BuildingState::Broken))) => {
            repair.send(RepairBuildingEvent { spot_id });
        }
        Some((_, Target::Building(spot_id, BuildingState::Active))) => {
            upgrade.send(UpgradeBuildingEvent { spot_id });
        }
        None => {}
    }
}
