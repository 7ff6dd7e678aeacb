//! Sprite reconciliation for building and tree slots.
//!
//! The slot records in `WorkshopState` are authoritative; these systems
//! diff the entity set against them every frame. That keeps rendering
//! correct across load, reset, drag relocation, and purchases without any
//! explicit spawn bookkeeping in the intent handlers.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::shared::*;

const BUILDING_SIZE: Vec2 = Vec2::new(64.0, 64.0);
const TREE_SIZE: Vec2 = Vec2::new(48.0, 64.0);

const Z_BUILDING: f32 = 5.0;
const Z_TREE: f32 = 5.0;

fn building_color(kind: BuildingKind, state: BuildingState) -> Color {
    if state == BuildingState::Broken {
        return Color::srgb(0.35, 0.32, 0.30);
    }
    match kind {
        BuildingKind::ToyMaker => Color::srgb(0.85, 0.30, 0.30),
        BuildingKind::GiftWrapper => Color::srgb(0.30, 0.65, 0.35),
        BuildingKind::CookieFactory => Color::srgb(0.80, 0.60, 0.30),
        BuildingKind::ElfHouse => Color::srgb(0.35, 0.75, 0.55),
        BuildingKind::ReindeerStable => Color::srgb(0.60, 0.45, 0.30),
        BuildingKind::CandyCaneForge => Color::srgb(0.90, 0.40, 0.50),
        BuildingKind::StockingStuffer => Color::srgb(0.70, 0.30, 0.60),
        BuildingKind::SnowglobeFactory => Color::srgb(0.55, 0.75, 0.90),
        BuildingKind::OrnamentWorkshop => Color::srgb(0.75, 0.65, 0.25),
        BuildingKind::SantasOffice => Color::srgb(0.90, 0.15, 0.20),
    }
}

pub fn sync_building_sprites(
    mut commands: Commands,
    workshop: Res<WorkshopState>,
    mut query: Query<(Entity, &BuildingSprite, &mut Sprite, &mut WorldPos)>,
) {
    let mut seen: HashSet<&str> = HashSet::new();

    for (entity, marker, mut sprite, mut world_pos) in query.iter_mut() {
        match workshop.building(&marker.spot_id) {
            Some(spot) => {
                seen.insert(marker.spot_id.as_str());
                let color = building_color(spot.kind, spot.state);
                if sprite.color != color {
                    sprite.color = color;
                }
                let pos = spot.pos();
                if world_pos.pos != pos {
                    world_pos.pos = pos;
                }
            }
            // Slot disappeared (reset wiped the state): drop the sprite.
            None => commands.entity(entity).despawn_recursive(),
        }
    }

    for spot in &workshop.buildings {
        if seen.contains(spot.id.as_str()) {
            continue;
        }
        commands.spawn((
            Sprite {
                color: building_color(spot.kind, spot.state),
                custom_size: Some(BUILDING_SIZE),
                ..default()
            },
            Transform::from_translation(to_render(spot.pos(), Z_BUILDING)),
            WorldPos::new(spot.pos(), Z_BUILDING),
            BuildingSprite {
                spot_id: spot.id.clone(),
            },
        ));
    }
}

pub fn sync_tree_sprites(
    mut commands: Commands,
    workshop: Res<WorkshopState>,
    mut query: Query<(Entity, &TreeSprite, &mut Sprite, &mut WorldPos)>,
) {
    let mut seen: HashSet<&str> = HashSet::new();

    for (entity, marker, mut sprite, mut world_pos) in query.iter_mut() {
        match workshop.tree(&marker.spot_id) {
            Some(tree) => {
                seen.insert(marker.spot_id.as_str());
                let color = tree_color(tree);
                if sprite.color != color {
                    sprite.color = color;
                }
                let pos = tree.pos();
                if world_pos.pos != pos {
                    world_pos.pos = pos;
                }
            }
            None => commands.entity(entity).despawn_recursive(),
        }
    }

    for tree in &workshop.trees {
        if seen.contains(tree.id.as_str()) {
            continue;
        }
        commands.spawn((
            Sprite {
                color: tree_color(tree),
                custom_size: Some(TREE_SIZE),
                ..default()
            },
            Transform::from_translation(to_render(tree.pos(), Z_TREE)),
            WorldPos::new(tree.pos(), Z_TREE),
            TreeSprite {
                spot_id: tree.id.clone(),
            },
        ));
    }
}

fn tree_color(tree: &TreeSpot) -> Color {
    if !tree.planted {
        // Empty plot: a patch of bare soil.
        Color::srgb(0.45, 0.35, 0.25)
    } else if tree.ready() {
        Color::srgb(0.15, 0.55, 0.25)
    } else {
        // Dimmed while the shake cooldown runs.
        Color::srgb(0.20, 0.40, 0.25)
    }
}
