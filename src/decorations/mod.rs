//! Decoration domain — cosmetic placements with a passive income bonus.
//!
//! Decorations are free-placed (no grid cell, no buffers) and their catalog
//! bonuses sum into the `1 + total_bonus` factor of the income pipeline.
//! Removal is permanent and unrefunded.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::shared::*;

const DECORATION_SIZE: Vec2 = Vec2::new(32.0, 32.0);
const Z_DECORATION: f32 = 4.0;

pub struct DecorationsPlugin;

impl Plugin for DecorationsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_place_decoration,
                handle_remove_decoration,
                sync_decoration_sprites,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

pub fn handle_place_decoration(
    mut events: EventReader<PlaceDecorationEvent>,
    registry: Res<DecorationRegistry>,
    mut state: ResMut<DecorationState>,
    mut ledger: ResMut<EconomyLedger>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        let Some(def) = registry.get(&event.def_id) else {
            warn!("[Decorations] Unknown decoration '{}'", event.def_id);
            continue;
        };
        if !ledger.spend_coins(def.cost) {
            toasts.send(ToastEvent {
                message: format!("Need {} coins for {}", def.cost, def.name),
                duration_secs: 2.0,
            });
            continue;
        }

        let pos = Vec2::new(
            event.pos.x.clamp(0.0, WORLD_WIDTH),
            event.pos.y.clamp(0.0, WORLD_HEIGHT),
        );
        let serial = state.next_serial;
        state.next_serial += 1;
        state.placed.push(PlacedDecoration {
            serial,
            def_id: def.id.to_string(),
            x: pos.x,
            y: pos.y,
        });

        info!(
            "[Decorations] Placed {} #{} at ({:.0}, {:.0})",
            def.id, serial, pos.x, pos.y
        );
        toasts.send(ToastEvent {
            message: format!("{} placed! {}", def.name, def.description),
            duration_secs: 2.5,
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "decorate".to_string(),
        });
    }
}

pub fn handle_remove_decoration(
    mut events: EventReader<RemoveDecorationEvent>,
    mut state: ResMut<DecorationState>,
) {
    for event in events.read() {
        let before = state.placed.len();
        state.placed.retain(|p| p.serial != event.serial);
        if state.placed.len() == before {
            warn!("[Decorations] Remove for unknown serial {}", event.serial);
        } else {
            info!("[Decorations] Removed decoration #{}", event.serial);
        }
    }
}

fn decoration_color(def_id: &str) -> Color {
    match def_id {
        "lights" => Color::srgb(0.95, 0.90, 0.40),
        "ornament" => Color::srgb(0.85, 0.25, 0.30),
        "candy_cane" => Color::srgb(0.95, 0.55, 0.60),
        "snowman" => Color::srgb(0.92, 0.94, 0.96),
        "wreath" => Color::srgb(0.20, 0.55, 0.25),
        "north_star" => Color::srgb(0.98, 0.92, 0.60),
        _ => Color::srgb(0.7, 0.7, 0.7),
    }
}

/// Same reconciliation shape as the building sprites: the placed list is
/// authoritative, entities follow.
pub fn sync_decoration_sprites(
    mut commands: Commands,
    state: Res<DecorationState>,
    query: Query<(Entity, &DecorationSprite)>,
) {
    let mut seen: HashSet<u32> = HashSet::new();
    let live: HashSet<u32> = state.placed.iter().map(|p| p.serial).collect();

    for (entity, marker) in query.iter() {
        if live.contains(&marker.serial) {
            seen.insert(marker.serial);
        } else {
            commands.entity(entity).despawn_recursive();
        }
    }

    for placed in &state.placed {
        if seen.contains(&placed.serial) {
            continue;
        }
        let pos = Vec2::new(placed.x, placed.y);
        commands.spawn((
            Sprite {
                color: decoration_color(&placed.def_id),
                custom_size: Some(DECORATION_SIZE),
                ..default()
            },
            Transform::from_translation(to_render(pos, Z_DECORATION)),
            WorldPos::new(pos, Z_DECORATION),
            DecorationSprite {
                serial: placed.serial,
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[test]
    fn test_total_bonus_sums_placed_decorations() {
        let mut registry = DecorationRegistry::default();
        data::decorations::populate_decorations(&mut registry);
        let state = DecorationState {
            placed: vec![
                PlacedDecoration {
                    serial: 1,
                    def_id: "lights".into(),
                    x: 0.0,
                    y: 0.0,
                },
                PlacedDecoration {
                    serial: 2,
                    def_id: "snowman".into(),
                    x: 0.0,
                    y: 0.0,
                },
            ],
            next_serial: 3,
        };
        assert!((state.total_bonus(&registry) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_def_contributes_nothing() {
        let mut registry = DecorationRegistry::default();
        data::decorations::populate_decorations(&mut registry);
        let state = DecorationState {
            placed: vec![PlacedDecoration {
                serial: 1,
                def_id: "retired_decoration".into(),
                x: 0.0,
                y: 0.0,
            }],
            next_serial: 2,
        };
        assert_eq!(state.total_bonus(&registry), 0.0);
    }
}
