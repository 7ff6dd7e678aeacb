//! World domain — camera, ground, the grid overlay, and ambience.
//!
//! This is also where game coordinates become render coordinates: every
//! entity carrying a `WorldPos` gets its `Transform` mirrored here, in
//! PostUpdate, after all gameplay writes for the frame are done.

mod snow;

use bevy::prelude::*;

use crate::shared::*;

const Z_GROUND: f32 = 0.0;
const Z_GRID: f32 = 1.0;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_camera, spawn_ground, spawn_grid_overlay));

        app.add_systems(
            Update,
            (snow::spawn_snowflakes, snow::drift_snowflakes, toggle_grid_overlay)
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(PostUpdate, sync_world_positions);
    }
}

fn spawn_camera(mut commands: Commands) {
    // The world fits the window exactly; the camera never moves.
    commands.spawn((Camera2d, Transform::default()));
}

fn spawn_ground(mut commands: Commands) {
    commands.spawn((
        Sprite {
            color: Color::srgb(0.87, 0.91, 0.95),
            custom_size: Some(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, 0.0, Z_GROUND)),
    ));
}

#[derive(Component)]
struct GridOverlayLine;

/// Thin cell-boundary lines, hidden unless `Settings.show_grid` is on.
fn spawn_grid_overlay(mut commands: Commands) {
    let cols = (WORLD_WIDTH / CELL_SIZE).ceil() as i32;
    let rows = (WORLD_HEIGHT / CELL_SIZE).ceil() as i32;
    let color = Color::srgba(0.3, 0.4, 0.6, 0.25);

    for col in 0..=cols {
        let x = col as f32 * CELL_SIZE;
        commands.spawn((
            Sprite {
                color,
                custom_size: Some(Vec2::new(1.0, WORLD_HEIGHT)),
                ..default()
            },
            Transform::from_translation(to_render(
                Vec2::new(x, WORLD_HEIGHT / 2.0),
                Z_GRID,
            )),
            GridOverlayLine,
            Visibility::Hidden,
        ));
    }
    for row in 0..=rows {
        let y = row as f32 * CELL_SIZE;
        commands.spawn((
            Sprite {
                color,
                custom_size: Some(Vec2::new(WORLD_WIDTH, 1.0)),
                ..default()
            },
            Transform::from_translation(to_render(
                Vec2::new(WORLD_WIDTH / 2.0, y),
                Z_GRID,
            )),
            GridOverlayLine,
            Visibility::Hidden,
        ));
    }
}

fn toggle_grid_overlay(
    settings: Res<Settings>,
    mut lines: Query<&mut Visibility, With<GridOverlayLine>>,
) {
    if !settings.is_changed() {
        return;
    }
    let target = if settings.show_grid {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in lines.iter_mut() {
        *visibility = target;
    }
}

/// Mirrors every `WorldPos` into its entity's `Transform`. The single
/// writer of gameplay transforms.
fn sync_world_positions(mut query: Query<(&WorldPos, &mut Transform), Changed<WorldPos>>) {
    for (world_pos, mut transform) in query.iter_mut() {
        transform.translation = to_render(world_pos.pos, world_pos.z);
    }
}
