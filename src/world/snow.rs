//! Ambient snowfall. Flakes spawn above the top edge, drift down with a
//! little horizontal sway, and despawn below the bottom edge.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

const MAX_FLAKES: usize = 120;
const Z_SNOW: f32 = 20.0;

#[derive(Component)]
pub struct Snowflake {
    fall_speed: f32,
    sway_phase: f32,
}

pub fn spawn_snowflakes(mut commands: Commands, flakes: Query<(), With<Snowflake>>) {
    let missing = MAX_FLAKES.saturating_sub(flakes.iter().count());
    if missing == 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    // Trickle in a few per frame so a fresh boot doesn't dump a sheet.
    for _ in 0..missing.min(3) {
        let x = rng.gen_range(0.0..WORLD_WIDTH);
        let size = rng.gen_range(2.0..5.0_f32);
        commands.spawn((
            Sprite {
                color: Color::srgba(1.0, 1.0, 1.0, rng.gen_range(0.4..0.9)),
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            Transform::from_translation(to_render(Vec2::new(x, -10.0), Z_SNOW)),
            WorldPos::new(Vec2::new(x, -10.0), Z_SNOW),
            Snowflake {
                fall_speed: rng.gen_range(25.0..70.0),
                sway_phase: rng.gen_range(0.0..std::f32::consts::TAU),
            },
        ));
    }
}

pub fn drift_snowflakes(
    time: Res<Time>,
    mut commands: Commands,
    mut flakes: Query<(Entity, &mut WorldPos, &Snowflake)>,
) {
    let elapsed = time.elapsed_secs();
    let delta = time.delta_secs();
    for (entity, mut world_pos, flake) in flakes.iter_mut() {
        world_pos.pos.y += flake.fall_speed * delta;
        world_pos.pos.x += (elapsed + flake.sway_phase).sin() * 12.0 * delta;
        if world_pos.pos.y > WORLD_HEIGHT + 10.0 {
            commands.entity(entity).despawn_recursive();
        }
    }
}
