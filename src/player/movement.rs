use bevy::prelude::*;

use crate::shared::*;

/// Core movement system. Reads the frame's movement axis from PlayerInput,
/// normalises diagonals so they are no faster than cardinals, and clamps
/// the result to the world bounds. Speed on the component is kept current
/// by the buff domain (base × research × speed buff).
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut query: Query<(&mut WorldPos, &PlayerMovement), With<Player>>,
) {
    let Ok((mut world_pos, movement)) = query.get_single_mut() else {
        return;
    };

    let dir = input.move_axis;
    if dir == Vec2::ZERO {
        return;
    }

    let delta = dir.normalize() * movement.speed * time.delta_secs();
    let next = world_pos.pos + delta;
    world_pos.pos = Vec2::new(
        next.x.clamp(0.0, WORLD_WIDTH),
        next.y.clamp(0.0, WORLD_HEIGHT),
    );
}
