use bevy::prelude::*;

use crate::shared::*;

const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 56.0);
const Z_PLAYER: f32 = 10.0;

/// Spawns the avatar at the workshop entrance. Re-entering Playing after a
/// panel close must not duplicate it.
pub fn spawn_player(mut commands: Commands, existing: Query<Entity, With<Player>>) {
    if !existing.is_empty() {
        return;
    }
    let start = Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);
    commands.spawn((
        Sprite {
            color: Color::srgb(0.80, 0.20, 0.25),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(to_render(start, Z_PLAYER)),
        WorldPos::new(start, Z_PLAYER),
        Player,
        PlayerMovement::default(),
    ));
    info!("[Player] Spawned at ({:.0}, {:.0})", start.x, start.y);
}
