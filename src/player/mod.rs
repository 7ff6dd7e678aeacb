//! Player domain — the avatar, its movement, and interaction dispatch.

mod interact;
mod movement;
mod spawn;

use bevy::prelude::*;

use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        app.add_systems(
            Update,
            (movement::player_movement, interact::dispatch_interaction)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
