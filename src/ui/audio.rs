use bevy::prelude::*;

use crate::shared::*;

/// Maps SFX ids (sent by other domains) to audio file paths.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "coin" => Some("audio/sfx/coin_single.ogg"),
        "shake" => Some("audio/sfx/tree_shake.ogg"),
        "plant" => Some("audio/sfx/plant.ogg"),
        "repair" => Some("audio/sfx/hammer.ogg"),
        "upgrade" | "build" => Some("audio/sfx/construct.ogg"),
        "research" => Some("audio/sfx/chime.ogg"),
        "eat_cookie" => Some("audio/sfx/munch.ogg"),
        "decorate" => Some("audio/sfx/jingle.ogg"),
        "error" => Some("audio/sfx/error.ogg"),
        _ => None,
    }
}

/// Listen for PlaySfxEvent and spawn one-shot audio sources that
/// auto-despawn. Unknown ids are dropped silently.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<Settings>,
) {
    for event in events.read() {
        if settings.master_volume <= 0.0 {
            continue;
        }
        if let Some(path) = sfx_path(&event.sfx_id) {
            commands.spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::DESPAWN
                    .with_volume(bevy::audio::Volume::new(settings.master_volume)),
            ));
        }
    }
}
