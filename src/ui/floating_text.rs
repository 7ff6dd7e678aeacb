//! World-space floating text ("+5", "Need 100 coins!"). Rises and fades,
//! then despawns.

use bevy::prelude::*;

use crate::shared::*;

const FLOAT_DURATION_SECS: f32 = 1.2;
const FLOAT_RISE_SPEED: f32 = 40.0;
const Z_FLOATING_TEXT: f32 = 15.0;

#[derive(Component)]
pub struct FloatingText {
    pub timer: Timer,
}

pub fn handle_floating_text_events(
    mut commands: Commands,
    mut events: EventReader<FloatingTextEvent>,
) {
    for event in events.read() {
        commands.spawn((
            Text2d::new(event.text.clone()),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(event.color),
            Transform::from_translation(to_render(event.pos, Z_FLOATING_TEXT)),
            WorldPos::new(event.pos, Z_FLOATING_TEXT),
            FloatingText {
                timer: Timer::from_seconds(FLOAT_DURATION_SECS, TimerMode::Once),
            },
        ));
    }
}

pub fn update_floating_text(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut FloatingText, &mut WorldPos, &mut TextColor)>,
) {
    for (entity, mut floating, mut world_pos, mut color) in query.iter_mut() {
        floating.timer.tick(time.delta());
        if floating.timer.finished() {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        // Rising means decreasing y in game coordinates.
        world_pos.pos.y -= FLOAT_RISE_SPEED * time.delta_secs();

        let progress = floating.timer.elapsed_secs() / FLOAT_DURATION_SECS;
        let srgba = color.0.to_srgba();
        color.0 = Color::srgba(srgba.red, srgba.green, srgba.blue, 1.0 - progress);
    }
}
