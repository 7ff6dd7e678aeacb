use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, reset_and_read_input);
    }
}

/// The single point where hardware input becomes game actions. Everything
/// downstream reads `PlayerInput`; no other system touches the keyboard or
/// mouse directly.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    state: Res<State<GameState>>,
    window: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    if *state.get() == GameState::Loading {
        return;
    }

    // ── Movement axis (WASD + arrows) ──────────────────────────────────
    // Axis is in game coordinates: y grows downward, so W/Up is −y.
    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    input.move_axis = axis;

    // ── Action keys ────────────────────────────────────────────────────
    input.interact = keys.just_pressed(KeyCode::KeyE) || keys.just_pressed(KeyCode::Space);
    input.open_research = keys.just_pressed(KeyCode::KeyR);
    input.open_cookie_shop = keys.just_pressed(KeyCode::KeyC);
    input.close_panel = keys.just_pressed(KeyCode::Escape);
    input.next_category = keys.just_pressed(KeyCode::Tab);

    input.place_building = keys.just_pressed(KeyCode::KeyB);
    input.place_tree = keys.just_pressed(KeyCode::KeyT);
    input.place_decoration = keys.just_pressed(KeyCode::KeyG);

    input.quicksave = keys.just_pressed(KeyCode::F5);
    input.reset_game = keys.just_pressed(KeyCode::F10);

    for (i, key) in [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ]
    .iter()
    .enumerate()
    {
        if keys.just_pressed(*key) {
            input.digit = Some(i as u8 + 1);
            break;
        }
    }

    // ── Pointer ────────────────────────────────────────────────────────
    input.pointer_pressed = mouse.just_pressed(MouseButton::Left);
    input.pointer_down = mouse.pressed(MouseButton::Left);
    input.pointer_released = mouse.just_released(MouseButton::Left);
    input.cursor_world = cursor_game_position(&window, &camera);
}

/// Cursor position in game coordinates, when the cursor is over the window
/// and a camera exists to unproject through.
fn cursor_game_position(
    window: &Query<&Window, With<PrimaryWindow>>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let window = window.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = camera.get_single().ok()?;
    let world = camera.viewport_to_world_2d(camera_transform, cursor).ok()?;
    Some(from_render(world))
}
