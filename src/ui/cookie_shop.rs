//! The cookie shop panel. Digits 1-5 buy and eat a cookie, Esc closes.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct CookieShopRoot;

#[derive(Component)]
pub struct CookieListText;

pub fn spawn_panel(mut commands: Commands) {
    commands
        .spawn((
            CookieShopRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(50.0),
                top: Val::Px(80.0),
                width: Val::Px(480.0),
                margin: UiRect {
                    left: Val::Px(-240.0),
                    ..default()
                },
                padding: UiRect::all(Val::Px(16.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.12, 0.07, 0.05, 0.95)),
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Cookie Shop  (1-5: buy & eat, Esc: close)"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.8)),
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.8)),
                CookieListText,
            ));
        });
}

pub fn despawn_panel(mut commands: Commands, query: Query<Entity, With<CookieShopRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn panel_input(
    input: Res<PlayerInput>,
    registry: Res<CookieRegistry>,
    mut purchases: EventWriter<ConsumeCookieEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.close_panel || input.open_cookie_shop {
        next_state.set(GameState::Playing);
        return;
    }
    if let Some(digit) = input.digit {
        if let Some(def) = registry.cookies.get(digit as usize - 1) {
            purchases.send(ConsumeCookieEvent { kind: def.kind });
        }
    }
}

pub fn refresh_panel(
    registry: Res<CookieRegistry>,
    buffs: Res<ActiveBuffs>,
    ledger: Res<EconomyLedger>,
    mut query: Query<&mut Text, With<CookieListText>>,
) {
    let Ok(mut text) = query.get_single_mut() else {
        return;
    };
    let mut lines = vec![format!("Coins: {}", ledger.coins)];
    for (i, def) in registry.cookies.iter().enumerate() {
        let active = buffs
            .remaining(def.buff_type)
            .map(|secs| format!("  [active {:.0}s]", secs))
            .unwrap_or_default();
        lines.push(format!(
            "{}. {} — {}c — {}{}",
            i + 1,
            def.name,
            def.cost,
            def.description,
            active
        ));
    }
    **text = lines.join("\n");
}
