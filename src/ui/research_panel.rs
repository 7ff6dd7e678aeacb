//! The research panel. Tab cycles categories, digits buy the Nth upgrade
//! of the open category, Esc closes.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct ResearchPanelRoot;

#[derive(Component)]
pub struct ResearchListText;

#[derive(Resource, Debug, Clone, Default)]
pub struct ResearchPanelTab {
    pub category: usize,
}

const CATEGORIES: [ResearchCategory; 3] = [
    ResearchCategory::Tree,
    ResearchCategory::Building,
    ResearchCategory::Universal,
];

fn category_name(category: ResearchCategory) -> &'static str {
    match category {
        ResearchCategory::Tree => "Trees",
        ResearchCategory::Building => "Buildings",
        ResearchCategory::Universal => "Universal",
    }
}

pub fn spawn_panel(mut commands: Commands) {
    commands
        .spawn((
            ResearchPanelRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(50.0),
                top: Val::Px(80.0),
                width: Val::Px(520.0),
                margin: UiRect {
                    left: Val::Px(-260.0),
                    ..default()
                },
                padding: UiRect::all(Val::Px(16.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.06, 0.09, 0.18, 0.95)),
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Research  (Tab: category, 1-9: buy, Esc: close)"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.9, 1.0)),
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.9)),
                ResearchListText,
            ));
        });
}

pub fn despawn_panel(mut commands: Commands, query: Query<Entity, With<ResearchPanelRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn panel_input(
    input: Res<PlayerInput>,
    mut tab: ResMut<ResearchPanelTab>,
    registry: Res<ResearchRegistry>,
    mut purchases: EventWriter<PurchaseResearchEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.close_panel || input.open_research {
        next_state.set(GameState::Playing);
        return;
    }
    if input.next_category {
        tab.category = (tab.category + 1) % CATEGORIES.len();
    }
    if let Some(digit) = input.digit {
        let category = CATEGORIES[tab.category];
        if let Some(def) = registry.by_category(category).nth(digit as usize - 1) {
            purchases.send(PurchaseResearchEvent {
                upgrade_id: def.id.to_string(),
            });
        }
    }
}

pub fn refresh_panel(
    tab: Res<ResearchPanelTab>,
    registry: Res<ResearchRegistry>,
    research: Res<ResearchState>,
    ledger: Res<EconomyLedger>,
    mut query: Query<&mut Text, With<ResearchListText>>,
) {
    let Ok(mut text) = query.get_single_mut() else {
        return;
    };
    let category = CATEGORIES[tab.category];

    let mut lines = vec![format!(
        "── {} ──    (coins: {})",
        category_name(category),
        ledger.coins
    )];
    for (i, def) in registry.by_category(category).enumerate() {
        let level = research.level(def.id);
        let line = if level >= def.max_level {
            format!("{}. {} — MAX ({})", i + 1, def.name, def.description)
        } else {
            let cost = research.cost(def.id).unwrap_or(def.base_cost);
            format!(
                "{}. {} — Lv {}/{} — {}c — {}",
                i + 1,
                def.name,
                level,
                def.max_level,
                cost,
                def.description
            )
        };
        lines.push(line);
    }
    **text = lines.join("\n");
}
