//! The always-on HUD: coin balance, income rate, active buffs, key hints.

use bevy::prelude::*;

use crate::economy::income::income_per_tick;
use crate::shared::*;

use super::panels::PlacementSelection;

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct CoinText;

#[derive(Component)]
pub struct IncomeText;

#[derive(Component)]
pub struct BuffText;

#[derive(Component)]
pub struct HintText;

pub fn spawn_hud(mut commands: Commands, existing: Query<(), With<HudRoot>>) {
    if !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            // ── Top bar ────────────────────────────────────────────────
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(8.0)),
                        column_gap: Val::Px(24.0),
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.05, 0.08, 0.15, 0.7)),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Text::new("Coins: 0"),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.95, 0.85, 0.30)),
                        CoinText,
                        PickingBehavior::IGNORE,
                    ));
                    bar.spawn((
                        Text::new("+0/s"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.6, 0.9, 0.6)),
                        IncomeText,
                        PickingBehavior::IGNORE,
                    ));
                    bar.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.7, 0.95)),
                        BuffText,
                        PickingBehavior::IGNORE,
                    ));
                });

            // ── Bottom hint bar ────────────────────────────────────────
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(6.0)),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.05, 0.08, 0.15, 0.7)),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.75, 0.78, 0.85)),
                        HintText,
                        PickingBehavior::IGNORE,
                    ));
                });
        });
    info!("[UI] HUD spawned.");
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn update_hud(
    ledger: Res<EconomyLedger>,
    workshop: Res<WorkshopState>,
    buildings: Res<BuildingRegistry>,
    research_state: Res<ResearchState>,
    research_registry: Res<ResearchRegistry>,
    buffs: Res<ActiveBuffs>,
    decorations: Res<DecorationState>,
    decoration_registry: Res<DecorationRegistry>,
    selection: Res<PlacementSelection>,
    mut texts: ParamSet<(
        Query<&mut Text, With<CoinText>>,
        Query<&mut Text, With<IncomeText>>,
        Query<&mut Text, With<BuffText>>,
        Query<&mut Text, With<HintText>>,
    )>,
) {
    if let Ok(mut text) = texts.p0().get_single_mut() {
        **text = format!("Coins: {}", ledger.coins);
    }

    if let Ok(mut text) = texts.p1().get_single_mut() {
        let rate = income_per_tick(
            &workshop,
            &buildings,
            &research_state,
            &research_registry,
            &buffs,
            &decorations,
            &decoration_registry,
        );
        **text = format!(
            "+{}/s  ({}/{} repaired)",
            rate,
            workshop.repaired_count(),
            workshop.buildings.len()
        );
    }

    if let Ok(mut text) = texts.p2().get_single_mut() {
        let mut parts: Vec<String> = Vec::new();
        for buff in &buffs.buffs {
            let label = match buff.buff_type {
                BuffType::Production => "Production",
                BuffType::Magnet => "Magnet",
                BuffType::Speed => "Speed",
            };
            parts.push(format!("{} {:.0}s", label, buff.remaining_secs.max(0.0)));
        }
        **text = parts.join("  |  ");
    }

    if let Ok(mut text) = texts.p3().get_single_mut() {
        let building = selection.building_def(&buildings);
        let building_hint = match building {
            Some(def) => format!("[B]uild {} ({}c)", def.name, def.base_cost),
            None => "[B]uild".to_string(),
        };
        let deco_hint = match selection.decoration_def(&decoration_registry) {
            Some(def) => format!("[G] {} ({}c)", def.name, def.cost),
            None => "[G] Decorate".to_string(),
        };
        **text = format!(
            "WASD move | E interact | R research | C cookies | 1-9 select | {} | [T]ree ({}c) | {} | F5 save | F10 reset",
            building_hint,
            workshop.next_tree_cost(),
            deco_hint,
        );
    }
}
