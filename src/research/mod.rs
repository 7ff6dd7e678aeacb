//! Research domain — permanent upgrades purchased with coins.
//!
//! Every upgrade has a level and a next-purchase cost that grows ×1.5 per
//! level bought. Levels never decay and are never refunded. The derivation
//! helpers below are the only place effect math lives; the income pipeline,
//! tree system, player movement, and coin pickup all call into here.

use bevy::prelude::*;

use crate::shared::*;

pub struct ResearchPlugin;

impl Plugin for ResearchPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            handle_purchase_research
                .run_if(in_state(GameState::Playing).or(in_state(GameState::Research))),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EFFECT DERIVATIONS — pure functions over ResearchState
// ═══════════════════════════════════════════════════════════════════════

fn level_of(research: &ResearchState, registry: &ResearchRegistry, id: &str) -> u32 {
    let level = research.level(id);
    match registry.get(id) {
        Some(def) => level.min(def.max_level),
        None => 0,
    }
}

fn effect_per_level(registry: &ResearchRegistry, id: &str) -> f32 {
    registry.get(id).map(|d| d.effect_per_level).unwrap_or(0.0)
}

/// Bonus multiplier: 1 + level × effect. Neutral at level 0.
fn bonus(research: &ResearchState, registry: &ResearchRegistry, id: &str) -> f32 {
    1.0 + level_of(research, registry, id) as f32 * effect_per_level(registry, id)
}

/// Discount multiplier: 1 − level × effect, clamped at 0.
fn discount(research: &ResearchState, registry: &ResearchRegistry, id: &str) -> f32 {
    (1.0 - level_of(research, registry, id) as f32 * effect_per_level(registry, id)).max(0.0)
}

pub fn production_speed_multiplier(research: &ResearchState, registry: &ResearchRegistry) -> f32 {
    bonus(research, registry, "prod_speed")
}

pub fn building_efficiency_multiplier(
    research: &ResearchState,
    registry: &ResearchRegistry,
) -> f32 {
    bonus(research, registry, "building_eff")
}

pub fn upgrade_cost_multiplier(research: &ResearchState, registry: &ResearchRegistry) -> f32 {
    discount(research, registry, "upgrade_cost")
}

pub fn coin_value_multiplier(research: &ResearchState, registry: &ResearchRegistry) -> f32 {
    bonus(research, registry, "coin_value")
}

pub fn player_speed_multiplier(research: &ResearchState, registry: &ResearchRegistry) -> f32 {
    bonus(research, registry, "player_speed")
}

pub fn magnet_level(research: &ResearchState, registry: &ResearchRegistry) -> u32 {
    level_of(research, registry, "magnet")
}

/// Income bonus per active cookie buff: 1 + level × effect × buff_count.
pub fn holiday_synergy_multiplier(
    research: &ResearchState,
    registry: &ResearchRegistry,
    active_buff_count: usize,
) -> f32 {
    1.0 + level_of(research, registry, "holiday_synergy") as f32
        * effect_per_level(registry, "holiday_synergy")
        * active_buff_count as f32
}

/// Tree shake parameters after research, with hard floors so no amount of
/// research zeroes a shake out.
pub fn tree_effects(research: &ResearchState, registry: &ResearchRegistry) -> TreeEffects {
    TreeEffects {
        coin_value_multiplier: bonus(research, registry, "tree_value"),
        cooldown_multiplier: discount(research, registry, "tree_cooldown"),
        batch_multiplier: bonus(research, registry, "tree_batch"),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEM — purchase handler
// ═══════════════════════════════════════════════════════════════════════

/// Validates a research purchase (known id, below max level, affordable),
/// then spends, bumps the level, and grows the next cost ×1.5 floored.
pub fn handle_purchase_research(
    mut events: EventReader<PurchaseResearchEvent>,
    registry: Res<ResearchRegistry>,
    mut research: ResMut<ResearchState>,
    mut ledger: ResMut<EconomyLedger>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        let Some(def) = registry.get(&event.upgrade_id) else {
            warn!("[Research] Unknown upgrade '{}'", event.upgrade_id);
            continue;
        };

        let progress = research
            .upgrades
            .entry(def.id.to_string())
            .or_insert(UpgradeProgress {
                level: 0,
                cost: def.base_cost,
            });

        if progress.level >= def.max_level {
            toasts.send(ToastEvent {
                message: format!("{} is maxed out", def.name),
                duration_secs: 2.0,
            });
            continue;
        }

        let cost = progress.cost;
        if !ledger.spend_coins(cost) {
            toasts.send(ToastEvent {
                message: format!("Need {} coins for {}", cost, def.name),
                duration_secs: 2.0,
            });
            continue;
        }

        progress.level += 1;
        progress.cost = (cost as f64 * 1.5).floor() as u64;

        info!(
            "[Research] '{}' -> level {} (paid {}, next {})",
            def.id, progress.level, cost, progress.cost
        );
        toasts.send(ToastEvent {
            message: format!("{} researched (Lv {})", def.name, progress.level),
            duration_secs: 2.5,
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "research".to_string(),
        });
    }
}
