//! Tree domain — planting, shaking, and shake cooldowns.
//!
//! Trees are the active income source. A shake schedules a staggered batch
//! of coin drops through the `CoinSpawnQueue` rather than spawning them
//! directly, so batch pacing survives frame hitches and resets can flush
//! everything in one place.

use bevy::prelude::*;
use rand::Rng;

use crate::research;
use crate::shared::*;

/// Coins scatter within this radius of the trunk.
const SHAKE_SCATTER_RADIUS: f32 = 50.0;

pub struct TreesPlugin;

impl Plugin for TreesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_plant_tree, handle_shake_tree, tick_tree_cooldowns)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 1 — handle_plant_tree
// ──────────────────────────────────────────────────────────────────────

/// Pays a slot's cost and plants it. The new tree starts on a full
/// cooldown so planting is not an instant payout.
pub fn handle_plant_tree(
    mut events: EventReader<PlantTreeEvent>,
    mut workshop: ResMut<WorkshopState>,
    mut ledger: ResMut<EconomyLedger>,
    research_state: Res<ResearchState>,
    research_registry: Res<ResearchRegistry>,
    mut floating: EventWriter<FloatingTextEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        let Some(tree) = workshop.tree(&event.spot_id) else {
            warn!("[Trees] Plant for unknown spot '{}'", event.spot_id);
            continue;
        };
        if tree.planted {
            continue;
        }
        let cost = tree.cost;
        let pos = tree.pos();
        if !ledger.spend_coins(cost) {
            floating.send(FloatingTextEvent {
                pos,
                text: format!("Need {} coins!", cost),
                color: Color::srgb(0.9, 0.3, 0.3),
            });
            continue;
        }

        let cooldown = shake_cooldown_ms(&research_state, &research_registry);
        if let Some(tree) = workshop.tree_mut(&event.spot_id) {
            tree.planted = true;
            tree.cooldown_ms = cooldown;
        }
        info!("[Trees] Planted '{}' for {}", event.spot_id, cost);
        sfx.send(PlaySfxEvent {
            sfx_id: "plant".to_string(),
        });
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 2 — handle_shake_tree
// ──────────────────────────────────────────────────────────────────────

/// Shakes a ready tree: schedules the coin batch (staggered, scattered
/// around the trunk) and restarts the cooldown.
pub fn handle_shake_tree(
    mut events: EventReader<ShakeTreeEvent>,
    time: Res<Time>,
    mut workshop: ResMut<WorkshopState>,
    research_state: Res<ResearchState>,
    research_registry: Res<ResearchRegistry>,
    mut queue: ResMut<CoinSpawnQueue>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        let Some(tree) = workshop.tree(&event.spot_id) else {
            warn!("[Trees] Shake for unknown spot '{}'", event.spot_id);
            continue;
        };
        if !tree.ready() {
            continue;
        }
        let origin = tree.pos();

        let effects = research::tree_effects(&research_state, &research_registry);
        let batch = shake_batch(&effects);
        let value = shake_coin_value(&effects);
        let now = time.elapsed_secs_f64();

        let mut rng = rand::thread_rng();
        for i in 0..batch {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let radius = rng.gen_range(15.0..SHAKE_SCATTER_RADIUS);
            let pos = origin + Vec2::from_angle(angle) * radius;
            queue.pending.push(PendingCoin {
                fire_at: now + i as f64 * COIN_STAGGER_SECS,
                pos,
                value,
            });
        }

        if let Some(tree) = workshop.tree_mut(&event.spot_id) {
            tree.cooldown_ms = shake_cooldown_ms(&research_state, &research_registry);
        }
        info!(
            "[Trees] Shook '{}': {} coins of {} scheduled",
            event.spot_id, batch, value
        );
        sfx.send(PlaySfxEvent {
            sfx_id: "shake".to_string(),
        });
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 3 — tick_tree_cooldowns
// ──────────────────────────────────────────────────────────────────────

pub fn tick_tree_cooldowns(time: Res<Time>, mut workshop: ResMut<WorkshopState>) {
    let delta_ms = time.delta_secs() * 1000.0;
    for tree in workshop.trees.iter_mut() {
        if tree.planted && tree.cooldown_ms > 0.0 {
            tree.cooldown_ms = (tree.cooldown_ms - delta_ms).max(0.0);
        }
    }
}

// ──────────────────────────────────────────────────────────────────────
// SHAKE PARAMETER DERIVATIONS
// ──────────────────────────────────────────────────────────────────────

pub fn shake_cooldown_ms(research_state: &ResearchState, registry: &ResearchRegistry) -> f32 {
    let effects = research::tree_effects(research_state, registry);
    (TREE_BASE_COOLDOWN_MS * effects.cooldown_multiplier).max(TREE_MIN_COOLDOWN_MS)
}

/// Coins per shake: floor(base × batch multiplier), never below one.
pub fn shake_batch(effects: &TreeEffects) -> u32 {
    ((TREE_BASE_BATCH as f32 * effects.batch_multiplier).floor() as u32).max(1)
}

/// Value per coin: floor(base × value multiplier), never below one.
pub fn shake_coin_value(effects: &TreeEffects) -> u64 {
    ((TREE_BASE_COIN_VALUE as f64 * effects.coin_value_multiplier as f64).floor() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    fn research_at(levels: &[(&str, u32)]) -> (ResearchState, ResearchRegistry) {
        let mut registry = ResearchRegistry::default();
        data::research::populate_research(&mut registry);
        let mut state = data::fresh_research_state(&registry);
        for (id, level) in levels {
            state.upgrades.get_mut(*id).unwrap().level = *level;
        }
        (state, registry)
    }

    #[test]
    fn test_shake_baselines() {
        let (state, registry) = research_at(&[]);
        let effects = research::tree_effects(&state, &registry);
        assert_eq!(shake_batch(&effects), 2);
        assert_eq!(shake_coin_value(&effects), 1);
        assert_eq!(shake_cooldown_ms(&state, &registry), 2000.0);
    }

    #[test]
    fn test_batch_grows_by_whole_coins() {
        // ×1.15 per level: floor(2 × 1.30) = 2, floor(2 × 1.60) = 3.
        let (state, registry) = research_at(&[("tree_batch", 2)]);
        let effects = research::tree_effects(&state, &registry);
        assert_eq!(shake_batch(&effects), 2);

        let (state, registry) = research_at(&[("tree_batch", 4)]);
        let effects = research::tree_effects(&state, &registry);
        assert_eq!(shake_batch(&effects), 3);
    }

    #[test]
    fn test_cooldown_floor_holds_at_max_level() {
        // 2000 × (1 − 10 × 0.06) = 800, above the floor.
        let (state, registry) = research_at(&[("tree_cooldown", 10)]);
        let cooldown = shake_cooldown_ms(&state, &registry);
        assert!((cooldown - 800.0).abs() < 1e-3);
        assert!(cooldown >= TREE_MIN_COOLDOWN_MS);
    }

    #[test]
    fn test_coin_value_scales() {
        // floor(1 × 3.0) = 3 at level 10 (×0.20 per level).
        let (state, registry) = research_at(&[("tree_value", 10)]);
        let effects = research::tree_effects(&state, &registry);
        assert_eq!(shake_coin_value(&effects), 3);
    }
}
