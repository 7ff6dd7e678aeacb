//! Buff domain — cookie consumption and timed buff lifecycle.
//!
//! At most one buff per BuffType runs at a time. Consuming a cookie whose
//! type is already active replaces the running buff outright, duration and
//! magnitude both. Production and Magnet are passive modifiers read by the
//! income and coin systems; Speed writes the player's movement speed here.

use bevy::prelude::*;

use crate::research;
use crate::shared::*;

pub struct BuffPlugin;

impl Plugin for BuffPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_consume_cookie
                    .run_if(in_state(GameState::Playing).or(in_state(GameState::CookieShop))),
                tick_buff_durations.run_if(in_state(GameState::Playing)),
                apply_speed_buff.run_if(in_state(GameState::Playing)),
            ),
        );
    }
}

fn buff_type_label(buff_type: BuffType) -> &'static str {
    match buff_type {
        BuffType::Production => "Production",
        BuffType::Magnet => "Magnet",
        BuffType::Speed => "Speed",
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 1 — handle_consume_cookie
// ──────────────────────────────────────────────────────────────────────

/// Reads ConsumeCookieEvent. Charges the cookie's cost, then applies its
/// buff, replacing any active buff of the same type so a fresh duration and
/// magnitude always win.
pub fn handle_consume_cookie(
    mut events: EventReader<ConsumeCookieEvent>,
    registry: Res<CookieRegistry>,
    mut ledger: ResMut<EconomyLedger>,
    mut active_buffs: ResMut<ActiveBuffs>,
    mut toasts: EventWriter<ToastEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        let Some(def) = registry.get(event.kind) else {
            warn!("[Buffs] Unknown cookie {:?}", event.kind);
            continue;
        };

        if !ledger.spend_coins(def.cost) {
            toasts.send(ToastEvent {
                message: format!("Need {} coins for {}", def.cost, def.name),
                duration_secs: 2.0,
            });
            continue;
        }

        active_buffs
            .buffs
            .retain(|b| b.buff_type != def.buff_type);
        active_buffs.buffs.push(ActiveBuff {
            buff_type: def.buff_type,
            magnitude: def.magnitude,
            remaining_secs: def.duration_secs,
        });

        info!(
            "[Buffs] Ate {}: {} buff for {:.0}s",
            def.name,
            buff_type_label(def.buff_type),
            def.duration_secs
        );
        toasts.send(ToastEvent {
            message: format!("{}! {} for {:.0}s", def.name, def.description, def.duration_secs),
            duration_secs: 3.0,
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "eat_cookie".to_string(),
        });
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 2 — tick_buff_durations
// ──────────────────────────────────────────────────────────────────────

/// Counts every active buff down in real time and drops the expired ones,
/// with a toast per expiry.
pub fn tick_buff_durations(
    time: Res<Time>,
    mut active_buffs: ResMut<ActiveBuffs>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if active_buffs.buffs.is_empty() {
        return;
    }
    let delta = time.delta_secs();

    let mut expired: Vec<BuffType> = Vec::new();
    for buff in active_buffs.buffs.iter_mut() {
        buff.remaining_secs -= delta;
        if buff.remaining_secs <= 0.0 {
            expired.push(buff.buff_type);
        }
    }
    active_buffs.buffs.retain(|b| b.remaining_secs > 0.0);

    for buff_type in expired {
        let label = buff_type_label(buff_type);
        info!("[Buffs] {} buff expired", label);
        toasts.send(ToastEvent {
            message: format!("Your {} buff wore off.", label),
            duration_secs: 3.0,
        });
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 3 — apply_speed_buff
// ──────────────────────────────────────────────────────────────────────

/// Keeps the player's movement speed equal to base × research × speed buff.
/// Runs every frame so both research purchases and buff expiry are picked
/// up without an explicit notification path.
pub fn apply_speed_buff(
    active_buffs: Res<ActiveBuffs>,
    research_state: Res<ResearchState>,
    research_registry: Res<ResearchRegistry>,
    mut query: Query<&mut PlayerMovement, With<Player>>,
) {
    let research_mult = research::player_speed_multiplier(&research_state, &research_registry);
    let buff_mult = active_buffs.multiplier(BuffType::Speed);
    let desired = BASE_PLAYER_SPEED * research_mult * buff_mult;
    for mut movement in query.iter_mut() {
        if (movement.speed - desired).abs() > 0.01 {
            movement.speed = desired;
        }
    }
}
