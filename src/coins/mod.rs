//! Coin domain — physical coin pickups.
//!
//! Coins enter the world through the `CoinSpawnQueue` (tree shakes schedule
//! them with a stagger) or a direct `SpawnCoinEvent`. They live for a fixed
//! lifespan, can be pulled toward the player by magnet research or the
//! magnet cookie, and credit the ledger on pickup after the coin-value
//! research multiplier.

use bevy::prelude::*;

use crate::research;
use crate::shared::*;

/// Passive pull radius per magnet research level.
const MAGNET_RADIUS_PER_LEVEL: f32 = 60.0;
/// Extra pull radius while the magnet cookie buff runs.
const MAGNET_BUFF_RADIUS: f32 = 250.0;
const MAGNET_PULL_SPEED: f32 = 400.0;

const COIN_SIZE: Vec2 = Vec2::new(16.0, 16.0);
const Z_COIN: f32 = 6.0;

pub struct CoinsPlugin;

impl Plugin for CoinsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                drain_spawn_queue,
                spawn_coins,
                magnet_pull,
                pickup_coins,
                tick_coin_lifespans,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 1 — drain_spawn_queue
// ──────────────────────────────────────────────────────────────────────

/// Releases every pending coin whose fire time has passed.
pub fn drain_spawn_queue(
    time: Res<Time>,
    mut queue: ResMut<CoinSpawnQueue>,
    mut spawns: EventWriter<SpawnCoinEvent>,
) {
    if queue.pending.is_empty() {
        return;
    }
    let now = time.elapsed_secs_f64();
    let mut i = 0;
    while i < queue.pending.len() {
        if queue.pending[i].fire_at <= now {
            let coin = queue.pending.swap_remove(i);
            spawns.send(SpawnCoinEvent {
                pos: coin.pos,
                value: coin.value,
            });
        } else {
            i += 1;
        }
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 2 — spawn_coins
// ──────────────────────────────────────────────────────────────────────

pub fn spawn_coins(mut events: EventReader<SpawnCoinEvent>, mut commands: Commands) {
    for event in events.read() {
        commands.spawn((
            Sprite {
                color: Color::srgb(0.95, 0.80, 0.20),
                custom_size: Some(COIN_SIZE),
                ..default()
            },
            Transform::from_translation(to_render(event.pos, Z_COIN)),
            WorldPos::new(event.pos, Z_COIN),
            Coin {
                value: event.value,
                lifespan: Timer::from_seconds(COIN_LIFESPAN_SECS, TimerMode::Once),
            },
        ));
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 3 — magnet_pull
// ──────────────────────────────────────────────────────────────────────

/// Pulls coins inside the magnet radius toward the player. Research gives
/// a small passive radius; the magnet cookie adds a large temporary one.
pub fn magnet_pull(
    time: Res<Time>,
    research_state: Res<ResearchState>,
    research_registry: Res<ResearchRegistry>,
    buffs: Res<ActiveBuffs>,
    player: Query<&WorldPos, (With<Player>, Without<Coin>)>,
    mut coins: Query<&mut WorldPos, With<Coin>>,
) {
    let mut radius =
        research::magnet_level(&research_state, &research_registry) as f32 * MAGNET_RADIUS_PER_LEVEL;
    if buffs.has(BuffType::Magnet) {
        radius += MAGNET_BUFF_RADIUS;
    }
    if radius <= 0.0 {
        return;
    }
    let Ok(player_pos) = player.get_single() else {
        return;
    };

    let step = MAGNET_PULL_SPEED * time.delta_secs();
    for mut coin_pos in coins.iter_mut() {
        let delta = player_pos.pos - coin_pos.pos;
        let distance = delta.length();
        if distance > radius || distance < f32::EPSILON {
            continue;
        }
        coin_pos.pos += delta / distance * step.min(distance);
    }
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 4 — pickup_coins
// ──────────────────────────────────────────────────────────────────────

/// Credits and despawns coins within pickup range of the player.
pub fn pickup_coins(
    mut commands: Commands,
    research_state: Res<ResearchState>,
    research_registry: Res<ResearchRegistry>,
    player: Query<&WorldPos, (With<Player>, Without<Coin>)>,
    coins: Query<(Entity, &WorldPos, &Coin)>,
    mut ledger: ResMut<EconomyLedger>,
    mut floating: EventWriter<FloatingTextEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Ok(player_pos) = player.get_single() else {
        return;
    };
    let multiplier = research::coin_value_multiplier(&research_state, &research_registry);

    for (entity, coin_pos, coin) in coins.iter() {
        if player_pos.pos.distance(coin_pos.pos) > COIN_PICKUP_RADIUS {
            continue;
        }
        let credited = picked_up_value(coin.value, multiplier);
        ledger.add_coins(credited);
        floating.send(FloatingTextEvent {
            pos: coin_pos.pos,
            text: format!("+{}", credited),
            color: Color::srgb(0.95, 0.85, 0.30),
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "coin".to_string(),
        });
        commands.entity(entity).despawn_recursive();
    }
}

/// floor(value × multiplier), never below the coin's face value floor of 1.
pub fn picked_up_value(value: u64, multiplier: f32) -> u64 {
    ((value as f64 * multiplier as f64).floor() as u64).max(1)
}

// ──────────────────────────────────────────────────────────────────────
// SYSTEM 5 — tick_coin_lifespans
// ──────────────────────────────────────────────────────────────────────

/// Expired coins vanish uncollected.
pub fn tick_coin_lifespans(
    time: Res<Time>,
    mut commands: Commands,
    mut coins: Query<(Entity, &mut Coin)>,
) {
    for (entity, mut coin) in coins.iter_mut() {
        coin.lifespan.tick(time.delta());
        if coin.lifespan.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
