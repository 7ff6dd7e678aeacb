//! Persistence coordinator — snapshot save/load, autosave, offline income,
//! and the full game reset.
//!
//! One save slot. Native builds write `saves/save.json` next to the binary
//! (temp file + rename, so a crash mid-write never corrupts the previous
//! save); browser builds use localStorage. A missing or unreadable save
//! means a fresh game, never a crash.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use crate::data;
use crate::shared::*;

pub const SAVE_VERSION: u32 = 1;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "tinselworks_save";

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOT
// ═══════════════════════════════════════════════════════════════════════

/// Everything a session needs to resume. Defaults on every field so a save
/// from an older build deserializes with the missing parts fresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveSnapshot {
    pub version: u32,
    pub saved_at_ms: u64,
    /// Pre-multiplier income per tick at save time, for offline catch-up.
    pub base_income_per_tick: u64,
    pub ledger: EconomyLedger,
    pub workshop: WorkshopState,
    pub research: ResearchState,
    pub buffs: ActiveBuffs,
    pub decorations: DecorationState,
}

fn gather_snapshot(
    ledger: &EconomyLedger,
    workshop: &WorkshopState,
    research: &ResearchState,
    buffs: &ActiveBuffs,
    decorations: &DecorationState,
    buildings: &BuildingRegistry,
) -> SaveSnapshot {
    let base_income: u64 = workshop
        .buildings
        .iter()
        .filter_map(|spot| buildings.get(spot.kind).map(|def| spot.income(def)))
        .sum();
    SaveSnapshot {
        version: SAVE_VERSION,
        saved_at_ms: current_timestamp_ms(),
        base_income_per_tick: base_income,
        ledger: ledger.clone(),
        workshop: workshop.clone(),
        research: research.clone(),
        buffs: buffs.clone(),
        decorations: decorations.clone(),
    }
}

/// Offline catch-up: capped elapsed seconds times the saved base income.
/// Multipliers are deliberately left out; they reward presence.
pub fn offline_income(snapshot: &SaveSnapshot, now_ms: u64) -> (u64, u64) {
    if snapshot.saved_at_ms == 0 || now_ms <= snapshot.saved_at_ms {
        return (0, 0);
    }
    let elapsed_ms = (now_ms - snapshot.saved_at_ms).min(OFFLINE_CAP_MS);
    let elapsed_secs = elapsed_ms / 1000;
    (snapshot.base_income_per_tick * elapsed_secs, elapsed_secs)
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// Guards the one-shot restore: OnEnter(Playing) also fires when a panel
/// closes, and a reset must not resurrect the deleted save.
#[derive(Resource, Debug, Default)]
pub struct SaveRestored(pub bool);

#[derive(Resource, Debug)]
pub struct AutosaveTimer {
    pub timer: Timer,
}

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(Settings::default().autosave_secs, TimerMode::Repeating),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveRestored>()
            .init_resource::<AutosaveTimer>();

        app.add_systems(Startup, load_settings);

        // Restore runs after the data layer seeded fresh state in Loading,
        // and before the grid derives occupancy from the workshop.
        app.add_systems(
            OnEnter(GameState::Playing),
            restore_save.in_set(EnterPlayingSet::Restore),
        );

        app.add_systems(
            Update,
            (
                tick_autosave.run_if(in_state(GameState::Playing)),
                request_save_from_input.run_if(in_state(GameState::Playing)),
                handle_save_request,
                handle_reset,
            ),
        );

        // Closing the window flushes a final snapshot.
        app.add_systems(Last, save_on_exit);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STORAGE BACKENDS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn saves_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("saves")
}

#[cfg(not(target_arch = "wasm32"))]
fn save_path() -> PathBuf {
    saves_directory().join("save.json")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn current_timestamp_ms() -> u64 {
    // UTC wall clock from the JS Date binding. Not monotonic, but
    // `offline_income` already treats a backwards clock as zero elapsed.
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn write_store(json: &str) -> Result<(), String> {
    let dir = saves_directory();
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| format!("Could not create saves directory: {}", e))?;
    }
    let path = save_path();
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_store() -> Result<String, String> {
    let path = save_path();
    if !path.exists() {
        return Err("No save file".to_string());
    }
    fs::read_to_string(&path).map_err(|e| format!("Read failed for {}: {}", path.display(), e))
}

#[cfg(not(target_arch = "wasm32"))]
fn clear_store() {
    let path = save_path();
    if path.exists() {
        if let Err(e) = fs::remove_file(&path) {
            warn!("[Save] Could not delete {}: {}", path.display(), e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or_else(|| "No window".to_string())?
        .local_storage()
        .map_err(|_| "localStorage unavailable".to_string())?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
fn write_store(json: &str) -> Result<(), String> {
    local_storage()?
        .set_item(STORAGE_KEY, json)
        .map_err(|_| "localStorage write failed".to_string())
}

#[cfg(target_arch = "wasm32")]
fn read_store() -> Result<String, String> {
    local_storage()?
        .get_item(STORAGE_KEY)
        .map_err(|_| "localStorage read failed".to_string())?
        .ok_or_else(|| "No save file".to_string())
}

#[cfg(target_arch = "wasm32")]
fn clear_store() {
    if let Ok(storage) = local_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

pub fn write_snapshot(snapshot: &SaveSnapshot) -> Result<(), String> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| format!("Serialization failed: {}", e))?;
    write_store(&json)
}

pub fn read_snapshot() -> Result<SaveSnapshot, String> {
    let json = read_store()?;
    let snapshot: SaveSnapshot =
        serde_json::from_str(&json).map_err(|e| format!("Deserialization failed: {}", e))?;
    if snapshot.version != SAVE_VERSION {
        warn!(
            "[Save] Snapshot version {} (current {}). Loading anyway.",
            snapshot.version, SAVE_VERSION
        );
    }
    Ok(snapshot)
}

// ═══════════════════════════════════════════════════════════════════════
// SETTINGS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(mut settings: ResMut<Settings>, mut autosave: ResMut<AutosaveTimer>) {
    match fs::read_to_string("settings.ron") {
        Ok(text) => match ron::from_str::<Settings>(&text) {
            Ok(loaded) => {
                info!(
                    "[Save] settings.ron loaded (autosave every {:.0}s)",
                    loaded.autosave_secs
                );
                autosave.timer =
                    Timer::from_seconds(loaded.autosave_secs.max(5.0), TimerMode::Repeating);
                *settings = loaded;
            }
            Err(e) => warn!("[Save] settings.ron is invalid, using defaults: {}", e),
        },
        Err(_) => info!("[Save] No settings.ron, using defaults."),
    }
}

#[cfg(target_arch = "wasm32")]
fn load_settings() {
    info!("[Save] Browser build, using default settings.");
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// One-shot restore on first entry to Playing. Applies the snapshot over
/// the freshly seeded state and credits offline income.
#[allow(clippy::too_many_arguments)]
fn restore_save(
    mut restored: ResMut<SaveRestored>,
    mut ledger: ResMut<EconomyLedger>,
    mut workshop: ResMut<WorkshopState>,
    mut research: ResMut<ResearchState>,
    mut buffs: ResMut<ActiveBuffs>,
    mut decorations: ResMut<DecorationState>,
    mut offline_events: EventWriter<OfflineIncomeEvent>,
) {
    if restored.0 {
        return;
    }
    restored.0 = true;

    match read_snapshot() {
        Ok(snapshot) => {
            let (amount, elapsed_secs) = offline_income(&snapshot, current_timestamp_ms());

            *ledger = snapshot.ledger;
            *workshop = snapshot.workshop;
            *research = snapshot.research;
            *buffs = snapshot.buffs;
            *decorations = snapshot.decorations;

            info!(
                "[Save] Restored: {} coins, {} buildings, {} trees",
                ledger.coins,
                workshop.buildings.len(),
                workshop.trees.len()
            );
            if amount > 0 {
                offline_events.send(OfflineIncomeEvent {
                    amount,
                    elapsed_secs,
                });
            }
        }
        Err(e) => {
            info!("[Save] Starting fresh: {}", e);
        }
    }
}

fn tick_autosave(
    time: Res<Time>,
    mut autosave: ResMut<AutosaveTimer>,
    mut requests: EventWriter<SaveRequestEvent>,
) {
    autosave.timer.tick(time.delta());
    if autosave.timer.just_finished() {
        requests.send(SaveRequestEvent);
    }
}

/// F5 saves, F10 wipes everything.
fn request_save_from_input(
    input: Res<PlayerInput>,
    mut saves: EventWriter<SaveRequestEvent>,
    mut resets: EventWriter<ResetGameEvent>,
) {
    if input.quicksave {
        saves.send(SaveRequestEvent);
    }
    if input.reset_game {
        resets.send(ResetGameEvent);
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_save_request(
    mut requests: EventReader<SaveRequestEvent>,
    mut completions: EventWriter<SaveCompleteEvent>,
    ledger: Res<EconomyLedger>,
    workshop: Res<WorkshopState>,
    research: Res<ResearchState>,
    buffs: Res<ActiveBuffs>,
    decorations: Res<DecorationState>,
    buildings: Res<BuildingRegistry>,
) {
    if requests.read().next().is_none() {
        return;
    }
    requests.clear();

    let snapshot = gather_snapshot(
        &ledger,
        &workshop,
        &research,
        &buffs,
        &decorations,
        &buildings,
    );
    match write_snapshot(&snapshot) {
        Ok(()) => {
            info!("[Save] Saved ({} coins).", snapshot.ledger.coins);
            completions.send(SaveCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("[Save] Save FAILED: {}", e);
            completions.send(SaveCompleteEvent {
                success: false,
                error_message: Some(e),
            });
        }
    }
}

/// Writes a last snapshot when the app is quitting. Skipped before the
/// restore ran, so a quit during boot cannot clobber a real save with
/// half-seeded state.
#[allow(clippy::too_many_arguments)]
fn save_on_exit(
    mut exits: EventReader<AppExit>,
    restored: Res<SaveRestored>,
    ledger: Res<EconomyLedger>,
    workshop: Res<WorkshopState>,
    research: Res<ResearchState>,
    buffs: Res<ActiveBuffs>,
    decorations: Res<DecorationState>,
    buildings: Res<BuildingRegistry>,
) {
    if exits.read().next().is_none() {
        return;
    }
    exits.clear();
    if !restored.0 {
        return;
    }

    let snapshot = gather_snapshot(
        &ledger,
        &workshop,
        &research,
        &buffs,
        &decorations,
        &buildings,
    );
    match write_snapshot(&snapshot) {
        Ok(()) => info!("[Save] Exit save written ({} coins).", snapshot.ledger.coins),
        Err(e) => warn!("[Save] Exit save FAILED: {}", e),
    }
}

/// Deletes the save and rewinds every subsystem to a fresh game. Routing
/// back through Loading reseeds the registries and rebuilds the grid.
#[allow(clippy::too_many_arguments)]
fn handle_reset(
    mut events: EventReader<ResetGameEvent>,
    mut ledger: ResMut<EconomyLedger>,
    mut workshop: ResMut<WorkshopState>,
    mut research: ResMut<ResearchState>,
    mut buffs: ResMut<ActiveBuffs>,
    mut decorations: ResMut<DecorationState>,
    mut queue: ResMut<CoinSpawnQueue>,
    research_registry: Res<ResearchRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.clear();

    clear_store();
    *ledger = EconomyLedger::default();
    *workshop = data::fresh_workshop_state();
    *research = data::fresh_research_state(&research_registry);
    *buffs = ActiveBuffs::default();
    *decorations = DecorationState::default();
    queue.pending.clear();

    next_state.set(GameState::Loading);
    info!("[Save] Game reset to a fresh workshop.");
    toasts.send(ToastEvent {
        message: "Workshop reset. Fresh snow, fresh start!".to_string(),
        duration_secs: 3.0,
    });
}
